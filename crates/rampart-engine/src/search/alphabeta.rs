//! Alpha-beta minimax with quiescence.
//!
//! Scores are from White's perspective throughout: White maximizes, Black
//! minimizes, and the role flips at every ply. The board is mutated in place
//! and restored by `undo` before each call returns, including on
//! cancellation.

use rampart_core::{Board, generate_ordered_moves, is_in_check};

use crate::eval::evaluate;
use crate::search::control::SearchControl;
use crate::search::error::SearchError;
use crate::search::ordering::{order_captures, order_moves};
use crate::search::tt::{EntryKind, TranspositionTable, TtEntry};
use crate::search::{Diagnostics, Evaluation, SearchConfig};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Score of a checkmated position, signed against the mated side.
pub const MATE_SCORE: i32 = 100_000;

/// Scores beyond this magnitude indicate a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Move a mate score one step toward zero as it passes up a ply, so a mate
/// found nearer the root scores better than a distant one.
#[inline]
pub(crate) fn age_mate(score: i32) -> i32 {
    if score > MATE_THRESHOLD {
        score - 1
    } else if score < -MATE_THRESHOLD {
        score + 1
    } else {
        score
    }
}

/// Everything a recursive call needs besides the board and the window.
pub(crate) struct SearchContext<'a> {
    pub(crate) tt: &'a mut TranspositionTable,
    pub(crate) config: &'a SearchConfig,
    pub(crate) control: &'a SearchControl,
    pub(crate) diagnostics: Diagnostics,
}

impl SearchContext<'_> {
    fn record(&mut self, board: &Board, depth: u8, kind: EntryKind, result: &Evaluation) {
        if !self.config.use_transpositions {
            return;
        }
        self.tt.put(TtEntry {
            hash: board.hash(),
            depth,
            age: board.fullmove_number(),
            kind,
            result: result.clone(),
        });
    }
}

/// `true` if `score` already settles the node for the side to move: it is
/// at least `beta` for the maximizer or at most `alpha` for the minimizer.
#[inline]
fn fails_high(maximizing: bool, score: i32, alpha: i32, beta: i32) -> bool {
    if maximizing { score >= beta } else { score <= alpha }
}

/// `true` if `score` cannot improve on the bound the side to move already has.
#[inline]
fn fails_low(maximizing: bool, score: i32, alpha: i32, beta: i32) -> bool {
    if maximizing { score <= alpha } else { score >= beta }
}

/// Alpha-beta search to `depth` plies with the window `(alpha, beta)`.
///
/// Returns the node's score and the principal line from this position.
pub(crate) fn alphabeta(
    board: &mut Board,
    depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_>,
) -> Result<Evaluation, SearchError> {
    ctx.diagnostics.nodes += 1;
    ctx.control
        .check(ctx.diagnostics.nodes + ctx.diagnostics.quiescence_nodes)?;

    // Probe transposition table
    let mut principal = None;
    if ctx.config.use_transpositions
        && let Some(entry) = ctx.tt.get(board.hash())
    {
        if entry.depth >= depth {
            let score = entry.result.score;
            match entry.kind {
                EntryKind::Exact => {
                    ctx.diagnostics.exact_hits += 1;
                    return Ok(entry.result.clone());
                }
                EntryKind::BetaCutoff if fails_high(maximizing, score, alpha, beta) => {
                    ctx.diagnostics.bound_hits += 1;
                    return Ok(entry.result.clone());
                }
                EntryKind::FailLow if fails_low(maximizing, score, alpha, beta) => {
                    ctx.diagnostics.bound_hits += 1;
                    return Ok(entry.result.clone());
                }
                _ => {}
            }
        }
        // Not usable as a score, but the move is still a good first guess
        if let Some(&mv) = entry.result.line.first() {
            ctx.diagnostics.hint_moves += 1;
            principal = Some(mv);
        }
    }

    // Leaf node
    if depth == 0 {
        ctx.diagnostics.leaves += 1;
        if ctx.config.use_quiescence {
            return quiescence(board, ctx.config.quiescence_max_depth, maximizing, alpha, beta, ctx);
        }
        ctx.diagnostics.static_evals += 1;
        let result = Evaluation::leaf(evaluate(board, ctx.config));
        ctx.record(board, 0, EntryKind::Exact, &result);
        return Ok(result);
    }

    let moves = generate_ordered_moves(board, Some(&order_moves), principal);

    // No legal moves: checkmate or stalemate
    if moves.is_empty() {
        let score = if !is_in_check(board) {
            0
        } else if maximizing {
            -MATE_SCORE
        } else {
            MATE_SCORE
        };
        return Ok(Evaluation::leaf(score));
    }

    let (alpha0, beta0) = (alpha, beta);
    let mut best = Evaluation::leaf(if maximizing { -INF } else { INF });
    let mut cut = false;

    for mv in moves {
        board.make_move(mv);
        let child = alphabeta(board, depth - 1, !maximizing, alpha, beta, ctx);
        board.undo();
        let mut child = child?;
        child.score = age_mate(child.score);

        let improves = if maximizing { child.score > best.score } else { child.score < best.score };
        if !improves {
            continue;
        }
        child.line.insert(0, mv);
        best = child;

        if maximizing && best.score > alpha {
            alpha = best.score;
        } else if !maximizing && best.score < beta {
            beta = best.score;
        } else {
            continue;
        }
        if beta <= alpha {
            ctx.diagnostics.cutoffs += 1;
            cut = true;
            break;
        }
    }

    let kind = if cut {
        EntryKind::BetaCutoff
    } else if fails_low(maximizing, best.score, alpha0, beta0) {
        EntryKind::FailLow
    } else {
        EntryKind::Exact
    };
    ctx.record(board, depth, kind, &best);

    Ok(best)
}

/// Capture-only search past the horizon, for at most `remaining` more plies.
///
/// The static evaluation is a floor (or ceiling, for the minimizer): the side
/// to move may always decline every capture and stand pat.
pub(crate) fn quiescence(
    board: &mut Board,
    remaining: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_>,
) -> Result<Evaluation, SearchError> {
    ctx.diagnostics.quiescence_nodes += 1;
    ctx.control
        .check(ctx.diagnostics.nodes + ctx.diagnostics.quiescence_nodes)?;

    let mut baseline = None;
    if ctx.config.use_transpositions
        && let Some(entry) = ctx.tt.get(board.hash())
    {
        let score = entry.result.score;
        if entry.depth == 0 {
            // A static evaluation: reuse it as the baseline
            baseline = Some(score);
        } else {
            match entry.kind {
                EntryKind::Exact => {
                    ctx.diagnostics.exact_hits += 1;
                    return Ok(entry.result.clone());
                }
                EntryKind::BetaCutoff if fails_high(maximizing, score, alpha, beta) => {
                    ctx.diagnostics.bound_hits += 1;
                    return Ok(entry.result.clone());
                }
                EntryKind::FailLow if fails_low(maximizing, score, alpha, beta) => {
                    ctx.diagnostics.bound_hits += 1;
                    return Ok(entry.result.clone());
                }
                _ => {}
            }
        }
    }

    let base = match baseline {
        Some(score) => score,
        None => {
            ctx.diagnostics.static_evals += 1;
            let score = evaluate(board, ctx.config);
            ctx.record(board, 0, EntryKind::Quiescence, &Evaluation::leaf(score));
            score
        }
    };

    // Stand pat
    if fails_high(maximizing, base, alpha, beta) {
        return Ok(Evaluation::leaf(base));
    }

    if remaining == 0 {
        ctx.diagnostics.quiescence_cap_stops += 1;
        return Ok(Evaluation::leaf(base));
    }

    // Minimum material a capture must win to move the bound
    let margin = ctx.config.delta_margin;
    let mut delta = if maximizing {
        if base > alpha {
            alpha = base;
            0
        } else {
            alpha - base - margin
        }
    } else if base < beta {
        beta = base;
        0
    } else {
        base - beta - margin
    };

    if delta > ctx.config.delta_cutoff {
        ctx.diagnostics.delta_prunes += 1;
        return Ok(Evaluation::leaf(base));
    }

    let moves = generate_ordered_moves(board, Some(&order_captures), None);
    let mut best = Evaluation::leaf(base);

    for mv in moves {
        if mv.priority() < delta {
            ctx.diagnostics.delta_prunes += 1;
            continue;
        }

        board.make_move(mv);
        let child = quiescence(board, remaining - 1, !maximizing, alpha, beta, ctx);
        board.undo();
        let mut child = child?;
        child.score = age_mate(child.score);

        let improves = if maximizing { child.score > best.score } else { child.score < best.score };
        if !improves {
            continue;
        }
        child.line.insert(0, mv);
        best = child;

        if maximizing && best.score > alpha {
            alpha = best.score;
            delta = alpha - base - margin;
        } else if !maximizing && best.score < beta {
            beta = best.score;
            delta = base - beta - margin;
        } else {
            continue;
        }
        if beta <= alpha {
            ctx.diagnostics.cutoffs += 1;
            break;
        }
    }

    Ok(best)
}
