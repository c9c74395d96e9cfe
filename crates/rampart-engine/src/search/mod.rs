//! Search algorithms, move ordering and the transposition table.

pub mod alphabeta;
pub mod background;
pub mod config;
pub mod control;
pub mod error;
pub mod ordering;
pub mod tt;

use std::fmt;
use std::time::{Duration, Instant};

use rampart_core::{Board, Color, Move};
use tracing::{debug, info, trace};

use alphabeta::{INF, MATE_THRESHOLD, SearchContext, alphabeta};
pub use config::{SearchConfig, SearchLimits};
use control::{CancelToken, SearchControl};
pub use error::SearchError;
use tt::TranspositionTable;

/// Deepest iteration run when the limits name no depth.
pub const MAX_DEPTH: u8 = 64;

/// A score and the line of play that produces it.
///
/// Scores are in centipawns from White's perspective. The line starts with
/// the move to play from the searched position; it is empty at leaves and at
/// checkmate or stalemate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Centipawns, positive = good for White.
    pub score: i32,
    /// Principal line, first move first.
    pub line: Vec<Move>,
}

impl Evaluation {
    /// An evaluation with no moves behind it.
    pub fn leaf(score: i32) -> Self {
        Self { score, line: Vec::new() }
    }

    /// The first move of the line, if any.
    pub fn best_move(&self) -> Option<Move> {
        self.line.first().copied()
    }

    /// `true` if the score announces a forced mate for either side.
    pub fn is_mate(&self) -> bool {
        self.score.abs() > MATE_THRESHOLD
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+})", self.score)?;
        for mv in &self.line {
            write!(f, " {mv}")?;
        }
        Ok(())
    }
}

/// Counters collected while searching. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Main-search nodes visited.
    pub nodes: u64,
    /// Static evaluations computed.
    pub static_evals: u64,
    /// Main-search nodes at the horizon.
    pub leaves: u64,
    /// Quiescence nodes visited.
    pub quiescence_nodes: u64,
    /// Quiescence nodes that stood pat because the extra-ply cap was reached.
    pub quiescence_cap_stops: u64,
    /// Enumerations stopped early by an alpha-beta cutoff.
    pub cutoffs: u64,
    /// Captures skipped (or whole nodes abandoned) by delta pruning.
    pub delta_prunes: u64,
    /// Exact table entries returned directly.
    pub exact_hits: u64,
    /// Bound table entries returned because they would cut here too.
    pub bound_hits: u64,
    /// Table entries whose move was used as an ordering hint.
    pub hint_moves: u64,
    /// Deepest fully completed iteration.
    pub depth: u8,
}

impl Diagnostics {
    /// All nodes visited, main search and quiescence together.
    pub fn total_nodes(&self) -> u64 {
        self.nodes + self.quiescence_nodes
    }
}

/// Outcome of an iterative-deepening search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Result of the deepest completed iteration.
    pub evaluation: Evaluation,
    /// Depth of that iteration.
    pub depth: u8,
    /// Counters accumulated over every iteration, including an abandoned one.
    pub diagnostics: Diagnostics,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl SearchReport {
    /// Move to play, or `None` when the side to move has no legal move.
    pub fn best_move(&self) -> Option<Move> {
        self.evaluation.best_move()
    }
}

/// Iterative-deepening searcher. Owns the transposition table, which
/// persists between searches until [`clear_table`](Self::clear_table).
pub struct Searcher {
    tt: TranspositionTable,
    config: SearchConfig,
}

impl Searcher {
    /// Create a searcher, allocating its table up front.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.table_size, config.min_table_depth),
            config,
        }
    }

    /// The settings this searcher was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The transposition table.
    pub fn table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Clear the transposition table (preserving the allocation).
    pub fn clear_table(&mut self) {
        debug!(occupancy = self.tt.occupancy(), "clearing transposition table");
        self.tt.clear();
    }

    /// Search `board` to exactly `depth` plies.
    ///
    /// Fails with [`SearchError::Cancelled`] as soon as `cancel` fires; the
    /// board is restored either way.
    pub fn evaluate(
        &mut self,
        board: &mut Board,
        depth: u8,
        cancel: &CancelToken,
    ) -> Result<Evaluation, SearchError> {
        let control = SearchControl::new(cancel.clone(), None);
        let mut diagnostics = Diagnostics::default();
        self.evaluate_depth(board, depth, &control, &mut diagnostics)
    }

    fn evaluate_depth(
        &mut self,
        board: &mut Board,
        depth: u8,
        control: &SearchControl,
        diagnostics: &mut Diagnostics,
    ) -> Result<Evaluation, SearchError> {
        let mut ctx = SearchContext {
            tt: &mut self.tt,
            config: &self.config,
            control,
            diagnostics: *diagnostics,
        };
        let maximizing = board.side_to_move() == Color::White;
        let result = alphabeta(board, depth, maximizing, -INF, INF, &mut ctx);
        *diagnostics = ctx.diagnostics;
        result
    }

    /// Run iterative deepening within `limits` until cancelled.
    ///
    /// Returns the deepest completed iteration; fails with
    /// [`SearchError::Cancelled`] only if not even depth 1 completed.
    pub fn search(
        &mut self,
        board: &mut Board,
        limits: SearchLimits,
        cancel: &CancelToken,
    ) -> Result<SearchReport, SearchError> {
        self.search_with(board, limits, cancel, |_, _| {})
    }

    /// Like [`search`](Self::search), calling `on_iter(depth, evaluation)`
    /// after each completed iteration.
    pub fn search_with<F>(
        &mut self,
        board: &mut Board,
        limits: SearchLimits,
        cancel: &CancelToken,
        mut on_iter: F,
    ) -> Result<SearchReport, SearchError>
    where
        F: FnMut(u8, &Evaluation),
    {
        let start = Instant::now();
        let control = SearchControl::new(cancel.clone(), limits.time.map(|t| start + t));
        // Depth 1 always runs, so only cancellation can leave no result
        let max_depth = limits.depth.unwrap_or(MAX_DEPTH).max(1);

        let mut diagnostics = Diagnostics::default();
        let mut completed: Option<(u8, Evaluation)> = None;

        for depth in 1..=max_depth {
            let evaluation = match self.evaluate_depth(board, depth, &control, &mut diagnostics) {
                Ok(evaluation) => evaluation,
                Err(SearchError::Cancelled) => {
                    debug!(depth, "search cancelled, keeping last completed depth");
                    break;
                }
            };

            diagnostics.depth = depth;
            info!(
                depth,
                score = evaluation.score,
                nodes = diagnostics.total_nodes(),
                pv = %evaluation,
                "iteration complete"
            );
            for (i, mv) in evaluation.line.iter().enumerate() {
                trace!(depth, ply = i, %mv, "principal line");
            }
            on_iter(depth, &evaluation);

            // Nothing deeper can change a forced result or a position with no moves
            let settled = evaluation.is_mate() || evaluation.line.is_empty();
            completed = Some((depth, evaluation));
            if settled {
                break;
            }
        }

        let (depth, evaluation) = completed.ok_or(SearchError::Cancelled)?;
        Ok(SearchReport {
            evaluation,
            depth,
            diagnostics,
            elapsed: start.elapsed(),
        })
    }
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("tt", &self.tt)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rampart_core::{Board, generate_legal_moves};

    use super::*;
    use crate::search::alphabeta::MATE_SCORE;

    fn searcher() -> Searcher {
        Searcher::new(SearchConfig { table_size: 65_536, ..SearchConfig::default() })
    }

    fn search_depth(searcher: &mut Searcher, board: &mut Board, depth: u8) -> SearchReport {
        searcher
            .search(board, SearchLimits::depth(depth), &CancelToken::new())
            .unwrap()
    }

    #[test]
    fn depth_1_returns_legal_move() {
        let mut board = Board::starting_position();
        let result = search_depth(&mut searcher(), &mut board, 1);
        let best = result.best_move().expect("should find a move at depth 1");
        assert!(generate_legal_moves(&mut board).contains(best));
    }

    #[test]
    fn finds_mate_in_one() {
        // Scholar's mate setup: White Qh5, Bc4, black king exposed
        let mut board: Board = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
            .parse()
            .unwrap();
        let result = search_depth(&mut searcher(), &mut board, 3);
        assert_eq!(result.best_move().map(|m| m.to_uci()).as_deref(), Some("h5f7"));
        assert_eq!(result.evaluation.score, MATE_SCORE - 1);
        // Deepening stops once the mate is proven.
        assert_eq!(result.depth, 2);
    }

    #[test]
    fn stalemate_returns_zero() {
        // Black king on a8, white king on c7, white queen on b6: black to move, stalemate
        let mut board: Board = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let result = search_depth(&mut searcher(), &mut board, 3);
        assert_eq!(result.evaluation.score, 0, "stalemate should score 0");
        assert_eq!(result.best_move(), None);
    }

    #[test]
    fn mated_black_scores_for_white() {
        // Black king on h8, white queen on g7, white king on f6: black to move, checkmated
        let mut board: Board = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let result = search_depth(&mut searcher(), &mut board, 3);
        assert_eq!(result.evaluation.score, MATE_SCORE);
        assert_eq!(result.best_move(), None);
    }

    #[test]
    fn zero_depth_limit_still_completes_depth_1() {
        let mut board = Board::starting_position();
        let result = search_depth(&mut searcher(), &mut board, 0);
        assert_eq!(result.depth, 1);
        assert!(result.best_move().is_some());
    }

    #[test]
    fn iterative_deepening_calls_callback() {
        let mut board = Board::starting_position();
        let mut depths_seen = Vec::new();
        searcher()
            .search_with(&mut board, SearchLimits::depth(3), &CancelToken::new(), |depth, eval| {
                assert!(!eval.line.is_empty());
                depths_seen.push(depth);
            })
            .unwrap();
        assert_eq!(depths_seen, vec![1, 2, 3]);
    }

    #[test]
    fn search_is_deterministic() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut a: Board = fen.parse().unwrap();
        let mut b: Board = fen.parse().unwrap();
        let first = search_depth(&mut searcher(), &mut a, 3);
        let second = search_depth(&mut searcher(), &mut b, 3);
        assert_eq!(first.evaluation, second.evaluation);
        assert_eq!(first.diagnostics, second.diagnostics);
    }

    #[test]
    fn search_leaves_board_untouched() {
        let mut board = Board::starting_position();
        let before = board.clone();
        let _ = search_depth(&mut searcher(), &mut board, 3);
        assert_eq!(board, before);
    }

    #[test]
    fn cancelled_before_first_depth_is_an_error() {
        let mut board = Board::starting_position();
        let token = CancelToken::new();
        token.cancel();
        let result = searcher().search(&mut board, SearchLimits::default(), &token);
        assert_eq!(result, Err(SearchError::Cancelled));
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn cancellation_keeps_last_completed_depth() {
        let mut board = Board::starting_position();
        let token = CancelToken::new();
        let trigger = token.clone();
        let report = searcher()
            .search_with(&mut board, SearchLimits::depth(20), &token, |depth, _| {
                if depth == 2 {
                    trigger.cancel();
                }
            })
            .unwrap();
        assert_eq!(report.depth, 2);
        assert_eq!(report.diagnostics.depth, 2);
        // Quiescence may extend the line past the nominal depth.
        assert!(report.evaluation.line.len() >= 2);
    }

    #[test]
    fn time_budget_stops_deepening() {
        let mut board = Board::starting_position();
        let report = searcher()
            .search(&mut board, SearchLimits::time(Duration::from_millis(200)), &CancelToken::new())
            .unwrap();
        assert!(report.depth >= 1);
        assert!(report.depth < MAX_DEPTH);
        assert!(report.best_move().is_some());
    }

    #[test]
    fn evaluate_depth_entry_point_propagates_cancel() {
        let mut board = Board::starting_position();
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(searcher().evaluate(&mut board, 2, &token), Err(SearchError::Cancelled));
        let eval = searcher().evaluate(&mut board, 2, &CancelToken::new()).unwrap();
        assert!(eval.line.len() >= 2);
    }

    #[test]
    fn table_fills_and_clears() {
        let mut s = searcher();
        let mut board = Board::starting_position();
        let _ = search_depth(&mut s, &mut board, 3);
        assert!(s.table().occupancy() > 0);
        s.clear_table();
        assert_eq!(s.table().occupancy(), 0);
    }

    #[test]
    fn second_search_reuses_table() {
        let mut s = searcher();
        let mut board = Board::starting_position();
        let first = search_depth(&mut s, &mut board, 3);
        let second = search_depth(&mut s, &mut board, 3);
        assert_eq!(first.evaluation.score, second.evaluation.score);
        assert!(second.diagnostics.exact_hits > 0);
        assert!(second.diagnostics.nodes < first.diagnostics.nodes);
    }

    #[test]
    fn evaluation_display() {
        let eval = Evaluation {
            score: 35,
            line: vec![Move::new(rampart_core::Square::E2, rampart_core::Square::E4)],
        };
        assert_eq!(eval.to_string(), "(+35) e2e4");
        assert_eq!(Evaluation::leaf(-10).to_string(), "(-10)");
    }
}
