//! Integration tests for the searcher.
//!
//! Verifies correctness (legal moves, mate detection, agreement with a
//! plain minimax) and robustness (cancellation, background threads, table
//! reuse) through the public API only.

use std::time::Duration;

use rampart_core::{Board, Color, Move, generate_legal_moves, is_in_check};
use rampart_engine::{
    CancelToken, MATE_SCORE, SearchConfig, SearchError, SearchLimits, Searcher, evaluate,
    spawn_search,
};

const SCHOLARS_MATE_FEN: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

const SICILIAN_FEN: &str =
    "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";

const RUY_LOPEZ_FEN: &str =
    "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3";

const ENDGAME_FEN: &str =
    "8/8/8/3k4/8/3K4/4P3/8 w - - 0 1";

fn small_config() -> SearchConfig {
    SearchConfig { table_size: 65_536, ..SearchConfig::default() }
}

/// Helper: run a depth-limited search on `fen` with a fresh searcher.
fn search_fen(fen: &str, depth: u8, config: SearchConfig) -> rampart_engine::SearchReport {
    let mut board: Board = fen.parse().unwrap();
    Searcher::new(config)
        .search(&mut board, SearchLimits::depth(depth), &CancelToken::new())
        .unwrap()
}

/// Full-width minimax from White's perspective with mate aging.
fn minimax(board: &mut Board, depth: u8, config: &SearchConfig) -> i32 {
    let maximizing = board.side_to_move() == Color::White;
    if depth == 0 {
        return evaluate(board, config);
    }
    let moves = generate_legal_moves(board);
    if moves.is_empty() {
        return match (is_in_check(board), maximizing) {
            (false, _) => 0,
            (true, true) => -MATE_SCORE,
            (true, false) => MATE_SCORE,
        };
    }
    let scores = moves.into_iter().map(|mv| {
        board.make_move(mv);
        let score = minimax(board, depth - 1, config);
        board.undo();
        match score {
            s if s > MATE_SCORE - 1000 => s - 1,
            s if s < -MATE_SCORE + 1000 => s + 1,
            s => s,
        }
    });
    let best = if maximizing { scores.max() } else { scores.min() };
    best.unwrap_or(0)
}

// ── Basic correctness ─────────────────────────────────────────────────────────

#[test]
fn returns_legal_move_in_common_openings() {
    for fen in [SICILIAN_FEN, RUY_LOPEZ_FEN, ENDGAME_FEN] {
        let report = search_fen(fen, 3, small_config());
        let mv = report.best_move().expect("a move should be found");
        let mut board: Board = fen.parse().unwrap();
        assert!(generate_legal_moves(&mut board).contains(mv), "{mv} illegal in {fen}");
    }
}

#[test]
fn finds_scholars_mate() {
    let report = search_fen(SCHOLARS_MATE_FEN, 4, small_config());
    assert_eq!(report.best_move().map(Move::to_uci).as_deref(), Some("h5f7"));
    assert!(report.evaluation.is_mate());
    assert!(report.evaluation.score > 0, "mate should favour White");
}

#[test]
fn pawn_endgame_favours_white() {
    let report = search_fen(ENDGAME_FEN, 4, small_config());
    assert!(report.evaluation.score > 0, "score {}", report.evaluation.score);
}

#[test]
fn alphabeta_root_equals_minimax() {
    let config = SearchConfig {
        use_transpositions: false,
        use_quiescence: false,
        table_size: 1,
        ..SearchConfig::default()
    };
    for fen in [SICILIAN_FEN, RUY_LOPEZ_FEN, ENDGAME_FEN] {
        let mut board: Board = fen.parse().unwrap();
        let expected = minimax(&mut board, 3, &config);
        let mut searcher = Searcher::new(config.clone());
        let eval = searcher.evaluate(&mut board, 3, &CancelToken::new()).unwrap();
        assert_eq!(eval.score, expected, "{fen}");
    }
}

#[test]
fn deeper_iterations_use_table_hints() {
    let report = search_fen(SICILIAN_FEN, 3, small_config());
    assert_eq!(report.depth, 3);
    assert!(report.diagnostics.hint_moves > 0);

    let plain = SearchConfig { use_transpositions: false, ..small_config() };
    let report = search_fen(SICILIAN_FEN, 3, plain);
    assert_eq!(report.diagnostics.hint_moves, 0);
    assert_eq!(report.diagnostics.exact_hits + report.diagnostics.bound_hits, 0);
}

#[test]
fn deterministic_across_runs() {
    let a = search_fen(RUY_LOPEZ_FEN, 4, small_config());
    let b = search_fen(RUY_LOPEZ_FEN, 4, small_config());
    assert_eq!(a.evaluation, b.evaluation);
    assert_eq!(a.depth, b.depth);
}

// ── Robustness ────────────────────────────────────────────────────────────────

#[test]
fn background_search_with_time_budget() {
    let board: Board = SICILIAN_FEN.parse().unwrap();
    let handle = spawn_search(
        Searcher::new(small_config()),
        board,
        SearchLimits::time(Duration::from_millis(300)),
    );
    let (_, result) = handle.join();
    let report = result.unwrap();
    assert!(report.depth >= 1);
    assert!(report.best_move().is_some());
}

#[test]
fn background_search_cancel_is_prompt() {
    let handle = spawn_search(
        Searcher::new(small_config()),
        Board::starting_position(),
        SearchLimits::default(),
    );
    std::thread::sleep(Duration::from_millis(100));
    handle.cancel();
    let (_, result) = handle.join();
    match result {
        Ok(report) => assert!(report.depth >= 1),
        Err(e) => assert_eq!(e, SearchError::Cancelled),
    }
}

#[test]
fn pre_cancelled_token_returns_cancelled() {
    let mut board = Board::starting_position();
    let token = CancelToken::new();
    token.cancel();
    let result = Searcher::new(small_config()).search(&mut board, SearchLimits::depth(3), &token);
    assert_eq!(result, Err(SearchError::Cancelled));
}
