//! Static evaluation: material plus piece-square tables.

pub mod material;
pub mod pst;

use rampart_core::{Board, Color, PieceKind};

use crate::search::SearchConfig;

/// Evaluate the board statically.
///
/// Returns a centipawn score from White's perspective (positive = good for
/// White), independent of the side to move. The king uses the endgame table
/// once non-king material on the board drops below
/// [`SearchConfig::endgame_material`].
pub fn evaluate(board: &Board, config: &SearchConfig) -> i32 {
    let material = material::material(board);
    let endgame = material.total < config.endgame_material;

    let mut score = material.balance;
    for color in [Color::White, Color::Black] {
        for kind in PieceKind::ALL {
            for &sq in board.pieces(kind, color) {
                score += pst::pst_value(kind, color, sq, endgame);
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use rampart_core::Board;

    use super::evaluate;
    use crate::search::SearchConfig;

    fn eval(fen: &str) -> i32 {
        let board: Board = fen.parse().unwrap();
        evaluate(&board, &SearchConfig::default())
    }

    #[test]
    fn starting_position_is_zero() {
        let config = SearchConfig::default();
        assert_eq!(evaluate(&Board::starting_position(), &config), 0);
    }

    #[test]
    fn side_to_move_does_not_matter() {
        let fen_w = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let fen_b = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 2 3";
        assert_eq!(eval(fen_w), eval(fen_b));
    }

    #[test]
    fn color_mirror_negates_score() {
        // Same structure with colors swapped and ranks flipped.
        let white = eval("4k3/8/8/8/3N4/8/PP6/4K3 w - - 0 1");
        let black = eval("4k3/pp6/8/3n4/8/8/8/4K3 b - - 0 1");
        assert!(white > 0);
        assert_eq!(white, -black);
    }

    #[test]
    fn material_dominates() {
        assert!(eval("4k3/8/8/8/8/8/8/R3K3 w - - 0 1") > 400);
        assert!(eval("q3k3/8/8/8/8/8/8/4K3 w - - 0 1") < -800);
    }

    #[test]
    fn endgame_king_table_kicks_in() {
        // Bare kings: the central king scores better than the cornered one.
        let central = eval("k7/8/8/8/4K3/8/8/8 w - - 0 1");
        let cornered = eval("k7/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(central > cornered);

        // With enough material on the board the middlegame table prefers the corner.
        let config = SearchConfig { endgame_material: 0, ..SearchConfig::default() };
        let central: Board = "k7/8/8/8/4K3/8/8/8 w - - 0 1".parse().unwrap();
        let cornered: Board = "k7/8/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
        assert!(evaluate(&central, &config) < evaluate(&cornered, &config));
    }
}
