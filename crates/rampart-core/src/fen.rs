//! FEN string parsing and serialization for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist::ZOBRIST;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let &[placement, color, castling, en_passant, halfmove, fullmove] = fields.as_slice()
        else {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        };

        let mut board = Board::empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount {
                found: ranks.len(),
            });
        }

        for (rank_index, rank_str) in ranks.iter().enumerate() {
            // FEN ranks go from 8 to 1 (top to bottom)
            let rank = 7 - rank_index as u8;
            let mut file: usize = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file += digit as usize;
                    continue;
                }

                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar {
                    character: c,
                })?;
                if file >= 8 {
                    return Err(FenError::BadRankLength {
                        rank_index,
                        length: file + 1,
                    });
                }
                board.place(piece, Square::new(rank, file as u8));
                file += 1;
            }

            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file,
                });
            }
        }

        let side_to_move = Color::from_fen(color).ok_or_else(|| FenError::InvalidColor {
            found: color.to_string(),
        })?;
        board.set_side_to_move(side_to_move);

        board.set_castling(CastleRights::from_fen(castling)?);

        let en_passant = if en_passant == "-" {
            None
        } else {
            // The square just crossed by the opponent's double push: on the
            // mover's sixth rank, with the enemy pawn just beyond it.
            let enemy_pawn = Piece::new(PieceKind::Pawn, !side_to_move);
            let ep_rank = match side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            let sq = Square::from_algebraic(en_passant)
                .filter(|sq| sq.rank() == ep_rank)
                .filter(|sq| board.piece_at(sq.offset(-side_to_move.forward())) == Some(enemy_pawn))
                .ok_or_else(|| FenError::InvalidEnPassant {
                    found: en_passant.to_string(),
                })?;
            Some(sq)
        };
        board.set_en_passant(en_passant);

        board.set_halfmove_clock(halfmove.parse::<u16>().map_err(|_| {
            FenError::InvalidMoveCounter {
                field: "halfmove clock",
                found: halfmove.to_string(),
            }
        })?);

        let fullmove_number = fullmove
            .parse::<u16>()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| FenError::InvalidMoveCounter {
                field: "fullmove number",
                found: fullmove.to_string(),
            })?;
        board.set_fullmove_number(fullmove_number);

        board.set_hash(ZOBRIST.hash(&board));
        board.validate()?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty_count = 0u8;

            for file in 0u8..8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castling())?;

        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
