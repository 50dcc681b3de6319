//! Conversion between standard UCI move strings and cozy-chess moves

use chess_common::{Promotion, UciMove};
use cozy_chess::{Board, File, Move, Piece};

/// Convert a standard UCI move into the matching cozy-chess move.
///
/// UCI uses standard notation for castling (king moves 2 squares): e1g1, e1c1.
/// cozy_chess uses king-to-rook notation: e1h1, e1a1. A two-square king move is
/// rewritten only when the resulting king-to-rook move is in `legal_moves`.
pub fn to_cozy_move(board: &Board, mv: UciMove, legal_moves: &[Move]) -> Move {
    let plain = Move {
        from: mv.from.into(),
        to: mv.to.into(),
        promotion: mv.promotion.map(Piece::from),
    };

    let is_king = board.piece_on(plain.from) == Some(Piece::King);
    let file_distance = (plain.from.file() as i8 - plain.to.file() as i8).abs();
    if !is_king || file_distance != 2 || plain.promotion.is_some() {
        return plain;
    }

    let rook_file = if (plain.to.file() as u8) > (plain.from.file() as u8) {
        File::H
    } else {
        File::A
    };
    let castle = Move {
        from: plain.from,
        to: cozy_chess::Square::new(rook_file, plain.from.rank()),
        promotion: None,
    };

    if legal_moves.contains(&castle) {
        castle
    } else {
        plain
    }
}

/// Convert a cozy-chess move into standard UCI form.
///
/// A king "capturing" its own rook is castling and is reported as the king's
/// two-square move (e1h1 -> e1g1, e8a8 -> e8c8).
pub fn to_uci_move(board: &Board, mv: Move) -> UciMove {
    let side = board.side_to_move();
    let is_castle = board.piece_on(mv.from) == Some(Piece::King)
        && board.colors(side).has(mv.to);

    let to = if is_castle {
        let file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
            File::G
        } else {
            File::C
        };
        cozy_chess::Square::new(file, mv.from.rank())
    } else {
        mv.to
    };

    let uci = UciMove::new(mv.from.into(), to.into());
    match mv.promotion.and_then(|p| Promotion::try_from(p).ok()) {
        Some(promotion) => uci.with_promotion(promotion),
        None => uci,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Game, STARTING_FEN};
    use proptest::prelude::*;

    fn legal(board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        board.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }

    const CASTLE_READY: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn test_kingside_castle_converts_both_ways() {
        let board: Board = CASTLE_READY.parse().unwrap();
        let legal_moves = legal(&board);
        let uci: UciMove = "e1g1".parse().unwrap();

        let cozy = to_cozy_move(&board, uci, &legal_moves);
        assert_eq!(cozy.to, cozy_chess::Square::H1);
        assert_eq!(to_uci_move(&board, cozy), uci);
    }

    #[test]
    fn test_queenside_castle_converts_both_ways() {
        let board: Board = CASTLE_READY.parse().unwrap();
        let legal_moves = legal(&board);
        let uci: UciMove = "e1c1".parse().unwrap();

        let cozy = to_cozy_move(&board, uci, &legal_moves);
        assert_eq!(cozy.to, cozy_chess::Square::A1);
        assert_eq!(to_uci_move(&board, cozy).to_string(), "e1c1");
    }

    #[test]
    fn test_rook_two_square_move_is_not_castling() {
        // Rook on e1 can slide to g1; it must not be rewritten to e1h1.
        let board: Board = "k7/8/8/8/8/8/8/K3R3 w - - 0 1".parse().unwrap();
        let legal_moves = legal(&board);
        let uci: UciMove = "e1g1".parse().unwrap();

        let cozy = to_cozy_move(&board, uci, &legal_moves);
        assert_eq!(cozy.to, cozy_chess::Square::G1);
        assert!(legal_moves.contains(&cozy));
    }

    #[test]
    fn test_promotion_is_preserved() {
        let board: Board = "8/4P3/8/8/8/8/k7/4K3 w - - 0 1".parse().unwrap();
        let legal_moves = legal(&board);
        let uci: UciMove = "e7e8q".parse().unwrap();

        let cozy = to_cozy_move(&board, uci, &legal_moves);
        assert_eq!(cozy.promotion, Some(Piece::Queen));
        assert!(legal_moves.contains(&cozy));
        assert_eq!(to_uci_move(&board, cozy), uci);
    }

    proptest! {
        #[test]
        fn prop_random_walk_moves_convert_both_ways(picks in prop::collection::vec(any::<usize>(), 0..60)) {
            let mut game = Game::default();
            for pick in picks {
                let moves = game.legal_moves_uci();
                if moves.is_empty() {
                    break;
                }
                let board = game.position().clone();
                let cozy_legal = legal(&board);
                prop_assert_eq!(moves.len(), cozy_legal.len());
                for mv in &moves {
                    let cozy = to_cozy_move(&board, *mv, &cozy_legal);
                    prop_assert!(cozy_legal.contains(&cozy), "{} has no cozy counterpart", mv);
                    prop_assert_eq!(to_uci_move(&board, cozy), *mv);
                }
                game.play(moves[pick % moves.len()]).unwrap();
            }

            let replayed = Game::replay(STARTING_FEN, game.played()).unwrap();
            prop_assert_eq!(replayed.to_fen(), game.to_fen());
        }
    }
}
