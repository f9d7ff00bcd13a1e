//! Check and checkmate.
//!
//! Nothing here is stored on the board. Both questions are answered from scratch each time
//! they are asked, so they cannot go stale after a move.

use crate::board::Board;
use crate::piece::Piece;
use crate::side::Side;
use crate::square::Square;

/// Does any piece of `by_side` threaten `square`?
///
/// Uses attack maps, which never consult king safety, so asking about one king never asks
/// about the other.
///
/// ```
/// use redblue_chess::{is_square_attacked, Board, Side, Square};
///
/// let board = Board::default();
/// // the red pawns on row 7 cover row 6
/// assert!(is_square_attacked(&board, Square::D6, Side::Red));
/// assert!(!is_square_attacked(&board, Square::D5, Side::Red));
/// ```
pub fn is_square_attacked(board: &Board, square: Square, by_side: Side) -> bool {
    board
        .pieces_of(by_side)
        .any(|piece| piece.attacks(board).contains(square))
}

/// Is `king` attacked by the other side?
pub fn is_in_check(board: &Board, king: &Piece) -> bool {
    is_square_attacked(board, king.square, !king.side)
}

/// Is `king` in check with no way out?
///
/// Every move of every piece on the king's side is tried on a copy of the board; the king is
/// mated only if none of them leaves it unattacked. `board` itself is never touched.
pub fn is_checkmate(board: &Board, king: &Piece) -> bool {
    if !is_in_check(board, king) {
        return false;
    }

    !board.pieces_of(king.side).any(|piece| {
        piece
            .destinations(board)
            .any(|dest| board.leaves_king_safe(piece.square, dest))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_builder::BoardBuilder;
    use crate::piece::PieceKind;
    use std::convert::TryInto;

    #[test]
    fn test_fresh_board_has_no_check() {
        let board = Board::default();
        for side in crate::side::ALL_SIDES.iter() {
            let king = board.king(*side).unwrap();
            assert!(!is_in_check(&board, &king));
            assert!(!is_checkmate(&board, &king));
        }
    }

    #[test]
    fn test_adjacent_king_attacks() {
        let board: Board = BoardBuilder::new()
            .piece(Square::E4, PieceKind::King, Side::Blue)
            .piece(Square::E6, PieceKind::King, Side::Red)
            .try_into()
            .unwrap();

        assert!(is_square_attacked(&board, Square::E5, Side::Red));
        assert!(is_square_attacked(&board, Square::E5, Side::Blue));
        assert!(!is_square_attacked(&board, Square::E3, Side::Red));

        let king = board.king(Side::Blue).unwrap();
        assert!(!king.legal_destinations(&board).contains(Square::E5));
        assert!(!king.legal_destinations(&board).contains(Square::D5));
    }

    #[test]
    fn test_pawn_push_is_not_an_attack() {
        let board: Board = BoardBuilder::new()
            .piece(Square::E2, PieceKind::Pawn, Side::Blue)
            .try_into()
            .unwrap();

        assert!(!is_square_attacked(&board, Square::E3, Side::Blue));
        assert!(is_square_attacked(&board, Square::D3, Side::Blue));
        assert!(is_square_attacked(&board, Square::F3, Side::Blue));
    }

    #[test]
    fn test_king_cannot_take_a_defended_piece() {
        let board: Board = BoardBuilder::new()
            .piece(Square::E1, PieceKind::King, Side::Blue)
            .piece(Square::E2, PieceKind::Queen, Side::Red)
            .piece(Square::E8, PieceKind::Rook, Side::Red)
            .piece(Square::A8, PieceKind::King, Side::Red)
            .try_into()
            .unwrap();
        let king = board.king(Side::Blue).unwrap();

        assert!(is_in_check(&board, &king));
        assert!(!king.legal_destinations(&board).contains(Square::E2));
        assert!(is_checkmate(&board, &king));
    }

    #[test]
    fn test_capture_of_the_checker_saves_the_king() {
        // same net as above, but a blue knight can take the queen
        let board: Board = BoardBuilder::new()
            .piece(Square::E1, PieceKind::King, Side::Blue)
            .piece(Square::C3, PieceKind::Knight, Side::Blue)
            .piece(Square::E2, PieceKind::Queen, Side::Red)
            .piece(Square::E8, PieceKind::Rook, Side::Red)
            .piece(Square::A8, PieceKind::King, Side::Red)
            .try_into()
            .unwrap();
        let king = board.king(Side::Blue).unwrap();
        let before = board;

        assert!(is_in_check(&board, &king));
        assert!(!is_checkmate(&board, &king));
        assert_eq!(board, before);
    }

    #[test]
    fn test_moving_along_the_checking_ray_is_not_an_escape() {
        // the king cannot step away from the rook along the rook's own line
        let board: Board = BoardBuilder::new()
            .piece(Square::E4, PieceKind::King, Side::Blue)
            .piece(Square::A4, PieceKind::Rook, Side::Red)
            .piece(Square::H8, PieceKind::King, Side::Red)
            .try_into()
            .unwrap();
        let king = board.king(Side::Blue).unwrap();

        assert!(!king.legal_destinations(&board).contains(Square::F4));
        assert!(king.legal_destinations(&board).contains(Square::E5));
    }
}
