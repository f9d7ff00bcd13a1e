use crate::bitboard::{BitBoard, EMPTY};
use crate::board::Board;
use crate::movegen::{MoveList, SquareAndBitBoard};
use crate::piece::{Piece, PieceKind};
use crate::side::Side;

/// Unit steps along the four diagonals, as (columns, rows).
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Unit steps along the four orthogonals, as (columns, rows).
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// One move rule per kind of piece.
///
/// `pseudo_legals` is the geometric pattern: where the piece could go if its own king did not
/// matter. `attacks` is what the piece threatens, which is what check detection looks at.
pub trait PieceType {
    fn into_piece() -> PieceKind;
    fn pseudo_legals(board: &Board, piece: &Piece) -> BitBoard;
    fn attacks(board: &Board, piece: &Piece) -> BitBoard;

    #[inline]
    fn is(kind: PieceKind) -> bool {
        kind == Self::into_piece()
    }

    /// Push the legal moves of every `side` piece of this kind.
    fn legals(movelist: &mut MoveList, board: &Board, side: Side) {
        for piece in board.pieces_of(side).filter(|p| Self::is(p.kind)) {
            let moves = piece.legal_destinations(board);
            if !moves.is_empty() {
                movelist.push(SquareAndBitBoard::new(piece.square, moves));
            }
        }
    }
}

pub struct PawnType;
pub struct BishopType;
pub struct KnightType;
pub struct RookType;
pub struct QueenType;
pub struct KingType;

/// Walk each direction until the edge of the board or the first occupied square.
///
/// An opposing piece ends the ray and is included. A friendly piece ends the ray and is
/// included only when `include_friendly` is set (attack maps).
fn slide(
    board: &Board,
    piece: &Piece,
    directions: &[(i8, i8)],
    include_friendly: bool,
) -> BitBoard {
    let mut result = EMPTY;
    for &(dc, dr) in directions {
        let mut current = piece.square;
        while let Some(next) = current.offset(dc, dr) {
            match board.piece_at(next) {
                None => result.insert(next),
                Some(blocker) => {
                    if blocker.side != piece.side || include_friendly {
                        result.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    result
}

/// Fixed offsets, each checked on its own. Nothing in between can block.
fn leap(board: &Board, piece: &Piece, offsets: &[(i8, i8)], include_friendly: bool) -> BitBoard {
    offsets
        .iter()
        .filter_map(|&(dc, dr)| piece.square.offset(dc, dr))
        .filter(|&dest| match board.piece_at(dest) {
            None => true,
            Some(occupant) => occupant.side != piece.side || include_friendly,
        })
        .collect()
}

impl PawnType {
    /// The two forward diagonals, occupied or not.
    fn diagonals(piece: &Piece) -> BitBoard {
        [-1, 1]
            .iter()
            .filter_map(|&dc| piece.square.offset(dc, piece.side.forward()))
            .collect()
    }

    /// The en passant landing square available to this pawn, if any.
    ///
    /// The board remembers the pawn that just made its double step. A pawn standing right
    /// beside it on the same row may take it by moving to the square it skipped over.
    pub fn en_passant_target(board: &Board, piece: &Piece) -> Option<crate::square::Square> {
        let victim_sq = board.en_passant()?;
        if victim_sq.row() != piece.square.row()
            || (victim_sq.column() as i8 - piece.square.column() as i8).abs() != 1
        {
            return None;
        }
        let victim = board.piece_at(victim_sq)?;
        if victim.kind != PieceKind::Pawn || victim.side == piece.side {
            return None;
        }
        let dest = victim_sq.offset(0, piece.side.forward())?;
        if board.piece_at(dest).is_some() {
            return None;
        }
        Some(dest)
    }
}

impl PieceType for PawnType {
    fn into_piece() -> PieceKind {
        PieceKind::Pawn
    }

    fn pseudo_legals(board: &Board, piece: &Piece) -> BitBoard {
        let forward = piece.side.forward();
        let mut moves = EMPTY;

        if let Some(one) = piece.square.offset(0, forward) {
            if board.piece_at(one).is_none() {
                moves.insert(one);

                if !piece.moved && piece.square.row() == piece.side.pawn_row() {
                    if let Some(two) = one.offset(0, forward) {
                        if board.piece_at(two).is_none() {
                            moves.insert(two);
                        }
                    }
                }
            }
        }

        // diagonals are capture-only
        for dest in Self::diagonals(piece) {
            if let Some(occupant) = board.piece_at(dest) {
                if occupant.side != piece.side {
                    moves.insert(dest);
                }
            }
        }

        if let Some(dest) = Self::en_passant_target(board, piece) {
            moves.insert(dest);
        }

        moves
    }

    fn attacks(_board: &Board, piece: &Piece) -> BitBoard {
        Self::diagonals(piece)
    }
}

impl PieceType for BishopType {
    fn into_piece() -> PieceKind {
        PieceKind::Bishop
    }

    fn pseudo_legals(board: &Board, piece: &Piece) -> BitBoard {
        slide(board, piece, &DIAGONALS, false)
    }

    fn attacks(board: &Board, piece: &Piece) -> BitBoard {
        slide(board, piece, &DIAGONALS, true)
    }
}

impl PieceType for KnightType {
    fn into_piece() -> PieceKind {
        PieceKind::Knight
    }

    fn pseudo_legals(board: &Board, piece: &Piece) -> BitBoard {
        leap(board, piece, &KNIGHT_OFFSETS, false)
    }

    fn attacks(board: &Board, piece: &Piece) -> BitBoard {
        leap(board, piece, &KNIGHT_OFFSETS, true)
    }
}

impl PieceType for RookType {
    fn into_piece() -> PieceKind {
        PieceKind::Rook
    }

    fn pseudo_legals(board: &Board, piece: &Piece) -> BitBoard {
        slide(board, piece, &ORTHOGONALS, false)
    }

    fn attacks(board: &Board, piece: &Piece) -> BitBoard {
        slide(board, piece, &ORTHOGONALS, true)
    }
}

impl PieceType for QueenType {
    fn into_piece() -> PieceKind {
        PieceKind::Queen
    }

    fn pseudo_legals(board: &Board, piece: &Piece) -> BitBoard {
        slide(board, piece, &DIAGONALS, false) | slide(board, piece, &ORTHOGONALS, false)
    }

    fn attacks(board: &Board, piece: &Piece) -> BitBoard {
        slide(board, piece, &DIAGONALS, true) | slide(board, piece, &ORTHOGONALS, true)
    }
}

/// Raw king steps. Whether a step walks into check is decided by `Piece::legal_destinations`,
/// and castling is its own operation (see `castling`).
impl PieceType for KingType {
    fn into_piece() -> PieceKind {
        PieceKind::King
    }

    fn pseudo_legals(board: &Board, piece: &Piece) -> BitBoard {
        leap(board, piece, &KING_OFFSETS, false)
    }

    fn attacks(board: &Board, piece: &Piece) -> BitBoard {
        leap(board, piece, &KING_OFFSETS, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_builder::BoardBuilder;
    use crate::square::Square;
    use std::collections::HashSet;
    use std::convert::TryInto;

    fn squares(bb: BitBoard) -> HashSet<Square> {
        bb.collect()
    }

    #[test]
    fn test_kind_tags() {
        assert!(PawnType::is(PieceKind::Pawn));
        assert!(!RookType::is(PieceKind::Queen));
        assert_eq!(QueenType::into_piece(), PieceKind::Queen);
        assert_eq!(KingType::into_piece(), PieceKind::King);
    }

    #[test]
    fn test_pawn_attacks_empty_diagonals() {
        let board: Board = BoardBuilder::new()
            .piece(Square::D5, PieceKind::Pawn, Side::Red)
            .try_into()
            .unwrap();
        let pawn = board.piece_at(Square::D5).unwrap();

        // red plays down the board
        assert_eq!(
            squares(PawnType::attacks(&board, &pawn)),
            [Square::C4, Square::E4].into_iter().collect()
        );
        assert_eq!(
            squares(PawnType::pseudo_legals(&board, &pawn)),
            [Square::D4].into_iter().collect()
        );
    }

    #[test]
    fn test_rook_attack_includes_friendly_blocker() {
        let board: Board = BoardBuilder::new()
            .piece(Square::A1, PieceKind::Rook, Side::Blue)
            .piece(Square::A3, PieceKind::Pawn, Side::Blue)
            .piece(Square::C1, PieceKind::Knight, Side::Red)
            .try_into()
            .unwrap();
        let rook = board.piece_at(Square::A1).unwrap();

        assert_eq!(
            squares(RookType::pseudo_legals(&board, &rook)),
            [Square::A2, Square::B1, Square::C1].into_iter().collect()
        );
        assert_eq!(
            squares(RookType::attacks(&board, &rook)),
            [Square::A2, Square::A3, Square::B1, Square::C1]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_knight_jumps_from_corner() {
        let board: Board = BoardBuilder::new()
            .piece(Square::A1, PieceKind::Knight, Side::Blue)
            .piece(Square::B2, PieceKind::Pawn, Side::Red)
            .piece(Square::A2, PieceKind::Pawn, Side::Red)
            .piece(Square::B1, PieceKind::Bishop, Side::Red)
            .try_into()
            .unwrap();
        let knight = board.piece_at(Square::A1).unwrap();

        assert_eq!(
            squares(KnightType::pseudo_legals(&board, &knight)),
            [Square::B3, Square::C2].into_iter().collect()
        );
    }
}
