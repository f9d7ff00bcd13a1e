use crate::bitboard::{BitBoard, EMPTY};
use crate::board::{Board, Move};
use crate::error::Error;
use crate::movegen::{
    BishopType, KingType, KnightType, PawnType, PieceType, QueenType, RookType,
};
use crate::side::Side;
use crate::square::Square;
use std::fmt;

/// The kinds of piece.
#[derive(PartialEq, Eq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// How many kinds of piece are there?
pub const NUM_PIECE_KINDS: usize = 6;

/// An array representing each piece kind, in order of ascending value.
pub const ALL_PIECE_KINDS: [PieceKind; NUM_PIECE_KINDS] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The kinds a pawn may become.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
];

impl PieceKind {
    /// Convert the `PieceKind` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Letter used by the position string: uppercase for Blue, lowercase for Red.
    #[inline]
    pub fn to_char(&self, side: Side) -> char {
        let c = match *self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::Blue => c.to_ascii_uppercase(),
            Side::Red => c,
        }
    }

    /// Inverse of `to_char`.
    pub fn from_char(c: char) -> Option<(PieceKind, Side)> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let side = if c.is_ascii_uppercase() {
            Side::Blue
        } else {
            Side::Red
        };
        Some((kind, side))
    }

    /// Can a pawn turn into this?
    #[inline]
    pub fn is_promotion_kind(&self) -> bool {
        PROMOTION_KINDS.contains(self)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        write!(f, "{}", name)
    }
}

/// A piece in play.
///
/// The side never changes. `square` and `moved` are updated by the board when the piece moves;
/// a `Piece` you hold is a snapshot, so look it up again with `Board::piece_at` after the board
/// changes.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub square: Square,
    pub moved: bool,
}

impl Piece {
    /// A piece that has not moved yet.
    #[inline]
    pub fn new(kind: PieceKind, side: Side, square: Square) -> Piece {
        Piece {
            kind,
            side,
            square,
            moved: false,
        }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    /// The squares this piece's move pattern reaches, ignoring the safety of its own king.
    pub fn destinations(&self, board: &Board) -> BitBoard {
        match self.kind {
            PieceKind::Pawn => PawnType::pseudo_legals(board, self),
            PieceKind::Knight => KnightType::pseudo_legals(board, self),
            PieceKind::Bishop => BishopType::pseudo_legals(board, self),
            PieceKind::Rook => RookType::pseudo_legals(board, self),
            PieceKind::Queen => QueenType::pseudo_legals(board, self),
            PieceKind::King => KingType::pseudo_legals(board, self),
        }
    }

    /// The squares this piece threatens.
    ///
    /// Unlike `destinations`, pawns threaten their forward diagonals whether or not anything
    /// stands there, and a ray's first blocker is included even when it is friendly.
    pub fn attacks(&self, board: &Board) -> BitBoard {
        match self.kind {
            PieceKind::Pawn => PawnType::attacks(board, self),
            PieceKind::Knight => KnightType::attacks(board, self),
            PieceKind::Bishop => BishopType::attacks(board, self),
            PieceKind::Rook => RookType::attacks(board, self),
            PieceKind::Queen => QueenType::attacks(board, self),
            PieceKind::King => KingType::attacks(board, self),
        }
    }

    /// Every square this piece may legally move to right now.
    ///
    /// Computed fresh on each call from the board you pass in. A stale snapshot, one the board
    /// no longer holds on `self.square`, has no destinations.
    ///
    /// ```
    /// use redblue_chess::{Board, Square};
    ///
    /// let board = Board::default();
    /// let knight = board.piece_at(Square::B1).unwrap();
    /// assert_eq!(knight.legal_destinations(&board).to_vec(), vec![Square::A3, Square::C3]);
    /// ```
    pub fn legal_destinations(&self, board: &Board) -> BitBoard {
        if board.piece_at(self.square) != Some(*self) {
            return EMPTY;
        }
        self.destinations(board)
            .filter(|&dest| board.leaves_king_safe(self.square, dest))
            .collect()
    }

    /// Move this piece on `board`.
    ///
    /// Fails with `NoPieceAtSquare` if the board no longer holds this piece where it was.
    pub fn move_to(&self, board: &mut Board, destination: Square) -> Result<Move, Error> {
        match board.piece_at(self.square) {
            Some(current) if current == *self => board.move_to(self.square, destination),
            _ => Err(Error::NoPieceAtSquare {
                square: self.square,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        for kind in ALL_PIECE_KINDS.iter() {
            for side in crate::side::ALL_SIDES.iter() {
                let c = kind.to_char(*side);
                assert_eq!(PieceKind::from_char(c), Some((*kind, *side)));
            }
        }
        assert_eq!(PieceKind::King.to_char(Side::Blue), 'K');
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_stale_piece_is_rejected() {
        let mut board = Board::default();
        let pawn = board.piece_at(Square::E2).unwrap();
        pawn.move_to(&mut board, Square::E4).unwrap();
        assert_eq!(
            pawn.move_to(&mut board, Square::E5),
            Err(Error::NoPieceAtSquare { square: Square::E2 })
        );
    }

    #[test]
    fn test_stale_piece_has_no_destinations() {
        let mut board = Board::default();
        let knight = board.piece_at(Square::G1).unwrap();
        assert_eq!(knight.legal_destinations(&board).count(), 2);

        // a queen now stands where the snapshot thinks the knight is
        board.place(Square::G1, Piece::new(PieceKind::Queen, Side::Blue, Square::G1));
        assert!(knight.legal_destinations(&board).is_empty());

        let pawn = board.piece_at(Square::E2).unwrap();
        board.move_to(Square::E2, Square::E3).unwrap();
        assert!(pawn.legal_destinations(&board).is_empty());
    }
}
