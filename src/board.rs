use crate::bitboard::BitBoard;
use crate::board_builder::BoardBuilder;
use crate::castling::{self, CastleDirection};
use crate::error::{Error, IllegalReason};
use crate::movegen::MoveGen;
use crate::piece::{Piece, PieceKind};
use crate::safety::{is_checkmate, is_in_check, is_square_attacked};
use crate::side::{Side, NUM_SIDES};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use std::convert::{TryFrom, TryInto};
use std::fmt;
use std::str::FromStr;

/// A chess board: which piece stands on each square, plus the little bit of history the rules
/// need (who has castled, which pawn just made a double step).
///
/// `Board` is `Copy`. Every "what if" question the engine asks (does this move expose my
/// king? is this castling path safe?) is answered on a copy, so the board you hold is only ever
/// changed by `move_to`, `castle`, `place` and `clear`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
    castled: [bool; NUM_SIDES],
    en_passant: Option<Square>,
}

/// What is the status of this game, for one side?
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BoardStatus {
    Ongoing,
    /// The side's king is attacked but it has a way out.
    Check,
    /// The side's king is attacked and nothing it can do helps.
    Checkmate,
    /// The side is not in check but has no legal move.
    Stalemate,
}

/// The report of an accepted move.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Move {
    /// The moved piece as it stands after the move.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// The piece removed from the board, if any. For en passant this is the pawn beside the
    /// origin square, not anything on `to`.
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    /// For castling, where the rook went from and to.
    pub rook: Option<(Square, Square)>,
}

/// Back row, a-file to h-file.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Construct the initial position.
impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::starting_position()
    }
}

impl Board {
    /// A board with nothing on it.
    pub fn empty() -> Board {
        Board {
            squares: [None; NUM_SQUARES],
            castled: [false; NUM_SIDES],
            en_passant: None,
        }
    }

    /// The standard layout: Blue on rows 1 and 2, Red on rows 7 and 8.
    ///
    /// ```
    /// use redblue_chess::{Board, PieceKind, Side, Square};
    ///
    /// let board = Board::starting_position();
    /// let king = board.piece_at(Square::E8).unwrap();
    /// assert_eq!((king.kind, king.side), (PieceKind::King, Side::Red));
    /// assert_eq!(board.pieces().count(), 32);
    /// ```
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for side in crate::side::ALL_SIDES.iter() {
            for (column, kind) in (1u8..).zip(BACK_ROW.iter()) {
                let sq = Square::make_square(column, side.back_row());
                board.place(sq, Piece::new(*kind, *side, sq));
                let sq = Square::make_square(column, side.pawn_row());
                board.place(sq, Piece::new(PieceKind::Pawn, *side, sq));
            }
        }
        board
    }

    /// What is on this square?
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.to_index()]
    }

    /// Put a piece on a square, replacing whatever was there. Returns the replaced piece.
    ///
    /// This is a setup tool: it does not check the rules. The piece's `square` is set to
    /// `square`.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let replaced = self.clear(square);
        self.squares[square.to_index()] = Some(Piece { square, ..piece });
        replaced
    }

    /// Remove whatever is on a square and hand it back.
    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        if self.en_passant == Some(square) {
            self.en_passant = None;
        }
        self.squares[square.to_index()].take()
    }

    /// Call `f` on every piece, a1 first, h8 last.
    pub fn for_each_piece<F>(&self, mut f: F)
    where
        F: FnMut(&Piece),
    {
        for piece in self.squares.iter().flatten() {
            f(piece);
        }
    }

    /// Every piece on the board, a1 first, h8 last.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().copied()
    }

    /// Every piece belonging to `side`, a1 first.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.side == side)
    }

    /// The squares holding a piece.
    pub fn occupied(&self) -> BitBoard {
        self.pieces().map(|p| p.square).collect()
    }

    /// The squares holding a piece of `side`.
    pub fn occupied_by(&self, side: Side) -> BitBoard {
        self.pieces_of(side).map(|p| p.square).collect()
    }

    /// The king of `side`, if it is on the board.
    pub fn king(&self, side: Side) -> Option<Piece> {
        self.pieces_of(side).find(|p| p.is_king())
    }

    /// The square of the pawn that made a double step on the last move, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Has `side` castled already? Each side castles at most once.
    #[inline]
    pub fn has_castled(&self, side: Side) -> bool {
        self.castled[side.to_index()]
    }

    pub(crate) fn set_castled(&mut self, side: Side, castled: bool) {
        self.castled[side.to_index()] = castled;
    }

    pub(crate) fn set_en_passant(&mut self, square: Option<Square>) {
        self.en_passant = square;
    }

    /// The legal destinations of whatever stands on `square`.
    pub fn legal_destinations(&self, square: Square) -> Result<BitBoard, Error> {
        self.piece_at(square)
            .map(|piece| piece.legal_destinations(self))
            .ok_or(Error::NoPieceAtSquare { square })
    }

    /// Is it legal to move the piece on `from` to `to`?
    pub fn legal(&self, from: Square, to: Square) -> bool {
        self.legal_destinations(from)
            .map(|dests| dests.contains(to))
            .unwrap_or(false)
    }

    /// Would the mover's king be safe after the piece on `from` goes to `to`?
    ///
    /// Only the king's safety is judged here, not whether the piece can reach `to`. The move is
    /// played on a copy; `self` is untouched. A side with no king on the board is always safe.
    pub fn leaves_king_safe(&self, from: Square, to: Square) -> bool {
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return false,
        };
        let mut scratch = *self;
        scratch.apply(piece, to, PieceKind::Queen);
        match scratch.king(piece.side) {
            Some(king) => !is_square_attacked(&scratch, king.square, !piece.side),
            None => true,
        }
    }

    /// Move the piece on `from` to `to`, capturing anything in the way.
    ///
    /// A pawn reaching the far row becomes a queen; see `move_to_promoting` to choose.
    /// On error the board is unchanged.
    ///
    /// ```
    /// use redblue_chess::{Board, Error, IllegalReason, Square};
    ///
    /// let mut board = Board::default();
    /// board.move_to(Square::E2, Square::E4)?;
    /// assert!(board.piece_at(Square::E4).unwrap().moved);
    ///
    /// assert_eq!(
    ///     board.move_to(Square::E4, Square::E6),
    ///     Err(Error::IllegalMove {
    ///         from: Square::E4,
    ///         to: Square::E6,
    ///         reason: IllegalReason::NotADestination,
    ///     })
    /// );
    /// # Ok::<(), Error>(())
    /// ```
    pub fn move_to(&mut self, from: Square, to: Square) -> Result<Move, Error> {
        self.move_to_promoting(from, to, PieceKind::Queen)
    }

    /// Like `move_to`, but a pawn reaching the far row becomes `promotion`.
    pub fn move_to_promoting(
        &mut self,
        from: Square,
        to: Square,
        promotion: PieceKind,
    ) -> Result<Move, Error> {
        let piece = self
            .piece_at(from)
            .ok_or(Error::NoPieceAtSquare { square: from })?;
        let illegal = |reason| Error::IllegalMove { from, to, reason };

        if !promotion.is_promotion_kind() {
            return Err(illegal(IllegalReason::BadPromotion(promotion)));
        }
        if !piece.destinations(self).contains(to) {
            return Err(illegal(IllegalReason::NotADestination));
        }
        if !self.leaves_king_safe(from, to) {
            return Err(illegal(IllegalReason::LeavesKingInCheck));
        }

        Ok(self.apply(piece, to, promotion))
    }

    /// Castle `side`'s king toward `direction`. See `castling::castle`.
    pub fn castle(&mut self, side: Side, direction: CastleDirection) -> Result<Move, Error> {
        let king = self.king(side).ok_or(Error::NoPieceAtSquare {
            square: Square::make_square(5, side.back_row()),
        })?;
        castling::castle(self, &king, direction)
    }

    /// Is `side`'s king attacked? False if it has no king.
    pub fn in_check(&self, side: Side) -> bool {
        self.king(side)
            .map(|king| is_in_check(self, &king))
            .unwrap_or(false)
    }

    /// Is `side` checkmated?
    pub fn checkmated(&self, side: Side) -> bool {
        self.king(side)
            .map(|king| is_checkmate(self, &king))
            .unwrap_or(false)
    }

    /// Where does `side` stand?
    ///
    /// ```
    /// use redblue_chess::{Board, BoardStatus, Side};
    ///
    /// let board = Board::default();
    /// assert_eq!(board.status(Side::Red), BoardStatus::Ongoing);
    /// ```
    pub fn status(&self, side: Side) -> BoardStatus {
        let has_move = MoveGen::has_legal_move(self, side);
        match (self.in_check(side), has_move) {
            (true, true) => BoardStatus::Check,
            (true, false) => BoardStatus::Checkmate,
            (false, true) => BoardStatus::Ongoing,
            (false, false) => BoardStatus::Stalemate,
        }
    }

    /// Play a move without checking it.
    ///
    /// Captures whatever is on `to`, or the passed pawn for an en passant capture, marks the
    /// piece moved, promotes a pawn landing on its far row, and records a double step.
    pub(crate) fn apply(&mut self, piece: Piece, to: Square, promotion: PieceKind) -> Move {
        let from = piece.square;
        let previous_en_passant = self.en_passant;
        let mut captured = self.clear(to);

        if piece.kind == PieceKind::Pawn && captured.is_none() && to.column() != from.column() {
            if let Some(passed) = previous_en_passant {
                if passed.column() == to.column() && passed.row() == from.row() {
                    captured = self.clear(passed);
                }
            }
        }

        self.clear(from);
        self.en_passant = None;

        let mut moved = Piece {
            moved: true,
            ..piece
        };
        let mut promoted = None;
        if piece.kind == PieceKind::Pawn && to.row() == piece.side.promotion_row() {
            moved.kind = promotion;
            promoted = Some(promotion);
        }

        self.place(to, moved);

        // after `place`, which forgets any en passant square it overwrites
        if piece.kind == PieceKind::Pawn && (to.row() as i8 - from.row() as i8).abs() == 2 {
            self.en_passant = Some(to);
        }
        Move {
            piece: Piece { square: to, ..moved },
            from,
            to,
            captured,
            promotion: promoted,
            rook: None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let position: BoardBuilder = self.into();
        write!(f, "{}", position)
    }
}

impl TryFrom<&BoardBuilder> for Board {
    type Error = Error;

    fn try_from(position: &BoardBuilder) -> Result<Self, Self::Error> {
        position.sanity_check()?;

        let mut board = Board::empty();
        for sq in ALL_SQUARES.iter() {
            if let Some(piece) = position[*sq] {
                board.place(*sq, piece);
            }
        }
        for side in crate::side::ALL_SIDES.iter() {
            board.set_castled(*side, position.get_castled(*side));
        }
        board.set_en_passant(position.get_en_passant());

        Ok(board)
    }
}

impl TryFrom<&mut BoardBuilder> for Board {
    type Error = Error;

    fn try_from(position: &mut BoardBuilder) -> Result<Self, Self::Error> {
        (&*position).try_into()
    }
}

impl TryFrom<BoardBuilder> for Board {
    type Error = Error;

    fn try_from(position: BoardBuilder) -> Result<Self, Self::Error> {
        (&position).try_into()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BoardBuilder::from_str(value)?.try_into()
    }
}
