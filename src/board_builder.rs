use crate::board::Board;
use crate::coord::BOARD_SIZE;
use crate::error::Error;
use crate::piece::{Piece, PieceKind};
use crate::side::{Side, ALL_SIDES, NUM_SIDES};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The text form of the starting position.
pub const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR - -";

/// Marks a piece that has moved at least once in the text form.
const MOVED_MARKER: char = '\'';

/// Represents a chess position that has *not* been validated.
///
/// This structure is useful in the following cases:
/// * You are trying to build a chess board manually in code.
/// * You want to save a game and load it back, including which pieces have moved.
/// * You want to display the position in a UI.
///
/// ```
/// use redblue_chess::{BoardBuilder, Board, Square, Side, PieceKind};
/// use std::convert::TryFrom;
///
/// let mut position = BoardBuilder::new();
/// position.piece(Square::A1, PieceKind::King, Side::Blue);
/// position.piece(Square::A8, PieceKind::Rook, Side::Red);
/// position.piece(Square::D1, PieceKind::King, Side::Red);
///
/// // You can index the position by the square:
/// assert_eq!(position[Square::A1].map(|p| p.kind), Some(PieceKind::King));
///
/// // Blue is in check, but that is a position, not an error.
/// assert!(Board::try_from(&position).is_ok());
///
/// // Two blue kings are an error.
/// position.piece(Square::H1, PieceKind::King, Side::Blue);
/// assert!(Board::try_from(position).is_err());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BoardBuilder {
    pieces: [Option<Piece>; NUM_SQUARES],
    castled: [bool; NUM_SIDES],
    en_passant: Option<Square>,
}

impl BoardBuilder {
    /// Construct a new, empty, BoardBuilder.
    ///
    /// * No pieces are on the board
    /// * Neither side has castled
    /// * `en_passant` is not set
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            pieces: [None; NUM_SQUARES],
            castled: [false; NUM_SIDES],
            en_passant: None,
        }
    }

    /// Has `side` already castled in this position?
    ///
    /// ```
    /// use redblue_chess::{BoardBuilder, Board, Side};
    ///
    /// let bb: BoardBuilder = Board::default().into();
    /// assert!(!bb.get_castled(Side::Blue));
    /// ```
    pub fn get_castled(&self, side: Side) -> bool {
        self.castled[side.to_index()]
    }

    /// The square of the pawn that may be taken en passant.
    pub fn get_en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Set an unmoved piece on a square.
    ///
    /// Note that this can and will overwrite another piece on the square if need.
    ///
    /// This function can be used on self directly or in a builder pattern.
    ///
    /// ```
    /// use redblue_chess::{BoardBuilder, PieceKind, Side, Square};
    ///
    /// BoardBuilder::new()
    ///              .piece(Square::A1, PieceKind::Rook, Side::Blue);
    ///
    /// let mut bb = BoardBuilder::new();
    /// bb.piece(Square::A8, PieceKind::Rook, Side::Red);
    /// ```
    pub fn piece(&mut self, square: Square, kind: PieceKind, side: Side) -> &mut Self {
        self[square] = Some(Piece::new(kind, side, square));
        self
    }

    /// Like `piece`, but the piece counts as having moved, so it cannot castle or double step.
    pub fn moved_piece(&mut self, square: Square, kind: PieceKind, side: Side) -> &mut Self {
        self[square] = Some(Piece {
            moved: true,
            ..Piece::new(kind, side, square)
        });
        self
    }

    /// Clear a square on the board.
    ///
    /// ```
    /// use redblue_chess::{BoardBuilder, Square, Board};
    ///
    /// let mut bb: BoardBuilder = Board::default().into();
    /// bb.clear_square(Square::A1);
    /// assert_eq!(bb[Square::A1], None);
    /// ```
    pub fn clear_square(&mut self, square: Square) -> &mut Self {
        self[square] = None;
        self
    }

    /// Record whether `side` has used up its castle.
    pub fn castled(&mut self, side: Side, castled: bool) -> &mut Self {
        self.castled[side.to_index()] = castled;
        self
    }

    /// Set or clear the pawn that may be taken en passant.
    ///
    /// ```
    /// use redblue_chess::{BoardBuilder, PieceKind, Side, Square};
    ///
    /// BoardBuilder::new()
    ///              .moved_piece(Square::E4, PieceKind::Pawn, Side::Blue)
    ///              .en_passant(Some(Square::E4));
    /// ```
    pub fn en_passant(&mut self, square: Option<Square>) -> &mut Self {
        self.en_passant = square;
        self
    }

    /// Can this position be turned into a `Board`?
    pub(crate) fn sanity_check(&self) -> Result<(), Error> {
        for side in ALL_SIDES.iter() {
            let kings = self
                .pieces
                .iter()
                .flatten()
                .filter(|p| p.side == *side && p.is_king())
                .count();
            if kings > 1 {
                return Err(Error::invalid_position(
                    self,
                    format!("{} has {} kings", side, kings),
                ));
            }
        }

        if let Some(pawn) = self
            .pieces
            .iter()
            .flatten()
            .find(|p| p.kind == PieceKind::Pawn && (p.square.row() == 1 || p.square.row() == 8))
        {
            return Err(Error::invalid_position(self, format!("pawn on {}", pawn.square)));
        }

        if let Some(sq) = self.en_passant {
            match self[sq] {
                Some(p) if p.kind == PieceKind::Pawn => {}
                _ => {
                    return Err(Error::invalid_position(
                        self,
                        format!("no pawn to take en passant on {}", sq),
                    ))
                }
            }
        }

        Ok(())
    }
}

impl Index<Square> for BoardBuilder {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Square> for BoardBuilder {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl fmt::Display for BoardBuilder {
    /// `<placement> <castled> <en-passant>`, placement from row 8 down to row 1.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (1..=BOARD_SIZE).rev() {
            let mut count = 0;
            for column in 1..=BOARD_SIZE {
                match self.pieces[Square::make_square(column, row).to_index()] {
                    Some(piece) => {
                        if count != 0 {
                            write!(f, "{}", count)?;
                            count = 0;
                        }
                        write!(f, "{}", piece.kind.to_char(piece.side))?;
                        if piece.moved {
                            write!(f, "{}", MOVED_MARKER)?;
                        }
                    }
                    None => count += 1,
                }
            }

            if count != 0 {
                write!(f, "{}", count)?;
            }
            if row != 1 {
                write!(f, "/")?;
            }
        }

        write!(f, " ")?;
        match (self.get_castled(Side::Blue), self.get_castled(Side::Red)) {
            (false, false) => write!(f, "-")?,
            (blue, red) => {
                if blue {
                    write!(f, "B")?;
                }
                if red {
                    write!(f, "r")?;
                }
            }
        }

        write!(f, " ")?;
        match self.en_passant {
            Some(sq) => write!(f, "{}", sq),
            None => write!(f, "-"),
        }
    }
}

impl Default for BoardBuilder {
    fn default() -> BoardBuilder {
        Board::starting_position().into()
    }
}

impl FromStr for BoardBuilder {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::invalid_position(value, reason);

        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(invalid("expected placement, castled and en passant fields"));
        }
        let (placement, castles, ep) = (tokens[0], tokens[1], tokens[2]);

        let mut position = BoardBuilder::new();

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(invalid("placement needs 8 rows"));
        }
        for (text, row) in rows.iter().zip((1..=BOARD_SIZE).rev()) {
            let mut column = 1u8;
            let mut chars = text.chars().peekable();
            while let Some(x) = chars.next() {
                if let Some(skip) = x.to_digit(10) {
                    column += skip as u8;
                    if column > BOARD_SIZE + 1 {
                        return Err(invalid("row is longer than 8 squares"));
                    }
                    continue;
                }
                let (kind, side) =
                    PieceKind::from_char(x).ok_or_else(|| invalid("unknown piece letter"))?;
                if column > BOARD_SIZE {
                    return Err(invalid("row is longer than 8 squares"));
                }
                let sq = Square::make_square(column, row);
                if chars.peek() == Some(&MOVED_MARKER) {
                    chars.next();
                    position.moved_piece(sq, kind, side);
                } else {
                    position.piece(sq, kind, side);
                }
                column += 1;
            }
            if column != BOARD_SIZE + 1 {
                return Err(invalid("row does not cover 8 squares"));
            }
        }

        if castles != "-" {
            for c in castles.chars() {
                match c {
                    'B' => position.castled(Side::Blue, true),
                    'r' => position.castled(Side::Red, true),
                    _ => return Err(invalid("castled field must be -, B, r or Br")),
                };
            }
        }

        if ep != "-" {
            position.en_passant(Some(Square::from_str(ep)?));
        }

        Ok(position)
    }
}

impl From<&Board> for BoardBuilder {
    fn from(board: &Board) -> Self {
        let mut builder = BoardBuilder::new();
        for sq in ALL_SQUARES.iter() {
            builder[*sq] = board.piece_at(*sq);
        }
        for side in ALL_SIDES.iter() {
            builder.castled(*side, board.has_castled(*side));
        }
        builder.en_passant(board.en_passant());
        builder
    }
}

impl From<Board> for BoardBuilder {
    fn from(board: Board) -> Self {
        (&board).into()
    }
}

#[cfg(test)]
use std::convert::TryInto;

#[test]
fn check_initial_position() {
    let position: BoardBuilder = Board::default().into();
    assert_eq!(format!("{}", position), STARTING_POSITION);

    let pass_through = format!("{}", BoardBuilder::default());
    assert_eq!(pass_through, STARTING_POSITION);

    let parsed: Board = STARTING_POSITION.parse().unwrap();
    assert_eq!(parsed, Board::default());
}

#[test]
fn check_history_survives_text_form() {
    let mut board = Board::default();
    board.move_to(Square::E2, Square::E4).unwrap();
    board.move_to(Square::G8, Square::F6).unwrap();
    board.move_to(Square::F1, Square::C4).unwrap();
    board.move_to(Square::E7, Square::E5).unwrap();

    let text = board.to_string();
    assert_eq!(
        text,
        "rnbqkb1r/pppp1ppp/5n'2/4p'3/2B'1P'3/8/PPPP1PPP/RNBQK1NR - e5"
    );
    let reloaded: Board = text.parse().unwrap();
    assert_eq!(reloaded, board);
    assert!(reloaded.piece_at(Square::C4).unwrap().moved);
    assert!(!reloaded.piece_at(Square::E1).unwrap().moved);
}

#[test]
fn check_castled_field() {
    let position: BoardBuilder = "4k3/8/8/8/8/8/8/4K3 Br -".parse().unwrap();
    assert!(position.get_castled(Side::Blue));
    assert!(position.get_castled(Side::Red));
    assert_eq!(position.to_string(), "4k3/8/8/8/8/8/8/4K3 Br -");

    let position: BoardBuilder = "4k3/8/8/8/8/8/8/4K3 r -".parse().unwrap();
    assert!(!position.get_castled(Side::Blue));
    assert!(position.get_castled(Side::Red));
}

#[test]
fn reject_malformed_text() {
    for bad in [
        "",
        "8/8/8/8/8/8/8/8",
        "8/8/8/8/8/8/8/8 - - extra",
        "8/8/8/8/8/8/8 - -",
        "9/8/8/8/8/8/8/8 - -",
        "7/8/8/8/8/8/8/8 - -",
        "x7/8/8/8/8/8/8/8 - -",
        "8/8/8/8/8/8/8/8 W -",
        "99999999999999999999999999999999/8/8/8/8/8/8/8 - -",
        "44p/8/8/8/8/8/8/8 - -",
    ] {
        assert!(
            matches!(
                BoardBuilder::from_str(bad),
                Err(Error::InvalidPosition { .. })
            ),
            "{:?} should not parse",
            bad
        );
    }

    assert_eq!(
        BoardBuilder::from_str("8/8/8/8/8/8/8/8 - z9"),
        Err(Error::OutOfRange {
            token: "z9".to_string()
        })
    );
}

#[test]
fn reject_two_kings() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::A1, PieceKind::King, Side::Blue)
        .piece(Square::H1, PieceKind::King, Side::Blue)
        .try_into();
    assert!(matches!(res, Err(Error::InvalidPosition { .. })));
}

#[test]
fn reject_pawn_on_back_row() {
    let res: Result<Board, _> = "P7/8/8/8/8/8/8/8 - -".parse();
    assert!(matches!(res, Err(Error::InvalidPosition { .. })));
}

#[test]
fn reject_en_passant_without_pawn() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::E4, PieceKind::Knight, Side::Blue)
        .en_passant(Some(Square::E4))
        .try_into();
    assert!(res.is_err());
}

#[test]
fn test_kissing_kings() {
    // the position is accepted; it just has both sides in check
    let board: Board = BoardBuilder::new()
        .piece(Square::A1, PieceKind::King, Side::Blue)
        .piece(Square::A2, PieceKind::King, Side::Red)
        .try_into()
        .unwrap();
    assert!(board.in_check(Side::Blue));
    assert!(board.in_check(Side::Red));
}
