use crate::coord::{file_to_column, in_bounds, BOARD_SIZE};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Represent a square on the chess board.
///
/// Stored as a single index, a1 = 0 through h8 = 63. Every `Square` that exists is on the
/// board; anything off the board is rejected at construction.
#[derive(PartialEq, Ord, Eq, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct Square(u8);

/// How many squares are there?
pub const NUM_SQUARES: usize = 64;

macro_rules! square_constants {
    ($($name:ident = $idx:expr),* $(,)?) => {
        impl Square {
            $(
                #[allow(missing_docs)]
                pub const $name: Square = Square($idx);
            )*
        }
    };
}

square_constants! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

impl Square {
    /// Build a square from a 1-based column and row.
    ///
    /// ```
    /// use redblue_chess::Square;
    ///
    /// assert_eq!(Square::new(5, 4), Ok(Square::E4));
    /// assert!(Square::new(9, 1).is_err());
    /// ```
    pub fn new(column: u8, row: u8) -> Result<Square, Error> {
        if !in_bounds(column as i8, row as i8) {
            return Err(Error::out_of_range(format!("({}, {})", column, row)));
        }
        Ok(Square::make_square(column, row))
    }

    /// Caller guarantees both coordinates are in 1..=8.
    #[inline]
    pub(crate) const fn make_square(column: u8, row: u8) -> Square {
        Square((row - 1) * BOARD_SIZE + (column - 1))
    }

    /// Convert an index in 0..64 into a square.
    #[inline]
    pub fn from_index(index: usize) -> Option<Square> {
        if index < NUM_SQUARES {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// The a1-based index of this square.
    #[inline]
    pub fn to_index(self) -> usize {
        self.0 as usize
    }

    /// Column, 1 (a-file) through 8 (h-file).
    #[inline]
    pub fn column(self) -> u8 {
        self.0 % BOARD_SIZE + 1
    }

    /// Row, 1 through 8.
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / BOARD_SIZE + 1
    }

    /// The file letter of this square.
    #[inline]
    pub fn file(self) -> char {
        crate::coord::FILE_LETTERS[(self.column() - 1) as usize]
    }

    /// The square `columns` to the right and `rows` up, if it is on the board.
    ///
    /// ```
    /// use redblue_chess::Square;
    ///
    /// assert_eq!(Square::D4.offset(1, 2), Some(Square::E6));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline]
    pub fn offset(self, columns: i8, rows: i8) -> Option<Square> {
        let column = self.column() as i8 + columns;
        let row = self.row() as i8 + rows;
        if in_bounds(column, row) {
            Some(Square::make_square(column as u8, row as u8))
        } else {
            None
        }
    }
}

/// Every square, a1 first and h8 last.
pub const ALL_SQUARES: [Square; NUM_SQUARES] = {
    let mut squares = [Square(0); NUM_SQUARES];
    let mut i = 0;
    while i < NUM_SQUARES {
        squares[i] = Square(i as u8);
        i += 1;
    }
    squares
};

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.row())
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (letter, digit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(letter), Some(digit), None) => (letter, digit),
            _ => return Err(Error::out_of_range(s)),
        };
        let column = file_to_column(letter).map_err(|_| Error::out_of_range(s))?;
        let row = digit
            .to_digit(10)
            .filter(|r| (1..=BOARD_SIZE as u32).contains(r))
            .ok_or_else(|| Error::out_of_range(s))?;
        Ok(Square::make_square(column, row as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq, Square::E4);
        assert_eq!(sq.column(), 5);
        assert_eq!(sq.row(), 4);
        assert_eq!(sq.to_string(), "e4");
        assert_eq!(Square::H8.to_string(), "h8");
    }

    #[test]
    fn test_parse_rejects_off_board_tokens() {
        for bad in ["i1", "a0", "a9", "e", "e44", "", "4e"] {
            assert_eq!(
                Square::from_str(bad),
                Err(Error::OutOfRange {
                    token: bad.to_string()
                }),
                "{} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_all_squares_order() {
        assert_eq!(ALL_SQUARES[0], Square::A1);
        assert_eq!(ALL_SQUARES[7], Square::H1);
        assert_eq!(ALL_SQUARES[63], Square::H8);
        for (i, sq) in ALL_SQUARES.iter().enumerate() {
            assert_eq!(sq.to_index(), i);
        }
    }

    #[test]
    fn test_offset_edges() {
        assert_eq!(Square::H4.offset(1, 0), None);
        assert_eq!(Square::A8.offset(0, 1), None);
        assert_eq!(Square::B1.offset(-1, 2), Some(Square::A3));
    }
}
