use std::fmt;
use std::ops::Not;

/// The two sides of the game.
///
/// Blue sets up on rows 1 and 2 and plays up the board; Red sets up on rows 7 and 8 and plays
/// down it.
#[derive(PartialOrd, PartialEq, Ord, Eq, Copy, Clone, Debug, Hash)]
pub enum Side {
    Red,
    Blue,
}

/// How many sides are there?
pub const NUM_SIDES: usize = 2;

/// List all sides
pub const ALL_SIDES: [Side; NUM_SIDES] = [Side::Red, Side::Blue];

impl Side {
    /// Convert the `Side` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Row delta of one step forward.
    #[inline]
    pub fn forward(&self) -> i8 {
        match *self {
            Side::Blue => 1,
            Side::Red => -1,
        }
    }

    /// The row the major pieces start on.
    #[inline]
    pub fn back_row(&self) -> u8 {
        match *self {
            Side::Blue => 1,
            Side::Red => 8,
        }
    }

    /// The row the pawns start on.
    #[inline]
    pub fn pawn_row(&self) -> u8 {
        match *self {
            Side::Blue => 2,
            Side::Red => 7,
        }
    }

    /// The row where this side's pawns promote.
    #[inline]
    pub fn promotion_row(&self) -> u8 {
        (!*self).back_row()
    }
}

impl Not for Side {
    type Output = Side;

    /// Get the other side.
    #[inline]
    fn not(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Blue => write!(f, "blue"),
        }
    }
}
