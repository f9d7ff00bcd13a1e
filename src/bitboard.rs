use crate::square::{Square, ALL_SQUARES};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// A set of squares, one bit per square (a1 = bit 0, h8 = bit 63).
///
/// This is what every destination query returns. Iteration always runs from a1 to h8, so two
/// equal sets iterate identically.
#[derive(PartialEq, Eq, PartialOrd, Clone, Copy, Debug, Default, Hash)]
pub struct BitBoard(pub u64);

/// An empty bitboard.
pub const EMPTY: BitBoard = BitBoard(0);

impl BitBoard {
    /// A bitboard holding just this square.
    #[inline]
    pub fn from_square(sq: Square) -> BitBoard {
        BitBoard(1u64 << sq.to_index())
    }

    /// Is this square in the set?
    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.to_index()) != 0
    }

    /// Add a square to the set.
    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.to_index();
    }

    /// Remove a square from the set.
    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.to_index());
    }

    /// How many squares are in the set?
    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The lowest square in the set.
    #[inline]
    pub fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as usize)
        }
    }

    /// Collect the set into a `Vec`, a1 first.
    pub fn to_vec(self) -> Vec<Square> {
        self.into_iter().collect()
    }
}

impl BitAnd for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn bitand(self, other: BitBoard) -> BitBoard {
        BitBoard(self.0 & other.0)
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn bitor(self, other: BitBoard) -> BitBoard {
        BitBoard(self.0 | other.0)
    }
}

impl BitAndAssign for BitBoard {
    #[inline]
    fn bitand_assign(&mut self, other: BitBoard) {
        self.0 &= other.0;
    }
}

impl BitOrAssign for BitBoard {
    #[inline]
    fn bitor_assign(&mut self, other: BitBoard) {
        self.0 |= other.0;
    }
}

impl Not for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn not(self) -> BitBoard {
        BitBoard(!self.0)
    }
}

impl FromIterator<Square> for BitBoard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> BitBoard {
        let mut result = EMPTY;
        for sq in iter {
            result.insert(sq);
        }
        result
    }
}

/// Drains the set from a1 upward.
impl Iterator for BitBoard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let sq = self.first()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count() as usize;
        (n, Some(n))
    }
}

/// Prints the set as a grid, rank 8 on top.
impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (1..=8u8).rev() {
            for sq in ALL_SQUARES.iter().filter(|sq| sq.row() == row) {
                if self.contains(*sq) {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterates_a1_first() {
        let bb: BitBoard = [Square::H8, Square::A1, Square::D4].into_iter().collect();
        assert_eq!(bb.count(), 3);
        assert_eq!(bb.to_vec(), vec![Square::A1, Square::D4, Square::H8]);
    }

    #[test]
    fn test_insert_remove() {
        let mut bb = EMPTY;
        bb.insert(Square::E4);
        assert!(bb.contains(Square::E4));
        bb.remove(Square::E4);
        assert!(bb.is_empty());
        assert_eq!(bb.first(), None);
    }
}
