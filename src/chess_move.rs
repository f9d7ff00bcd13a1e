use crate::square::Square;
use std::fmt;

/// A source and destination square, as produced by `MoveGen`.
#[derive(Clone, Copy, Eq, PartialOrd, PartialEq, Debug, Hash)]
pub struct ChessMove {
    source: Square,
    dest: Square,
}

impl ChessMove {
    /// Create a new chess move, given a source `Square` and a destination `Square`.
    #[inline]
    pub fn new(source: Square, dest: Square) -> ChessMove {
        ChessMove { source, dest }
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn get_source(&self) -> Square {
        self.source
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn get_dest(&self) -> Square {
        self.dest
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.dest)
    }
}

#[test]
fn test_display() {
    let m = ChessMove::new(Square::E2, Square::E4);
    assert_eq!(m.to_string(), "e2e4");
    assert_eq!(m.get_source(), Square::E2);
    assert_eq!(m.get_dest(), Square::E4);
}
