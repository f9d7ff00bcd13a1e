//! File letters, column numbers and the bounds test shared by every move pattern.
//!
//! Columns and rows are 1-based: the a-file is column 1 and rank 1 is row 1.

use crate::error::Error;

/// How many files (and ranks) the board has.
pub const BOARD_SIZE: u8 = 8;

/// File letters indexed by `column - 1`.
pub const FILE_LETTERS: [char; BOARD_SIZE as usize] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Convert a file letter into its column.
///
/// ```
/// use redblue_chess::file_to_column;
///
/// assert_eq!(file_to_column('a'), Ok(1));
/// assert_eq!(file_to_column('h'), Ok(8));
/// assert!(file_to_column('i').is_err());
/// ```
pub fn file_to_column(letter: char) -> Result<u8, Error> {
    FILE_LETTERS
        .iter()
        .position(|&f| f == letter)
        .map(|idx| idx as u8 + 1)
        .ok_or_else(|| Error::out_of_range(letter))
}

/// Convert a column back into its file letter.
pub fn column_to_file(column: u8) -> Result<char, Error> {
    if (1..=BOARD_SIZE).contains(&column) {
        Ok(FILE_LETTERS[(column - 1) as usize])
    } else {
        Err(Error::out_of_range(column))
    }
}

/// Are both coordinates on the board?
///
/// Signed so that callers can probe squares past either edge.
#[inline]
pub fn in_bounds(column: i8, row: i8) -> bool {
    (1..=BOARD_SIZE as i8).contains(&column) && (1..=BOARD_SIZE as i8).contains(&row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_round_trip() {
        for column in 1..=8 {
            let letter = column_to_file(column).unwrap();
            assert_eq!(file_to_column(letter), Ok(column));
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            file_to_column('z'),
            Err(Error::OutOfRange {
                token: "z".to_string()
            })
        );
        assert!(file_to_column('A').is_err());
        assert!(column_to_file(0).is_err());
        assert!(column_to_file(9).is_err());
    }

    #[test]
    fn test_in_bounds() {
        assert!(in_bounds(1, 1));
        assert!(in_bounds(8, 8));
        assert!(!in_bounds(0, 4));
        assert!(!in_bounds(4, 9));
        assert!(!in_bounds(-1, -1));
    }
}
