//! Cell positions and spreadsheet-style labels.
//!
//! A [`Position`] addresses a cell by zero-indexed row and column. Positions are
//! always relative to the current display order of rows and columns; they are
//! recomputed views, never storage keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub r: usize,
    pub c: usize,
}

impl Position {
    pub fn new(r: usize, c: usize) -> Position {
        Position { r, c }
    }

    /// Clamp into a grid of `rows` x `cols`. Returns `None` if the grid has no cells.
    pub fn clamped(self, rows: usize, cols: usize) -> Option<Position> {
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(Position::new(self.r.min(rows - 1), self.c.min(cols - 1)))
    }
}

/// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
pub fn column_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col as u128 + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.c), self.r + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(51), "AZ");
        assert_eq!(column_letters(52), "BA");
    }

    #[test]
    fn test_column_letters_handles_max_usize() {
        let letters = column_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_display_is_a1_notation() {
        assert_eq!(Position::new(0, 0).to_string(), "A1");
        assert_eq!(Position::new(9, 27).to_string(), "AB10");
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Position::new(5, 5).clamped(3, 2), Some(Position::new(2, 1)));
        assert_eq!(Position::new(1, 1).clamped(3, 2), Some(Position::new(1, 1)));
        assert_eq!(Position::new(0, 0).clamped(0, 2), None);
        assert_eq!(Position::new(0, 0).clamped(2, 0), None);
    }
}
