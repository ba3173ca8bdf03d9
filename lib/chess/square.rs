use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A square on the chess board.
///
/// Rows are numbered from the top, so that row 0 is the 8th rank and row 7 is the 1st rank,
/// while columns are numbered from the a-file to the h-file.
/// Internally a square is its linear index `row * 8 + col`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square(#[cfg_attr(test, strategy(0u8..64))] u8);

impl Square {
    /// Constructs [`Square`] from a pair of row and column.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is not in the range `0..8`.
    #[inline(always)]
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "({row}, {col}) is off the board");
        Square(row * 8 + col)
    }

    /// Constructs [`Square`] from a pair of row and column, if on the board.
    #[inline(always)]
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// This square's linear index.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// This square's row.
    #[inline(always)]
    pub fn row(&self) -> u8 {
        self.0 / 8
    }

    /// This square's column.
    #[inline(always)]
    pub fn col(&self) -> u8 {
        self.0 % 8
    }

    /// The square `dr` rows and `dc` columns away, or `None` if that would be off the board.
    #[inline(always)]
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        Square::try_new(self.row() as i8 + dr, self.col() as i8 + dc)
    }

    /// An iterator over all squares in index order.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + self.col()) as char)?;
        f.write_char((b'8' - self.row()) as char)
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square, expected file in the range `(a..=h)`")]
    InvalidFile,
    #[display(fmt = "failed to parse square, expected rank in the range `(1..=8)`")]
    InvalidRank,
    #[display(fmt = "failed to parse square, expected exactly two characters")]
    InvalidLength,
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(ParseSquareError::InvalidLength),
        };

        if !('a'..='h').contains(&file) {
            return Err(ParseSquareError::InvalidFile);
        }

        if !('1'..='8').contains(&rank) {
            return Err(ParseSquareError::InvalidRank);
        }

        Ok(Square::new(b'8' - rank as u8, file as u8 - b'a'))
    }
}
