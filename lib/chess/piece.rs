use crate::chess::{Color, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A chess [piece][`Role`] of a certain [`Color`].
///
/// Prints as its FEN letter, uppercase for white, while the alternate form `{:#}` prints its glyph.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece {
    role: Role,
    color: Color,
}

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Role`] and [`Color`].
    #[inline(always)]
    pub const fn new(role: Role, color: Color) -> Self {
        Piece { role, color }
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    fn glyph(&self) -> char {
        use {Color::*, Role::*};
        match (self.role, self.color) {
            (Pawn, White) => '♙',
            (Knight, White) => '♘',
            (Bishop, White) => '♗',
            (Rook, White) => '♖',
            (Queen, White) => '♕',
            (King, White) => '♔',
            (Pawn, Black) => '♟',
            (Knight, Black) => '♞',
            (Bishop, Black) => '♝',
            (Rook, Black) => '♜',
            (Queen, Black) => '♛',
            (King, Black) => '♚',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f.write_char(self.glyph());
        }

        let role = self.role.to_string();
        match self.color {
            Color::White => f.write_str(&role.to_uppercase()),
            Color::Black => f.write_str(&role),
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `PNBRQKpnbrqk`")]
pub struct ParsePieceError;

impl TryFrom<char> for Piece {
    type Error = ParsePieceError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = match c {
            'A'..='Z' => Color::White,
            'a'..='z' => Color::Black,
            _ => return Err(ParsePieceError),
        };

        let role = c.to_ascii_lowercase().to_string().parse::<Role>();
        Ok(Piece::new(role.map_err(|_| ParsePieceError)?, color))
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.try_into(),
            _ => Err(ParsePieceError),
        }
    }
}
