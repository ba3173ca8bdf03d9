use crate::chess::{ParseSquareError, Square};
use derive_more::{DebugCustom, Display, Error, From};
use std::str::FromStr;

/// A chess move in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "Move({})", self)]
#[display(fmt = "{}{}", _0, _1)]
pub struct Move(pub Square, pub Square);

impl Move {
    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "failed to parse move, expected four characters")]
    #[from(ignore)]
    InvalidLength,
    #[display(fmt = "failed to parse move")]
    InvalidSquare(ParseSquareError),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = match s.char_indices().nth(2) {
            Some((i, _)) => i,
            None => return Err(ParseMoveError::InvalidLength),
        };

        Ok(Move(s[..i].parse()?, s[i..].parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn move_has_a_source_and_a_destination(a: Square, b: Square) {
        let m = Move(a, b);
        assert_eq!((m.whence(), m.whither()), (a, b));
    }

    #[proptest]
    fn parsing_printed_move_is_an_identity(m: Move) {
        assert_eq!(m.to_string().parse(), Ok(m));
    }

    #[proptest]
    fn parsing_move_fails_if_too_short(#[filter(#s.chars().count() < 3)] s: String) {
        assert_eq!(s.parse::<Move>(), Err(ParseMoveError::InvalidLength));
    }

    #[proptest]
    fn parsing_move_fails_if_either_square_is_invalid(
        m: Move,
        #[filter(!('a'..='h').contains(&#c))] c: char,
    ) {
        let s = m.to_string();
        let whence = format!("{c}{}", &s[1..]);
        let whither = format!("{}{c}{}", &s[..2], &s[3..]);
        assert!(whence.parse::<Move>().is_err());
        assert!(whither.parse::<Move>().is_err());
    }

    #[test]
    fn debug_wraps_coordinate_notation() {
        let m: Move = "e2e4".parse().unwrap();
        assert_eq!(format!("{m:?}"), "Move(e2e4)");
    }
}
