use crate::chess::Color;
use derive_more::Display;

/// One of the possible outcomes of a game.
///
/// Both variants carry the winning side.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    /// The winner captured the opponent's king.
    #[display(fmt = "{} wins by capturing the opponent's king", _0)]
    KingCaptured(Color),

    /// The loser had no pseudo-legal moves left on its turn.
    #[display(fmt = "{} wins, the opponent has no moves left", _0)]
    NoLegalMoves(Color),
}

impl Outcome {
    /// The winning side.
    pub fn winner(&self) -> Color {
        match *self {
            Outcome::KingCaptured(c) | Outcome::NoLegalMoves(c) => c,
        }
    }

    /// The losing side.
    pub fn loser(&self) -> Color {
        !self.winner()
    }
}
