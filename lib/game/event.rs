use crate::chess::{Color, Move, Outcome, Piece};
use derive_more::{Display, From};

/// Notifications for the presentation layer, drained through
/// [`Session::events`][`crate::game::Session::events`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, From)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Event {
    /// A move was applied to the board, along with the piece it captured, if any.
    #[display(fmt = "{}", _0)]
    #[from(ignore)]
    Played(Move, Option<Piece>),

    /// The side to move changed.
    #[display(fmt = "{}'s turn", _0)]
    TurnChanged(Color),

    /// The game ended.
    #[display(fmt = "{}", _0)]
    GameEnded(Outcome),
}
