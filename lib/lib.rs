/// Chess domain types and move generation.
pub mod chess;
/// Game sessions, turns and termination.
pub mod game;
