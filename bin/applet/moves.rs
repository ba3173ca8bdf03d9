use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{moves, Board, Color};
use std::io::{empty, stdout};
use tracing::{info, instrument};

/// Lists the pseudo-legal moves of one side.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The side to move.
    #[clap(short, long, default_value_t = Color::White)]
    side: Color,

    /// The piece placement in FEN notation.
    #[clap(default_value_t)]
    board: Board,
}

impl Moves {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut io = Io::new(stdout(), empty());

        let mut count = 0;
        for m in moves(&self.board, self.side) {
            io.send(m)?;
            count += 1;
        }

        info!(side = %self.side, count);
        Ok(io.flush()?)
    }
}
