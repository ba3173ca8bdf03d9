use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Square;
use lib::game::{Config, Event, Rejected, Selection, Session};
use std::io::{self, stdin, stdout, ErrorKind, Read, Write};
use tracing::{info, instrument, warn};

/// Plays an interactive game in the terminal.
///
/// Every line names a square, as if it had been clicked,
/// while `reset` starts a new game and `quit` leaves.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The game configuration, e.g. `(mode: human_vs_human)`.
    #[clap(default_value_t)]
    config: Config,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let io = Io::new(stdout(), stdin());
        Terminal::new(io, Session::with_config(&self.config)).run()
    }
}

struct Terminal<W: Write, R: Read> {
    io: Io<W, R>,
    session: Session,
}

impl<W: Write, R: Read> Terminal<W, R> {
    fn new(io: Io<W, R>, session: Session) -> Self {
        Terminal { io, session }
    }

    fn show(&mut self) -> io::Result<()> {
        self.io.send(format_args!("{:#}", self.session.board()))?;

        let turn = self.session.turn();
        match self.session.selected() {
            Some(sq) => self.io.send(format_args!("{sq} is selected")),
            None => self.io.send(format_args!("{turn} to move")),
        }
    }

    fn click(&mut self, sq: Square) -> Result<Option<Selection>, Rejected> {
        match self.session.selected() {
            Some(whence) if whence != sq => {
                self.session.confirm(sq)?;
                Ok(None)
            }

            _ => Ok(Some(self.session.select(sq)?)),
        }
    }

    fn report(&mut self) -> io::Result<()> {
        let events: Vec<_> = self.session.events().collect();

        for e in events {
            match e {
                Event::Played(m, Some(p)) => self.io.send(format_args!("{m} captures {p:#}"))?,
                Event::Played(m, None) => self.io.send(m)?,
                Event::TurnChanged(_) => {}
                Event::GameEnded(o) => self.io.send(o)?,
            }
        }

        if self.session.outcome().is_some() {
            self.session.reset();
            self.io.send("new game")?;
        }

        Ok(())
    }

    fn run(&mut self) -> Result<(), Anyhow> {
        info!(mode = %self.session.mode(), "new game");
        self.show()?;

        loop {
            self.io.flush()?;

            let line = match self.io.recv() {
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break Ok(()),
                r => r?,
            };

            match line.trim() {
                "" => continue,
                "quit" => break Ok(()),
                "reset" => self.session.reset(),

                s => match s.parse::<Square>() {
                    Err(e) => {
                        warn!("{:?}", Anyhow::new(e).context("invalid square"));
                        self.io.send(format_args!("'{s}' is not a square"))?;
                        continue;
                    }

                    Ok(sq) => match self.click(sq) {
                        Err(e) => self.io.send(e)?,
                        Ok(Some(Selection::Selected(ds))) if ds.is_empty() => {
                            self.io.send(format_args!("{sq} has no moves"))?
                        }
                        Ok(Some(Selection::Selected(ds))) => {
                            let ds: Vec<_> = ds.iter().map(Square::to_string).collect();
                            self.io.send(ds.join(" "))?
                        }
                        Ok(Some(Selection::Deselected)) | Ok(None) => {}
                    },
                },
            }

            self.report()?;
            self.show()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::chess::{Board, Color, Move};
    use lib::game::Mode;
    use proptest::{sample::select, strategy::Strategy};
    use rand::{rngs::StdRng, SeedableRng};
    use test_strategy::proptest;

    fn any_mode() -> impl Strategy<Value = Mode> {
        select(vec![Mode::HumanVsHuman, Mode::HumanVsAutomated])
    }

    fn play(mode: Mode, seed: u64, input: &str) -> (Session, String) {
        let mut output = Vec::new();
        let io = Io::new(&mut output, input.as_bytes());
        let session = Session::new(mode, StdRng::seed_from_u64(seed));
        let mut terminal = Terminal::new(io, session);
        assert!(terminal.run().is_ok());
        let Terminal { session, io } = terminal;
        drop(io);
        (session, String::from_utf8(output).unwrap())
    }

    #[proptest]
    fn squares_are_interpreted_as_clicks(seed: u64) {
        let (s, output) = play(Mode::HumanVsHuman, seed, "e2\ne4\n");

        let mut expected = Board::default();
        expected.play(Move("e2".parse()?, "e4".parse()?));

        assert_eq!(s.board(), &expected);
        assert_eq!(s.turn(), Color::Black);
        assert!(output.contains("e3 e4"));
        assert!(output.contains("e2e4"));
    }

    #[proptest]
    fn clicking_the_selected_square_deselects_it(#[strategy(any_mode())] mode: Mode, seed: u64) {
        let (s, _) = play(mode, seed, "b1\nb1\n");
        assert_eq!(s.selected(), None);
        assert_eq!(s.board(), &Board::default());
    }

    #[proptest]
    fn rejected_clicks_are_reported(#[strategy(any_mode())] mode: Mode, seed: u64) {
        let (s, output) = play(mode, seed, "e5\ne7\n");
        assert_eq!(s.board(), &Board::default());
        assert!(output.contains(&Rejected::EmptySquare("e5".parse()?).to_string()));
        assert!(output.contains(&Rejected::OpponentPiece("e7".parse()?).to_string()));
    }

    #[proptest]
    fn invalid_input_is_ignored(#[strategy(any_mode())] mode: Mode, seed: u64) {
        let (s, output) = play(mode, seed, "z9\n\ne2\n");
        assert!(output.contains("'z9' is not a square"));
        assert_eq!(s.selected(), Some("e2".parse()?));
    }

    #[proptest]
    fn reset_starts_a_new_game(seed: u64) {
        let (s, _) = play(Mode::HumanVsHuman, seed, "e2\ne4\nreset\n");
        assert_eq!(s.board(), &Board::default());
        assert_eq!(s.turn(), Color::White);
    }

    #[proptest]
    fn quit_ignores_the_remaining_input(#[strategy(any_mode())] mode: Mode, seed: u64) {
        let (s, _) = play(mode, seed, "quit\ne2\n");
        assert_eq!(s.selected(), None);
    }

    #[proptest]
    fn a_new_game_starts_once_the_game_ends(seed: u64) {
        let input = "f2\nf3\ne7\ne5\ng2\ng4\nd8\nh4\ne2\ne3\nh4\ne1\n";
        let (s, output) = play(Mode::HumanVsHuman, seed, input);

        assert!(output.contains("black wins by capturing the opponent's king"));
        assert!(output.contains("new game"));
        assert_eq!(s.board(), &Board::default());
        assert_eq!(s.outcome(), None);
    }
}
