use crate::chess::{
    destinations, moves, Board, Color, Destinations, Move, Outcome, Piece, Role, Square,
};
use crate::game::{Config, Event, KingsCaptured, Mode};
use derive_more::{Display, Error};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::vec::Drain;
use tracing::{debug, info, instrument};

/// The reason why an interaction with a [`Session`] was rejected.
///
/// A rejected interaction leaves the [`Session`] unchanged.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[error(ignore)]
pub enum Rejected {
    #[display(fmt = "the game has already ended, {}", _0)]
    GameHasEnded(Outcome),

    #[display(fmt = "it is the automated {} side's turn", _0)]
    AutomatedTurn(Color),

    #[display(fmt = "there is no piece on {}", _0)]
    EmptySquare(Square),

    #[display(fmt = "the piece on {} belongs to the opponent", _0)]
    OpponentPiece(Square),

    #[display(fmt = "the piece on {} is already selected", _0)]
    AlreadySelected(Square),

    #[display(fmt = "no piece is selected")]
    NothingSelected,

    #[display(fmt = "{} is not a legal move", _0)]
    IllegalMove(Move),
}

/// The result of a successful [`Session::select`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Selection {
    /// The piece was selected and may move to any of these squares.
    Selected(Destinations),

    /// The selected piece was selected again and is no longer selected.
    Deselected,
}

/// The result of a successful [`Session::confirm`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoveResult {
    /// The move was applied, capturing a piece or not.
    Applied(Option<Piece>),

    /// The game ended, either because of this move or because of the automated reply.
    GameEnded(Outcome),
}

/// The interaction state of a [`Session`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum State {
    /// Waiting for the side to move to select one of its pieces.
    AwaitingSelection,

    /// A piece is selected, along with the squares it may move to.
    PieceSelected(Square, Destinations),

    /// The game has ended and only [`Session::reset`] moves it forward.
    GameOver(Outcome),
}

/// A game in progress.
///
/// The session exclusively owns the [`Board`] and mutates it only in response to
/// [`Session::confirm`], including the automated reply in [`Mode::HumanVsAutomated`],
/// which is applied synchronously before `confirm` returns.
#[derive(Debug)]
pub struct Session<R = StdRng> {
    mode: Mode,
    board: Board,
    turn: Color,
    state: State,
    captured: KingsCaptured,
    events: Vec<Event>,
    rng: R,
}

impl Session<StdRng> {
    /// Starts a game according to a [`Config`].
    pub fn with_config(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Session::new(config.mode, rng)
    }
}

impl<R: Rng> Session<R> {
    /// Starts a game from the standard starting position with white to move.
    ///
    /// The automated side draws its moves from `rng`.
    pub fn new(mode: Mode, rng: R) -> Self {
        Session::from_position(mode, Board::default(), Color::White, rng)
    }

    /// Starts a game from an arbitrary placement with the given side to move.
    ///
    /// The game is over immediately if the side to move has no moves,
    /// and the automated side replies immediately if it is its turn.
    pub fn from_position(mode: Mode, board: Board, turn: Color, rng: R) -> Self {
        let mut session = Session {
            mode,
            board,
            turn,
            state: State::AwaitingSelection,
            captured: KingsCaptured::empty(),
            events: Vec::new(),
            rng,
        };

        if let Err(o) = session.take_turn() {
            debug!(outcome = %o, "game over on start");
        }

        session
    }

    /// The game mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The current piece placement.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The interaction state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The selected [`Square`], if any.
    pub fn selected(&self) -> Option<Square> {
        match self.state {
            State::PieceSelected(sq, _) => Some(sq),
            _ => None,
        }
    }

    /// The [`Outcome`], if the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            State::GameOver(o) => Some(o),
            _ => None,
        }
    }

    /// Which kings have been captured.
    pub fn captured(&self) -> KingsCaptured {
        self.captured
    }

    /// Drains the [`Event`]s emitted since the last call, oldest first.
    pub fn events(&mut self) -> Drain<'_, Event> {
        self.events.drain(..)
    }

    /// Whether the side to move is played automatically.
    pub fn is_automated_turn(&self) -> bool {
        self.mode == Mode::HumanVsAutomated && self.turn == Color::Black
    }

    /// Selects the piece on a [`Square`], or deselects it if it is already selected.
    #[instrument(level = "debug", skip(self), ret, err, fields(turn = %self.turn))]
    pub fn select(&mut self, sq: Square) -> Result<Selection, Rejected> {
        match self.state {
            State::GameOver(o) => Err(Rejected::GameHasEnded(o)),

            State::PieceSelected(whence, _) if whence == sq => {
                self.state = State::AwaitingSelection;
                Ok(Selection::Deselected)
            }

            State::PieceSelected(whence, _) => Err(Rejected::AlreadySelected(whence)),

            State::AwaitingSelection if self.is_automated_turn() => {
                Err(Rejected::AutomatedTurn(self.turn))
            }

            State::AwaitingSelection => match self.board[sq] {
                None => Err(Rejected::EmptySquare(sq)),
                Some(p) if p.color() != self.turn => Err(Rejected::OpponentPiece(sq)),
                Some(p) => {
                    let ds = destinations(&self.board, p, sq);
                    self.state = State::PieceSelected(sq, ds.clone());
                    Ok(Selection::Selected(ds))
                }
            },
        }
    }

    /// Moves the selected piece to a [`Square`], if it is one of its destinations.
    #[instrument(level = "debug", skip(self), ret, err, fields(turn = %self.turn))]
    pub fn confirm(&mut self, whither: Square) -> Result<MoveResult, Rejected> {
        let whence = match &self.state {
            State::GameOver(o) => return Err(Rejected::GameHasEnded(*o)),
            State::AwaitingSelection => return Err(Rejected::NothingSelected),
            State::PieceSelected(whence, ds) if ds.contains(&whither) => *whence,
            State::PieceSelected(whence, _) => {
                return Err(Rejected::IllegalMove(Move(*whence, whither)))
            }
        };

        self.state = State::AwaitingSelection;

        match self.apply(Move(whence, whither)) {
            Ok(capture) => Ok(MoveResult::Applied(capture)),
            Err(o) => Ok(MoveResult::GameEnded(o)),
        }
    }

    /// Restores the starting position with white to move and clears the captured kings.
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = Color::White;
        self.captured = KingsCaptured::empty();
        self.state = State::AwaitingSelection;
    }

    /// Like [`Session::reset`], but also changes the game mode.
    pub fn start(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    fn apply(&mut self, m: Move) -> Result<Option<Piece>, Outcome> {
        let mover = self.turn;
        let capture = self.board.play(m);
        debug!(%mover, %m, ?capture, "played");
        self.events.push(Event::Played(m, capture));

        if let Some(king) = capture.filter(|p| p.role() == Role::King) {
            self.captured |= KingsCaptured::of(king.color());
            return Err(self.end(Outcome::KingCaptured(mover)));
        }

        self.turn = !mover;
        self.events.push(Event::TurnChanged(self.turn));
        self.take_turn()?;

        Ok(capture)
    }

    fn take_turn(&mut self) -> Result<(), Outcome> {
        if self.is_automated_turn() {
            self.reply()
        } else if moves(&self.board, self.turn).next().is_none() {
            Err(self.end(Outcome::NoLegalMoves(!self.turn)))
        } else {
            Ok(())
        }
    }

    fn reply(&mut self) -> Result<(), Outcome> {
        let candidates: Vec<_> = moves(&self.board, self.turn).collect();

        match candidates.choose(&mut self.rng) {
            None => Err(self.end(Outcome::NoLegalMoves(!self.turn))),
            Some(&m) => {
                debug!(candidates = candidates.len(), %m, "automated reply");
                self.apply(m).map(drop)
            }
        }
    }

    fn end(&mut self, o: Outcome) -> Outcome {
        info!(outcome = %o, loser = %o.loser(), "game over");
        self.state = State::GameOver(o);
        self.events.push(Event::GameEnded(o));
        o
    }
}
