use crate::chess::{Color, Move, ParsePieceError, Piece, Role, Square};
use derive_more::{DebugCustom, Display, Error, From};
use std::fmt::{self, Formatter, Write};
use std::{ops::Index, str::FromStr};

/// The piece placement on the board.
///
/// This type does not validate whether the placement it holds is reachable
/// according to any set of chess rules, nor does it require either side to have a king.
///
/// Prints as the piece placement field of a [FEN] string,
/// while the alternate form `{:#}` prints a framed grid.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Board(\"{}\")", self)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

// Deriving Arbitrary overflows the stack generating large arrays.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, prelude::*};

        vec(any::<Option<Piece>>(), 64)
            .prop_map(|v| {
                let mut board = Board::empty();
                board.squares.iter_mut().zip(v).for_each(|(s, p)| *s = p);
                board
            })
            .boxed()
    }
}

impl Default for Board {
    /// The standard starting position.
    fn default() -> Self {
        let mut board = Board::empty();

        for c in [Color::White, Color::Black] {
            for (col, role) in (0..).zip(Role::BACK_ROW) {
                let pawn = Piece::new(Role::Pawn, c);
                board.set(Square::new(c.back_row(), col), Some(Piece::new(role, c)));
                board.set(Square::new(c.home_row(), col), Some(pawn));
            }
        }

        board
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Places a [`Piece`] on, or clears, the given [`Square`].
    ///
    /// Returns whatever occupied the square before.
    #[inline(always)]
    pub fn set(&mut self, sq: Square, p: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.index()], p)
    }

    /// Whether the given [`Square`] holds no piece.
    #[inline(always)]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Whether the given [`Square`] holds a piece of the given [`Color`].
    #[inline(always)]
    pub fn is_occupied_by(&self, sq: Square, c: Color) -> bool {
        self.get(sq).is_some_and(|p| p.color() == c)
    }

    /// Clears the board and restores the standard starting position.
    pub fn reset(&mut self) {
        *self = Board::default();
    }

    /// An iterator over the occupied squares, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| Some((sq, self.get(sq)?)))
    }

    /// The number of pieces on the board.
    pub fn count(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    /// Relocates the piece on the source square of a [`Move`] to its destination.
    ///
    /// Returns the piece captured on the destination, if any.
    /// No validation is performed, see [`destinations`][`crate::chess::destinations`].
    pub fn play(&mut self, m: Move) -> Option<Piece> {
        debug_assert!(!self.is_empty(m.whence()));
        let piece = self.set(m.whence(), None);
        self.set(m.whither(), piece)
    }

    fn grid(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let files = || (b'a'..=b'h').map(char::from);

        write!(f, "   ")?;
        for file in files() {
            write!(f, "  {file} ")?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        for row in 0..8 {
            let rank = 8 - row;
            write!(f, " {rank} |")?;

            for col in 0..8 {
                match self.get(Square::new(row, col)) {
                    Some(p) => write!(f, " {p:#} |")?,
                    None => write!(f, "   |")?,
                }
            }

            writeln!(f, " {rank}")?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "   ")?;
        for file in files() {
            write!(f, "  {file} ")?;
        }

        Ok(())
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.grid(f);
        }

        for row in 0..8 {
            if row > 0 {
                f.write_char('/')?;
            }

            let mut empty = 0;
            for col in 0..8 {
                match self.get(Square::new(row, col)) {
                    None => empty += 1,
                    Some(p) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }

                        write!(f, "{p}")?;
                    }
                }
            }

            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Board`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse board, expected 8 rows separated by `/`")]
    #[from(ignore)]
    InvalidRowCount,
    #[display(fmt = "failed to parse board, row {} does not span 8 squares", _0)]
    #[from(ignore)]
    InvalidRowLength(#[error(not(source))] u8),
    #[display(fmt = "failed to parse board")]
    InvalidPiece(ParsePieceError),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<_> = s.split('/').collect();
        if rows.len() != 8 {
            return Err(ParseBoardError::InvalidRowCount);
        }

        let mut board = Board::empty();
        for (row, text) in (0..).zip(rows) {
            let mut col = 0;
            for c in text.chars() {
                match c.to_digit(10) {
                    Some(n @ 1..=8) => col = u8::saturating_add(col, n as u8),
                    _ if col < 8 => {
                        board.set(Square::new(row, col), Some(c.try_into()?));
                        col += 1;
                    }
                    _ => return Err(ParseBoardError::InvalidRowLength(row)),
                }
            }

            if col != 8 {
                return Err(ParseBoardError::InvalidRowLength(row));
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn default_board_is_the_standard_starting_position() {
        assert_eq!(
            Board::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn default_board_has_sixteen_pieces_per_side() {
        let board = Board::default();
        assert_eq!(board.count(), 32);

        for c in [Color::White, Color::Black] {
            assert_eq!(board.iter().filter(|(_, p)| p.color() == c).count(), 16);
        }
    }

    #[test]
    fn white_occupies_the_bottom_rows() {
        let board = Board::default();
        let e1 = Square::new(7, 4);
        let e8 = Square::new(0, 4);
        assert_eq!(board[e1], Some(Piece::new(Role::King, Color::White)));
        assert_eq!(board[e8], Some(Piece::new(Role::King, Color::Black)));
        assert!(Square::iter()
            .filter(|sq| sq.row() >= 6)
            .all(|sq| board.is_occupied_by(sq, Color::White)));
    }

    #[test]
    fn empty_board_has_no_pieces() {
        assert_eq!(Board::empty().count(), 0);
        assert_eq!(Board::empty().to_string(), "8/8/8/8/8/8/8/8");
    }

    #[proptest]
    fn set_replaces_the_contents_of_a_square(mut b: Board, sq: Square, p: Option<Piece>) {
        let before = b.get(sq);
        assert_eq!(b.set(sq, p), before);
        assert_eq!(b.get(sq), p);
        assert_eq!(b[sq], p);
    }

    #[proptest]
    fn set_does_not_affect_other_squares(mut b: Board, sq: Square, p: Option<Piece>) {
        let before = b;
        b.set(sq, p);

        for other in Square::iter().filter(|&o| o != sq) {
            assert_eq!(b[other], before[other]);
        }
    }

    #[proptest]
    fn square_is_empty_if_it_holds_no_piece(b: Board, sq: Square) {
        assert_eq!(b.is_empty(sq), b[sq].is_none());
    }

    #[proptest]
    fn square_is_occupied_by_the_color_of_its_piece(b: Board, sq: Square, c: Color) {
        assert_eq!(b.is_occupied_by(sq, c), b[sq].map(|p| p.color()) == Some(c));
    }

    #[proptest]
    fn reset_restores_the_starting_position(mut b: Board) {
        b.reset();
        assert_eq!(b, Board::default());
    }

    #[proptest]
    fn iter_returns_every_occupied_square(b: Board) {
        assert_eq!(b.iter().count(), b.count());

        for (sq, p) in b.iter() {
            assert_eq!(b[sq], Some(p));
        }
    }

    #[proptest]
    fn play_relocates_the_piece(
        mut b: Board,
        #[filter(!#b.is_empty(#whence))] whence: Square,
        #[filter(#whence != #whither)] whither: Square,
    ) {
        let piece = b[whence];
        let target = b[whither];
        assert_eq!(b.play(Move(whence, whither)), target);
        assert_eq!(b[whence], None);
        assert_eq!(b[whither], piece);
    }

    #[proptest]
    fn play_removes_exactly_the_captured_piece(
        mut b: Board,
        #[filter(!#b.is_empty(#whence))] whence: Square,
        #[filter(#whence != #whither)] whither: Square,
    ) {
        let before = b.count();
        let capture = b.play(Move(whence, whither));
        assert_eq!(before, b.count() + capture.is_some() as usize);
    }

    #[proptest]
    fn parsing_printed_board_is_an_identity(b: Board) {
        assert_eq!(b.to_string().parse(), Ok(b));
    }

    #[proptest]
    fn parsing_board_fails_if_not_eight_rows(
        #[strategy(0usize..16)]
        #[filter(#n != 8)]
        n: usize,
    ) {
        let s = vec!["8"; n].join("/");
        assert_eq!(s.parse::<Board>(), Err(ParseBoardError::InvalidRowCount));
    }

    #[test]
    fn parsing_board_fails_if_row_does_not_span_eight_squares() {
        assert_eq!(
            "8/8/7/8/8/8/8/8".parse::<Board>(),
            Err(ParseBoardError::InvalidRowLength(2))
        );

        assert_eq!(
            "8/8/8/8/8/8/8/8p".parse::<Board>(),
            Err(ParseBoardError::InvalidRowLength(7))
        );
    }

    #[test]
    fn parsing_board_fails_if_piece_is_invalid() {
        assert_eq!(
            "8/8/8/8/8/8/8/7x".parse::<Board>(),
            Err(ParseBoardError::InvalidPiece(ParsePieceError))
        );
    }

    #[test]
    fn alternate_form_prints_a_framed_grid() {
        let grid = format!("{:#}", Board::default());
        let lines: Vec<_> = grid.lines().collect();
        assert_eq!(lines.len(), 19);
        assert!(lines[2].starts_with(" 8 | ♜ |"));
        assert!(lines[16].starts_with(" 1 | ♖ |"));
    }
}
