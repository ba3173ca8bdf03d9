use crate::chess::{Board, Color, Move, Piece, Role, Square};
use arrayvec::ArrayVec;

/// The squares a single piece may move to.
///
/// A queen in the middle of an empty board reaches 27 squares, more than any other piece.
pub type Destinations = ArrayVec<Square, 27>;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const ROYAL: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// The [pseudo-legal] destinations of a [`Piece`] standing on a [`Square`].
///
/// Moves are generated without regard to whether they leave the mover's king capturable,
/// and neither castling, en passant nor promotion exist.
/// The order of the destinations is deterministic for a given [`Board`].
///
/// [pseudo-legal]: https://www.chessprogramming.org/Pseudo-Legal_Move
pub fn destinations(board: &Board, piece: Piece, whence: Square) -> Destinations {
    let mut ds = Destinations::new();
    let side = piece.color();

    match piece.role() {
        Role::Pawn => advance(board, side, whence, &mut ds),
        Role::Knight => slide(board, side, whence, &KNIGHT, 1, &mut ds),
        Role::Bishop => slide(board, side, whence, &DIAGONAL, 7, &mut ds),
        Role::Rook => slide(board, side, whence, &ORTHOGONAL, 7, &mut ds),
        Role::Queen => slide(board, side, whence, &ROYAL, 7, &mut ds),
        Role::King => slide(board, side, whence, &ROYAL, 1, &mut ds),
    }

    ds
}

/// Every [pseudo-legal] [`Move`] of the given side, scanning the board in index order.
///
/// [pseudo-legal]: https://www.chessprogramming.org/Pseudo-Legal_Move
pub fn moves(board: &Board, side: Color) -> impl Iterator<Item = Move> + '_ {
    board
        .iter()
        .filter(move |(_, p)| p.color() == side)
        .flat_map(move |(whence, p)| {
            let ds = destinations(board, p, whence);
            ds.into_iter().map(move |whither| Move(whence, whither))
        })
}

fn advance(board: &Board, side: Color, whence: Square, ds: &mut Destinations) {
    let forward = side.forward();

    if let Some(one) = whence.offset(forward, 0).filter(|&sq| board.is_empty(sq)) {
        ds.push(one);

        if whence.row() == side.home_row() {
            if let Some(two) = one.offset(forward, 0).filter(|&sq| board.is_empty(sq)) {
                ds.push(two);
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(sq) = whence.offset(forward, dc) {
            if board.is_occupied_by(sq, !side) {
                ds.push(sq);
            }
        }
    }
}

fn slide(
    board: &Board,
    side: Color,
    whence: Square,
    rays: &[(i8, i8)],
    reach: usize,
    ds: &mut Destinations,
) {
    for &(dr, dc) in rays {
        let mut sq = whence;
        for _ in 0..reach {
            match sq.offset(dr, dc) {
                None => break,
                Some(next) => sq = next,
            }

            match board[sq] {
                None => ds.push(sq),
                Some(p) => {
                    if p.color() != side {
                        ds.push(sq);
                    }

                    break;
                }
            }
        }
    }
}
