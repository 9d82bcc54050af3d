//! Computer move selection.
//!
//! The policy looks exactly one move ahead, trying candidates in strict
//! priority order over the empty cells in row-major order:
//!
//! 1. **Win** (Order only): the first cell and symbol, X before O, that
//!    completes a five-line.
//! 2. **Block** (Chaos only): the first cell where exactly one of the two
//!    symbols would complete a five-line. Chaos takes the cell with the
//!    other symbol. Cells where both or neither symbol complete a line are
//!    passed over.
//! 3. **Positional**: a uniformly random pick among the three empty cells
//!    nearest the center by Manhattan distance (ties in row-major order),
//!    with a uniformly random symbol.
//!
//! Candidates are evaluated with [`Board::speculate`], so the board is
//! unchanged when the policy returns. The chosen move is not applied.

use std::fmt;

use tracing::debug;

use crate::board::{Board, Point, Symbol};
use crate::constants::FALLBACK_CANDIDATES;
use crate::game::{Move, Role};
use crate::random::RandomSource;
use crate::win::has_any_five;

/// Which priority step produced a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Completes a five-line for Order.
    Win,
    /// Denies Order the only symbol that would complete a line at that cell.
    Block,
    /// Random pick near the center.
    Positional,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoveKind::Win => "win",
            MoveKind::Block => "block",
            MoveKind::Positional => "positional",
        };
        write!(f, "{s}")
    }
}

/// A chosen move together with the reason it was chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    pub kind: MoveKind,
}

impl Decision {
    fn new(point: Point, symbol: Symbol, kind: MoveKind) -> Self {
        Self {
            mv: Move { point, symbol },
            kind,
        }
    }
}

/// Select a move for `role`, or `None` if the board has no empty cell.
pub fn choose_move<R: RandomSource + ?Sized>(
    board: &mut Board,
    role: Role,
    rng: &mut R,
) -> Option<Move> {
    decide(board, role, rng).map(|d| d.mv)
}

/// Like [`choose_move`], also reporting which step produced the move.
pub fn decide<R: RandomSource + ?Sized>(
    board: &mut Board,
    role: Role,
    rng: &mut R,
) -> Option<Decision> {
    let empties: Vec<Point> = board.empty_points().collect();
    if empties.is_empty() {
        return None;
    }

    let forced = match role {
        Role::Order => find_win(board, &empties),
        Role::Chaos => find_block(board, &empties),
    };
    let decision = forced.unwrap_or_else(|| positional(board.size(), empties, rng));

    debug!(
        %role,
        kind = %decision.kind,
        mv = %decision.mv,
        "policy chose move"
    );
    Some(decision)
}

/// Would placing `symbol` at `point` complete a five-line of either symbol?
fn completes_line(board: &mut Board, point: Point, symbol: Symbol) -> bool {
    board
        .speculate(point, symbol)
        .is_ok_and(|trial| has_any_five(&trial))
}

fn find_win(board: &mut Board, empties: &[Point]) -> Option<Decision> {
    for &point in empties {
        for symbol in Symbol::ALL {
            if completes_line(board, point, symbol) {
                return Some(Decision::new(point, symbol, MoveKind::Win));
            }
        }
    }
    None
}

fn find_block(board: &mut Board, empties: &[Point]) -> Option<Decision> {
    for &point in empties {
        let x_completes = completes_line(board, point, Symbol::X);
        let o_completes = completes_line(board, point, Symbol::O);
        match (x_completes, o_completes) {
            (true, false) => return Some(Decision::new(point, Symbol::O, MoveKind::Block)),
            (false, true) => return Some(Decision::new(point, Symbol::X, MoveKind::Block)),
            // Both complete: the cell cannot be defended. Neither: no threat.
            _ => {}
        }
    }
    None
}

/// Manhattan distance to the center at `size / 2`, doubled so odd sizes
/// stay integral.
fn center_distance(size: usize, (row, col): Point) -> usize {
    (2 * row).abs_diff(size) + (2 * col).abs_diff(size)
}

fn positional<R: RandomSource + ?Sized>(
    size: usize,
    mut empties: Vec<Point>,
    rng: &mut R,
) -> Decision {
    // Stable sort keeps row-major order among equal distances.
    empties.sort_by_key(|&p| center_distance(size, p));
    let candidates = empties.len().min(FALLBACK_CANDIDATES);
    let point = empties[rng.index(candidates)];
    let symbol = if rng.coin() { Symbol::X } else { Symbol::O };
    Decision::new(point, symbol, MoveKind::Positional)
}
