//! Five-in-a-row detection.
//!
//! The detector slides a five-cell window over every row, column and both
//! diagonal directions. The scan order is fixed so that the first line found
//! is reproducible:
//!
//! 1. Rows, top to bottom, each window left to right
//! 2. Columns, left to right, each window top to bottom
//! 3. Descending diagonals (↘), by start row then start column
//! 4. Ascending diagonals (↗), start rows from `4` down the board
//!
//! Cells of a returned line are listed in the direction of the scan, so an
//! ascending diagonal starts at its bottom-left cell.

use crate::board::{Board, Point, Symbol};
use crate::constants::WIN_LENGTH;

/// The coordinates of a completed five-line.
pub type WinLine = [Point; WIN_LENGTH];

#[derive(Copy, Clone, Debug)]
enum Direction {
    Row,
    Column,
    Descending,
    Ascending,
}

impl Direction {
    #[inline]
    fn step(self, (row, col): Point, k: usize) -> Point {
        match self {
            Direction::Row => (row, col + k),
            Direction::Column => (row + k, col),
            Direction::Descending => (row + k, col + k),
            Direction::Ascending => (row - k, col + k),
        }
    }
}

/// Window starts in scan order.
fn windows(size: usize) -> impl Iterator<Item = (Point, Direction)> {
    let last = size - WIN_LENGTH;
    let rows = (0..size).flat_map(move |r| (0..=last).map(move |c| ((r, c), Direction::Row)));
    let cols = (0..size).flat_map(move |c| (0..=last).map(move |r| ((r, c), Direction::Column)));
    let desc =
        (0..=last).flat_map(move |r| (0..=last).map(move |c| ((r, c), Direction::Descending)));
    let asc = (WIN_LENGTH - 1..size)
        .flat_map(move |r| (0..=last).map(move |c| ((r, c), Direction::Ascending)));
    rows.chain(cols).chain(desc).chain(asc)
}

fn window(board: &Board, start: Point, dir: Direction, symbol: Symbol) -> Option<WinLine> {
    let line: WinLine = std::array::from_fn(|k| dir.step(start, k));
    line.iter()
        .all(|&p| board.cell(p) == Some(symbol))
        .then_some(line)
}

/// Find the first five-line of `cell` in scan order.
///
/// Passing `None` (an empty cell) never finds anything.
pub fn find_five(board: &Board, cell: impl Into<Option<Symbol>>) -> Option<WinLine> {
    let symbol = cell.into()?;
    windows(board.size()).find_map(|(start, dir)| window(board, start, dir, symbol))
}

/// Check whether `symbol` forms five-in-a-row anywhere on the board.
#[inline]
pub fn has_five_in_a_row(board: &Board, symbol: Symbol) -> bool {
    find_five(board, symbol).is_some()
}

/// Find a five-line of either symbol, X first.
pub fn find_any_five(board: &Board) -> Option<(Symbol, WinLine)> {
    Symbol::ALL
        .into_iter()
        .find_map(|symbol| find_five(board, symbol).map(|line| (symbol, line)))
}

/// Check whether either symbol forms a five-line.
#[inline]
pub fn has_any_five(board: &Board) -> bool {
    Symbol::ALL.into_iter().any(|symbol| has_five_in_a_row(board, symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        diagram.parse().unwrap()
    }

    #[test]
    fn test_empty_board_has_no_line() {
        let b = Board::new(9).unwrap();
        assert!(!has_five_in_a_row(&b, Symbol::X));
        assert!(!has_five_in_a_row(&b, Symbol::O));
        assert_eq!(find_any_five(&b), None);
    }

    #[test]
    fn test_empty_cell_never_forms_a_line() {
        let b = Board::new(6).unwrap();
        assert_eq!(find_five(&b, None), None);
    }

    #[test]
    fn test_row() {
        let b = board(
            "......
             .XXXXX
             ......
             ......
             ......
             ......",
        );
        assert_eq!(find_five(&b, Symbol::X), Some([(1, 1), (1, 2), (1, 3), (1, 4), (1, 5)]));
        assert!(!has_five_in_a_row(&b, Symbol::O));
    }

    #[test]
    fn test_column() {
        let b = board(
            "......
             ....O.
             ....O.
             ....O.
             ....O.
             ....O.",
        );
        assert_eq!(find_five(&b, Symbol::O), Some([(1, 4), (2, 4), (3, 4), (4, 4), (5, 4)]));
    }

    #[test]
    fn test_descending_diagonal_lists_top_left_first() {
        let b = board(
            "......
             X.....
             .X....
             ..X...
             ...X..
             ....X.",
        );
        assert_eq!(find_five(&b, Symbol::X), Some([(1, 0), (2, 1), (3, 2), (4, 3), (5, 4)]));
    }

    #[test]
    fn test_ascending_diagonal_lists_bottom_left_first() {
        let b = board(
            ".....O
             ....O.
             ...O..
             ..O...
             .O....
             ......",
        );
        assert_eq!(find_five(&b, Symbol::O), Some([(4, 1), (3, 2), (2, 3), (1, 4), (0, 5)]));
    }

    #[test]
    fn test_four_is_not_enough() {
        let b = board(
            "XXXXO.
             ......
             O.....
             O.....
             O.....
             O.....",
        );
        assert!(!has_five_in_a_row(&b, Symbol::X));
        assert!(!has_five_in_a_row(&b, Symbol::O));
    }

    #[test]
    fn test_six_counts() {
        let b = board(
            "......
             ......
             ......
             XXXXXX
             ......
             ......",
        );
        assert_eq!(find_five(&b, Symbol::X), Some([(3, 0), (3, 1), (3, 2), (3, 3), (3, 4)]));
    }

    #[test]
    fn test_mixed_symbols_do_not_count() {
        let b = board(
            "XXOXX.
             ......
             ......
             ......
             ......
             ......",
        );
        assert!(!has_any_five(&b));
    }

    #[test]
    fn test_rows_are_scanned_before_columns() {
        let b = board(
            "X.....
             X.....
             X.....
             X.....
             X.....
             .XXXXX",
        );
        assert_eq!(find_five(&b, Symbol::X), Some([(5, 1), (5, 2), (5, 3), (5, 4), (5, 5)]));
    }

    #[test]
    fn test_any_five_prefers_x() {
        let b = board(
            "OOOOO.
             ......
             ......
             ......
             ......
             XXXXX.",
        );
        let (symbol, line) = find_any_five(&b).unwrap();
        assert_eq!(symbol, Symbol::X);
        assert_eq!(line[0], (5, 0));
    }
}
