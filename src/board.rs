//! Board representation.
//!
//! The board is a square grid of cells stored row-major in a flat vector.
//! A cell is `None` when empty or holds one of the two placeable symbols.
//! Symbols are not tied to players: either side may place either symbol.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{EMPTY_CHAR, MIN_SIZE};

/// One of the two placeable marks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Both symbols, in the order the engine tries them.
    pub const ALL: [Symbol; 2] = [Symbol::X, Symbol::O];

    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }

    /// Parse a symbol character, ignoring case.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'X' => Some(Symbol::X),
            'O' => Some(Symbol::O),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Symbol {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next().and_then(Symbol::from_char), chars.next()) {
            (Some(symbol), None) => Ok(symbol),
            _ => Err(BoardError::UnknownSymbol(s.to_string())),
        }
    }
}

/// A cell coordinate as `(row, col)`.
pub type Point = (usize, usize);

/// Errors raised by board construction and access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {size} is too small, a five-line needs at least {min}", min = MIN_SIZE)]
    InvalidSize { size: usize },
    #[error("point ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("point ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[error("invalid board diagram: {0}")]
    Parse(String),
    #[error("unknown symbol {0:?}, expected X or O")]
    UnknownSymbol(String),
}

/// An N×N grid of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Symbol>>,
}

impl Board {
    /// Create an empty board. Fails for sizes that cannot hold a five-line.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size < MIN_SIZE {
            return Err(BoardError::InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, (row, col): Point) -> usize {
        row * self.size + col
    }

    fn checked_idx(&self, point: Point) -> Result<usize, BoardError> {
        if self.contains(point) {
            Ok(self.idx(point))
        } else {
            let (row, col) = point;
            Err(BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    pub fn contains(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, point: Point) -> Result<Option<Symbol>, BoardError> {
        self.checked_idx(point).map(|i| self.cells[i])
    }

    pub fn set(&mut self, point: Point, cell: Option<Symbol>) -> Result<(), BoardError> {
        let i = self.checked_idx(point)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Unchecked read for scans that only walk in-bounds points.
    #[inline]
    pub(crate) fn cell(&self, point: Point) -> Option<Symbol> {
        self.cells[self.idx(point)]
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// True iff every cell is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(move |(i, _)| (i / size, i % size))
    }

    /// Tentatively place `symbol` on an empty cell.
    ///
    /// The returned guard dereferences to the board with the symbol in place
    /// and clears the cell again when dropped, so a speculative placement can
    /// never outlive the evaluation that needed it.
    pub fn speculate(&mut self, point: Point, symbol: Symbol) -> Result<Speculation<'_>, BoardError> {
        let index = self.checked_idx(point)?;
        if self.cells[index].is_some() {
            let (row, col) = point;
            return Err(BoardError::Occupied { row, col });
        }
        self.cells[index] = Some(symbol);
        Ok(Speculation { board: self, index })
    }
}

/// A symbol placed by [`Board::speculate`], removed again on drop.
pub struct Speculation<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = None;
    }
}

fn parse_cell(ch: char) -> Result<Option<Symbol>, BoardError> {
    match ch {
        EMPTY_CHAR => Ok(None),
        _ => Symbol::from_char(ch)
            .map(Some)
            .ok_or_else(|| BoardError::Parse(format!("unexpected character {ch:?}"))),
    }
}

/// Parse a board diagram: one line per row, `X`, `O` or `.` per cell.
/// Whitespace inside a row and blank lines are ignored.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for line in s.lines() {
            let row = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(parse_cell)
                .collect::<Result<Vec<_>, _>>()?;
            if !row.is_empty() {
                rows.push(row);
            }
        }

        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(BoardError::Parse(format!(
                "expected {size} cells per row, found a row with {}",
                row.len()
            )));
        }

        let mut board = Board::new(size)?;
        board.cells = rows.into_iter().flatten().collect();
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                let ch = self.cell((row, col)).map_or(EMPTY_CHAR, Symbol::as_char);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
