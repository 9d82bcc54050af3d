//! Match state: roles, turns, and terminal status.
//!
//! A [`Game`] owns the board for one match. Moves enter through
//! [`Game::apply_move`], which either applies a move completely (board write
//! plus status or turn update) or rejects it without touching anything.
//!
//! After every applied move the board is checked for a five-line, X first
//! then O. Any line ends the match as an Order win; otherwise a full board
//! ends it as a Chaos win; otherwise the turn passes to the other side.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, BoardError, Point, Symbol};
use crate::policy::{decide, Decision};
use crate::random::RandomSource;
use crate::win::{find_any_five, WinLine};

/// The side a participant plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Wins by completing five in a row of either symbol.
    Order,
    /// Wins when the board fills without a five-line.
    Chaos,
}

impl Role {
    pub fn opponent(self) -> Self {
        match self {
            Role::Order => Role::Chaos,
            Role::Chaos => Role::Order,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Order => write!(f, "Order"),
            Role::Chaos => write!(f, "Chaos"),
        }
    }
}

/// Who is making a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Participant {
    Human,
    Computer,
}

impl Participant {
    pub fn other(self) -> Self {
        match self {
            Participant::Human => Participant::Computer,
            Participant::Computer => Participant::Human,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Human => write!(f, "human"),
            Participant::Computer => write!(f, "computer"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    OrderWins,
    ChaosWins,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::InProgress
    }

    /// The winning role of a finished match.
    pub fn winner_role(self) -> Option<Role> {
        match self {
            Status::InProgress => None,
            Status::OrderWins => Some(Role::Order),
            Status::ChaosWins => Some(Role::Chaos),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress => write!(f, "in progress"),
            Status::OrderWins => write!(f, "Order wins"),
            Status::ChaosWins => write!(f, "Chaos wins"),
        }
    }
}

/// A symbol placed on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub point: Point,
    pub symbol: Symbol,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.point;
        write!(f, "{} at ({row}, {col})", self.symbol)
    }
}

/// Reasons a move is rejected. A rejected move leaves the game unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the match is over")]
    GameOver,
    #[error("it is the {expected}'s turn")]
    OutOfTurn { expected: Participant },
    #[error("point ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// One match of Order & Chaos between a human and the computer.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    human_role: Role,
    turn: Participant,
    status: Status,
    winning_line: Option<WinLine>,
    history: Vec<Move>,
}

impl Game {
    /// Start a match with random roles and a random first mover.
    ///
    /// The first coin decides roles (`true` makes the human Order), the
    /// second decides who moves first (`true` lets the human start).
    pub fn new<R: RandomSource + ?Sized>(size: usize, rng: &mut R) -> Result<Self, BoardError> {
        let board = Board::new(size)?;
        let (human_role, first) = draw_roles(rng);
        info!(size, %human_role, %first, "new match");
        Ok(Self::start(board, human_role, first))
    }

    /// Start a match with fixed roles and first mover.
    pub fn with_roles(size: usize, human_role: Role, first: Participant) -> Result<Self, BoardError> {
        Ok(Self::start(Board::new(size)?, human_role, first))
    }

    /// Resume a match from an existing position.
    ///
    /// The status is settled from the board the same way it is after a move,
    /// so a position that already holds a five-line or is full is terminal.
    pub fn from_board(board: Board, human_role: Role, to_move: Participant) -> Self {
        let mut game = Self::start(board, human_role, to_move);
        game.settle();
        game
    }

    fn start(board: Board, human_role: Role, first: Participant) -> Self {
        Self {
            board,
            human_role,
            turn: first,
            status: Status::InProgress,
            winning_line: None,
            history: Vec::new(),
        }
    }

    /// Discard the current match and start a new one on a board of the same size.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let mut board = self.board.clone();
        board.clear();
        let (human_role, first) = draw_roles(rng);
        info!(size = board.size(), %human_role, %first, "new match");
        *self = Self::start(board, human_role, first);
    }

    /// Start a new match on a board of a different size.
    ///
    /// An invalid size leaves the current match untouched.
    pub fn resize<R: RandomSource + ?Sized>(&mut self, size: usize, rng: &mut R) -> Result<(), BoardError> {
        *self = Self::new(size, rng)?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Whose move it is. Meaningless once the match is over.
    pub fn turn(&self) -> Participant {
        self.turn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The line that ended the match, if Order won.
    pub fn winning_line(&self) -> Option<&WinLine> {
        self.winning_line.as_ref()
    }

    pub fn human_role(&self) -> Role {
        self.human_role
    }

    pub fn computer_role(&self) -> Role {
        self.human_role.opponent()
    }

    pub fn role_of(&self, participant: Participant) -> Role {
        match participant {
            Participant::Human => self.human_role,
            Participant::Computer => self.computer_role(),
        }
    }

    /// Moves applied so far, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// The participant holding the winning role, once the match is over.
    pub fn winner(&self) -> Option<Participant> {
        let role = self.status.winner_role()?;
        if role == self.human_role {
            Some(Participant::Human)
        } else {
            Some(Participant::Computer)
        }
    }

    /// Apply a move for `mover`.
    ///
    /// Rejected when the match is over, when it is not `mover`'s turn, or
    /// when the point is off the board or occupied, checked in that order.
    pub fn apply_move(&mut self, mover: Participant, point: Point, symbol: Symbol) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if mover != self.turn {
            return Err(MoveError::OutOfTurn { expected: self.turn });
        }
        if self.board.get(point)?.is_some() {
            let (row, col) = point;
            return Err(MoveError::Occupied { row, col });
        }

        self.board.set(point, Some(symbol))?;
        let mv = Move { point, symbol };
        self.history.push(mv);
        debug!(%mover, %mv, "move applied");

        if !self.settle() {
            self.turn = self.turn.other();
        }
        Ok(())
    }

    /// Let the computer take its turn.
    ///
    /// Runs the move policy for the computer's role and applies its choice.
    /// If the board has no empty cell the match ends as a Chaos win.
    pub fn play_computer_turn<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<Decision>, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.turn != Participant::Computer {
            return Err(MoveError::OutOfTurn { expected: self.turn });
        }

        let role = self.computer_role();
        match decide(&mut self.board, role, rng) {
            Some(decision) => {
                self.apply_move(Participant::Computer, decision.mv.point, decision.mv.symbol)?;
                Ok(Some(decision))
            }
            None => {
                self.status = Status::ChaosWins;
                info!(status = %self.status, "no move left for the computer");
                Ok(None)
            }
        }
    }

    /// Update the status from the board. Returns true if the match is over.
    fn settle(&mut self) -> bool {
        if let Some((symbol, line)) = find_any_five(&self.board) {
            self.status = Status::OrderWins;
            self.winning_line = Some(line);
            info!(%symbol, start = ?line[0], "five in a row");
        } else if self.board.is_full() {
            self.status = Status::ChaosWins;
            info!("board full without a five-line");
        }
        self.status.is_over()
    }
}

/// Two independent coins: roles first, then the first mover.
fn draw_roles<R: RandomSource + ?Sized>(rng: &mut R) -> (Role, Participant) {
    let human_role = if rng.coin() { Role::Order } else { Role::Chaos };
    let first = if rng.coin() {
        Participant::Human
    } else {
        Participant::Computer
    };
    (human_role, first)
}
