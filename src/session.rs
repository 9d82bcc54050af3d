//! Line-oriented text protocol for playing a match.
//!
//! The protocol follows the shape of GTP: one command per line, an optional
//! numeric id in front, and each response starts with `=` on success or `?`
//! on failure, followed by a blank line. The computer answers automatically
//! whenever a command leaves it to move.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `new [size]` - Start a new match, optionally on a new board size
//! - `size <n>` - Change board size and start a new match
//! - `symbol X|O` - Select the symbol used by `play`
//! - `play <row> <col> [X|O]` - Place a symbol (zero-based coordinates)
//! - `genmove` - Let the computer move if it is its turn
//! - `show` - Render the board
//! - `status` - Describe whose turn it is or who won
//! - `roles` - Show the role assignment
//! - `moves` - List the moves played so far
//!
//! ## Example
//!
//! ```ignore
//! use order_chaos::session::Session;
//! let mut session = Session::with_seed(6, 42)?;
//! session.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::warn;

use crate::board::{BoardError, Symbol};
use crate::constants::SUPPORTED_SIZES;
use crate::game::{Game, Participant, Status};
use crate::policy::Decision;
use crate::random::RandomSource;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "genmove",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "new",
    "play",
    "quit",
    "roles",
    "show",
    "size",
    "status",
    "symbol",
    "version",
];

/// Describe the state of `game` from the human's point of view.
pub fn status_message(game: &Game) -> String {
    match game.status() {
        Status::InProgress => match game.turn() {
            Participant::Human => "Your turn".to_string(),
            Participant::Computer => "Computer is thinking".to_string(),
        },
        status => {
            let verdict = if game.winner() == Some(Participant::Human) {
                "you win"
            } else {
                "you lose"
            };
            format!("{status} ({verdict})")
        }
    }
}

/// An interactive match driven by text commands.
pub struct Session {
    game: Game,
    rng: Box<dyn RandomSource>,
    /// Symbol placed by `play` when none is given
    selected: Symbol,
}

impl Session {
    /// Wrap an existing game. If the computer is to move it does so at once.
    pub fn new(game: Game, rng: Box<dyn RandomSource>) -> Self {
        let mut session = Self {
            game,
            rng,
            selected: Symbol::X,
        };
        session.computer_reply();
        session
    }

    /// Start a random match seeded from `seed`.
    pub fn with_seed(size: usize, seed: u64) -> Result<Self, BoardError> {
        Self::with_rng(size, fastrand::Rng::with_seed(seed))
    }

    /// Start a random match using `rng` for every random draw.
    pub fn with_rng(size: usize, mut rng: fastrand::Rng) -> Result<Self, BoardError> {
        let game = Game::new(size, &mut rng)?;
        Ok(Self::new(game, Box::new(rng)))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn selected_symbol(&self) -> Symbol {
        self.selected
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_io(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_io<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "order-chaos".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&arg.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "new" => match args.first() {
                Some(arg) => self.new_match_sized(arg),
                None => {
                    self.game.reset(&mut *self.rng);
                    let decision = self.computer_reply();
                    (true, self.report_new_match(decision))
                }
            },

            "size" => match args.first() {
                Some(arg) => self.new_match_sized(arg),
                None => (false, "missing argument".to_string()),
            },

            "symbol" => match args.first().map(|s| s.parse::<Symbol>()) {
                Some(Ok(symbol)) => {
                    self.selected = symbol;
                    (true, String::new())
                }
                Some(Err(e)) => (false, e.to_string()),
                None => (true, self.selected.to_string()),
            },

            "play" => self.play(args),

            "genmove" => match self.game.play_computer_turn(&mut *self.rng) {
                Ok(decision) => (true, self.report(decision)),
                Err(e) => (false, e.to_string()),
            },

            "show" => (true, format!("\n{}", self.game.board().to_string().trim_end())),

            "status" => (true, status_message(&self.game)),

            "roles" => (
                true,
                format!(
                    "human: {}, computer: {}",
                    self.game.human_role(),
                    self.game.computer_role()
                ),
            ),

            "moves" => {
                let moves: Vec<String> = self.game.moves().iter().map(|m| m.to_string()).collect();
                (true, moves.join("\n"))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn play(&mut self, args: &[&str]) -> (bool, String) {
        if args.len() < 2 {
            return (false, "missing arguments".to_string());
        }
        let (Ok(row), Ok(col)) = (args[0].parse::<usize>(), args[1].parse::<usize>()) else {
            return (false, "invalid coordinates".to_string());
        };
        let symbol = match args.get(2).map(|s| s.parse::<Symbol>()) {
            Some(Ok(symbol)) => symbol,
            Some(Err(e)) => return (false, e.to_string()),
            None => self.selected,
        };

        if let Err(e) = self.game.apply_move(Participant::Human, (row, col), symbol) {
            return (false, e.to_string());
        }
        let decision = self.computer_reply();
        (true, self.report(decision))
    }

    fn new_match_sized(&mut self, arg: &str) -> (bool, String) {
        let size = match arg.parse::<usize>() {
            Ok(size) if SUPPORTED_SIZES.contains(&size) => size,
            Ok(size) => {
                return (
                    false,
                    format!(
                        "unacceptable size {size}, expected {} to {}",
                        SUPPORTED_SIZES.start(),
                        SUPPORTED_SIZES.end()
                    ),
                );
            }
            Err(_) => return (false, "invalid size".to_string()),
        };
        if let Err(e) = self.game.resize(size, &mut *self.rng) {
            return (false, e.to_string());
        }
        let decision = self.computer_reply();
        (true, self.report_new_match(decision))
    }

    /// Let the computer move if the match is running and it is its turn.
    fn computer_reply(&mut self) -> Option<Decision> {
        if self.game.status().is_over() || self.game.turn() != Participant::Computer {
            return None;
        }
        match self.game.play_computer_turn(&mut *self.rng) {
            Ok(decision) => decision,
            Err(e) => {
                // Only reachable if the checks above and the game disagree.
                warn!(error = %e, "computer turn rejected");
                None
            }
        }
    }

    fn report(&self, decision: Option<Decision>) -> String {
        let mut lines = Vec::new();
        if let Some(d) = decision {
            lines.push(format!("computer plays {} ({})", d.mv, d.kind));
        }
        if let Some(line) = self.game.winning_line() {
            let cells: Vec<String> = line.iter().map(|(r, c)| format!("({r}, {c})")).collect();
            lines.push(format!("line: {}", cells.join(" ")));
        }
        lines.push(status_message(&self.game));
        lines.join("\n")
    }

    fn report_new_match(&self, decision: Option<Decision>) -> String {
        format!(
            "{}x{} board, you play {}\n{}",
            self.game.size(),
            self.game.size(),
            self.game.human_role(),
            self.report(decision)
        )
    }
}
