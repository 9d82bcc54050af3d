//! Order & Chaos: rule engine and computer opponent.
//!
//! Order & Chaos is played on an N×N board where each move places either an
//! `X` or an `O`. Order wins by making five in a row of one symbol, Chaos
//! wins if the board fills up without one. This crate provides the game
//! state machine and a one-ply computer opponent.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and policy parameters
//! - [`board`] - Board storage, symbols and speculative placement
//! - [`win`] - Five-in-a-row detection
//! - [`policy`] - Computer move selection
//! - [`game`] - Roles, turns and match status
//! - [`random`] - Injectable random sources
//! - [`session`] - Text protocol for interactive play
//!
//! ## Example
//!
//! ```
//! use order_chaos::board::Symbol;
//! use order_chaos::game::{Game, Participant, Role, Status};
//!
//! let mut game = Game::with_roles(6, Role::Order, Participant::Human).unwrap();
//! game.apply_move(Participant::Human, (0, 0), Symbol::X).unwrap();
//!
//! // The computer plays Chaos and answers with a seeded random source.
//! let mut rng = fastrand::Rng::with_seed(7);
//! let decision = game.play_computer_turn(&mut rng).unwrap();
//! println!("Computer: {:?}", decision);
//! assert_eq!(game.status(), Status::InProgress);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod policy;
pub mod random;
pub mod session;
pub mod win;
