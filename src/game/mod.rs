//! The 3x3 grid game: state representation, transition engine and terminal
//! detection.

pub mod environment;
pub mod error;
pub mod lines;
pub mod types;


pub use environment::{StepResult, TicTacToe, DRAW_REWARD};
pub use error::{GameError, MoveRejection};
pub use lines::{evaluate_grid, LINES};
pub use types::{Action, GameState, Grid, Player, TerminalStatus, CELLS, DIMENSION, EMPTY};
