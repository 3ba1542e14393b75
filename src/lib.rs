//! tictac_rl - tabular Q-learning on a 3x3 two-player grid game
//!
//! An environment-agent pair for studying reinforcement learning on a small,
//! fully observable game. The [`game`] module owns the grid, turn order,
//! terminal detection and rewards; the [`agent`] module learns a sparse
//! (state, action) value table with ε-greedy exploration. The two never call
//! each other: a driver such as [`training::SelfPlayTrainer`] mediates.

pub mod agent;
pub mod game;
pub mod policy;
pub mod training;

pub use agent::{QLearningAgent, QLearningConfig, ValueTable};
pub use game::{Action, GameError, GameState, Player, StepResult, TerminalStatus, TicTacToe};
pub use policy::Policy;
