//! Tabular Q-learning agent.
//!
//! The agent depends on the game only through [`GameState`](crate::game::GameState)
//! and [`Action`](crate::game::Action); it never calls the environment.

pub mod config;
pub mod error;
pub mod q_learning;
pub mod value_table;

pub use config::{BootstrapScope, QLearningConfig, UpdateRule};
pub use error::ConfigError;
pub use q_learning::QLearningAgent;
pub use value_table::{ValueTable, DEFAULT_VALUE};
