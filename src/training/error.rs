use thiserror::Error;

use crate::agent::ConfigError;
use crate::game::GameError;

/// Errors surfaced by the training and evaluation drivers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrainingError {
    #[error("Invalid agent configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment rejected a move: {0}")]
    Game(#[from] GameError),
}
