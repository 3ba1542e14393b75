//! Training and evaluation drivers.
//!
//! These sit outside the environment/agent pair and sequence their calls:
//! reset, query legal moves, choose, step, update.

pub mod error;
pub mod evaluation;
pub mod self_play;

pub use error::TrainingError;
pub use evaluation::EvaluationMetrics;
pub use self_play::{EpisodeOutcome, SelfPlayTrainer, TrainingStats};
