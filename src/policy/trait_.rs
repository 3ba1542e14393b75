//! Policy trait shared by learners and baselines.

use crate::game::{Action, GameState};

/// Anything that picks a move given the current state.
pub trait Policy {
    /// Selects one of `available` for `state`.
    ///
    /// `available` is never empty when called by the drivers in this crate.
    fn select_action(&mut self, state: &GameState, available: &[Action]) -> Action;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
