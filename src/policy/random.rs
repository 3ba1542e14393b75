//! Random policy for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Policy;
use crate::game::{Action, GameState};

/// Uniformly random choice among the available actions.
///
/// Used for sanity checks and as a lower-bound opponent.
#[derive(Debug, Clone)]
pub struct RandomPolicy<R = StdRng> {
    rng: R,
}

impl RandomPolicy<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomPolicy<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomPolicy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Policy for RandomPolicy<R> {
    fn select_action(&mut self, _state: &GameState, available: &[Action]) -> Action {
        assert!(
            !available.is_empty(),
            "select_action requires at least one available action"
        );
        available[self.rng.gen_range(0..available.len())]
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_policy_actions_in_range() {
        let mut policy = RandomPolicy::with_seed(9);
        let state = GameState::default();
        let available = [0, 4, 8];
        for _ in 0..100 {
            assert!(available.contains(&policy.select_action(&state, &available)));
        }
    }

    #[test]
    fn random_policy_single_action() {
        let mut policy = RandomPolicy::with_seed(9);
        assert_eq!(policy.select_action(&GameState::default(), &[5]), 5);
        assert_eq!(policy.name(), "random");
    }
}
