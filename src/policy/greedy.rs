//! Exploit-only view over a learning agent.

use rand::Rng;

use super::trait_::Policy;
use crate::agent::QLearningAgent;
use crate::game::{Action, GameState};

/// Plays the agent's highest-valued action with no exploration.
///
/// Borrows the agent so evaluation runs against the live table without
/// touching the configured ε. Ties are still broken at random.
#[derive(Debug)]
pub struct GreedyPolicy<'a, R> {
    agent: &'a mut QLearningAgent<R>,
}

impl<'a, R: Rng> GreedyPolicy<'a, R> {
    pub fn new(agent: &'a mut QLearningAgent<R>) -> Self {
        Self { agent }
    }
}

impl<R: Rng> Policy for GreedyPolicy<'_, R> {
    fn select_action(&mut self, state: &GameState, available: &[Action]) -> Action {
        self.agent.greedy_action(state, available)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
