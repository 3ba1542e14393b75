//! Tabular Q-learning agent with ε-greedy exploration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{BootstrapScope, QLearningConfig, UpdateRule};
use super::value_table::ValueTable;
use crate::game::{Action, GameState, CELLS};
use crate::policy::Policy;

/// Q-learning agent over the 3x3 grid.
///
/// Owns a sparse [`ValueTable`] that persists across episodes and is the
/// agent's only memory of experience. The random source is injectable so
/// exploration and tie-breaking can be made reproducible.
///
/// The agent knows nothing about the environment beyond the
/// state/action/reward contract; a driver feeds it transitions.
#[derive(Debug, Clone)]
pub struct QLearningAgent<R = StdRng> {
    config: QLearningConfig,
    table: ValueTable,
    rng: R,
}

impl QLearningAgent<StdRng> {
    /// Creates an agent with an entropy-seeded random source.
    pub fn new(config: QLearningConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates an agent whose exploration and tie-breaking replay exactly
    /// for a given seed.
    pub fn with_seed(config: QLearningConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QLearningAgent<R> {
    /// Creates an agent with an empty table and the given random source.
    ///
    /// # Arguments
    ///
    /// * `config` - Hyper-parameters, fixed for the agent's lifetime
    /// * `rng` - Source for exploration draws and tie-breaking
    pub fn with_rng(config: QLearningConfig, rng: R) -> Self {
        Self::from_table(config, ValueTable::new(), rng)
    }

    /// Resumes from a previously learned table.
    ///
    /// # Arguments
    ///
    /// * `config` - Hyper-parameters, fixed for the agent's lifetime
    /// * `table` - Values learned by an earlier run; further updates extend it
    /// * `rng` - Source for exploration draws and tie-breaking
    pub fn from_table(config: QLearningConfig, table: ValueTable, rng: R) -> Self {
        Self { config, table, rng }
    }

    /// Stored value for `(state, action)`, or `0.0` if never written.
    ///
    /// Never mutates the table.
    pub fn get_value(&self, state: &GameState, action: Action) -> f64 {
        self.table.get(state, action)
    }

    /// ε-greedy action selection.
    ///
    /// With probability ε returns a uniformly random element of `available`;
    /// otherwise returns one of the highest-valued actions, see
    /// [`QLearningAgent::greedy_action`].
    ///
    /// # Panics
    ///
    /// Panics if `available` is empty. Callers must only ask for an action
    /// while at least one cell is free.
    pub fn choose_action(&mut self, state: &GameState, available: &[Action]) -> Action {
        assert!(
            !available.is_empty(),
            "choose_action requires at least one available action"
        );

        if self.rng.gen::<f64>() < self.config.epsilon {
            available[self.rng.gen_range(0..available.len())]
        } else {
            self.greedy_action(state, available)
        }
    }

    /// Highest-valued action in `available`.
    ///
    /// Ties are broken uniformly at random among the maximisers so that
    /// low-indexed cells are not favoured. If every candidate value is NaN
    /// there is no maximiser and the first available action is returned.
    ///
    /// # Panics
    ///
    /// Panics if `available` is empty.
    pub fn greedy_action(&mut self, state: &GameState, available: &[Action]) -> Action {
        assert!(
            !available.is_empty(),
            "greedy_action requires at least one available action"
        );

        let values: Vec<f64> = available
            .iter()
            .map(|&action| self.get_value(state, action))
            .collect();
        let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let maximisers: Vec<Action> = available
            .iter()
            .zip(&values)
            .filter(|(_, v)| **v == max_value)
            .map(|(&action, _)| action)
            .collect();

        match maximisers.len() {
            0 => available[0],
            1 => maximisers[0],
            n => maximisers[self.rng.gen_range(0..n)],
        }
    }

    /// Temporal-difference update for one transition.
    ///
    /// With `current = q(s, a)` and `max_next = 0` on terminal transitions
    /// (otherwise the maximum of `q(s', a')` over the configured
    /// [`BootstrapScope`]), the corrected estimate is
    /// `current + α (reward + γ max_next - current)`. The configured
    /// [`UpdateRule`] decides whether it replaces the entry or is added to it.
    ///
    /// # Arguments
    ///
    /// * `state` - State the action was taken in
    /// * `action` - Cell that was marked
    /// * `reward` - Reward for the transition, from the acting player's view
    /// * `next_state` - State the bootstrap maximum is read from
    /// * `done` - Whether the transition ended the game
    pub fn update(
        &mut self,
        state: &GameState,
        action: Action,
        reward: f64,
        next_state: &GameState,
        done: bool,
    ) {
        let current = self.get_value(state, action);
        let max_next = if done {
            0.0
        } else {
            match self.config.bootstrap {
                BootstrapScope::AllActions => self.table.max_over(next_state, 0..CELLS),
                BootstrapScope::EmptyCells => {
                    self.table.max_over(next_state, next_state.empty_cells())
                }
            }
        };

        let td_target = reward + self.config.discount_factor * max_next;
        let corrected = current + self.config.learning_rate * (td_target - current);
        let new_value = match self.config.update_rule {
            UpdateRule::Accumulating => current + corrected,
            UpdateRule::Replacing => corrected,
        };
        self.table.set(*state, action, new_value);
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Consumes the agent, returning its learned table.
    pub fn into_table(self) -> ValueTable {
        self.table
    }
}

impl<R: Rng> Policy for QLearningAgent<R> {
    fn select_action(&mut self, state: &GameState, available: &[Action]) -> Action {
        self.choose_action(state, available)
    }

    fn name(&self) -> &str {
        "q_learning"
    }
}
