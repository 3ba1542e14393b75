//! Head-to-head evaluation of two policies.

use std::fmt;

use super::error::TrainingError;
use crate::game::{Player, TerminalStatus, TicTacToe};
use crate::policy::Policy;

/// Aggregated results of a learner playing an opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationMetrics {
    /// Side the learner played.
    pub learner_side: Player,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

impl EvaluationMetrics {
    /// Plays `n_episodes` games and tallies the learner's results.
    ///
    /// `X` moves first. Neither policy is updated.
    ///
    /// # Arguments
    ///
    /// * `env` - Environment to play in; reset before every episode
    /// * `learner` - Policy whose results are tallied
    /// * `opponent` - Policy playing the other side
    /// * `learner_side` - Side the learner plays in every episode
    /// * `n_episodes` - Number of games to play
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::Game`] if either policy picks an illegal move.
    pub fn evaluate(
        env: &mut TicTacToe,
        learner: &mut dyn Policy,
        opponent: &mut dyn Policy,
        learner_side: Player,
        n_episodes: usize,
    ) -> Result<Self, TrainingError> {
        let mut metrics = Self {
            learner_side,
            wins: 0,
            draws: 0,
            losses: 0,
            n_episodes,
        };

        for _ in 0..n_episodes {
            let mut state = env.reset();
            loop {
                let available = env.get_available_actions();
                let action = if env.current_player() == learner_side {
                    learner.select_action(&state, &available)
                } else {
                    opponent.select_action(&state, &available)
                };

                let result = env.step(action)?;
                state = result.state;
                if result.done {
                    break;
                }
            }

            match env.status() {
                TerminalStatus::Won(winner) if winner == learner_side => metrics.wins += 1,
                TerminalStatus::Won(_) => metrics.losses += 1,
                TerminalStatus::Draw => metrics.draws += 1,
                TerminalStatus::InProgress => {}
            }
        }

        Ok(metrics)
    }

    fn rate(&self, count: usize) -> f64 {
        if self.n_episodes == 0 {
            0.0
        } else {
            count as f64 / self.n_episodes as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes, learner plays {}) ===",
            self.n_episodes, self.learner_side
        )?;
        writeln!(
            f,
            "  Wins:   {:>6}  ({:.1}%)",
            self.wins,
            self.win_rate() * 100.0
        )?;
        writeln!(
            f,
            "  Draws:  {:>6}  ({:.1}%)",
            self.draws,
            self.draw_rate() * 100.0
        )?;
        write!(
            f,
            "  Losses: {:>6}  ({:.1}%)",
            self.losses,
            self.loss_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{QLearningAgent, QLearningConfig};
    use crate::game::{Action, GameState};
    use crate::policy::{GreedyPolicy, RandomPolicy};

    /// Always plays the lowest free cell.
    struct FirstFree;

    impl Policy for FirstFree {
        fn select_action(&mut self, _state: &GameState, available: &[Action]) -> Action {
            available[0]
        }

        fn name(&self) -> &str {
            "first_free"
        }
    }

    #[test]
    fn evaluate_counts_every_episode() {
        let mut env = TicTacToe::new();
        let mut learner = RandomPolicy::with_seed(1);
        let mut opponent = RandomPolicy::with_seed(2);
        let metrics =
            EvaluationMetrics::evaluate(&mut env, &mut learner, &mut opponent, Player::X, 50)
                .unwrap();
        assert_eq!(metrics.n_episodes, 50);
        assert_eq!(metrics.wins + metrics.draws + metrics.losses, 50);
    }

    #[test]
    fn deterministic_policies_give_fixed_result() {
        // X takes 0, 2, 4, 6 and completes the anti-diagonal on the seventh move.
        let mut env = TicTacToe::new();
        let metrics =
            EvaluationMetrics::evaluate(&mut env, &mut FirstFree, &mut FirstFree, Player::X, 3)
                .unwrap();
        assert_eq!(metrics.wins, 3);
        assert_eq!(metrics.win_rate(), 1.0);

        let metrics =
            EvaluationMetrics::evaluate(&mut env, &mut FirstFree, &mut FirstFree, Player::O, 3)
                .unwrap();
        assert_eq!(metrics.losses, 3);
    }

    #[test]
    fn greedy_agent_can_be_evaluated() {
        let mut agent = QLearningAgent::with_seed(QLearningConfig::default(), 8);
        let mut env = TicTacToe::new();
        let mut opponent = RandomPolicy::with_seed(3);
        let mut learner = GreedyPolicy::new(&mut agent);
        let metrics =
            EvaluationMetrics::evaluate(&mut env, &mut learner, &mut opponent, Player::O, 20)
                .unwrap();
        assert_eq!(metrics.wins + metrics.draws + metrics.losses, 20);
        assert!(agent.table().is_empty());
    }

    #[test]
    fn empty_evaluation_has_zero_rates() {
        let mut env = TicTacToe::new();
        let metrics = EvaluationMetrics::evaluate(
            &mut env,
            &mut FirstFree,
            &mut FirstFree,
            Player::X,
            0,
        )
        .unwrap();
        assert_eq!(metrics.win_rate(), 0.0);
        assert!(metrics.to_string().contains("(0 episodes, learner plays X)"));
    }
}
