//! Self-play training driver.
//!
//! Mediates between the environment and the agent: asks the game for legal
//! moves, asks the agent to pick one, applies it and feeds transitions back
//! to the agent.
//!
//! Every table entry is valued from the perspective of the player to move in
//! its state. A move is therefore only learned once the same player is to move
//! again, bootstrapping from the position after the opponent's reply. When the
//! game ends, the final mover is rewarded and the other side's pending move is
//! settled with the mirrored outcome.

use std::fmt;

use rand::rngs::StdRng;
use rand::Rng;

use super::error::TrainingError;
use crate::agent::{QLearningAgent, QLearningConfig};
use crate::game::{Action, GameState, Player, StepResult, TerminalStatus, TicTacToe};

/// How a single episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    /// Terminal status at the end of the episode.
    pub status: TerminalStatus,
    /// Number of moves played.
    pub moves: usize,
}

/// Running totals over a training run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingStats {
    pub episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
    /// Entries in the value table after the last episode.
    pub table_size: usize,
    /// Table entries holding NaN or an infinity after the last episode.
    ///
    /// Stays at zero under [`UpdateRule::Replacing`]. The accumulating rule
    /// roughly doubles a value on every revisit, so long runs overflow and
    /// this count starts to grow.
    ///
    /// [`UpdateRule::Replacing`]: crate::agent::UpdateRule::Replacing
    pub non_finite_entries: usize,
}

impl TrainingStats {
    /// Folds one episode into the totals.
    pub fn record(&mut self, outcome: &EpisodeOutcome) {
        self.episodes += 1;
        self.total_moves += outcome.moves;
        match outcome.status {
            TerminalStatus::Won(Player::X) => self.x_wins += 1,
            TerminalStatus::Won(Player::O) => self.o_wins += 1,
            TerminalStatus::Draw => self.draws += 1,
            TerminalStatus::InProgress => {}
        }
    }

    /// Mean episode length in moves.
    pub fn mean_moves(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.episodes as f64
        }
    }
}

impl fmt::Display for TrainingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Training Summary ({} episodes) ===", self.episodes)?;
        writeln!(f, "  X wins:        {}", self.x_wins)?;
        writeln!(f, "  O wins:        {}", self.o_wins)?;
        writeln!(f, "  Draws:         {}", self.draws)?;
        writeln!(f, "  Mean moves:    {:.2}", self.mean_moves())?;
        writeln!(f, "  Table entries: {}", self.table_size)?;
        write!(f, "  Non-finite:    {}", self.non_finite_entries)
    }
}

/// Terminal rewards as `(final mover, other side)`.
///
/// The environment reports wins with the winner's absolute sign, so the
/// mover's share is flipped by its own sign and the loser gets the negation.
/// Both sides receive the draw reward unchanged.
fn settle_rewards(reward: f64, status: TerminalStatus, mover: Player) -> (f64, f64) {
    match status {
        TerminalStatus::Won(_) => {
            let mover_reward = reward * mover.sign() as f64;
            (mover_reward, -mover_reward)
        }
        _ => (reward, reward),
    }
}

/// Last move of each side that has not been learned yet.
#[derive(Debug, Default)]
struct PendingMoves {
    x: Option<(GameState, Action)>,
    o: Option<(GameState, Action)>,
}

impl PendingMoves {
    fn slot(&mut self, player: Player) -> &mut Option<(GameState, Action)> {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }
}

/// One agent playing both sides of the game against itself.
#[derive(Debug)]
pub struct SelfPlayTrainer<R = StdRng> {
    env: TicTacToe,
    agent: QLearningAgent<R>,
}

impl SelfPlayTrainer<StdRng> {
    /// Validates `config` and builds a trainer with a seeded agent.
    ///
    /// The default [`QLearningConfig`] keeps the accumulating update, whose
    /// values diverge over long runs (see
    /// [`TrainingStats::non_finite_entries`]). Use
    /// [`QLearningConfig::standard`] to train a playing agent.
    pub fn with_seed(config: QLearningConfig, seed: u64) -> Result<Self, TrainingError> {
        Self::from_agent(QLearningAgent::with_seed(config, seed))
    }
}

impl<R: Rng> SelfPlayTrainer<R> {
    /// Wraps an existing agent, validating its configuration.
    ///
    /// # Arguments
    ///
    /// * `agent` - Agent to train; its table may already hold learned values
    pub fn from_agent(agent: QLearningAgent<R>) -> Result<Self, TrainingError> {
        agent.config().validate()?;
        Ok(Self {
            env: TicTacToe::new(),
            agent,
        })
    }

    /// Plays one game from reset to a terminal status, updating the agent
    /// for both sides as it goes.
    pub fn run_episode(&mut self) -> Result<EpisodeOutcome, TrainingError> {
        let mut state = self.env.reset();
        let mut pending = PendingMoves::default();
        let mut moves = 0;

        loop {
            let mover = self.env.current_player();
            if let Some((prev_state, prev_action)) = pending.slot(mover).take() {
                // Non-terminal moves earn nothing.
                self.agent.update(&prev_state, prev_action, 0.0, &state, false);
            }

            let available = self.env.get_available_actions();
            let action = self.agent.choose_action(&state, &available);
            let StepResult {
                state: next_state,
                reward,
                done,
            } = self.env.step(action)?;
            moves += 1;

            if done {
                let status = self.env.status();
                let (mover_reward, other_reward) = settle_rewards(reward, status, mover);
                self.agent.update(&state, action, mover_reward, &next_state, true);
                if let Some((prev_state, prev_action)) = pending.slot(mover.opponent()).take() {
                    self.agent
                        .update(&prev_state, prev_action, other_reward, &next_state, true);
                }
                return Ok(EpisodeOutcome { status, moves });
            }

            *pending.slot(mover) = Some((state, action));
            state = next_state;
        }
    }

    /// Runs `episodes` games and returns the accumulated statistics.
    pub fn train(&mut self, episodes: usize) -> Result<TrainingStats, TrainingError> {
        let mut stats = TrainingStats::default();
        for _ in 0..episodes {
            let outcome = self.run_episode()?;
            stats.record(&outcome);
        }
        stats.table_size = self.agent.table().len();
        stats.non_finite_entries = self.agent.table().non_finite_count();
        Ok(stats)
    }

    pub fn agent(&self) -> &QLearningAgent<R> {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut QLearningAgent<R> {
        &mut self.agent
    }

    pub fn env(&self) -> &TicTacToe {
        &self.env
    }

    pub fn into_agent(self) -> QLearningAgent<R> {
        self.agent
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::agent::{ConfigError, ValueTable};
    use crate::game::CELLS;
    use crate::policy::{GreedyPolicy, RandomPolicy};
    use crate::training::EvaluationMetrics;

    const EPS: f64 = 1e-12;

    #[test]
    fn settle_rewards_mirrors_wins() {
        let won_by_o = TerminalStatus::Won(Player::O);
        assert_eq!(settle_rewards(-1.0, won_by_o, Player::O), (1.0, -1.0));
        assert_eq!(
            settle_rewards(1.0, TerminalStatus::Won(Player::X), Player::X),
            (1.0, -1.0)
        );
        assert_eq!(settle_rewards(0.5, TerminalStatus::Draw, Player::O), (0.5, 0.5));
    }

    #[test]
    fn first_episode_settles_both_sides() {
        let mut trainer = SelfPlayTrainer::with_seed(QLearningConfig::standard(), 3).unwrap();
        let outcome = trainer.run_episode().unwrap();
        let table = trainer.agent().table();

        // Every move of the game is learned exactly once.
        assert_eq!(table.len(), outcome.moves);

        let mut values: Vec<f64> = table.iter().map(|(_, _, v)| v).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        let lowest = values[0];
        let highest = values[values.len() - 1];
        match outcome.status {
            TerminalStatus::Won(_) => {
                // Winner's last move gets 0.1 * 1.0, loser's last move 0.1 * -1.0.
                assert!((highest - 0.1).abs() < EPS);
                assert!((lowest + 0.1).abs() < EPS);
            }
            TerminalStatus::Draw => {
                assert!((highest - 0.05).abs() < EPS);
                assert_eq!(lowest, 0.0);
                assert_eq!(values.iter().filter(|&&v| v > 0.0).count(), 2);
            }
            TerminalStatus::InProgress => panic!("episode ended in progress"),
        }
    }

    #[test]
    fn episode_ends_in_terminal_status() {
        let mut trainer = SelfPlayTrainer::with_seed(QLearningConfig::default(), 42).unwrap();
        for _ in 0..20 {
            let outcome = trainer.run_episode().unwrap();
            assert!(outcome.status.is_terminal());
            assert!((5..=9).contains(&outcome.moves));
            assert!(trainer.env().is_over());
        }
    }

    #[test]
    fn train_accumulates_stats() {
        let mut trainer = SelfPlayTrainer::with_seed(QLearningConfig::default(), 42).unwrap();
        let stats = trainer.train(200).unwrap();

        assert_eq!(stats.episodes, 200);
        assert_eq!(stats.x_wins + stats.o_wins + stats.draws, 200);
        assert!(stats.total_moves >= 5 * 200);
        assert_eq!(stats.table_size, trainer.agent().table().len());
        assert!(stats.table_size > 0);
    }

    #[test]
    fn training_is_reproducible_with_a_seed() {
        let run = || {
            let mut trainer =
                SelfPlayTrainer::with_seed(QLearningConfig::standard(), 1234).unwrap();
            let stats = trainer.train(100).unwrap();
            (stats, trainer.into_agent().into_table())
        };
        let (stats_a, table_a) = run();
        let (stats_b, table_b) = run();
        assert_eq!(stats_a, stats_b);
        assert_eq!(table_a, table_b);
    }

    #[test]
    fn training_learns_to_beat_a_random_opponent() {
        let config = QLearningConfig {
            epsilon: 0.5,
            ..QLearningConfig::standard()
        };
        let mut trainer = SelfPlayTrainer::with_seed(config, 7).unwrap();
        let stats = trainer.train(50_000).unwrap();
        assert_eq!(stats.non_finite_entries, 0);

        let mut agent = trainer.into_agent();
        let mut env = TicTacToe::new();
        let mut opponent = RandomPolicy::with_seed(99);
        // Random play loses about 58% of games as O and 29% as X.
        for (side, max_loss_rate) in [(Player::X, 0.05), (Player::O, 0.10)] {
            let mut learner = GreedyPolicy::new(&mut agent);
            let metrics =
                EvaluationMetrics::evaluate(&mut env, &mut learner, &mut opponent, side, 1000)
                    .unwrap();
            assert!(metrics.loss_rate() < max_loss_rate, "{}", metrics);
            assert!(metrics.win_rate() > 0.5, "{}", metrics);
        }
    }

    #[test]
    fn stats_count_non_finite_entries() {
        let mut table = ValueTable::new();
        let unreachable = GameState::new([1; CELLS]);
        table.set(unreachable, 0, f64::NAN);
        table.set(unreachable, 1, f64::INFINITY);
        table.set(unreachable, 2, 3.0);
        let agent =
            QLearningAgent::from_table(QLearningConfig::standard(), table, StdRng::seed_from_u64(5));

        let mut trainer = SelfPlayTrainer::from_agent(agent).unwrap();
        let stats = trainer.train(10).unwrap();
        assert_eq!(stats.non_finite_entries, 2);
        assert!(stats.to_string().contains("Non-finite:    2"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = QLearningConfig {
            epsilon: 2.0,
            ..QLearningConfig::default()
        };
        let err = SelfPlayTrainer::with_seed(config, 0).unwrap_err();
        assert_eq!(
            err,
            TrainingError::Config(ConfigError::OutOfRange {
                name: "epsilon",
                value: 2.0
            })
        );
    }

    #[test]
    fn stats_display() {
        let mut stats = TrainingStats::default();
        stats.record(&EpisodeOutcome {
            status: TerminalStatus::Won(Player::X),
            moves: 5,
        });
        stats.record(&EpisodeOutcome {
            status: TerminalStatus::Draw,
            moves: 9,
        });
        assert_eq!(stats.mean_moves(), 7.0);
        let text = stats.to_string();
        assert!(text.contains("(2 episodes)"));
        assert!(text.contains("X wins:        1"));
        assert!(text.contains("Draws:         1"));
    }
}
