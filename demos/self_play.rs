// Demonstration: train a Q-learning agent by self-play, then evaluate it
// against a random opponent from both sides.
//
// Build/run from this repo root:
//   cargo run --example self_play -- --episodes 20000 --seed 42
//
// Pass `--literal` to train with the default (accumulating, all-actions)
// update instead of textbook Q-learning.

use std::env;

use tictac_rl::game::{Player, TicTacToe};
use tictac_rl::policy::{GreedyPolicy, Policy, RandomPolicy};
use tictac_rl::training::{EvaluationMetrics, SelfPlayTrainer};
use tictac_rl::QLearningConfig;

fn main() {
    let args: Vec<String> = env::args().collect();
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20_000);
    let eval_episodes: usize = arg_value(&args, "--eval-episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1_000);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let epsilon: Option<f64> = arg_value(&args, "--epsilon").and_then(|s| s.parse().ok());

    let mut config = if args.iter().any(|a| a == "--literal") {
        QLearningConfig::default()
    } else {
        QLearningConfig::standard()
    };
    if let Some(epsilon) = epsilon {
        config.epsilon = epsilon;
    }

    let mut trainer = match SelfPlayTrainer::with_seed(config, seed) {
        Ok(trainer) => trainer,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let stats = match trainer.train(episodes) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Training failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("{}", stats);

    let mut agent = trainer.into_agent();
    let mut env = TicTacToe::new();
    let mut opponent = RandomPolicy::with_seed(seed.wrapping_add(1));

    for side in [Player::X, Player::O] {
        let mut learner = GreedyPolicy::new(&mut agent);
        match EvaluationMetrics::evaluate(&mut env, &mut learner, &mut opponent, side, eval_episodes)
        {
            Ok(metrics) => {
                println!("Policy: {} vs {}", learner.name(), opponent.name());
                println!("{}", metrics);
            }
            Err(e) => {
                eprintln!("Evaluation failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
