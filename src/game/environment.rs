//! Two-player 3x3 grid environment.
//!
//! Owns the live grid, enforces legal moves, detects terminal conditions and
//! computes rewards. The environment never talks to the agent; a driver
//! mediates every call.

use std::fmt;

use super::error::{GameError, MoveRejection};
use super::lines::evaluate_grid;
use super::types::{Action, GameState, Grid, Player, TerminalStatus, CELLS, DIMENSION, EMPTY};

/// Reward returned when a move ends the game without a winner.
pub const DRAW_REWARD: f64 = 0.5;

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Snapshot of the grid after the move and status update.
    pub state: GameState,
    /// `0` in progress, `0.5` on a draw, otherwise the winner's sign.
    pub reward: f64,
    /// Whether the game reached a terminal status.
    pub done: bool,
}

/// The 3x3 alternating-turn game.
///
/// # Lifecycle
///
/// 1. Create once with [`TicTacToe::new`].
/// 2. Call [`TicTacToe::reset`] before each episode.
/// 3. Query [`TicTacToe::get_available_actions`] and call
///    [`TicTacToe::step`] until `done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    grid: Grid,
    current_player: Player,
    status: TerminalStatus,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self {
            grid: [[EMPTY; DIMENSION]; DIMENSION],
            current_player: Player::X,
            status: TerminalStatus::InProgress,
        }
    }
}

impl TicTacToe {
    /// Creates a game with an empty grid and `X` to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a game from a literal grid and evaluates its status.
    ///
    /// The player to move is `X` when both players have placed the same number
    /// of marks and `O` otherwise. The grid is not checked for reachability.
    ///
    /// # Arguments
    ///
    /// * `rows` - Cell values in row-major order, each `-1`, `0` or `1`
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCell`] for the first value outside `-1..=1`.
    pub fn from_rows(rows: Grid) -> Result<Self, GameError> {
        let mut balance = 0i32;
        for (index, &value) in rows.iter().flatten().enumerate() {
            if !(-1..=1).contains(&value) {
                return Err(GameError::InvalidCell { index, value });
            }
            balance += value as i32;
        }

        let current_player = if balance == 0 { Player::X } else { Player::O };
        let mut game = Self {
            grid: rows,
            current_player,
            status: TerminalStatus::InProgress,
        };
        game.check_terminal();
        Ok(game)
    }

    /// Clears the grid, sets the status to in-progress and gives `X` the move.
    ///
    /// Returns the (all-empty) initial state.
    pub fn reset(&mut self) -> GameState {
        for row in self.grid.iter_mut() {
            row.fill(EMPTY);
        }
        self.status = TerminalStatus::InProgress;
        self.current_player = Player::X;
        self.get_state()
    }

    /// Snapshot of the current grid, flattened row-major.
    pub fn get_state(&self) -> GameState {
        GameState::from_grid(&self.grid)
    }

    /// Indices of empty cells, ascending.
    ///
    /// Terminal status is not consulted: a finished game with empty cells
    /// still lists them. Check [`TicTacToe::is_over`] before acting.
    pub fn get_available_actions(&self) -> Vec<Action> {
        (0..CELLS)
            .filter(|&action| {
                let (row, col) = Self::coordinates(action);
                self.grid[row][col] == EMPTY
            })
            .collect()
    }

    /// Places the current player's mark at `action`.
    ///
    /// # Arguments
    ///
    /// * `action` - Cell index in `0..CELLS`
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::InvalidMove`] if the action is out of range,
    /// the cell is occupied, or the game is already over. The grid is left
    /// untouched on failure.
    pub fn step(&mut self, action: Action) -> Result<StepResult, GameError> {
        if action >= CELLS {
            return Err(GameError::invalid_move(action, MoveRejection::OutOfBounds));
        }
        if self.status.is_terminal() {
            return Err(GameError::invalid_move(action, MoveRejection::GameOver));
        }
        let (row, col) = Self::coordinates(action);
        if self.grid[row][col] != EMPTY {
            return Err(GameError::invalid_move(action, MoveRejection::Occupied));
        }

        self.grid[row][col] = self.current_player.sign();
        self.current_player = self.current_player.opponent();
        let status = self.check_terminal();

        let reward = match status {
            TerminalStatus::InProgress => 0.0,
            TerminalStatus::Draw => DRAW_REWARD,
            TerminalStatus::Won(winner) => winner.sign() as f64,
        };

        Ok(StepResult {
            state: self.get_state(),
            reward,
            done: status.is_terminal(),
        })
    }

    /// Re-evaluates the terminal status from the live grid.
    ///
    /// Rows, then columns, then the two diagonals are scanned; the first
    /// complete line decides the winner. A full grid without a complete line
    /// is a draw.
    pub fn check_terminal(&mut self) -> TerminalStatus {
        self.status = evaluate_grid(&self.grid);
        self.status
    }

    /// True iff the game was won by `player`.
    pub fn is_winner(&self, player: Player) -> bool {
        self.status == TerminalStatus::Won(player)
    }

    /// True whenever there is no winner.
    ///
    /// This does not look at whether the game is finished, so a game in
    /// progress (including a freshly reset one) also reports `true`. Use
    /// [`TicTacToe::status`] to tell an actual draw apart.
    pub fn is_draw(&self) -> bool {
        self.status.winner().is_none()
    }

    pub fn status(&self) -> TerminalStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// The player whose mark the next successful move writes.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Read-only view of the live grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn coordinates(action: Action) -> (usize, usize) {
        (action / DIMENSION, action % DIMENSION)
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.get_state())?;
        match self.status {
            TerminalStatus::InProgress => write!(f, "{} to move", self.current_player),
            status => write!(f, "{}", status),
        }
    }
}
