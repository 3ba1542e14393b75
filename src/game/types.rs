//! Core types for the 3x3 grid game.
//!
//! Cells hold a small signed integer: `0` for empty, `+1` for the first
//! player's mark and `-1` for the second player's mark.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side length of the square grid.
pub const DIMENSION: usize = 3;

/// Number of cells (and therefore of distinct actions).
pub const CELLS: usize = DIMENSION * DIMENSION;

/// Value of an empty cell.
pub const EMPTY: i8 = 0;

/// Cell index in `[0, CELLS)`, addressing `row = action / DIMENSION`,
/// `col = action % DIMENSION`.
pub type Action = usize;

/// Live, mutable grid in row-major order.
pub type Grid = [[i8; DIMENSION]; DIMENSION];

/// One of the two players.
///
/// `X` moves first and marks cells with `+1`; `O` marks cells with `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The mark this player writes into a cell.
    pub fn sign(&self) -> i8 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Maps a non-zero mark back to its player.
    pub fn from_sign(sign: i8) -> Option<Player> {
        match sign {
            1 => Some(Player::X),
            -1 => Some(Player::O),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Outcome status of a game instance.
///
/// Once `Won` or `Draw` is reached the status stays final until the
/// environment is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TerminalStatus {
    #[default]
    InProgress,
    Won(Player),
    Draw,
}

impl TerminalStatus {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminalStatus::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            TerminalStatus::Won(player) => Some(*player),
            _ => None,
        }
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalStatus::InProgress => write!(f, "in progress"),
            TerminalStatus::Won(player) => write!(f, "won by {}", player),
            TerminalStatus::Draw => write!(f, "draw"),
        }
    }
}

/// Immutable snapshot of the grid, flattened row-major.
///
/// This is a value type: it owns its cells, compares structurally and hashes
/// stably, so it can key the agent's value table without aliasing the live
/// grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GameState([i8; CELLS]);

impl GameState {
    /// Wraps a flattened cell array.
    pub fn new(cells: [i8; CELLS]) -> Self {
        Self(cells)
    }

    /// Flattens a grid row-major.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut cells = [EMPTY; CELLS];
        for (row, values) in grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                cells[row * DIMENSION + col] = value;
            }
        }
        Self(cells)
    }

    pub fn cells(&self) -> &[i8; CELLS] {
        &self.0
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    /// Returns the cell value at `action`, or `None` when out of range.
    pub fn get(&self, action: Action) -> Option<i8> {
        self.0.get(action).copied()
    }

    /// Indices of empty cells, ascending.
    pub fn empty_cells(&self) -> Vec<Action> {
        (0..CELLS).filter(|&i| self.0[i] == EMPTY).collect()
    }

    /// Number of marks placed so far.
    pub fn marks(&self) -> usize {
        self.0.iter().filter(|&&v| v != EMPTY).count()
    }
}

impl Index<usize> for GameState {
    type Output = i8;

    fn index(&self, index: usize) -> &i8 {
        &self.0[index]
    }
}

impl From<[i8; CELLS]> for GameState {
    fn from(cells: [i8; CELLS]) -> Self {
        Self(cells)
    }
}

fn cell_symbol(value: i8) -> char {
    match Player::from_sign(value) {
        Some(Player::X) => 'X',
        Some(Player::O) => 'O',
        None => '.',
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.0.chunks(DIMENSION).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = chunk.iter().map(|&v| cell_symbol(v).to_string()).collect();
            write!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
