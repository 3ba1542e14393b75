use std::fmt;

use thiserror::Error;

use super::types::Action;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// The target cell already holds a mark.
    Occupied,
    /// The game reached a terminal status on an earlier move.
    GameOver,
    /// The action does not address a cell of the grid.
    OutOfBounds,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::Occupied => write!(f, "cell is occupied"),
            MoveRejection::GameOver => write!(f, "game is already over"),
            MoveRejection::OutOfBounds => write!(f, "action is out of bounds"),
        }
    }
}

/// Errors raised by the game environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move {action}: {reason}")]
    InvalidMove {
        action: Action,
        reason: MoveRejection,
    },

    #[error("Invalid cell value {value} at index {index}; expected -1, 0 or 1")]
    InvalidCell { index: usize, value: i8 },
}

impl GameError {
    pub(crate) fn invalid_move(action: Action, reason: MoveRejection) -> Self {
        GameError::InvalidMove { action, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_move_display() {
        let e = GameError::invalid_move(4, MoveRejection::Occupied);
        assert_eq!(e.to_string(), "Invalid move 4: cell is occupied");
    }

    #[test]
    fn game_over_display() {
        let e = GameError::invalid_move(0, MoveRejection::GameOver);
        assert_eq!(e.to_string(), "Invalid move 0: game is already over");
    }

    #[test]
    fn invalid_cell_display() {
        let e = GameError::InvalidCell { index: 3, value: 2 };
        assert!(e.to_string().contains("Invalid cell value 2"));
    }
}
