//! Line scanning and terminal-status evaluation.

use super::types::{Grid, Player, TerminalStatus, DIMENSION, EMPTY};

/// Number of lines that can complete a game.
pub const LINE_COUNT: usize = 2 * DIMENSION + 2;

/// Cell coordinates of every line, in scan order:
/// row 0, row 1, row 2, col 0, col 1, col 2, main diagonal, anti-diagonal.
///
/// The first complete line in this order decides the winner.
pub const LINES: [[(usize, usize); DIMENSION]; LINE_COUNT] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Sum of the marks along one line.
pub fn line_sum(grid: &Grid, line: &[(usize, usize); DIMENSION]) -> i32 {
    line.iter().map(|&(r, c)| grid[r][c] as i32).sum()
}

/// Returns the owner of the first complete line in scan order, if any.
///
/// A line is complete when the absolute value of its sum equals
/// [`DIMENSION`], i.e. every cell holds the same non-zero mark.
pub fn first_complete_line(grid: &Grid) -> Option<Player> {
    LINES.iter().find_map(|line| {
        let sum = line_sum(grid, line);
        if sum.unsigned_abs() as usize == DIMENSION {
            Player::from_sign(sum.signum() as i8)
        } else {
            None
        }
    })
}

/// Evaluates a grid from scratch.
///
/// Complete line first, then a full board is a draw, otherwise the game is
/// still in progress.
pub fn evaluate_grid(grid: &Grid) -> TerminalStatus {
    if let Some(player) = first_complete_line(grid) {
        return TerminalStatus::Won(player);
    }
    let full = grid.iter().flatten().all(|&v| v != EMPTY);
    if full {
        TerminalStatus::Draw
    } else {
        TerminalStatus::InProgress
    }
}
