use std::str::FromStr;

use crate::maze::Grid;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(dx, dy)` with y growing downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Only the four arrow names parse; anything else never reaches a navigator.
impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Moved through an open passage to `cell`; `won` is set when it is the exit.
    Moved { cell: usize, won: bool },
    /// A wall is in the way. The move still counts.
    Blocked,
}

/// Player-driven walk through the carved maze, independent of any search.
#[derive(Debug, Clone)]
pub struct ManualNavigator {
    /// Where the player currently is
    current: usize,
    exit: usize,
    /// Cells the player has stood on, in first-visit order, starting with the entrance
    visited: Vec<usize>,
    /// Every attempted move, blocked or not
    moves: usize,
    won: bool,
}

impl ManualNavigator {
    pub fn new(grid: &Grid) -> Self {
        ManualNavigator {
            current: grid.entrance(),
            exit: grid.exit(),
            visited: vec![grid.entrance()],
            moves: 0,
            won: false,
        }
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Set once the exit has been reached; stays set afterwards.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Attempt to step one cell in `direction`. Walls block the step but it
    /// still counts.
    pub fn attempt_move(&mut self, grid: &Grid, direction: Direction) -> MoveOutcome {
        self.moves += 1;
        let (dx, dy) = direction.offset();
        let (x, y) = grid.unravel_index(self.current);
        let target = (x as i32 + dx, y as i32 + dy);

        let Some(next) = grid.open_neighbor_at(self.current, target.0, target.1) else {
            tracing::debug!("[game] move {} blocked at {:?}", self.moves, (x, y));
            return MoveOutcome::Blocked;
        };

        if !self.visited.contains(&next) {
            self.visited.push(next);
        }
        self.current = next;
        let won = next == self.exit;
        if won {
            self.won = true;
            tracing::info!("[game] exit reached in {} moves", self.moves);
        } else {
            tracing::debug!("[game] moved to {:?}", grid.unravel_index(next));
        }
        MoveOutcome::Moved { cell: next, won }
    }
}
