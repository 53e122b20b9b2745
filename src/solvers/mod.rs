use std::{fmt, str::FromStr};

pub mod path;
pub mod search;

pub use path::{PathReconstructor, PathStep};
pub use search::{SearchEngine, SearchStatus, SearchStep};

use crate::{error::MazeError, maze::Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Bfs,
    Dfs,
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
        }
    }
}

impl FromStr for Solver {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breadth" | "bfs" | "b" => Ok(Solver::Bfs),
            "depth" | "dfs" | "d" => Ok(Solver::Dfs),
            _ => Err(MazeError::UnknownSolver(s.to_string())),
        }
    }
}

/// Search a fully built maze and return the solution from exit back to entrance.
pub fn solve_maze(grid: &Grid, solver: Solver) -> Result<Vec<usize>, MazeError> {
    let mut search = SearchEngine::new(solver, grid);
    search.start();
    while search.status() != SearchStatus::Found {
        search.step(grid)?;
    }

    let mut path = PathReconstructor::new(grid.entrance(), grid.exit());
    while path.step(search.predecessors())? != PathStep::Complete {}
    Ok(path.into_path())
}
