use std::collections::VecDeque;

use super::Solver;
use crate::{error::MazeError, maze::Grid};

/// Cells discovered but not yet expanded.
#[derive(Debug)]
enum Frontier {
    Queue(VecDeque<usize>),
    Stack(Vec<usize>),
}

impl Frontier {
    fn new(solver: Solver) -> Self {
        match solver {
            Solver::Bfs => Frontier::Queue(VecDeque::new()),
            Solver::Dfs => Frontier::Stack(Vec::new()),
        }
    }

    fn push(&mut self, cell: usize) {
        match self {
            Frontier::Queue(queue) => queue.push_back(cell),
            Frontier::Stack(stack) => stack.push(cell),
        }
    }

    fn pop(&mut self) -> Option<usize> {
        match self {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Frontier::Queue(queue) => queue.len(),
            Frontier::Stack(stack) => stack.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Frontier::Queue(queue) => queue.clear(),
            Frontier::Stack(stack) => stack.clear(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Active,
    Found,
}

/// What a single search step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// Popped a cell that had already been committed; nothing changed.
    Skipped(usize),
    /// Committed the cell and pushed its unvisited neighbors.
    Expanded(usize),
    /// Committed the exit cell. The search is over.
    Found(usize),
    /// The search is idle or already found the exit.
    Done,
}

/// Breadth- or depth-first search over carved passages, one frontier pop per step.
///
/// The visited check happens when a cell is popped, not when it is pushed, so
/// the frontier may hold duplicates; those pops become [`SearchStep::Skipped`].
#[derive(Debug)]
pub struct SearchEngine {
    solver: Solver,
    status: SearchStatus,
    frontier: Frontier,
    visited: Vec<bool>,
    /// Committed cells in commit order
    order: Vec<usize>,
    /// Cell that first discovered each cell
    predecessors: Vec<Option<usize>>,
    entrance: usize,
    exit: usize,
}

impl SearchEngine {
    pub fn new(solver: Solver, grid: &Grid) -> Self {
        SearchEngine {
            solver,
            status: SearchStatus::Idle,
            frontier: Frontier::new(solver),
            visited: vec![false; grid.len()],
            order: Vec::new(),
            predecessors: vec![None; grid.len()],
            entrance: grid.entrance(),
            exit: grid.exit(),
        }
    }

    /// Clear any previous run and seed the frontier with the entrance.
    pub fn start(&mut self) {
        self.frontier.clear();
        self.visited.iter_mut().for_each(|v| *v = false);
        self.order.clear();
        self.predecessors.iter_mut().for_each(|p| *p = None);
        self.frontier.push(self.entrance);
        self.status = SearchStatus::Active;
        tracing::info!("[search] started {}", self.solver);
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Committed cells, in the order they were committed.
    pub fn visited(&self) -> &[usize] {
        &self.order
    }

    pub fn is_visited(&self, cell: usize) -> bool {
        self.visited[cell]
    }

    pub fn predecessor(&self, cell: usize) -> Option<usize> {
        self.predecessors[cell]
    }

    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    /// Pop one cell from the frontier and process it.
    ///
    /// An empty frontier while active means the carved graph is disconnected,
    /// reported as [`MazeError::FrontierExhausted`].
    pub fn step(&mut self, grid: &Grid) -> Result<SearchStep, MazeError> {
        if self.status != SearchStatus::Active {
            return Ok(SearchStep::Done);
        }

        let Some(next) = self.frontier.pop() else {
            tracing::error!(
                "[search] frontier empty after {} cells, exit unreachable",
                self.order.len()
            );
            return Err(MazeError::FrontierExhausted);
        };

        if self.visited[next] {
            return Ok(SearchStep::Skipped(next));
        }
        self.visited[next] = true;
        self.order.push(next);

        if next == self.exit {
            self.status = SearchStatus::Found;
            tracing::info!(
                "[search] {} reached the exit after committing {} cells",
                self.solver,
                self.order.len()
            );
            return Ok(SearchStep::Found(next));
        }

        for &neighbor in grid.neighbors(next) {
            if self.visited[neighbor] {
                continue;
            }
            self.frontier.push(neighbor);
            if self.predecessors[neighbor].is_none() {
                self.predecessors[neighbor] = Some(next);
            }
        }
        tracing::debug!(
            "[search] expanded {}, frontier holds {}",
            next,
            self.frontier.len()
        );
        Ok(SearchStep::Expanded(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Bias, generate_maze};

    /// 0 1 2
    /// 3 4 5
    /// carved as 0-1, 1-2, 1-4, 4-3, 4-5
    fn t_shaped() -> Grid {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.carve(0, 1);
        grid.carve(1, 2);
        grid.carve(1, 4);
        grid.carve(4, 3);
        grid.carve(4, 5);
        grid
    }

    fn run(search: &mut SearchEngine, grid: &Grid) -> Vec<SearchStep> {
        let mut steps = Vec::new();
        loop {
            match search.step(grid).unwrap() {
                SearchStep::Done => return steps,
                step => steps.push(step),
            }
        }
    }

    #[test]
    fn test_idle_until_started() {
        let grid = t_shaped();
        let mut search = SearchEngine::new(Solver::Bfs, &grid);
        assert_eq!(search.status(), SearchStatus::Idle);
        assert_eq!(search.step(&grid).unwrap(), SearchStep::Done);
        assert!(search.visited().is_empty());
    }

    #[test]
    fn test_bfs_order() {
        let grid = t_shaped();
        let mut search = SearchEngine::new(Solver::Bfs, &grid);
        search.start();
        let steps = run(&mut search, &grid);
        assert_eq!(
            steps,
            vec![
                SearchStep::Expanded(0),
                SearchStep::Expanded(1),
                SearchStep::Expanded(2),
                SearchStep::Expanded(4),
                SearchStep::Expanded(3),
                SearchStep::Found(5),
            ]
        );
        assert_eq!(search.status(), SearchStatus::Found);
        assert_eq!(search.visited(), &[0, 1, 2, 4, 3, 5]);
        assert_eq!(search.predecessor(5), Some(4));
        assert_eq!(search.predecessor(4), Some(1));
        assert_eq!(search.predecessor(0), None);
    }

    #[test]
    fn test_dfs_order() {
        let grid = t_shaped();
        let mut search = SearchEngine::new(Solver::Dfs, &grid);
        search.start();
        let steps = run(&mut search, &grid);
        // neighbors of 1 are pushed as 2, 4, so 4 is popped first
        assert_eq!(
            steps,
            vec![
                SearchStep::Expanded(0),
                SearchStep::Expanded(1),
                SearchStep::Expanded(4),
                SearchStep::Found(5),
            ]
        );
        assert_eq!(search.visited(), &[0, 1, 4, 5]);
    }

    #[test]
    fn test_duplicate_frontier_entries_are_skipped() {
        // the ring 0-1-3-2 lets cell 3 be discovered from both 1 and 2
        let mut grid = Grid::new(3, 2).unwrap();
        for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 5), (4, 5)] {
            grid.carve(a, b);
        }
        let mut search = SearchEngine::new(Solver::Bfs, &grid);
        search.start();
        let steps = run(&mut search, &grid);
        assert_eq!(steps[4], SearchStep::Skipped(3));
        // the first discovery wins
        assert_eq!(search.predecessor(3), Some(1));
        assert_eq!(search.status(), SearchStatus::Found);
    }

    #[test]
    fn test_disconnected_graph_is_an_error() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.carve(0, 1);
        let mut search = SearchEngine::new(Solver::Dfs, &grid);
        search.start();
        assert_eq!(search.step(&grid).unwrap(), SearchStep::Expanded(0));
        assert_eq!(search.step(&grid).unwrap(), SearchStep::Expanded(1));
        assert_eq!(search.step(&grid), Err(MazeError::FrontierExhausted));
    }

    #[test]
    fn test_single_cell_is_found_immediately() {
        let grid = Grid::new(1, 1).unwrap();
        let mut search = SearchEngine::new(Solver::Bfs, &grid);
        search.start();
        assert_eq!(search.step(&grid).unwrap(), SearchStep::Found(0));
        assert_eq!(search.step(&grid).unwrap(), SearchStep::Done);
    }

    #[test]
    fn test_terminates_on_generated_mazes() {
        for seed in 0..10 {
            let mut grid = Grid::new(8, 13).unwrap();
            generate_maze(&mut grid, Bias::None, Some(seed)).unwrap();
            for solver in [Solver::Bfs, Solver::Dfs] {
                let mut search = SearchEngine::new(solver, &grid);
                search.start();
                run(&mut search, &grid);
                assert_eq!(search.status(), SearchStatus::Found);
                assert_eq!(search.visited().last(), Some(&grid.exit()));
            }
        }
    }

    #[test]
    fn test_restart_clears_previous_run() {
        let grid = t_shaped();
        let mut search = SearchEngine::new(Solver::Bfs, &grid);
        search.start();
        run(&mut search, &grid);
        search.start();
        assert_eq!(search.status(), SearchStatus::Active);
        assert!(search.visited().is_empty());
        assert_eq!(search.predecessor(5), None);
        assert_eq!(search.frontier_len(), 1);
    }
}
