use crate::{
    error::MazeError,
    game::{Direction, ManualNavigator, MoveOutcome},
    generators::{Bias, BuildStep, KruskalBuilder, new_builder},
    maze::{Edge, Grid},
    solvers::{PathReconstructor, PathStep, SearchEngine, SearchStatus, SearchStep, Solver},
};

/// Which part of the session is currently in charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Walls are still being knocked down.
    Building,
    /// The maze is complete and nothing has been asked of it yet.
    AwaitingSearch,
    Searching(Solver),
    /// The exit was found and the solution is being traced back.
    AnimatingPath,
    /// The solution has been traced all the way to the entrance.
    Solved,
    Manual,
}

/// One unit of work done by [`MazeSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Built(BuildStep),
    Searched(SearchStep),
    Traced(PathStep),
    /// Nothing is left to do until the next command.
    Idle,
}

/// Every command a driver can issue, one per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Generate { bias: Bias, seed: Option<u64> },
    Refresh,
    StartSearch(Solver),
    ToggleVisitedDisplay,
    ToggleManualMode,
    ManualMove(Direction),
}

impl Command {
    /// Map a key name to its command:
    /// `b`/`d` search, `n`/`h`/`v` new maze, `r` refresh, `s` visited display,
    /// `m` manual mode, arrow names move.
    pub fn from_key_token(token: &str) -> Option<Command> {
        let command = match token {
            "b" => Command::StartSearch(Solver::Bfs),
            "d" => Command::StartSearch(Solver::Dfs),
            "n" | "h" | "v" => Command::Generate {
                bias: token.parse().ok()?,
                seed: None,
            },
            "r" => Command::Refresh,
            "s" => Command::ToggleVisitedDisplay,
            "m" => Command::ToggleManualMode,
            _ => Command::ManualMove(token.parse().ok()?),
        };
        Some(command)
    }
}

/// A single maze together with everything done to it: construction, an
/// optional search and its traced solution, and an optional manual walk.
///
/// Nothing happens on its own; the driver calls [`step`](Self::step) at its
/// own cadence and issues commands in between.
pub struct MazeSession {
    grid: Grid,
    bias: Bias,
    seed: Option<u64>,
    builder: KruskalBuilder,
    search: Option<SearchEngine>,
    path: Option<PathReconstructor>,
    manual: Option<ManualNavigator>,
    show_visited: bool,
}

impl MazeSession {
    pub fn new(rows: u16, cols: u16, bias: Bias, seed: Option<u64>) -> Result<Self, MazeError> {
        let grid = Grid::new(rows, cols)?;
        let builder = new_builder(&grid, bias, seed);
        tracing::info!(
            "[session] new {}x{} maze, bias {}, seed {:?}",
            rows,
            cols,
            bias,
            seed
        );
        Ok(MazeSession {
            grid,
            bias,
            seed,
            builder,
            search: None,
            path: None,
            manual: None,
            show_visited: true,
        })
    }

    pub fn execute(&mut self, command: Command) -> Result<(), MazeError> {
        match command {
            Command::Generate { bias, seed } => self.generate(bias, seed),
            Command::Refresh => self.refresh(),
            Command::StartSearch(solver) => self.start_search(solver)?,
            Command::ToggleVisitedDisplay => self.toggle_visited_display(),
            Command::ToggleManualMode => self.toggle_manual_mode(),
            Command::ManualMove(direction) => {
                self.manual_move(direction);
            }
        }
        Ok(())
    }

    /// Throw the current maze away and start building a new one on the same grid.
    pub fn generate(&mut self, bias: Bias, seed: Option<u64>) {
        self.grid.close_all();
        self.builder = new_builder(&self.grid, bias, seed);
        self.bias = bias;
        self.seed = seed;
        self.search = None;
        self.path = None;
        if self.manual.is_some() {
            self.manual = Some(ManualNavigator::new(&self.grid));
        }
        tracing::info!("[session] regenerating, bias {}, seed {:?}", bias, seed);
    }

    /// Keep the carved maze but forget every search and manual walk.
    pub fn refresh(&mut self) {
        self.search = None;
        self.path = None;
        if self.manual.is_some() {
            self.manual = Some(ManualNavigator::new(&self.grid));
        }
        tracing::info!("[session] refreshed");
    }

    /// Begin a fresh search from the entrance. If the maze is still being built
    /// the search waits until construction finishes.
    pub fn start_search(&mut self, solver: Solver) -> Result<(), MazeError> {
        if self.manual.is_some() {
            return Err(MazeError::ManualModeActive);
        }
        let mut search = SearchEngine::new(solver, &self.grid);
        search.start();
        self.search = Some(search);
        self.path = None;
        Ok(())
    }

    pub fn toggle_visited_display(&mut self) {
        self.show_visited = !self.show_visited;
    }

    /// Entering manual mode drops any search in progress; leaving it drops the walk.
    pub fn toggle_manual_mode(&mut self) {
        if self.manual.take().is_none() {
            self.search = None;
            self.path = None;
            self.manual = Some(ManualNavigator::new(&self.grid));
            tracing::info!("[session] manual mode on");
        } else {
            tracing::info!("[session] manual mode off");
        }
    }

    /// Returns `None` when manual mode is off.
    pub fn manual_move(&mut self, direction: Direction) -> Option<MoveOutcome> {
        let navigator = self.manual.as_mut()?;
        Some(navigator.attempt_move(&self.grid, direction))
    }

    /// Advance the highest-priority active part by exactly one unit: building,
    /// then searching, then tracing the solution.
    pub fn step(&mut self) -> Result<Tick, MazeError> {
        if !self.builder.is_complete() {
            return self.builder.step(&mut self.grid).map(Tick::Built);
        }

        if let Some(search) = self.search.as_mut() {
            if search.status() == SearchStatus::Active {
                let step = search.step(&self.grid)?;
                if let SearchStep::Found(_) = step {
                    self.path = Some(PathReconstructor::new(
                        self.grid.entrance(),
                        self.grid.exit(),
                    ));
                }
                return Ok(Tick::Searched(step));
            }
        }

        if let (Some(path), Some(search)) = (self.path.as_mut(), self.search.as_ref()) {
            if !path.is_complete() {
                return path.step(search.predecessors()).map(Tick::Traced);
            }
        }

        Ok(Tick::Idle)
    }

    pub fn mode(&self) -> Mode {
        if !self.builder.is_complete() {
            return Mode::Building;
        }
        if self.manual.is_some() {
            return Mode::Manual;
        }
        match (&self.search, &self.path) {
            (_, Some(path)) if path.is_complete() => Mode::Solved,
            (_, Some(_)) => Mode::AnimatingPath,
            (Some(search), None) => Mode::Searching(search.solver()),
            (None, None) => Mode::AwaitingSearch,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bias(&self) -> Bias {
        self.bias
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Every candidate edge, in catalog order. Unconnected edges are walls.
    pub fn edges(&self) -> &[Edge] {
        self.builder.edges()
    }

    pub fn builder(&self) -> &KruskalBuilder {
        &self.builder
    }

    pub fn is_built(&self) -> bool {
        self.builder.is_complete()
    }

    pub fn search(&self) -> Option<&SearchEngine> {
        self.search.as_ref()
    }

    /// Whether visited cells should be drawn.
    pub fn show_visited(&self) -> bool {
        self.show_visited
    }

    /// Cells visited by the manual walk when in manual mode, otherwise by the search.
    pub fn visited(&self) -> &[usize] {
        match (&self.manual, &self.search) {
            (Some(navigator), _) => navigator.visited(),
            (None, Some(search)) => search.visited(),
            (None, None) => &[],
        }
    }

    /// The traced solution so far, from the exit backward.
    pub fn path(&self) -> &[usize] {
        self.path
            .as_ref()
            .map(PathReconstructor::path)
            .unwrap_or_default()
    }

    pub fn is_manual(&self) -> bool {
        self.manual.is_some()
    }

    pub fn manual_position(&self) -> Option<(u16, u16)> {
        self.manual
            .as_ref()
            .map(|navigator| self.grid.unravel_index(navigator.position()))
    }

    /// Moves attempted in manual mode, walls included.
    pub fn moves(&self) -> usize {
        self.manual.as_ref().map_or(0, ManualNavigator::moves)
    }

    pub fn won(&self) -> bool {
        self.manual.as_ref().is_some_and(ManualNavigator::won)
    }

    /// Cells the search committed beyond the entrance.
    pub fn steps(&self) -> usize {
        self.search
            .as_ref()
            .map_or(0, |s| s.visited().len().saturating_sub(1))
    }

    /// Committed cells that turned out not to be on the traced solution.
    pub fn wrong_moves(&self) -> usize {
        let path_len = self.path().len().max(1);
        (self.steps() + 1).saturating_sub(path_len)
    }
}
