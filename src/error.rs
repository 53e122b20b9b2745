use thiserror::Error;

/// Everything that can go wrong while building, solving or driving a maze.
///
/// The first group are precondition failures reported when a command is issued;
/// the session is left as it was. The second group are broken invariants found
/// while stepping and point at a bug in maze construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: u16, cols: u16 },
    #[error("unrecognized bias `{0}` (expected none, horizontal or vertical)")]
    UnknownBias(String),
    #[error("unrecognized search mode `{0}` (expected breadth or depth)")]
    UnknownSolver(String),
    #[error("searching is unavailable while manual mode is on")]
    ManualModeActive,

    #[error("edge catalog exhausted after {accepted} of {needed} tree edges")]
    CatalogExhausted { accepted: usize, needed: usize },
    #[error("search frontier ran dry before reaching the exit")]
    FrontierExhausted,
    #[error("no predecessor recorded for cell {0}")]
    MissingPredecessor(usize),
}

impl MazeError {
    /// Whether this error means the engine's own bookkeeping is broken.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            MazeError::CatalogExhausted { .. }
                | MazeError::FrontierExhausted
                | MazeError::MissingPredecessor(_)
        )
    }
}
