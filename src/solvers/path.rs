use crate::error::MazeError;

/// What a single reconstruction step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Walked back one hop to this cell.
    Advanced(usize),
    /// Walked back to the entrance; the path is now complete.
    Reached(usize),
    /// Already at the entrance; nothing was done.
    Complete,
}

/// Walks a predecessor map backward from the exit, one hop per step.
#[derive(Debug, Clone)]
pub struct PathReconstructor {
    entrance: usize,
    cursor: usize,
    /// Cells from the exit back toward the entrance
    path: Vec<usize>,
}

impl PathReconstructor {
    pub fn new(entrance: usize, exit: usize) -> Self {
        PathReconstructor {
            entrance,
            cursor: exit,
            path: vec![exit],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.entrance
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn into_path(self) -> Vec<usize> {
        self.path
    }

    /// Follow `predecessors[cursor]` one hop.
    ///
    /// A missing entry means the search never discovered the cursor cell and is
    /// reported as [`MazeError::MissingPredecessor`].
    pub fn step(&mut self, predecessors: &[Option<usize>]) -> Result<PathStep, MazeError> {
        if self.is_complete() {
            return Ok(PathStep::Complete);
        }

        let Some(previous) = predecessors.get(self.cursor).copied().flatten() else {
            tracing::error!("[path] no predecessor recorded for cell {}", self.cursor);
            return Err(MazeError::MissingPredecessor(self.cursor));
        };
        self.path.push(previous);
        self.cursor = previous;
        tracing::debug!("[path] stepped back to {}", previous);

        if self.is_complete() {
            tracing::info!("[path] solution traced, {} cells long", self.path.len());
            Ok(PathStep::Reached(previous))
        } else {
            Ok(PathStep::Advanced(previous))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_back_one_hop_per_step() {
        // chain 0 <- 1 <- 4 <- 5
        let predecessors = [None, Some(0), None, None, Some(1), Some(4)];
        let mut path = PathReconstructor::new(0, 5);
        assert_eq!(path.path(), &[5]);
        assert_eq!(path.step(&predecessors).unwrap(), PathStep::Advanced(4));
        assert_eq!(path.step(&predecessors).unwrap(), PathStep::Advanced(1));
        assert_eq!(path.step(&predecessors).unwrap(), PathStep::Reached(0));
        assert!(path.is_complete());
        assert_eq!(path.path(), &[5, 4, 1, 0]);

        assert_eq!(path.step(&predecessors).unwrap(), PathStep::Complete);
        assert_eq!(path.path(), &[5, 4, 1, 0]);
    }

    #[test]
    fn test_entrance_is_exit() {
        let mut path = PathReconstructor::new(0, 0);
        assert!(path.is_complete());
        assert_eq!(path.step(&[None]).unwrap(), PathStep::Complete);
        assert_eq!(path.path(), &[0]);
    }

    #[test]
    fn test_missing_predecessor_is_an_error() {
        let predecessors = [None, None, Some(1)];
        let mut path = PathReconstructor::new(0, 2);
        assert_eq!(path.step(&predecessors).unwrap(), PathStep::Advanced(1));
        assert_eq!(path.step(&predecessors), Err(MazeError::MissingPredecessor(1)));
        // the failed step leaves the path untouched
        assert_eq!(path.path(), &[2, 1]);
    }
}
