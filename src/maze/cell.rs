/// A single maze cell together with the cells it has been carved open to.
///
/// Neighbors are stored as flat grid indices rather than references, so the
/// adjacency graph lives entirely inside the owning [`Grid`](super::Grid).
#[derive(Debug, Clone)]
pub struct Cell {
    /// Column and row of the cell, as `(x, y)`
    coord: (u16, u16),
    /// Flat indices of carved-open neighbors, in the order they were opened
    neighbors: Vec<usize>,
}

impl Cell {
    pub fn new(x: u16, y: u16) -> Self {
        Cell {
            coord: (x, y),
            neighbors: Vec::new(),
        }
    }

    pub fn coord(&self) -> (u16, u16) {
        self.coord
    }

    pub fn x(&self) -> u16 {
        self.coord.0
    }

    pub fn y(&self) -> u16 {
        self.coord.1
    }

    /// Cells reachable from this one through an opened wall.
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub(super) fn open_to(&mut self, index: usize) {
        self.neighbors.push(index);
    }

    pub(super) fn close_all(&mut self) {
        self.neighbors.clear();
    }
}

// Cells compare by position only; the carved neighbors are not part of identity.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}
