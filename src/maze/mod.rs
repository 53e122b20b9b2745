pub mod cell;
mod grid;

pub use cell::Cell;
pub use grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A candidate opening between two grid-adjacent cells.
///
/// `cell1` is always the left (horizontal edge) or upper (vertical edge) cell.
/// Only `connected` ever changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub cell1: usize,
    pub cell2: usize,
    pub weight: u32,
    pub orientation: Orientation,
    pub connected: bool,
}

impl Edge {
    pub fn new(cell1: usize, cell2: usize, weight: u32, orientation: Orientation) -> Self {
        Edge {
            cell1,
            cell2,
            weight,
            orientation,
            connected: false,
        }
    }
}
