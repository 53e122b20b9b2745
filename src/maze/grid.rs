use crate::error::MazeError;

use super::cell::Cell;

/// The fixed `rows x cols` arena of cells. Cell `(x, y)` lives at flat index
/// `y * cols + x`.
pub struct Grid {
    cells: Box<[Cell]>,
    rows: u16,
    cols: u16,
}

impl Grid {
    pub fn new(rows: u16, cols: u16) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let cells = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Cell::new(x, y)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Grid { cells, rows, cols })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the top-left cell, where every run starts.
    pub fn entrance(&self) -> usize {
        0
    }

    /// Index of the bottom-right cell.
    pub fn exit(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn ravel_index(&self, x: u16, y: u16) -> usize {
        y as usize * self.cols as usize + x as usize
    }

    pub fn unravel_index(&self, index: usize) -> (u16, u16) {
        self.cells[index].coord()
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.cols as i32 && y < self.rows as i32
    }

    /// Carved-open neighbors of the cell at `index`.
    ///
    /// # Panics
    /// If `index` is outside the grid.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.cells[index].neighbors()
    }

    /// The carved-open neighbor of `index` sitting at `(x, y)`, if there is one.
    pub fn open_neighbor_at(&self, index: usize, x: i32, y: i32) -> Option<usize> {
        if !self.is_in_bounds(x, y) {
            return None;
        }
        let target = self.ravel_index(x as u16, y as u16);
        self.neighbors(index).iter().copied().find(|&n| n == target)
    }

    /// Open the wall between two cells, registering each as the other's neighbor.
    ///
    /// # Panics
    /// If either index is outside the grid.
    pub fn carve(&mut self, a: usize, b: usize) {
        self.cells[a].open_to(b);
        self.cells[b].open_to(a);
    }

    /// Put every wall back.
    pub fn close_all(&mut self) {
        self.cells.iter_mut().for_each(Cell::close_all);
    }
}

impl std::ops::Index<usize> for Grid {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl std::ops::Index<(u16, u16)> for Grid {
    type Output = Cell;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.cells[self.ravel_index(index.0, index.1)]
    }
}
