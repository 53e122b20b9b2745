use std::{fmt, str::FromStr};

use rand::Rng;

use crate::{
    error::MazeError,
    maze::{Edge, Grid, Orientation},
};

/// Skews edge weights toward one orientation, stretching corridors along it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    #[default]
    None,
    /// Horizontal edges draw from a narrower range, so they sort first.
    Horizontal,
    /// Vertical edges draw from a narrower range, so they sort first.
    Vertical,
}

impl Bias {
    const WIDE: u32 = 100;
    const NARROW: u32 = 50;

    /// Exclusive upper bounds of the weight ranges for (horizontal, vertical) edges.
    pub fn weight_bounds(self) -> (u32, u32) {
        match self {
            Bias::None => (Bias::WIDE, Bias::WIDE),
            Bias::Horizontal => (Bias::NARROW, Bias::WIDE),
            Bias::Vertical => (Bias::WIDE, Bias::NARROW),
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bias::None => write!(f, "none"),
            Bias::Horizontal => write!(f, "horizontal"),
            Bias::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Bias {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "n" => Ok(Bias::None),
            "horizontal" | "h" => Ok(Bias::Horizontal),
            "vertical" | "v" => Ok(Bias::Vertical),
            _ => Err(MazeError::UnknownBias(s.to_string())),
        }
    }
}

/// Every candidate wall opening of a grid, sorted by ascending weight.
///
/// Edges are laid down horizontal first, then vertical, each in row-major
/// order, and the sort is stable, so equal weights keep that order.
#[derive(Debug, Clone)]
pub struct EdgeCatalog {
    edges: Vec<Edge>,
}

impl EdgeCatalog {
    /// Draw a weight for every edge of `grid` and sort the result.
    pub fn generate<R: Rng>(grid: &Grid, bias: Bias, rng: &mut R) -> Self {
        let (rows, cols) = (grid.rows() as usize, grid.cols() as usize);
        let (horizontal_bound, vertical_bound) = bias.weight_bounds();

        let horizontal = (0..rows)
            .flat_map(|y| (0..cols - 1).map(move |x| y * cols + x))
            .map(|i| {
                let weight = rng.random_range(0..horizontal_bound);
                Edge::new(i, i + 1, weight, Orientation::Horizontal)
            })
            .collect::<Vec<_>>();
        let vertical = (0..(rows - 1) * cols)
            .map(|i| {
                let weight = rng.random_range(0..vertical_bound);
                Edge::new(i, i + cols, weight, Orientation::Vertical)
            })
            .collect::<Vec<_>>();

        let mut edges = horizontal;
        edges.extend(vertical);
        EdgeCatalog::from_edges(edges)
    }

    /// Sort an already-weighted edge list. The input order breaks ties.
    pub fn from_edges(mut edges: Vec<Edge>) -> Self {
        edges.sort_by_key(|edge| edge.weight);
        EdgeCatalog { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    pub(super) fn mark_connected(&mut self, index: usize) {
        self.edges[index].connected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_edge_count() {
        let grid = Grid::new(4, 5).unwrap();
        let catalog = EdgeCatalog::generate(&grid, Bias::None, &mut StdRng::seed_from_u64(1));
        // 4 rows of 4 horizontal edges, 3 rows of 5 vertical edges
        assert_eq!(catalog.len(), 4 * 4 + 3 * 5);
        let horizontal = catalog
            .edges()
            .iter()
            .filter(|e| e.orientation == Orientation::Horizontal)
            .count();
        assert_eq!(horizontal, 16);
    }

    #[test]
    fn test_edges_are_adjacent_and_sorted() {
        let grid = Grid::new(6, 7).unwrap();
        let catalog = EdgeCatalog::generate(&grid, Bias::None, &mut StdRng::seed_from_u64(9));
        for edge in catalog.edges() {
            let (x1, y1) = grid.unravel_index(edge.cell1);
            let (x2, y2) = grid.unravel_index(edge.cell2);
            match edge.orientation {
                Orientation::Horizontal => assert!(y1 == y2 && x1 + 1 == x2),
                Orientation::Vertical => assert!(x1 == x2 && y1 + 1 == y2),
            }
            assert!(edge.weight < 100);
            assert!(!edge.connected);
        }
        assert!(catalog.edges().is_sorted_by_key(|e| e.weight));
    }

    #[test]
    fn test_single_cell_has_no_edges() {
        let grid = Grid::new(1, 1).unwrap();
        let catalog = EdgeCatalog::generate(&grid, Bias::Vertical, &mut StdRng::seed_from_u64(0));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_single_column_is_all_vertical() {
        let grid = Grid::new(4, 1).unwrap();
        let catalog = EdgeCatalog::generate(&grid, Bias::None, &mut StdRng::seed_from_u64(0));
        assert_eq!(catalog.len(), 3);
        assert!(catalog.edges().iter().all(|e| e.orientation == Orientation::Vertical));
    }

    #[test]
    fn test_ties_keep_horizontal_then_row_major_order() {
        let edges = vec![
            Edge::new(0, 1, 7, Orientation::Horizontal),
            Edge::new(1, 2, 3, Orientation::Horizontal),
            Edge::new(3, 4, 7, Orientation::Horizontal),
            Edge::new(0, 3, 7, Orientation::Vertical),
            Edge::new(1, 4, 3, Orientation::Vertical),
        ];
        let catalog = EdgeCatalog::from_edges(edges);
        let order = catalog
            .edges()
            .iter()
            .map(|e| (e.cell1, e.cell2))
            .collect::<Vec<_>>();
        assert_eq!(order, vec![(1, 2), (1, 4), (0, 1), (3, 4), (0, 3)]);
    }

    #[test]
    fn test_same_seed_same_catalog() {
        let grid = Grid::new(8, 8).unwrap();
        let a = EdgeCatalog::generate(&grid, Bias::Horizontal, &mut StdRng::seed_from_u64(42));
        let b = EdgeCatalog::generate(&grid, Bias::Horizontal, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_bias_narrows_one_orientation() {
        let grid = Grid::new(10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let horizontal = EdgeCatalog::generate(&grid, Bias::Horizontal, &mut rng);
        assert!(
            horizontal
                .edges()
                .iter()
                .filter(|e| e.orientation == Orientation::Horizontal)
                .all(|e| e.weight < 50)
        );
        let vertical = EdgeCatalog::generate(&grid, Bias::Vertical, &mut rng);
        assert!(
            vertical
                .edges()
                .iter()
                .filter(|e| e.orientation == Orientation::Vertical)
                .all(|e| e.weight < 50)
        );
    }

    #[test]
    fn test_parse_bias() {
        assert_eq!("h".parse::<Bias>(), Ok(Bias::Horizontal));
        assert_eq!("Vertical".parse::<Bias>(), Ok(Bias::Vertical));
        assert_eq!("none".parse::<Bias>(), Ok(Bias::None));
        assert_eq!(
            "diagonal".parse::<Bias>(),
            Err(MazeError::UnknownBias("diagonal".to_string()))
        );
    }
}
