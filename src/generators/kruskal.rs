use crate::{
    error::MazeError,
    generators::{catalog::EdgeCatalog, union_find::DisjointSet},
    maze::{Edge, Grid},
};

/// What a single builder step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// The catalog edge at this position joined two components and was carved.
    Accepted(usize),
    /// The catalog edge at this position would have closed a cycle.
    Rejected(usize),
    /// The spanning tree is already complete; nothing was done.
    Complete,
}

/// Randomized Kruskal, one catalog edge per [`step`](Self::step).
pub struct KruskalBuilder {
    catalog: EdgeCatalog,
    /// Position of the next edge to inspect
    cursor: usize,
    /// Catalog positions of accepted edges, in acceptance order
    accepted: Vec<usize>,
    sets: DisjointSet,
    /// Number of tree edges of a spanning tree: cells - 1
    needed: usize,
}

impl KruskalBuilder {
    pub fn new(catalog: EdgeCatalog, cell_count: usize) -> Self {
        KruskalBuilder {
            catalog,
            cursor: 0,
            accepted: Vec::with_capacity(cell_count.saturating_sub(1)),
            sets: DisjointSet::new(cell_count),
            needed: cell_count.saturating_sub(1),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.accepted.len() == self.needed
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    /// The full sorted catalog, with `connected` set on accepted edges.
    pub fn edges(&self) -> &[Edge] {
        self.catalog.edges()
    }

    /// Accepted edges in the order they were accepted.
    pub fn accepted_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.accepted.iter().map(|&i| &self.catalog.edges()[i])
    }

    pub fn sets(&self) -> &DisjointSet {
        &self.sets
    }

    /// Inspect the edge under the cursor and carve it into `grid` if it joins
    /// two separate components. The cursor advances either way.
    ///
    /// Running off the end of the catalog before the tree is complete cannot
    /// happen on a grid graph and is reported as [`MazeError::CatalogExhausted`].
    pub fn step(&mut self, grid: &mut Grid) -> Result<BuildStep, MazeError> {
        if self.is_complete() {
            return Ok(BuildStep::Complete);
        }

        let position = self.cursor;
        let (cell1, cell2) = match self.catalog.get(position) {
            Some(edge) => (edge.cell1, edge.cell2),
            None => {
                tracing::error!(
                    "[builder] catalog exhausted with {} of {} tree edges",
                    self.accepted.len(),
                    self.needed
                );
                return Err(MazeError::CatalogExhausted {
                    accepted: self.accepted.len(),
                    needed: self.needed,
                });
            }
        };
        self.cursor += 1;

        if self.sets.connected(cell1, cell2) {
            tracing::trace!("[builder] rejected edge {} ({} - {})", position, cell1, cell2);
            return Ok(BuildStep::Rejected(position));
        }

        self.catalog.mark_connected(position);
        self.sets.union(cell1, cell2);
        self.accepted.push(position);
        grid.carve(cell1, cell2);
        tracing::debug!(
            "[builder] accepted edge {} ({} - {}), {}/{} tree edges",
            position,
            cell1,
            cell2,
            self.accepted.len(),
            self.needed
        );
        if self.is_complete() {
            tracing::info!("[builder] spanning tree complete after {} edges", self.cursor);
        }
        Ok(BuildStep::Accepted(position))
    }
}
