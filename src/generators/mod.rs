use rand::{SeedableRng, rngs::StdRng};

pub mod catalog;
pub mod kruskal;
pub mod union_find;

pub use catalog::{Bias, EdgeCatalog};
pub use kruskal::{BuildStep, KruskalBuilder};
pub use union_find::DisjointSet;

use crate::{error::MazeError, maze::Grid};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Fresh builder for `grid`, with a newly drawn catalog. Nothing is carved yet.
pub fn new_builder(grid: &Grid, bias: Bias, seed: Option<u64>) -> KruskalBuilder {
    let catalog = EdgeCatalog::generate(grid, bias, &mut get_rng(seed));
    KruskalBuilder::new(catalog, grid.len())
}

/// Carve a complete maze into `grid` in one go.
pub fn generate_maze(
    grid: &mut Grid,
    bias: Bias,
    seed: Option<u64>,
) -> Result<KruskalBuilder, MazeError> {
    grid.close_all();
    let mut builder = new_builder(grid, bias, seed);
    while builder.step(grid)? != BuildStep::Complete {}
    Ok(builder)
}
