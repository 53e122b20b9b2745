//! Step-by-step perfect maze generation (randomized Kruskal), breadth/depth-first
//! solving with path tracing, and manual play, all advanced one unit of work
//! per call so any host can animate it.

pub mod app;
pub mod error;
pub mod game;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod session;
pub mod solvers;

pub use error::MazeError;
pub use session::{Command, MazeSession, Mode, Tick};
