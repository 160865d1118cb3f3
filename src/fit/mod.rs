//! Fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit least-squares polynomials for a list of degrees
//! - generate the log-spaced λ grid
//! - split ordered data into train/test partitions
//! - sweep ridge models over the grid and select the best one

pub mod lambda_grid;
pub mod poly;
pub mod selection;
pub mod split;

pub use lambda_grid::*;
pub use poly::*;
pub use selection::*;
pub use split::*;
