//! Mathematical utilities: polynomial basis, least squares, ridge, scaling.

pub mod basis;
pub mod ols;
pub mod ridge;
pub mod scale;
pub mod stats;

pub use basis::*;
pub use ols::*;
pub use ridge::*;
pub use scale::*;
pub use stats::*;
