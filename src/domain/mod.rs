//! Domain types used throughout the pipelines.
//!
//! This module defines:
//!
//! - input data (`Sample`, `PriceTable`)
//! - fit artifacts (`NormStats`, `SweepPoint`)
//! - resolved run configuration (`PolyConfig`, `RidgeConfig`, `ApplyConfig`)
//! - export schemas (`PolyFitsFile`, `RidgeModelFile`)

pub mod types;

pub use types::*;
