//! Input/output helpers.
//!
//! - sample/price ingest + validation (`ingest`)
//! - prediction exports (CSV) (`export`)
//! - model JSON read/write (`model`)

pub mod export;
pub mod ingest;
pub mod model;

pub use export::*;
pub use ingest::*;
pub use model::*;
