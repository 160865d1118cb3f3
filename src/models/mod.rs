//! Fitted model types.
//!
//! Models are plain data with pure prediction methods so that the pipelines,
//! reporters and exporters can share them freely.

pub mod model;

pub use model::*;
