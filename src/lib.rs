//! `regfit` library crate.
//!
//! Two numerical pipelines share this crate:
//!
//! - polynomial least squares over several degrees (`regfit poly`)
//! - ridge regression with a validation sweep over λ, applied out of sample
//!   to a second price series (`regfit ridge`, `regfit apply`)
//!
//! The binary is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
