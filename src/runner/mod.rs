//! Run orchestration: one detection pass, then every installer phase.

pub mod controller;

pub use controller::{RunController, RunOptions, RunReport};
