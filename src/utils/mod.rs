//! Shared console and output utilities

pub mod display;

pub use display::{ColorOutput, SolutionFormatter};
