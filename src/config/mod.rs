//! Configuration management for the gem hunter solver

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, Settings, SolverConfig, Strategy,
};
