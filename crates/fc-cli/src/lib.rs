//! Fulcrum command-line driver: configuration in, tuned parameters out.

pub mod cli;
pub mod logging;
pub mod report;
pub mod runner;

pub use cli::{Method, OptimizeArgs};
pub use report::{OptimizationReport, ReportMetadata};
pub use runner::run;
