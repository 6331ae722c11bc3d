pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod plot;
pub mod plotter;

pub use error::{PlotError, Result};
pub use plotter::ComparisonPlotter;
