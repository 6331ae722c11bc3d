use std::path::PathBuf;

use ndarray_npy::ReadNpyError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load array {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ReadNpyError,
    },

    #[error("array {} has {ndim} dimensions, expected [trial, step, metric]", path.display())]
    Dimension { path: PathBuf, ndim: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("run '{run}' has {available} metric columns, metric index {index} is out of range")]
    Shape {
        run: String,
        index: usize,
        available: usize,
    },

    #[error("metric '{metric}' has no positive finite envelope maximum (max = {max})")]
    Scale { metric: String, max: f64 },

    #[error("render failed: {0}")]
    Render(String),
}
