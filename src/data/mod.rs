//! Experiment run arrays as stored on disk.
//!
//! Every run is one `.npy` file holding a `[trial, step, metric]` array of
//! floats. NaN marks a missing sample and survives loading untouched.

use std::path::{Path, PathBuf};

use ndarray::{Array3, ArrayD, ArrayView2, Axis, Ix3};
use ndarray_npy::{ReadNpyError, read_npy};
use tracing::{debug, info};

use crate::error::{PlotError, Result};

/// A metric column to chart: `index` into the third array axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSpec {
    pub index: usize,
    pub name: String,
    pub unit: String,
}

impl MetricSpec {
    /// Pairs names with units positionally; column `i` is the `i`-th name.
    pub fn from_names<S: AsRef<str>>(names: &[S], units: &[S]) -> Result<Vec<Self>> {
        if names.len() != units.len() {
            return Err(PlotError::Config(format!(
                "{} metric names but {} units",
                names.len(),
                units.len()
            )));
        }
        Ok(names
            .iter()
            .zip(units)
            .enumerate()
            .map(|(index, (name, unit))| Self {
                index,
                name: name.as_ref().to_string(),
                unit: unit.as_ref().to_string(),
            })
            .collect())
    }
}

/// One loaded experiment array plus the label it is drawn under.
#[derive(Debug, Clone)]
pub struct ExperimentRun {
    pub source_path: PathBuf,
    pub label: String,
    pub values: Array3<f64>,
}

impl ExperimentRun {
    pub fn load(input_root: &Path, rel_path: &str, label: impl Into<String>) -> Result<Self> {
        let source_path = input_root.join(rel_path);
        info!(path = %source_path.display(), "loading run data");
        let values = load_array(&source_path)?;
        Ok(Self {
            source_path,
            label: label.into(),
            values,
        })
    }

    pub fn metric_count(&self) -> usize {
        self.values.len_of(Axis(2))
    }

    /// The `[trial, step]` plane for one metric column.
    pub fn metric_slice(&self, index: usize) -> Result<ArrayView2<'_, f64>> {
        let available = self.metric_count();
        if index >= available {
            return Err(PlotError::Shape {
                run: self.label.clone(),
                index,
                available,
            });
        }
        Ok(self.values.index_axis(Axis(2), index))
    }
}

/// Reads a 3-D `.npy` array, widening `float32` payloads to f64.
pub fn load_array(path: &Path) -> Result<Array3<f64>> {
    let dynamic: ArrayD<f64> = match read_npy::<_, ArrayD<f64>>(path) {
        Ok(arr) => arr,
        Err(ReadNpyError::WrongDescriptor(descr)) => {
            debug!(path = %path.display(), ?descr, "not float64, retrying as float32");
            let narrow: ArrayD<f32> = read_npy(path).map_err(|source| PlotError::Load {
                path: path.to_path_buf(),
                source,
            })?;
            narrow.mapv(f64::from)
        }
        Err(source) => {
            return Err(PlotError::Load {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let ndim = dynamic.ndim();
    dynamic
        .into_dimensionality::<Ix3>()
        .map_err(|_| PlotError::Dimension {
            path: path.to_path_buf(),
            ndim,
        })
}
