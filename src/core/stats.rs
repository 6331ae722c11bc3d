use ndarray::{ArrayView2, Axis};

/// Per-step mean and population standard deviation across trials.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl AggregatedSeries {
    /// `mean + std` per step.
    pub fn upper(&self) -> impl Iterator<Item = f64> + '_ {
        self.mean.iter().zip(&self.std).map(|(m, s)| m + s)
    }

    /// `mean - std` per step.
    pub fn lower(&self) -> impl Iterator<Item = f64> + '_ {
        self.mean.iter().zip(&self.std).map(|(m, s)| m - s)
    }
}

/// Aggregates a `[trial, step]` plane over the trial axis.
///
/// NaN samples are skipped, so they shrink the count of their step
/// rather than contributing zero. A step with no samples left yields NaN
/// for both mean and std.
pub fn nan_mean_std(plane: ArrayView2<'_, f64>) -> AggregatedSeries {
    let steps = plane.len_of(Axis(1));
    let mut mean = Vec::with_capacity(steps);
    let mut std = Vec::with_capacity(steps);
    for column in plane.axis_iter(Axis(1)) {
        let mut n = 0usize;
        let mut sum = 0.0f64;
        for &v in column.iter() {
            if !v.is_nan() {
                n += 1;
                sum += v;
            }
        }
        if n == 0 {
            mean.push(f64::NAN);
            std.push(f64::NAN);
            continue;
        }
        let m = sum / n as f64;
        let var = column
            .iter()
            .filter(|v| !v.is_nan())
            .map(|&v| (v - m).powi(2))
            .sum::<f64>()
            / n as f64;
        mean.push(m);
        std.push(var.sqrt());
    }
    AggregatedSeries { mean, std }
}
