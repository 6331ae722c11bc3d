use crate::core::stats::AggregatedSeries;
use crate::error::{PlotError, Result};

/// Power-of-ten divisor shared by every curve of one metric chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    pub exponent: i32,
    pub factor: f64,
}

impl DisplayScale {
    pub fn from_exponent(exponent: i32) -> Self {
        Self {
            exponent,
            factor: 10f64.powi(exponent),
        }
    }

    /// Picks the exponent from the largest finite `mean + std` over all runs.
    pub fn from_envelopes(metric: &str, series: &[AggregatedSeries]) -> Result<Self> {
        let max = series
            .iter()
            .flat_map(|s| s.upper())
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        if !(max.is_finite() && max > 0.0) {
            return Err(PlotError::Scale {
                metric: metric.to_string(),
                max,
            });
        }
        Ok(Self::from_exponent(max.log10().floor() as i32))
    }

    pub fn apply(&self, v: f64) -> f64 {
        v / self.factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(mean: &[f64], std: &[f64]) -> AggregatedSeries {
        AggregatedSeries {
            mean: mean.to_vec(),
            std: std.to_vec(),
        }
    }

    #[test]
    fn exponent_follows_largest_envelope() {
        let runs = [
            series(&[100.0, 200.0], &[10.0, 20.0]),
            series(&[900.0, f64::NAN], &[50.0, f64::NAN]),
        ];
        let scale = DisplayScale::from_envelopes("Energy", &runs).unwrap();
        assert_eq!(scale.exponent, 2);
        assert_eq!(scale.factor, 100.0);
        assert_eq!(scale.apply(950.0), 9.5);
    }

    #[test]
    fn sub_unit_values_give_negative_exponent() {
        let runs = [series(&[0.004, 0.002], &[0.001, 0.0])];
        let scale = DisplayScale::from_envelopes("JFI", &runs).unwrap();
        assert_eq!(scale.exponent, -3);
    }

    #[test]
    fn exact_power_of_ten_keeps_its_exponent() {
        let runs = [series(&[1.0], &[0.0])];
        assert_eq!(
            DisplayScale::from_envelopes("m", &runs).unwrap().exponent,
            0
        );
    }

    #[test]
    fn non_positive_or_missing_max_is_error() {
        let all_nan = [series(&[f64::NAN, f64::NAN], &[f64::NAN, f64::NAN])];
        let zeros = [series(&[0.0, 0.0], &[0.0, 0.0])];
        let negative = [series(&[-5.0], &[1.0])];
        let none: &[AggregatedSeries] = &[];
        for runs in [&all_nan[..], &zeros[..], &negative[..], none] {
            match DisplayScale::from_envelopes("Sum Fluent", runs) {
                Err(PlotError::Scale { metric, max }) => {
                    assert_eq!(metric, "Sum Fluent");
                    assert!(!(max > 0.0));
                }
                other => panic!("expected scale error, got {other:?}"),
            }
        }
    }
}
