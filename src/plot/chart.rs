//! Drawing-free description of one metric comparison chart.
//!
//! Everything a renderer needs is resolved here: policy transform,
//! aggregation, display scale, axis ranges and colours. Building a
//! [`MetricChart`] never touches the filesystem.

use plotters::style::RGBColor;

use crate::core::policy::MetricPolicy;
use crate::core::scale::DisplayScale;
use crate::core::stats::{AggregatedSeries, nan_mean_std};
use crate::data::{ExperimentRun, MetricSpec};
use crate::error::Result;
use crate::plot::format::{chart_file_name, chart_title, y_axis_label};

/// matplotlib "tab10", cycled in run order.
pub const TAB10: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

const AXIS_MARGIN: f64 = 0.05;

pub fn run_color(run_idx: usize) -> RGBColor {
    TAB10[run_idx % TAB10.len()]
}

/// One run's scaled mean curve and ±1 std band.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSeries {
    pub label: String,
    pub color: RGBColor,
    pub mean: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl CurveSeries {
    fn from_aggregate(
        label: &str,
        color: RGBColor,
        agg: &AggregatedSeries,
        scale: DisplayScale,
    ) -> Self {
        Self {
            label: label.to_string(),
            color,
            mean: agg.mean.iter().map(|&m| scale.apply(m)).collect(),
            lower: agg.lower().map(|v| scale.apply(v)).collect(),
            upper: agg.upper().map(|v| scale.apply(v)).collect(),
        }
    }

    pub fn steps(&self) -> usize {
        self.mean.len()
    }

    /// Polyline pieces of the mean curve clipped to `y_range`. A line that
    /// leaves the range ends on the boundary and resumes where it comes back;
    /// non-finite steps break it.
    pub fn line_segments(&self, y_range: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        let mut prev: Option<(f64, f64)> = None;
        for (i, &y) in self.mean.iter().enumerate() {
            if !y.is_finite() {
                close_segment(&mut segments, &mut current);
                prev = None;
                continue;
            }
            let p = (i as f64, y);
            match prev {
                None => {
                    if y >= y_range.0 && y <= y_range.1 {
                        current.push(p);
                    }
                }
                Some(q) => match clip_edge(q, p, y_range) {
                    Some((entered, start, end)) => {
                        if entered || current.is_empty() {
                            close_segment(&mut segments, &mut current);
                            current.push(start);
                        }
                        current.push(end);
                    }
                    None => close_segment(&mut segments, &mut current),
                },
            }
            prev = Some(p);
        }
        close_segment(&mut segments, &mut current);
        segments
    }

    /// Closed band outlines (upper edge forward, lower edge back), split at
    /// non-finite steps and clipped to `y_range`.
    pub fn band_polygons(&self, y_range: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
        let mut polygons = Vec::new();
        let mut run: Vec<(f64, f64, f64)> = Vec::new();
        let mut flush = |run: &mut Vec<(f64, f64, f64)>| {
            if run.is_empty() {
                return;
            }
            let mut outline: Vec<(f64, f64)> = run.iter().map(|&(x, _, hi)| (x, hi)).collect();
            outline.extend(run.iter().rev().map(|&(x, lo, _)| (x, lo)));
            let clipped = clip_polygon(&outline, y_range);
            if !clipped.is_empty() {
                polygons.push(clipped);
            }
            run.clear();
        };
        for i in 0..self.steps() {
            let (lo, hi) = (self.lower[i], self.upper[i]);
            if lo.is_finite() && hi.is_finite() {
                run.push((i as f64, lo, hi));
            } else {
                flush(&mut run);
            }
        }
        flush(&mut run);
        polygons
    }
}

fn close_segment(segments: &mut Vec<Vec<(f64, f64)>>, current: &mut Vec<(f64, f64)>) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

/// Part of the edge `a -> b` inside `lo <= y <= hi`, as `(entered, start, end)`.
/// `entered` is set when the kept part starts on a boundary rather than at `a`.
/// Boundary points carry the exact boundary value.
fn clip_edge(
    a: (f64, f64),
    b: (f64, f64),
    (lo, hi): (f64, f64),
) -> Option<(bool, (f64, f64), (f64, f64))> {
    let dy = b.1 - a.1;
    if dy == 0.0 {
        return (a.1 >= lo && a.1 <= hi).then_some((false, a, b));
    }
    let t_lo = (lo - a.1) / dy;
    let t_hi = (hi - a.1) / dy;
    let ((t_in, y_in), (t_out, y_out)) = if dy > 0.0 {
        ((t_lo, lo), (t_hi, hi))
    } else {
        ((t_hi, hi), (t_lo, lo))
    };
    if t_in > 1.0 || t_out < 0.0 {
        return None;
    }
    let lerp = |t: f64, y: f64| (a.0 + t * (b.0 - a.0), y);
    let entered = t_in > 0.0;
    let start = if entered { lerp(t_in, y_in) } else { a };
    let end = if t_out < 1.0 { lerp(t_out, y_out) } else { b };
    Some((entered, start, end))
}

/// Sutherland-Hodgman against the horizontal strip `lo <= y <= hi`.
fn clip_polygon(outline: &[(f64, f64)], (lo, hi): (f64, f64)) -> Vec<(f64, f64)> {
    let below = clip_half_plane(outline, hi, |y| y <= hi);
    clip_half_plane(&below, lo, |y| y >= lo)
}

fn clip_half_plane(
    points: &[(f64, f64)],
    bound: f64,
    inside: impl Fn(f64) -> bool,
) -> Vec<(f64, f64)> {
    let crossing = |a: (f64, f64), b: (f64, f64)| {
        let t = (bound - a.1) / (b.1 - a.1);
        (a.0 + t * (b.0 - a.0), bound)
    };
    let n = points.len();
    let mut out = Vec::with_capacity(n + 2);
    for i in 0..n {
        let cur = points[i];
        let prev = points[(i + n - 1) % n];
        if inside(cur.1) {
            if !inside(prev.1) {
                out.push(crossing(prev, cur));
            }
            out.push(cur);
        } else if inside(prev.1) {
            out.push(crossing(prev, cur));
        }
    }
    out
}

/// A fully resolved comparison chart for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricChart {
    pub scale: DisplayScale,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub steps: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub clamped: bool,
    pub file_name: String,
    pub curves: Vec<CurveSeries>,
}

impl MetricChart {
    pub fn build(metric: &MetricSpec, policy: MetricPolicy, runs: &[ExperimentRun]) -> Result<Self> {
        let mut aggregates = Vec::with_capacity(runs.len());
        for run in runs {
            // Policy transform works on a copy so the loaded run stays raw.
            let plane = run.metric_slice(metric.index)?.mapv(|v| policy.transform(v));
            aggregates.push(nan_mean_std(plane.view()));
        }

        let scale = DisplayScale::from_envelopes(&metric.name, &aggregates)?;

        let curves: Vec<CurveSeries> = runs
            .iter()
            .zip(&aggregates)
            .enumerate()
            .map(|(j, (run, agg))| CurveSeries::from_aggregate(&run.label, run_color(j), agg, scale))
            .collect();

        let steps = curves.iter().map(CurveSeries::steps).max().unwrap_or(0);
        let x_span = (steps.saturating_sub(1) as f64).max(1.0);
        let x_pad = AXIS_MARGIN * x_span;
        let x_range = (-x_pad, x_span + x_pad);
        let (y_range, clamped) = match policy.y_range {
            Some(range) => (range, true),
            None => (auto_y_range(&curves), false),
        };

        Ok(Self {
            scale,
            title: chart_title(&metric.name),
            x_desc: "Steps".to_string(),
            y_desc: y_axis_label(&metric.name, scale.exponent, &metric.unit),
            steps,
            x_range,
            y_range,
            clamped,
            file_name: chart_file_name(&metric.name),
            curves,
        })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.curves.iter().map(|c| c.label.as_str()).collect()
    }
}

fn auto_y_range(curves: &[CurveSeries]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for curve in curves {
        for &v in curve.lower.iter().chain(&curve.upper).chain(&curve.mean) {
            if v.is_finite() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span > 1e-12 { AXIS_MARGIN * span } else { 0.5 };
    (lo - pad, hi + pad)
}
