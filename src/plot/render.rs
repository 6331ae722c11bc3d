use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};
use crate::plot::chart::MetricChart;
use crate::plot::format::{format_tick, step_tick};

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: u32 = 20;
const AXIS_DESC_FONT_SIZE: u32 = 16;
const TICK_FONT_SIZE: u32 = 14;
const LEGEND_FONT_SIZE: u32 = 14;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartStyle {
    #[serde(default = "ChartStyle::default_width")]
    pub width: u32,
    #[serde(default = "ChartStyle::default_height")]
    pub height: u32,
    #[serde(default = "ChartStyle::default_line_width")]
    pub line_width: u32,
    #[serde(default = "ChartStyle::default_band_alpha")]
    pub band_alpha: f64,
}

impl ChartStyle {
    fn default_width() -> u32 {
        1000
    }
    fn default_height() -> u32 {
        600
    }
    fn default_line_width() -> u32 {
        2
    }
    fn default_band_alpha() -> f64 {
        0.2
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            line_width: Self::default_line_width(),
            band_alpha: Self::default_band_alpha(),
        }
    }
}

/// Draws `chart` into a PNG at `out_path`.
///
/// The bitmap and its drawing area live only for the duration of this call,
/// so at most one chart surface exists at a time.
pub fn render_chart(chart: &MetricChart, out_path: &Path, style: &ChartStyle) -> Result<()> {
    draw_chart(chart, out_path, style).map_err(|err| {
        PlotError::Render(format!("{}: {err}", out_path.display()))
    })
}

fn draw_chart(
    chart: &MetricChart,
    out_path: &Path,
    style: &ChartStyle,
) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(out_path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = chart.x_range;
    let (y_lo, y_hi) = chart.y_range;
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, (FONT, TITLE_FONT_SIZE))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    ctx.configure_mesh()
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .axis_desc_style((FONT, AXIS_DESC_FONT_SIZE))
        .label_style((FONT, TICK_FONT_SIZE))
        .x_labels(chart.steps.clamp(2, 10))
        .x_label_formatter(&|v: &f64| step_tick(*v))
        .y_label_formatter(&|v: &f64| format_tick(*v))
        .draw()?;

    for curve in &chart.curves {
        let color = curve.color;
        let line_style = color.stroke_width(style.line_width);

        ctx.draw_series(
            curve
                .band_polygons(chart.y_range)
                .into_iter()
                .map(|outline| Polygon::new(outline, color.mix(style.band_alpha).filled())),
        )?;

        ctx.draw_series(
            curve
                .line_segments(chart.y_range)
                .into_iter()
                .map(|segment| PathElement::new(segment, line_style)),
        )?
        .label(curve.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    ctx.configure_series_labels()
        .label_font((FONT, LEGEND_FONT_SIZE))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
