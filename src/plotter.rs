//! Multi-run comparison charts: one PNG per metric, every run drawn as its
//! mean curve with a ±1 standard deviation band.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::policy::PolicyTable;
use crate::data::{ExperimentRun, MetricSpec};
use crate::error::{PlotError, Result};
use crate::plot::chart::MetricChart;
use crate::plot::render::{ChartStyle, render_chart};

pub struct ComparisonPlotter {
    output_dir: PathBuf,
    runs: Vec<ExperimentRun>,
    metrics: Vec<MetricSpec>,
    policies: PolicyTable,
    style: ChartStyle,
}

impl ComparisonPlotter {
    /// Creates `output_dir` if needed and loads every run, in order.
    ///
    /// The first unreadable run aborts construction.
    pub fn new<S: AsRef<str>>(
        output_dir: impl AsRef<Path>,
        input_root: impl AsRef<Path>,
        data_paths: &[S],
        labels: &[S],
        metric_names: &[S],
        units: &[S],
    ) -> Result<Self> {
        if data_paths.len() != labels.len() {
            return Err(PlotError::Config(format!(
                "{} data paths but {} labels",
                data_paths.len(),
                labels.len()
            )));
        }
        let metrics = MetricSpec::from_names(metric_names, units)?;

        let output_dir = output_dir.as_ref().to_path_buf();
        create_dir_all(&output_dir)?;

        let input_root = input_root.as_ref();
        let runs = data_paths
            .iter()
            .zip(labels)
            .map(|(path, label)| ExperimentRun::load(input_root, path.as_ref(), label.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            output_dir,
            runs,
            metrics,
            policies: PolicyTable::default(),
            style: ChartStyle::default(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let paths: Vec<&str> = config.runs.iter().map(|r| r.path.as_str()).collect();
        let labels: Vec<&str> = config.runs.iter().map(|r| r.label.as_str()).collect();
        let names: Vec<&str> = config.metrics.iter().map(|m| m.name.as_str()).collect();
        let units: Vec<&str> = config.metrics.iter().map(|m| m.unit.as_str()).collect();
        let policies = config.policy_table()?;
        Ok(Self::new(
            &config.output_directory,
            &config.input_root,
            &paths,
            &labels,
            &names,
            &units,
        )?
        .with_policies(policies)
        .with_style(config.chart.clone()))
    }

    pub fn with_policies(mut self, policies: PolicyTable) -> Self {
        self.policies = policies;
        self
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn runs(&self) -> &[ExperimentRun] {
        &self.runs
    }

    pub fn metrics(&self) -> &[MetricSpec] {
        &self.metrics
    }

    pub fn chart_for(&self, metric: &MetricSpec) -> Result<MetricChart> {
        MetricChart::build(metric, self.policies.get(metric.index), &self.runs)
    }

    /// Builds every chart model without drawing anything.
    pub fn charts(&self) -> Result<Vec<MetricChart>> {
        self.metrics.iter().map(|m| self.chart_for(m)).collect()
    }

    /// Renders one chart per metric, in metric order, and returns the written
    /// paths. A failure stops the loop; charts already written stay on disk.
    pub fn plot_comparison(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.metrics.len());
        for metric in &self.metrics {
            let chart = self.chart_for(metric)?;
            debug!(
                metric = %metric.name,
                exponent = chart.scale.exponent,
                y_lo = chart.y_range.0,
                y_hi = chart.y_range.1,
                "chart resolved"
            );
            let out_path = self.output_dir.join(&chart.file_name);
            render_chart(&chart, &out_path, &self.style)?;
            info!(path = %out_path.display(), "saved comparison chart");
            written.push(out_path);
        }
        Ok(written)
    }
}
