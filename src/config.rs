use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::policy::{PolicyEntry, PolicyTable};
use crate::error::{PlotError, Result};
use crate::plot::render::ChartStyle;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub path: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricConfig {
    pub name: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "AppConfig::default_output_directory")]
    pub output_directory: String,
    #[serde(default = "AppConfig::default_input_root")]
    pub input_root: String,
    #[serde(default)]
    pub chart: ChartStyle,
    #[serde(default = "AppConfig::default_runs")]
    pub runs: Vec<RunConfig>,
    #[serde(default = "AppConfig::default_metrics")]
    pub metrics: Vec<MetricConfig>,
    #[serde(default = "AppConfig::default_policies")]
    pub policies: Vec<PolicyEntry>,
}

impl AppConfig {
    fn default_output_directory() -> String {
        "./data/perf_log/".to_string()
    }
    fn default_input_root() -> String {
        "./data/perf_log/perf_data/".to_string()
    }
    fn default_runs() -> Vec<RunConfig> {
        [
            ("Base.npy", "Proposed Algorithm"),
            ("GAT_FREE.npy", "GAT-Free"),
            ("GRU_FREE.npy", "GRU-Free"),
        ]
        .into_iter()
        .map(|(path, label)| RunConfig {
            path: path.to_string(),
            label: label.to_string(),
        })
        .collect()
    }
    fn default_metrics() -> Vec<MetricConfig> {
        [
            ("Min Fluent", "Bit/s·Hz"),
            ("Sum Fluent", "Bit/s·Hz"),
            ("JFI", ""),
            ("Energy", "kW"),
        ]
        .into_iter()
        .map(|(name, unit)| MetricConfig {
            name: name.to_string(),
            unit: unit.to_string(),
        })
        .collect()
    }
    fn default_policies() -> Vec<PolicyEntry> {
        PolicyTable::default().to_entries()
    }

    pub fn policy_table(&self) -> Result<PolicyTable> {
        PolicyTable::from_entries(&self.policies).map_err(PlotError::Config)
    }

    /// Applies command-line directory overrides on top of the file values.
    pub fn with_overrides(mut self, output_dir: Option<String>, input_root: Option<String>) -> Self {
        if let Some(dir) = output_dir {
            self.output_directory = dir;
        }
        if let Some(root) = input_root {
            self.input_root = root;
        }
        self
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults as a commented template.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, comment_out(&text)) {
                    warn!("Failed to write default config to {path}: {err}");
                } else {
                    info!("Wrote default config template to {path}");
                }
            }
            Err(err) => {
                warn!("Failed to serialize default config: {err}; continuing with defaults");
            }
        }
        default_cfg
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_directory: Self::default_output_directory(),
            input_root: Self::default_input_root(),
            chart: ChartStyle::default(),
            runs: Self::default_runs(),
            metrics: Self::default_metrics(),
            policies: Self::default_policies(),
        }
    }
}

/// Comments out every key/value line, keeping table headers live so the
/// template still parses to the defaults.
fn comment_out(text: &str) -> String {
    let mut commented = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            commented.push('\n');
        } else if trimmed.starts_with("[[") {
            // An uncommented array-of-tables header would create an empty entry.
            commented.push_str("# ");
            commented.push_str(line);
            commented.push('\n');
        } else if trimmed.starts_with('[') && trimmed.ends_with(']') && !trimmed.contains('=') {
            commented.push_str(line);
            commented.push('\n');
        } else {
            commented.push_str("# ");
            commented.push_str(line);
            commented.push('\n');
        }
    }
    commented
}
