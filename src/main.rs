// Entry point: loads the comparison config and renders one chart per metric.
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use perfplot::ComparisonPlotter;
use perfplot::cli::Args;
use perfplot::config::AppConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = AppConfig::load_or_default(&args.config)
        .with_overrides(args.output_dir.clone(), args.input_root.clone());

    let result = ComparisonPlotter::from_config(&config).and_then(|p| p.plot_comparison());
    match result {
        Ok(written) => info!("Saved {} comparison charts to {}", written.len(), config.output_directory),
        Err(err) => {
            error!("comparison plot failed: {err}");
            std::process::exit(1);
        }
    }
}
