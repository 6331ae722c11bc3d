use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML (written with defaults if missing)
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Directory for the comparison PNGs (overrides config)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Base directory the run .npy paths are relative to (overrides config)
    #[arg(long)]
    pub input_root: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_config_toml() {
        let args = Args::parse_from(["perfplot"]);
        assert_eq!(args.config, "config.toml");
        assert!(args.output_dir.is_none());
        assert!(args.input_root.is_none());
    }

    #[test]
    fn parses_overrides() {
        let args = Args::parse_from([
            "perfplot",
            "--config",
            "runs.toml",
            "--output-dir",
            "figs",
            "--input-root",
            "logs",
        ]);
        assert_eq!(args.config, "runs.toml");
        assert_eq!(args.output_dir.as_deref(), Some("figs"));
        assert_eq!(args.input_root.as_deref(), Some("logs"));
    }
}
