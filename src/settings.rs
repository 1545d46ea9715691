use std::path::PathBuf;

use clap::Parser;

/// Default data file, as published on the open data portal.
pub const DEFAULT_DATA_FILE: &str = "All India National Family Health Survey.csv";

/// National Family Health Survey dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "nfhs-dashboard", version)]
pub struct Settings {
    /// Survey table to load (.csv or .tsv)
    #[arg(value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Region selected on startup
    #[arg(long, default_value = "India")]
    pub region: String,

    /// Area type selected on startup
    #[arg(long, default_value = "Total")]
    pub area: String,

    /// Indicator shown on startup (defaults to the first indicator column)
    #[arg(long)]
    pub indicator: Option<String>,

    /// Logging level; overrides RUST_LOG
    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: Option<String>,

    /// Print the dashboard values for the startup selection and exit
    #[arg(long)]
    pub summary: bool,
}

impl Settings {
    /// Initialise `env_logger` from `RUST_LOG`, or `--log-level` if given.
    pub fn init_logging(&self) {
        let mut builder = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        );
        if let Some(level) = &self.log_level {
            builder.parse_filters(level);
        }
        builder.init();
    }
}
