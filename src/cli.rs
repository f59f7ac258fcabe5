use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Explore World Development Indicators by country")]
pub struct Cli {
    /// Indicator table to load (.csv or .parquet); overrides the config file.
    #[arg(short, long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// JSON settings file.
    #[arg(short, long, value_name = "PATH", default_value = "wdi-explorer.json")]
    pub config: PathBuf,
}
