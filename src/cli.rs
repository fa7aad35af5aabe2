use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

const DEFAULT_RECORDS_PATH: &str = "data/processed/ethiopia_fi_enriched_data.csv";
const DEFAULT_REFERENCE_CODES_PATH: &str = "data/raw/reference_codes.csv";

#[derive(Parser, Debug)]
#[command(
    name = "ethiofi",
    version,
    about = "Ethiopia financial inclusion dataset validation and dashboard tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Validate(ValidateArgs),
    Charts(ChartsArgs),
    Profile(ProfileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, default_value = DEFAULT_RECORDS_PATH)]
    pub records_path: PathBuf,

    #[arg(long, default_value = DEFAULT_REFERENCE_CODES_PATH)]
    pub reference_codes_path: PathBuf,

    #[arg(long)]
    pub config_path: Option<PathBuf>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ChartsArgs {
    #[arg(long, default_value = DEFAULT_RECORDS_PATH)]
    pub records_path: PathBuf,

    /// Repeatable; all charts when omitted.
    #[arg(long = "chart-id")]
    pub chart_ids: Vec<String>,

    #[arg(long)]
    pub output_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, default_value = DEFAULT_RECORDS_PATH)]
    pub records_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
