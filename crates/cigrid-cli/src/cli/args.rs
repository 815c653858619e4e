use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cigrid",
    version,
    about = "Render a CI test-matrix status dashboard from pre-fetched results"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the dashboard from a matrices config and a results snapshot
    Render(RenderArgs),
    /// Check that a matrices config parses and is internally consistent
    Validate(ValidateArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Matrices configuration file (YAML)
    #[arg(long, short = 'c', env = "CIGRID_CONFIG_FILE")]
    pub config: PathBuf,

    /// Pre-fetched results snapshot (JSON), keyed by job name
    #[arg(long, short = 'r', env = "CIGRID_RESULTS_FILE")]
    pub results: PathBuf,

    /// Output file for the generated dashboard
    #[arg(
        long,
        short = 'o',
        env = "CIGRID_OUTPUT_FILE",
        default_value = "output/daily-matrix.html"
    )]
    pub output: PathBuf,

    /// Also write the assembled dashboard as JSON
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Override the configured history depth (negative = unbounded)
    #[arg(long, env = "CIGRID_TEST_HISTORY", allow_hyphen_values = true)]
    pub test_history: Option<i32>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Matrices configuration file (YAML)
    #[arg(long, short = 'c', env = "CIGRID_CONFIG_FILE")]
    pub config: PathBuf,
}
