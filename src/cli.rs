use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "DSAT_WHATIF_CONFIG";

#[derive(Parser, Debug)]
#[command(name = "dsat-whatif")]
#[command(about = "What-if score analysis for adaptive DSAT exams", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank a student's incorrect answers by how much fixing them is worth
    Analyze {
        /// Scoring table JSON (per-subject raw to scaled rows)
        #[arg(long)]
        scoring: PathBuf,

        /// Student responses JSON
        #[arg(long)]
        responses: PathBuf,

        /// Historical routing data for threshold fitting (defaults to the built-in sample)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Questions to keep per subject (defaults to the config value, 5)
        #[arg(long)]
        top: Option<usize>,

        /// Output format (defaults to the config value, terminal)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .dsat-whatif.toml)
        #[arg(short, long, env = CONFIG_ENV)]
        config: Option<PathBuf>,

        /// Evaluate counterfactuals in parallel
        #[arg(long)]
        parallel: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Fit adaptive thresholds from historical data and show diagnostics
    Tune {
        /// Historical routing data (defaults to the built-in sample)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Configuration file
        #[arg(short, long, env = CONFIG_ENV)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .dsat-whatif.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
