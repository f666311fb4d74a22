use anyhow::Result;
use dsat_whatif::cli::{self, Commands};
use dsat_whatif::commands::{self, AnalyzeConfig, TuneConfig};
use dsat_whatif::observability::init_logging;

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Analyze {
            scoring,
            responses,
            history,
            top,
            format,
            output,
            config,
            parallel,
            verbosity,
        } => {
            init_logging(verbosity);
            commands::handle_analyze(AnalyzeConfig {
                scoring,
                responses,
                history,
                top,
                format,
                output,
                config,
                parallel,
            })
        }
        Commands::Tune {
            history,
            format,
            config,
            verbosity,
        } => {
            init_logging(verbosity);
            commands::handle_tune(TuneConfig {
                history,
                format,
                config,
            })
        }
        Commands::Init { force } => commands::init_config(force),
    }
}
