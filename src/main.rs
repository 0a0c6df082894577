use anyhow::Result;
use clap::Parser;
use stubsmith::cli::{Cli, Commands};
use stubsmith::commands::{self, selection_from_flags, CheckConfig, GenerateConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Generate {
            paths,
            all,
            traits,
            output,
            config,
            no_format,
        } => commands::generate_mocks(GenerateConfig {
            paths,
            selection: selection_from_flags(all, traits),
            output,
            config,
            format: !no_format,
        }),
        Commands::Check {
            paths,
            all,
            traits,
            format,
            config,
        } => commands::check_sources(CheckConfig {
            paths,
            selection: selection_from_flags(all, traits),
            format,
            config,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

// Logs go to stderr; stdout carries generated code and reports
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
