use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckFormat {
    /// One line per trait
    Text,
    /// Machine-readable report
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "stubsmith")]
#[command(about = "Generate stub implementations of Rust traits", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print mocks for the traits found in the given sources
    Generate {
        /// Files or directories to read
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Mock every top-level trait, not only those marked `#[mock]`
        #[arg(long, conflicts_with = "traits")]
        all: bool,

        /// Mock only the named traits (repeatable)
        #[arg(long = "trait", value_name = "NAME")]
        traits: Vec<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest stubsmith.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip rustfmt even when it is installed
        #[arg(long = "no-format")]
        no_format: bool,
    },

    /// Report which traits can be mocked, failing if any cannot
    Check {
        /// Files or directories to read
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Check every top-level trait, not only those marked `#[mock]`
        #[arg(long, conflicts_with = "traits")]
        all: bool,

        /// Check only the named traits (repeatable)
        #[arg(long = "trait", value_name = "NAME")]
        traits: Vec<String>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "text")]
        format: CheckFormat,

        /// Configuration file (defaults to the nearest stubsmith.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a default stubsmith.toml into the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
