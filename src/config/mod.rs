//! `stubsmith.toml` configuration.
//!
//! ```toml
//! [mock]
//! setter_prefix = "mock"
//! mock_suffix = "Mock"
//! not_mocked_message = "Not mocked"
//! runtime_path = "::stubsmith::runtime"
//! result_types = ["Fallible"]
//!
//! [ignore]
//! patterns = ["target/**"]
//! ```

mod core;
mod loader;

pub use self::core::{IgnoreConfig, MockConfig, StubsmithConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {CONFIG_FILE_NAME}: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` must be a plain identifier, got `{value}`")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("`mock.runtime_path` is not a valid Rust path: `{value}`")]
    InvalidRuntimePath { value: String },

    #[error("invalid ignore pattern `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
