use std::fs;
use std::path::{Path, PathBuf};

use super::core::StubsmithConfig;
use super::ConfigError;

pub const CONFIG_FILE_NAME: &str = "stubsmith.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<StubsmithConfig, ConfigError> {
    let config = toml::from_str::<StubsmithConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested config file. Every failure is an error.
pub fn load_config_from(path: &Path) -> Result<StubsmithConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from a discovered path; missing files are skipped quietly
fn try_load_config_from_path(config_path: &Path) -> Option<StubsmithConfig> {
    match load_config_from(config_path) {
        Ok(config) => Some(config),
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            None
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", config_path.display(), e);
            None
        }
    }
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `stubsmith.toml`.
pub fn discover_config(start: &Path) -> StubsmithConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            StubsmithConfig::default()
        })
}

pub fn load_config() -> StubsmithConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            StubsmithConfig::default()
        }
    }
}
