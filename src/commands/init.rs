use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# stubsmith configuration

[mock]
# Setters are named `{setter_prefix}_{method}`
setter_prefix = "mock"
# Mock types are named `{Trait}{mock_suffix}` unless overridden per trait
mock_suffix = "Mock"
# not_mocked_message = "Not mocked"
runtime_path = "::stubsmith::runtime"
# Return types other than `Result` that carry an error
result_types = []

[ignore]
patterns = [
    "target/**",
]
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;
    use crate::synthesis::SynthesisOptions;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_default_options() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.to_options().unwrap(), SynthesisOptions::default());
    }

    #[test]
    fn test_default_ignore_patterns_skip_build_output() {
        let temp = TempDir::new().unwrap();
        for file in ["src/lib.rs", "target/debug/build/out.rs"] {
            let path = temp.path().join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "").unwrap();
        }

        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        let files =
            io::find_rust_files(&[temp.path().to_path_buf()], &config.ignore_patterns()).unwrap();
        assert_eq!(files, [temp.path().join("src/lib.rs")]);
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        init_config_in(temp.path(), false).unwrap();
        assert!(init_config_in(temp.path(), false).is_err());
        assert!(init_config_in(temp.path(), true).is_ok());
    }
}
