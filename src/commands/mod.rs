//! CLI command implementations.
//!
//! Available commands:
//! - **generate**: Print mocks for traits found in Rust sources
//! - **check**: Report which traits can be mocked
//! - **init**: Write a default `stubsmith.toml`
//!
//! `generate` and `check` share [`process_sources`], which walks the inputs,
//! parses every file and synthesizes the selected traits in parallel.

pub mod check;
pub mod generate;
pub mod init;

pub use check::{check_sources, CheckConfig};
pub use generate::{generate_mocks, GenerateConfig};
pub use init::init_config;

use crate::config::{self, StubsmithConfig};
use crate::declaration::{collect_traits, TraitSelection};
use crate::emit;
use crate::errors::StubsmithError;
use crate::synthesis::{GeneratedMockType, SynthesisOptions};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Synthesis result for one trait.
///
/// Holds only owned text so outcomes can cross rayon worker threads;
/// syn values stay inside the worker that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitOutcome {
    pub name: String,
    pub result: std::result::Result<MockSummary, StubsmithError>,
}

impl TraitOutcome {
    pub fn new(
        name: impl Into<String>,
        result: std::result::Result<GeneratedMockType, StubsmithError>,
    ) -> Self {
        Self {
            name: name.into(),
            result: result.map(|mock| MockSummary::from(&mock)),
        }
    }
}

/// A synthesized mock reduced to what the commands report and print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSummary {
    pub name: String,
    /// Unformatted source of the mock type and its impls.
    pub source: String,
    pub methods: Vec<MethodSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSummary {
    pub name: String,
    pub style: &'static str,
    pub setter: String,
}

impl From<&GeneratedMockType> for MockSummary {
    fn from(mock: &GeneratedMockType) -> Self {
        Self {
            name: mock.name.to_string(),
            source: emit::render(mock),
            methods: mock
                .methods
                .iter()
                .map(|m| MethodSummary {
                    name: m.signature.name.to_string(),
                    style: if m.style.is_completion_handler() {
                        "completion_handler"
                    } else {
                        "direct"
                    },
                    setter: m.setter.sig.ident.to_string(),
                })
                .collect(),
        }
    }
}

/// Everything learned from one source file.
#[derive(Debug)]
pub struct SourceOutcome {
    pub path: PathBuf,
    /// Set when the file could not be read or parsed; `traits` is then empty.
    pub parse_error: Option<String>,
    pub traits: Vec<TraitOutcome>,
}

impl SourceOutcome {
    pub fn failures(&self) -> usize {
        usize::from(self.parse_error.is_some())
            + self.traits.iter().filter(|t| t.result.is_err()).count()
    }
}

/// `--all` / `--trait` flags mapped to a selection.
pub fn selection_from_flags(all: bool, traits: Vec<String>) -> TraitSelection {
    if all {
        TraitSelection::All
    } else if traits.is_empty() {
        TraitSelection::Marked
    } else {
        TraitSelection::Named(traits)
    }
}

/// The explicitly requested config file, or the nearest discovered one.
pub fn resolve_config(explicit: Option<&Path>) -> Result<StubsmithConfig> {
    match explicit {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Invalid configuration in {}", path.display())),
        None => Ok(config::load_config()),
    }
}

pub fn process_sources(
    paths: &[PathBuf],
    selection: &TraitSelection,
    config: &StubsmithConfig,
) -> Result<Vec<SourceOutcome>> {
    // syn values are neither Send nor Sync, so each worker builds its own
    // options and hands back only owned text
    config.to_options()?;
    let files = crate::io::find_rust_files(paths, &config.ignore_patterns())?;
    tracing::debug!(files = files.len(), "processing sources");

    Ok(files
        .par_iter()
        .map_init(
            || config.to_options(),
            |options, path| match options {
                Ok(options) => process_file(path, selection, options),
                Err(e) => SourceOutcome {
                    path: path.clone(),
                    parse_error: Some(e.to_string()),
                    traits: vec![],
                },
            },
        )
        .collect())
}

fn process_file(path: &Path, selection: &TraitSelection, options: &SynthesisOptions) -> SourceOutcome {
    let _span = tracing::debug_span!("process_file", path = %path.display()).entered();

    let parsed = crate::io::read_file(path).and_then(|source| {
        syn::parse_file(&source).map_err(|e| {
            let start = e.span().start();
            anyhow::anyhow!("{}:{}: {}", start.line, start.column + 1, e)
        })
    });
    let file = match parsed {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(error = %e, "skipping unparsable file");
            return SourceOutcome {
                path: path.to_path_buf(),
                parse_error: Some(format!("{e:#}")),
                traits: vec![],
            };
        }
    };

    let traits = collect_traits(&file, selection)
        .into_iter()
        .map(|item| TraitOutcome::new(item.ident.to_string(), crate::synthesize_trait(item, options)))
        .collect();

    SourceOutcome {
        path: path.to_path_buf(),
        parse_error: None,
        traits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::capitalize_first;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_selection_from_flags() {
        assert_eq!(selection_from_flags(false, vec![]), TraitSelection::Marked);
        assert_eq!(selection_from_flags(true, vec![]), TraitSelection::All);
        assert_eq!(
            selection_from_flags(false, vec!["Users".into()]),
            TraitSelection::Named(vec!["Users".into()])
        );
    }

    #[test]
    fn test_process_sources_reports_per_trait_results() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("api.rs"),
            indoc! {"
                #[mock]
                pub trait Users {
                    fn fetch(&self, id: i64) -> Result<String, Error>;
                }

                #[mock]
                pub trait Clock {
                    fn now(&self) -> u64;
                }
            "},
        )
        .unwrap();
        fs::write(temp.path().join("broken.rs"), "pub trait {").unwrap();

        let outcomes = process_sources(
            &[temp.path().to_path_buf()],
            &TraitSelection::Marked,
            &StubsmithConfig::default(),
        )
        .unwrap();

        assert_eq!(outcomes.len(), 2);
        let api = &outcomes[0];
        assert!(api.path.ends_with("api.rs"));
        assert_eq!(api.traits.len(), 2);
        assert!(api.traits[0].result.is_ok());
        assert_eq!(
            api.traits[1].result.as_ref().unwrap_err().kind(),
            "unrepresentable_failure"
        );
        assert_eq!(api.failures(), 1);

        let broken = &outcomes[1];
        assert!(broken.parse_error.as_deref().unwrap().starts_with("1:"));
        assert_eq!(broken.failures(), 1);
    }

    #[test]
    fn test_process_sources_keeps_file_order_across_workers() {
        let temp = TempDir::new().unwrap();
        let names = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
        for name in names {
            let trait_name = capitalize_first(name);
            fs::write(
                temp.path().join(format!("{name}.rs")),
                format!(
                    "#[mock]\npub trait {trait_name} {{\n    fn get(&self) -> Result<u8, Error>;\n    fn put(&self, done: Box<dyn FnOnce(Result<(), Error>) + Send>);\n}}\n"
                ),
            )
            .unwrap();
        }

        let outcomes = process_sources(
            &[temp.path().to_path_buf()],
            &TraitSelection::Marked,
            &StubsmithConfig::default(),
        )
        .unwrap();

        assert_eq!(outcomes.len(), names.len());
        for (outcome, name) in outcomes.iter().zip(names) {
            assert!(outcome.path.ends_with(format!("{name}.rs")));
            let mock = outcome.traits[0].result.as_ref().unwrap();
            assert_eq!(mock.name, format!("{}Mock", capitalize_first(name)));
            assert!(mock.source.contains(&format!("struct {}", mock.name)));
            let styles: Vec<&str> = mock.methods.iter().map(|m| m.style).collect();
            assert_eq!(styles, ["direct", "completion_handler"]);
            assert_eq!(mock.methods[1].setter, "mock_put");
        }
    }

    #[test]
    fn test_outcomes_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SourceOutcome>();
    }
}
