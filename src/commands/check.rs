use super::{process_sources, resolve_config, MethodSummary, SourceOutcome, TraitOutcome};
use crate::cli::CheckFormat;
use crate::declaration::TraitSelection;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

pub struct CheckConfig {
    pub paths: Vec<PathBuf>,
    pub selection: TraitSelection,
    pub format: CheckFormat,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
    pub summary: CheckSummary,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub files: usize,
    pub traits: usize,
    pub mockable: usize,
    pub failed: usize,
    pub unparsable_files: usize,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    pub traits: Vec<TraitReport>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TraitReport {
    Ok {
        name: String,
        mock: String,
        methods: Vec<MethodSummary>,
    },
    Error {
        name: String,
        kind: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        method: Option<String>,
        message: String,
    },
}

pub fn check_sources(config: CheckConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let outcomes = process_sources(&config.paths, &config.selection, &settings)?;
    let report = build_report(&outcomes);

    match config.format {
        CheckFormat::Text => print!("{}", render_text(&report)),
        CheckFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    let failed = report.summary.failed + report.summary.unparsable_files;
    if failed > 0 {
        anyhow::bail!("{} problem(s) found", failed);
    }
    Ok(())
}

pub fn build_report(outcomes: &[SourceOutcome]) -> CheckReport {
    let mut summary = CheckSummary {
        files: outcomes.len(),
        ..Default::default()
    };

    let files = outcomes
        .iter()
        .map(|outcome| {
            if outcome.parse_error.is_some() {
                summary.unparsable_files += 1;
            }
            let traits: Vec<TraitReport> = outcome.traits.iter().map(trait_report).collect();
            for t in &traits {
                summary.traits += 1;
                match t {
                    TraitReport::Ok { .. } => summary.mockable += 1,
                    TraitReport::Error { .. } => summary.failed += 1,
                }
            }
            FileReport {
                path: outcome.path.display().to_string(),
                parse_error: outcome.parse_error.clone(),
                traits,
            }
        })
        .collect();

    CheckReport { files, summary }
}

fn trait_report(outcome: &TraitOutcome) -> TraitReport {
    match &outcome.result {
        Ok(mock) => TraitReport::Ok {
            name: outcome.name.clone(),
            mock: mock.name.clone(),
            methods: mock.methods.clone(),
        },
        Err(err) => TraitReport::Error {
            name: outcome.name.clone(),
            kind: err.kind(),
            method: err.method().map(str::to_string),
            message: err.to_string(),
        },
    }
}

pub fn render_text(report: &CheckReport) -> String {
    let mut out = String::new();
    for file in &report.files {
        if let Some(error) = &file.parse_error {
            let _ = writeln!(out, "error {}:{}", file.path, error);
        }
        for t in &file.traits {
            let _ = match t {
                TraitReport::Ok {
                    name, mock, methods, ..
                } => writeln!(
                    out,
                    "ok    {}: {} -> {} ({} methods)",
                    file.path,
                    name,
                    mock,
                    methods.len()
                ),
                TraitReport::Error { message, .. } => {
                    writeln!(out, "error {}: {}", file.path, message)
                }
            };
        }
    }
    let s = &report.summary;
    let _ = writeln!(
        out,
        "{} trait(s) in {} file(s): {} mockable, {} failed, {} unparsable file(s)",
        s.traits, s.files, s.mockable, s.failed, s.unparsable_files
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::SynthesisOptions;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    fn outcomes() -> Vec<SourceOutcome> {
        let users: syn::ItemTrait = parse_quote! {
            pub trait Users {
                fn fetch(&self, id: i64) -> Result<String, Error>;
                fn load(&self, completion: Box<dyn FnOnce(Result<String, Error>) + Send>);
            }
        };
        let clock: syn::ItemTrait = parse_quote! {
            pub trait Clock {
                fn now(&self) -> u64;
            }
        };
        let options = SynthesisOptions::default();
        vec![
            SourceOutcome {
                path: PathBuf::from("src/api.rs"),
                parse_error: None,
                traits: vec![
                    TraitOutcome::new("Users", crate::synthesize_trait(&users, &options)),
                    TraitOutcome::new("Clock", crate::synthesize_trait(&clock, &options)),
                ],
            },
            SourceOutcome {
                path: PathBuf::from("src/broken.rs"),
                parse_error: Some("1:11: expected identifier".into()),
                traits: vec![],
            },
        ]
    }

    #[test]
    fn test_summary_counts() {
        let report = build_report(&outcomes());
        assert_eq!(
            report.summary,
            CheckSummary {
                files: 2,
                traits: 2,
                mockable: 1,
                failed: 1,
                unparsable_files: 1,
            }
        );
    }

    #[test]
    fn test_text_report() {
        let text = render_text(&build_report(&outcomes()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ok    src/api.rs: Users -> UsersMock (2 methods)");
        assert!(lines[1].starts_with("error src/api.rs: cannot mock `Clock`"));
        assert_eq!(lines[2], "error src/broken.rs:1:11: expected identifier");
        assert_eq!(
            lines[3],
            "2 trait(s) in 2 file(s): 1 mockable, 1 failed, 1 unparsable file(s)"
        );
    }

    #[test]
    fn test_json_report_shape() {
        let json = serde_json::to_value(build_report(&outcomes())).unwrap();
        let users = &json["files"][0]["traits"][0];
        assert_eq!(users["status"], "ok");
        assert_eq!(users["methods"][1]["style"], "completion_handler");
        assert_eq!(users["methods"][1]["setter"], "mock_load");

        let clock = &json["files"][0]["traits"][1];
        assert_eq!(clock["status"], "error");
        assert_eq!(clock["kind"], "unrepresentable_failure");
        assert_eq!(clock["method"], "now");
        assert!(json["files"][0].get("parse_error").is_none());
    }
}
