use super::{process_sources, resolve_config, SourceOutcome};
use crate::declaration::TraitSelection;
use crate::io;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Mocks name their traits and signature types unqualified, so the output
/// has to live where those names resolve.
pub const HEADER: &str = "\
// @generated by stubsmith. Do not edit.
// Mocks refer to their traits and signature types by the names used in the
// trait declarations. `include!` this file, or paste it, into the module
// that declares the traits (or one that imports the same names).
";

pub struct GenerateConfig {
    pub paths: Vec<PathBuf>,
    pub selection: TraitSelection,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: bool,
}

pub fn generate_mocks(config: GenerateConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let outcomes = process_sources(&config.paths, &config.selection, &settings)?;

    let source = render_outcomes(&outcomes)?;
    let source = if config.format {
        io::rustfmt::format_or_passthrough(source)
    } else {
        source
    };

    match config.output {
        Some(path) => {
            io::write_file(&path, &source)?;
            tracing::info!(path = %path.display(), "mocks written");
        }
        None => print!("{source}"),
    }
    Ok(())
}

/// Source text for every synthesized mock, grouped by input file.
///
/// Fails without output when any file or trait failed.
pub fn render_outcomes(outcomes: &[SourceOutcome]) -> Result<String> {
    let failures = describe_failures(outcomes);
    if !failures.is_empty() {
        anyhow::bail!("cannot generate mocks:\n{}", failures.join("\n"));
    }

    let mut source = String::from(HEADER);
    let mut total = 0;
    for outcome in outcomes {
        let mocks: Vec<_> = outcome
            .traits
            .iter()
            .filter_map(|t| t.result.as_ref().ok())
            .collect();
        if mocks.is_empty() {
            continue;
        }
        total += mocks.len();
        writeln!(source, "\n// Mocks for {}", outcome.path.display())?;
        for mock in mocks {
            writeln!(source, "{}", mock.source)?;
        }
    }

    if total == 0 {
        tracing::warn!("no traits selected; nothing generated");
    }
    Ok(source)
}

fn describe_failures(outcomes: &[SourceOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .flat_map(|outcome| {
            let path = outcome.path.display();
            let parse = outcome
                .parse_error
                .iter()
                .map(move |e| format!("  {path}:{e}"));
            let traits = outcome.traits.iter().filter_map(move |t| {
                t.result
                    .as_ref()
                    .err()
                    .map(|e| format!("  {}: {}", outcome.path.display(), e))
            });
            parse.chain(traits)
        })
        .collect()
}
