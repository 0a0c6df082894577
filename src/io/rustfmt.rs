//! Optional formatting of generated source through `rustfmt`.

use anyhow::{Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Formats `source` with the first `rustfmt` on `PATH`.
///
/// Returns `Ok(None)` when no `rustfmt` is installed.
pub fn format_source(source: &str) -> Result<Option<String>> {
    let Ok(rustfmt) = which::which("rustfmt") else {
        tracing::debug!("rustfmt not found on PATH, leaving output unformatted");
        return Ok(None);
    };

    let mut child = Command::new(&rustfmt)
        .args(["--edition", "2021", "--emit", "stdout"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start {}", rustfmt.display()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes())?;
    }
    let output = child.wait_with_output()?;

    if !output.status.success() {
        anyhow::bail!(
            "rustfmt failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(Some(String::from_utf8(output.stdout)?))
}

/// Formatted source, or the input unchanged when formatting is unavailable
/// or fails.
pub fn format_or_passthrough(source: String) -> String {
    match format_source(&source) {
        Ok(Some(formatted)) => formatted,
        Ok(None) => source,
        Err(e) => {
            tracing::warn!(error = %e, "formatting failed, emitting unformatted source");
            source
        }
    }
}
