//! Version-control build metadata.
//!
//! Every build regenerates a small C file exposing the current git revision
//! and a build timestamp as string constants. The file lands in the
//! intermediate directory and compiles like any other source, so the
//! executable can report exactly which commit produced it.

use crate::config::BuildConfig;
use crate::error::BuildError;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

pub const METADATA_FILE: &str = "commit_hash.c";

/// Where the generated source lands; it compiles like any other file, so the
/// caller appends this to the source set.
pub fn source_path(config: &BuildConfig) -> PathBuf {
    config.obj_dir.join(METADATA_FILE)
}

/// Query git and (re)write the metadata source. Overwrites unconditionally;
/// the file is never treated as up to date.
pub fn generate(config: &BuildConfig) -> Result<()> {
    let revision = query_revision()?;
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let path = source_path(config);
    fs::create_dir_all(&config.obj_dir)
        .with_context(|| format!("Failed to create {}", config.obj_dir.display()))?;
    fs::write(&path, render(&revision, &stamp))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn query_revision() -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .map_err(|e| BuildError::VcsQueryFailed(e.to_string()))?;

    if !output.status.success() {
        let mut diag = String::from_utf8_lossy(&output.stdout).into_owned();
        diag.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(BuildError::VcsQueryFailed(diag).into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// The constants basin's runtime declares `extern` and prints in `--version`.
fn render(revision: &str, stamp: &str) -> String {
    format!(
        "// Generated by basin-build. Do not edit, do not commit.\n\
         const char* BASIN_COMPILER_COMMIT = \"{revision}\";\n\
         const char* BASIN_COMPILER_BUILD_DATE = \"{stamp}\";\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_file_defines_both_constants() {
        let content = render("ab12cd3", "2026-08-25 10:30:00");
        assert!(content.contains("const char* BASIN_COMPILER_COMMIT = \"ab12cd3\";"));
        assert!(content.contains("const char* BASIN_COMPILER_BUILD_DATE = \"2026-08-25 10:30:00\";"));
    }

    #[test]
    fn regeneration_differs_only_in_the_timestamp_line() {
        let first = render("ab12cd3", "2026-08-25 10:30:00");
        let second = render("ab12cd3", "2026-08-25 10:31:17");
        let differing: Vec<(&str, &str)> = first
            .lines()
            .zip(second.lines())
            .filter(|(a, b)| a != b)
            .collect();
        assert_eq!(differing.len(), 1);
        assert!(differing[0].0.contains("BUILD_DATE"));
    }
}
