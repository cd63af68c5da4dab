//! Fatal build error kinds.
//!
//! Every variant maps to a non-zero process exit. Subprocess diagnostics are
//! printed verbatim where they occur; these carry only what the caller needs
//! to report the failure.

use std::fmt;

#[derive(Debug)]
pub enum BuildError {
    /// No usable compiler/archiver found on PATH (pre-flight check).
    ToolchainMissing(String),
    /// `git rev-parse` could not run or exited non-zero; carries its output.
    VcsQueryFailed(String),
    /// At least one compile task exited non-zero.
    CompileFailed,
    LinkFailed,
    ArchiveFailed,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::ToolchainMissing(tool) => {
                write!(f, "'{tool}' not found on PATH. Install gcc or clang.")
            }
            BuildError::VcsQueryFailed(output) => {
                write!(f, "git revision query failed:\n{output}")
            }
            BuildError::CompileFailed => write!(f, "compilation failed"),
            BuildError::LinkFailed => write!(f, "linking failed"),
            BuildError::ArchiveFailed => write!(f, "archiving failed"),
        }
    }
}

impl std::error::Error for BuildError {}
