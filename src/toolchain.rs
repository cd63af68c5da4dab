//! Toolchain resolution.
//!
//! The orchestrator shells out to a C compiler, a C++ compiler, and an
//! archiver, all resolved via PATH. Resolution order: `basin.toml` override,
//! then `CC`/`CXX`/`AR` environment variables, then PATH probing. A missing
//! compiler is reported before any compilation is dispatched.

use crate::config::BuildConfig;
use crate::error::BuildError;
use anyhow::Result;
use std::process::Command;

#[derive(Debug, Clone)]
pub struct Toolchain {
    /// C front end, used for every plain `.c` translation unit.
    pub cc: String,
    /// C++ front end, used for `.cpp`/`.cc`/`.cxx` units and C++-aware linking.
    pub cxx: String,
    pub archiver: String,
}

/// Pre-flight toolchain check. `needs_cxx` is true when the source set
/// contains C++ units or the Tracy client is compiled in; otherwise a missing
/// C++ compiler is not an error.
pub fn detect(config: &BuildConfig, needs_cxx: bool) -> Result<Toolchain> {
    let cc = resolve_tool(config.cc.as_deref(), "CC", &["gcc", "clang"])?;
    let cxx = if needs_cxx {
        resolve_tool(config.cxx.as_deref(), "CXX", &["g++", "clang++"])?
    } else {
        resolve_tool(config.cxx.as_deref(), "CXX", &["g++", "clang++"])
            .unwrap_or_else(|_| "g++".to_string())
    };
    let archiver = resolve_tool(config.archiver.as_deref(), "AR", &["ar"])?;
    Ok(Toolchain { cc, cxx, archiver })
}

fn resolve_tool(configured: Option<&str>, env_var: &str, candidates: &[&str]) -> Result<String> {
    // An explicit override is trusted as-is; the subprocess spawn will
    // surface a typo soon enough.
    if let Some(tool) = configured {
        return Ok(tool.to_string());
    }
    if let Ok(tool) = std::env::var(env_var) {
        if !tool.is_empty() {
            return Ok(tool);
        }
    }
    for candidate in candidates {
        if is_command_available(candidate) {
            return Ok(candidate.to_string());
        }
    }
    Err(BuildError::ToolchainMissing(candidates[0].to_string()).into())
}

fn is_command_available(cmd: &str) -> bool {
    Command::new(cmd).arg("--version").output().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_tool_wins_over_detection() {
        let tool = resolve_tool(Some("my-weird-cc"), "BASIN_BUILD_NO_SUCH_VAR", &["gcc"]).unwrap();
        assert_eq!(tool, "my-weird-cc");
    }

    #[test]
    fn missing_tool_is_a_toolchain_error() {
        let err = resolve_tool(
            None,
            "BASIN_BUILD_NO_SUCH_VAR",
            &["definitely-not-a-compiler-9f3a"],
        )
        .unwrap_err();
        let err = err.downcast::<BuildError>().unwrap();
        assert!(matches!(err, BuildError::ToolchainMissing(_)));
    }

    #[test]
    fn env_var_wins_over_path_probe() {
        std::env::set_var("BASIN_BUILD_TEST_CC", "cc-from-env");
        let tool = resolve_tool(None, "BASIN_BUILD_TEST_CC", &["gcc"]).unwrap();
        assert_eq!(tool, "cc-from-env");
        std::env::remove_var("BASIN_BUILD_TEST_CC");
    }
}
