//! Build configuration (`basin.toml`).
//!
//! A single [`BuildConfig`] is constructed at process start and passed by
//! reference to every component; nothing reads configuration ambiently.
//! Defaults mirror the basin repository layout, so a plain checkout builds
//! with no config file at all. A `basin.toml` in the project root overrides
//! individual fields.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "basin.toml";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BuildConfig {
    /// Project source tree, walked recursively for compilable files.
    pub src_dir: PathBuf,
    /// Public headers, added to the include search path.
    pub include_dir: PathBuf,
    /// Precompiled header, force-included into every translation unit.
    pub pch: PathBuf,
    /// Where the executable lands.
    pub out_dir: PathBuf,
    /// Intermediate object files (and the generated metadata source).
    pub obj_dir: PathBuf,
    /// Static/shared library output.
    pub lib_dir: PathBuf,
    /// Base name of the executable and libraries.
    pub exe_name: String,
    pub debug: bool,
    pub optimize: bool,
    /// Compile in the Tracy profiler client and link with the C++ driver.
    pub tracy: bool,
    pub tracy_include: PathBuf,
    pub tracy_client: PathBuf,
    /// Also produce a shared library (compiles everything with -fPIC).
    pub shared_lib: bool,
    /// Compiler overrides; PATH detection applies when unset.
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub archiver: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("src/basin"),
            include_dir: PathBuf::from("include"),
            pch: PathBuf::from("src/basin/pch.h"),
            out_dir: PathBuf::from("bin"),
            obj_dir: PathBuf::from("bin/int"),
            lib_dir: PathBuf::from("lib"),
            exe_name: "basin".to_string(),
            debug: true,
            optimize: false,
            tracy: false,
            tracy_include: PathBuf::from("libs/tracy/public"),
            tracy_client: PathBuf::from("libs/tracy/public/TracyClient.cpp"),
            shared_lib: false,
            cc: None,
            cxx: None,
            archiver: None,
        }
    }
}

impl BuildConfig {
    pub fn exe_path(&self) -> PathBuf {
        let name = if cfg!(target_os = "windows") {
            format!("{}.exe", self.exe_name)
        } else {
            self.exe_name.clone()
        };
        self.out_dir.join(name)
    }

    pub fn static_lib_path(&self) -> PathBuf {
        self.lib_dir.join(format!("lib{}.a", self.exe_name))
    }

    pub fn shared_lib_path(&self) -> PathBuf {
        let ext = if cfg!(target_os = "windows") { "dll" } else { "so" };
        self.lib_dir.join(format!("lib{}.{}", self.exe_name, ext))
    }
}

/// Load `basin.toml` from the current directory, or defaults when absent.
pub fn load_config() -> Result<BuildConfig> {
    if !Path::new(CONFIG_FILE).exists() {
        return Ok(BuildConfig::default());
    }
    let config_str = fs::read_to_string(CONFIG_FILE)
        .with_context(|| format!("Failed to read {CONFIG_FILE} - check file permissions"))?;
    let config: BuildConfig = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse {CONFIG_FILE}"))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_project_layout() {
        let config = BuildConfig::default();
        assert_eq!(config.src_dir, PathBuf::from("src/basin"));
        assert_eq!(config.obj_dir, PathBuf::from("bin/int"));
        assert_eq!(config.static_lib_path(), PathBuf::from("lib/libbasin.a"));
        assert!(config.debug);
        assert!(!config.optimize);
        assert!(!config.tracy);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: BuildConfig = toml::from_str(
            r#"
            obj_dir = "build/int"
            optimize = true
            cc = "clang"
            "#,
        )
        .unwrap();
        assert_eq!(config.obj_dir, PathBuf::from("build/int"));
        assert!(config.optimize);
        assert_eq!(config.cc.as_deref(), Some("clang"));
        // untouched fields keep their defaults
        assert_eq!(config.src_dir, PathBuf::from("src/basin"));
        assert_eq!(config.exe_name, "basin");
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn exe_path_has_no_suffix_on_unix() {
        let config = BuildConfig::default();
        assert_eq!(config.exe_path(), PathBuf::from("bin/basin"));
    }
}
