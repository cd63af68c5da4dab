//! Link and archive stage.
//!
//! Runs strictly after every compile task has succeeded. Produces the
//! executable, the static archive, and optionally a shared library, all from
//! the same object list. A failed invocation aborts the build; partial
//! artifacts from a failed link are left on disk rather than silently
//! cleaned up.

use crate::build::plan::CompileTask;
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::toolchain::Toolchain;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Link the executable and archive the static library. `has_cpp` selects the
/// C++ driver for linking; Tracy forces it regardless because the client
/// needs the C++ runtime even in an all-C build.
pub fn finalize(
    objects: &[PathBuf],
    toolchain: &Toolchain,
    config: &BuildConfig,
    has_cpp: bool,
) -> Result<()> {
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("Failed to create {}", config.out_dir.display()))?;
    fs::create_dir_all(&config.lib_dir)
        .with_context(|| format!("Failed to create {}", config.lib_dir.display()))?;

    println!("   {} Linking {}", "🔗".cyan(), config.exe_path().display());
    let (program, args) = link_invocation(objects, toolchain, config, has_cpp);
    run_tool(&program, &args, BuildError::LinkFailed)?;

    println!("   {} Archiving {}", "📦".cyan(), config.static_lib_path().display());
    let (program, args) = archive_invocation(objects, toolchain, config);
    run_tool(&program, &args, BuildError::ArchiveFailed)?;

    if config.shared_lib {
        println!("   {} Linking {}", "🔗".cyan(), config.shared_lib_path().display());
        let (program, args) = shared_invocation(objects, toolchain, config, has_cpp);
        run_tool(&program, &args, BuildError::LinkFailed)?;
    }

    Ok(())
}

fn link_invocation(
    objects: &[PathBuf],
    toolchain: &Toolchain,
    config: &BuildConfig,
    has_cpp: bool,
) -> (String, Vec<String>) {
    let driver = if has_cpp || config.tracy {
        toolchain.cxx.clone()
    } else {
        toolchain.cc.clone()
    };
    let mut args: Vec<String> = objects.iter().map(|o| o.display().to_string()).collect();
    args.push("-o".to_string());
    args.push(config.exe_path().display().to_string());
    (driver, args)
}

fn archive_invocation(
    objects: &[PathBuf],
    toolchain: &Toolchain,
    config: &BuildConfig,
) -> (String, Vec<String>) {
    let mut args = vec!["rcs".to_string(), config.static_lib_path().display().to_string()];
    args.extend(objects.iter().map(|o| o.display().to_string()));
    (toolchain.archiver.clone(), args)
}

fn shared_invocation(
    objects: &[PathBuf],
    toolchain: &Toolchain,
    config: &BuildConfig,
    has_cpp: bool,
) -> (String, Vec<String>) {
    let driver = if has_cpp || config.tracy {
        toolchain.cxx.clone()
    } else {
        toolchain.cc.clone()
    };
    let mut args = vec!["-shared".to_string()];
    args.extend(objects.iter().map(|o| o.display().to_string()));
    args.push("-o".to_string());
    args.push(config.shared_lib_path().display().to_string());
    (driver, args)
}

fn run_tool(program: &str, args: &[String], err: BuildError) -> Result<()> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute '{program}'"))?;

    let mut diag = String::from_utf8_lossy(&output.stdout).into_owned();
    diag.push_str(&String::from_utf8_lossy(&output.stderr));
    if !diag.is_empty() {
        print!("{diag}");
    }

    if !output.status.success() {
        return Err(err.into());
    }
    Ok(())
}

/// Helper for the coordinator; keeps the task-list/object-list split out of
/// the queue.
pub fn object_list(tasks: &[CompileTask]) -> Vec<PathBuf> {
    tasks.iter().map(|t| t.object.clone()).collect()
}
