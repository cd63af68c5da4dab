//! Build orchestration.
//!
//! Wires the stages together: resolve sources, pre-flight the toolchain,
//! regenerate build metadata, plan compile tasks, drain them through the
//! worker pool, then link and archive. Every source is rebuilt every run;
//! there is no staleness tracking.

use crate::build::{finalize, metadata, plan, queue, sources};
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::toolchain;
use anyhow::Result;
use colored::*;
use std::time::Instant;

pub fn build_project(config: &BuildConfig) -> Result<()> {
    let start_time = Instant::now();
    println!("{} Building {}", "🚀".blue(), config.exe_name.bold());

    // 1. Collect source files
    let mut files = sources::discover(&config.src_dir);
    if files.is_empty() {
        println!(
            "{} No source files found under {}",
            "!".yellow(),
            config.src_dir.display()
        );
        return Ok(());
    }
    if config.tracy {
        files.push(sources::normalize(&config.tracy_client));
    }
    let has_cpp = files.iter().any(|f| sources::is_cpp(f));

    // 2. Pre-flight the toolchain before any output is written
    let toolchain = toolchain::detect(config, has_cpp || config.tracy)?;
    println!(
        "   {} Toolchain: {} / {} / {}",
        "🔧".cyan(),
        toolchain.cc,
        toolchain.cxx,
        toolchain.archiver
    );

    // 3. Regenerate build metadata (always fresh, never incremental)
    metadata::generate(config)?;
    files.push(sources::normalize(&metadata::source_path(config)));

    // Objects are assigned in one pass over the complete file set so the
    // appended sources take part in collision handling.
    let entries = sources::assign_objects(files, &config.obj_dir);

    // 4. Plan and compile
    let tasks = plan::plan(&entries, &toolchain, config);
    let objects = finalize::object_list(&tasks);
    println!(
        "   {} Compiling {} files on {} cores",
        "⚙".blue(),
        tasks.len(),
        num_cpus::get()
    );
    if !queue::run_parallel(tasks) {
        return Err(BuildError::CompileFailed.into());
    }

    // 5. Link and archive
    finalize::finalize(&objects, &toolchain, config, has_cpp)?;

    println!(
        "{} Build finished in {:.2?}",
        "✓".green(),
        start_time.elapsed()
    );
    Ok(())
}
