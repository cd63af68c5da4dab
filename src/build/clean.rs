//! Build artifact cleanup.
//!
//! Removes the output, intermediate, and library directories. Absent
//! directories are not an error, so cleaning twice is a no-op. Source files
//! are never touched. On the CLI, `clean` runs before the build rather than
//! instead of it.

use crate::config::BuildConfig;
use anyhow::{Context, Result};
use colored::*;
use std::fs;

pub fn clean(config: &BuildConfig) -> Result<()> {
    let mut cleaned = false;

    // obj_dir usually nests inside out_dir; the exists() checks make the
    // order irrelevant.
    for dir in [&config.obj_dir, &config.out_dir, &config.lib_dir] {
        if dir.exists() {
            fs::remove_dir_all(dir)
                .with_context(|| format!("Failed to remove {}", dir.display()))?;
            cleaned = true;
        }
    }

    if cleaned {
        println!("{} Clean complete.", "✓".green());
    } else {
        println!("{} Nothing to clean", "!".yellow());
    }
    Ok(())
}
