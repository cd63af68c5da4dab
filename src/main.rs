//! # basin-build CLI Entry Point
//!
//! One optional positional action plus a few flags. `bb` builds; `bb clean`
//! removes build outputs first and then rebuilds. Any other action token is
//! rejected with exit code 1 (strict validation; the old build script used
//! to silently ignore unknown arguments).

use anyhow::Result;
use clap::Parser;
use colored::*;

use basin_build::build;
use basin_build::config;

#[derive(Parser)]
#[command(name = "bb")]
#[command(about = "Build orchestrator for the basin compiler", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Action to perform. `clean` removes build outputs before rebuilding.
    action: Option<String>,

    /// Optimized build (-O2, no debug info)
    #[arg(long)]
    release: bool,

    /// Compile and link the Tracy profiler client
    #[arg(long)]
    tracy: bool,

    /// Also produce a shared library
    #[arg(long)]
    shared: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config()?;
    if cli.release {
        config.optimize = true;
        config.debug = false;
    }
    if cli.tracy {
        config.tracy = true;
    }
    if cli.shared {
        config.shared_lib = true;
    }

    match cli.action.as_deref() {
        None => {}
        Some("clean") => {
            if let Err(e) = build::clean(&config) {
                eprintln!("{} {:#}", "x".red(), e);
                std::process::exit(1);
            }
        }
        Some(other) => {
            eprintln!(
                "{} Unknown action '{}'. Supported actions: clean",
                "x".red(),
                other
            );
            std::process::exit(1);
        }
    }

    if let Err(e) = build::build_project(&config) {
        eprintln!("{} {:#}", "x".red(), e);
        std::process::exit(1);
    }
    Ok(())
}
