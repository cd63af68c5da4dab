//! Compile task planning.
//!
//! Turns resolved source entries into structured compiler invocations. Flags
//! are uniform across the set; the only per-file branch is routing C++
//! extensions to the C++ front end.

use crate::build::sources::{self, SourceEntry};
use crate::config::BuildConfig;
use crate::toolchain::Toolchain;
use std::path::PathBuf;
use std::process::Command;

/// One toolchain invocation: program plus argument vector. Built once,
/// immutable afterwards. Arguments are a structured list, never a shell
/// string, so paths need no quoting.
#[derive(Debug, Clone)]
pub struct CompileTask {
    pub program: String,
    pub args: Vec<String>,
    pub source: PathBuf,
    pub object: PathBuf,
}

impl CompileTask {
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// One task per entry, in entry order.
pub fn plan(entries: &[SourceEntry], toolchain: &Toolchain, config: &BuildConfig) -> Vec<CompileTask> {
    entries
        .iter()
        .map(|entry| compile_task(entry, toolchain, config))
        .collect()
}

fn compile_task(entry: &SourceEntry, toolchain: &Toolchain, config: &BuildConfig) -> CompileTask {
    let program = if sources::is_cpp(&entry.path) {
        toolchain.cxx.clone()
    } else {
        toolchain.cc.clone()
    };

    let mut args: Vec<String> = vec!["-c".to_string()];
    if config.debug {
        args.push("-g".to_string());
    }
    if config.optimize {
        args.push("-O2".to_string());
    }
    if config.shared_lib {
        args.push("-fPIC".to_string());
    }
    args.push(format!("-I{}", sources::normalize(&config.src_dir).display()));
    args.push(format!("-I{}", sources::normalize(&config.include_dir).display()));
    args.push("-include".to_string());
    args.push(sources::normalize(&config.pch).display().to_string());
    if config.tracy {
        args.push("-DTRACY_ENABLE".to_string());
        args.push(format!("-I{}", sources::normalize(&config.tracy_include).display()));
    }
    args.push(entry.path.display().to_string());
    args.push("-o".to_string());
    args.push(entry.object.display().to_string());

    CompileTask {
        program,
        args,
        source: entry.path.clone(),
        object: entry.object.clone(),
    }
}
