//! End-to-end build tests.
//!
//! These exercise the whole pipeline against a scratch C project in a temp
//! directory: resolve, metadata, parallel compile, link, archive, clean.
//! They shell out to gcc/ar/git and skip themselves when a tool is missing.

use basin_build::build;
use basin_build::config::BuildConfig;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

// build_project resolves all paths relative to the current directory, so
// tests that chdir must not overlap.
static CWD_LOCK: Mutex<()> = Mutex::new(());

fn have(cmd: &str) -> bool {
    Command::new(cmd).arg("--version").output().is_ok()
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn scratch_project(root: &Path, broken: bool) {
    write(
        &root.join("src/basin/pch.h"),
        "#pragma once\n#include <stdio.h>\n",
    );
    write(
        &root.join("include/basin/basin.h"),
        "#pragma once\nint basin_answer(void);\n",
    );
    write(
        &root.join("src/basin/main.c"),
        r#"#include "basin/basin.h"
extern const char* BASIN_COMPILER_COMMIT;
extern const char* BASIN_COMPILER_BUILD_DATE;
int main(void) {
    printf("basin %s (%s) %d\n", BASIN_COMPILER_COMMIT, BASIN_COMPILER_BUILD_DATE, basin_answer());
    return 0;
}
"#,
    );
    let util = if broken {
        "int basin_answer(void) { return 42 }\n" // missing semicolon
    } else {
        "int basin_answer(void) { return 42; }\n"
    };
    write(&root.join("src/basin/util.c"), util);
    // disabled files never compile, even with errors inside
    write(
        &root.join("src/basin/_disabled.c"),
        "#error this file must never be compiled\n",
    );
}

fn git_init(root: &Path) -> bool {
    let steps: [&[&str]; 3] = [
        &["init", "-q"],
        &["add", "-A"],
        &[
            "-c",
            "user.email=build@example.com",
            "-c",
            "user.name=build",
            "commit",
            "-q",
            "-m",
            "init",
        ],
    ];
    for args in steps {
        let ok = Command::new("git")
            .args(args)
            .current_dir(root)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !ok {
            return false;
        }
    }
    true
}

fn in_dir<F: FnOnce()>(root: &Path, f: F) {
    let _guard = match CWD_LOCK.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    };
    let old = std::env::current_dir().unwrap();
    std::env::set_current_dir(root).unwrap();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    std::env::set_current_dir(old).unwrap();
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

#[test]
fn full_build_then_clean() {
    if !have("gcc") || !have("git") || !have("ar") {
        eprintln!("skipping: gcc/git/ar not available");
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    scratch_project(tmp.path(), false);
    if !git_init(tmp.path()) {
        eprintln!("skipping: could not set up a git repository");
        return;
    }

    in_dir(tmp.path(), || {
        let config = BuildConfig::default();
        build::build_project(&config).unwrap();

        assert!(Path::new("bin/basin").exists());
        assert!(Path::new("bin/int/main.o").exists());
        assert!(Path::new("bin/int/util.o").exists());
        assert!(Path::new("bin/int/commit_hash.o").exists());
        assert!(!Path::new("bin/int/_disabled.o").exists());
        assert!(Path::new("lib/libbasin.a").exists());

        let metadata = fs::read_to_string("bin/int/commit_hash.c").unwrap();
        assert!(metadata.contains("BASIN_COMPILER_COMMIT"));
        assert!(metadata.contains("BASIN_COMPILER_BUILD_DATE"));

        // the produced executable actually runs and prints the revision
        let run = Command::new("./bin/basin").output().unwrap();
        assert!(run.status.success());
        assert!(String::from_utf8_lossy(&run.stdout).contains("42"));

        build::clean(&config).unwrap();
        assert!(!Path::new("bin").exists());
        assert!(!Path::new("lib").exists());

        // already clean: still fine
        build::clean(&config).unwrap();
    });
}

#[test]
fn compile_failure_skips_the_link_stage() {
    if !have("gcc") || !have("git") || !have("ar") {
        eprintln!("skipping: gcc/git/ar not available");
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    scratch_project(tmp.path(), true);
    if !git_init(tmp.path()) {
        eprintln!("skipping: could not set up a git repository");
        return;
    }

    in_dir(tmp.path(), || {
        let config = BuildConfig::default();
        let err = build::build_project(&config).unwrap_err();
        assert!(err.to_string().contains("compilation failed"));
        // finalizer never ran
        assert!(!Path::new("bin/basin").exists());
        assert!(!Path::new("lib/libbasin.a").exists());
    });
}

#[test]
fn vcs_failure_is_fatal_and_surfaces_diagnostics() {
    if !have("gcc") || !have("git") || !have("ar") {
        eprintln!("skipping: gcc/git/ar not available");
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    scratch_project(tmp.path(), false);
    // no git repository on purpose

    in_dir(tmp.path(), || {
        let config = BuildConfig::default();
        let err = build::build_project(&config).unwrap_err();
        assert!(err.to_string().contains("git revision query failed"));
        assert!(!Path::new("bin/basin").exists());
    });
}
