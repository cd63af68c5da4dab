//! # basin-build - Build Orchestrator for the basin Compiler
//!
//! basin-build (`bb`) replaces the project's old build script with a small
//! parallel build: it walks the source tree, compiles every file through an
//! external toolchain, embeds the git revision and a build timestamp, then
//! links the executable and archives the static library.
//!
//! ## Features
//!
//! - **Parallel Compilation**: shared work queue drained by one worker per core
//! - **Fail Fast**: the first compile error halts dispatch of remaining work
//! - **Build Metadata**: git revision + timestamp compiled into the binary
//! - **Optional Profiling**: Tracy client compiled and linked in on request
//!
//! ## Quick Start
//!
//! ```bash
//! # Build the project in the repository root
//! bb
//!
//! # Remove outputs, then rebuild from scratch
//! bb clean
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - source discovery, planning, worker pool, link/archive, clean
//! - [`config`] - configuration defaults and `basin.toml` parsing
//! - [`toolchain`] - compiler/archiver resolution
//! - [`error`] - fatal error kinds

/// Core build engine: resolve, plan, compile, finalize, clean.
pub mod build;

/// Configuration defaults and `basin.toml` parsing.
pub mod config;

/// Fatal build error kinds.
pub mod error;

/// Compiler and archiver resolution.
pub mod toolchain;
