//! Source discovery.
//!
//! Walks the project source tree and yields every compilable file together
//! with its object-file path. Files whose name starts with `_` are disabled
//! (experimental or platform-specific variants kept out of the build).
//!
//! Discovery is a pure filesystem read; entries are sorted lexicographically
//! so diagnostics and tests see a deterministic order. Object paths are
//! assigned in one pass over the complete file set, so synthesized sources
//! appended after discovery (the generated metadata file, the Tracy client)
//! participate in collision handling like everything else.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files starting with this are excluded from the build.
pub const DISABLED_PREFIX: char = '_';

const SOURCE_EXTENSIONS: [&str; 4] = ["c", "cpp", "cc", "cxx"];
const CPP_EXTENSIONS: [&str; 3] = ["cpp", "cc", "cxx"];

/// A discovered compilable file and its derived object path. Immutable once
/// produced; consumed by the build plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: PathBuf,
    pub object: PathBuf,
}

/// Recursively enumerate compilable files under `src_dir`, skipping disabled
/// files, sorted lexicographically. Paths are normalized.
pub fn discover(src_dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(src_dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_lowercase(),
            None => continue,
        };
        if !SOURCE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(DISABLED_PREFIX) {
            continue;
        }
        files.push(normalize(path));
    }
    files.sort();
    files
}

/// Discovery plus object assignment, for builds with no appended sources.
pub fn resolve(src_dir: &Path, obj_dir: &Path) -> Vec<SourceEntry> {
    assign_objects(discover(src_dir), obj_dir)
}

/// True for files routed to the C++ front end.
pub fn is_cpp(path: &Path) -> bool {
    path.extension()
        .map(|ext| CPP_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Normalize separators to `/` so comparisons and concatenations behave the
/// same on every host.
pub fn normalize(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace('\\', "/"))
}

/// Object names come from the source's base name. Two sources sharing a base
/// name in different directories would collide, so colliding stems get a
/// short digest of the full source path appended. Must run once over the
/// whole build's file set: objects are only unique within a single pass.
pub fn assign_objects(files: Vec<PathBuf>, obj_dir: &Path) -> Vec<SourceEntry> {
    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for file in &files {
        *stem_counts.entry(stem(file)).or_insert(0) += 1;
    }

    files
        .into_iter()
        .map(|path| {
            let stem = stem(&path);
            let object = if stem_counts[&stem] > 1 {
                obj_dir.join(format!("{}-{}.o", stem, path_digest(&path)))
            } else {
                obj_dir.join(format!("{stem}.o"))
            };
            SourceEntry {
                object: normalize(&object),
                path,
            }
        })
        .collect()
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn path_digest(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    digest[..4].iter().map(|b| format!("{b:02x}")).collect()
}
