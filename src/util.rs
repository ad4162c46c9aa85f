#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;

/// File extension of Python sources.
pub const PYTHON_EXTENSION: &str = ".py";

/// Finds Python sources under `root_dir`, in walk order.
///
/// Directories named in `exclude_folders` are pruned at any depth (their
/// contents are never read) and files named in `exclude_files` are
/// skipped. Within a directory, files come before subdirectories and
/// siblings are visited by name, so the order does not depend on the
/// platform's directory listing.
///
/// * `root_dir`: the root directory where search starts
/// * `config`: supplies the exclusion sets
pub fn find_python_files(root_dir: &Path, config: &Config) -> Vec<PathBuf> {
    WalkDir::new(root_dir)
        .sort_by(files_before_dirs)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e, config))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {e}", root_dir.display());
                None
            }
        })
        .filter(|e| !e.file_type().is_dir())
        .filter(|e| {
            e.file_name().to_str().is_some_and(|name| {
                name.ends_with(PYTHON_EXTENSION) && !config.exclude_files().contains(name)
            })
        })
        .map(DirEntry::into_path)
        .collect()
}

/// Orders files ahead of directories, then by name.
fn files_before_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Whether `entry` is a directory the walk must not enter.
fn is_excluded_dir(entry: &DirEntry, config: &Config) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.exclude_folders().contains(name))
}
