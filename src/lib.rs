//! # pydoccov
//!
//! Measures how many modules, classes and functions of a Python source tree
//! carry a docstring, and renders the result as a plain-text report.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Run configuration and JSON overrides
pub mod config;
/// Documented/total arithmetic
pub mod coverage;
/// For parsing Python files and extracting their declarations
pub mod python;
/// Text rendering of coverage results
pub mod report;
/// Shared data types
pub mod types;
/// Source file discovery
pub mod util;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rayon::prelude::*;

use crate::{
    config::Config,
    python::{FileReport, PythonFileError},
    report::Report,
};

/// Analyses every file in `paths`, keeping the input order.
///
/// Files are analysed on the current rayon pool. The first file that fails
/// to read or parse aborts the whole batch.
pub fn analyze_files(
    paths: &[PathBuf],
    config: &Config,
) -> Result<IndexMap<String, FileReport>, PythonFileError> {
    let reports = paths
        .par_iter()
        .map(|path| FileReport::from_path(path, config))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(reports
        .into_iter()
        .map(|report| (report.path().to_string(), report))
        .collect())
}

/// Discovers, analyses and renders the tree under `root_dir`.
///
/// * `root_dir`: directory to scan
/// * `config`: settings for the run
/// * `jobs`: worker threads for analysis; `None` lets rayon decide
pub fn run(root_dir: &Path, config: &Config, jobs: Option<usize>) -> Result<String> {
    let paths = util::find_python_files(root_dir, config);
    tracing::debug!("Discovered {} Python files under {}", paths.len(), root_dir.display());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .context("Could not start analysis workers")?;
    let files = pool.install(|| analyze_files(&paths, config))?;

    Ok(Report::new(&files, config).to_string())
}
