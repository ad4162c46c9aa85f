#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # pydoccov
//! ## Introduction
//!
//! Reports which modules, classes and functions of a Python project are
//! missing a docstring.
//!
//! ## Usage
//!
//! `pydoccov ROOT [CONFIG]` scans `ROOT` for `.py` files. `CONFIG` is an
//! optional JSON document overriding any of `exclude_folders`,
//! `exclude_files`, `skip_magic_funcs`, `skip_private_funcs`,
//! `report_percent_only`, `skip_modules`, `skip_classes` and
//! `skip_functions`. A config that cannot be read is ignored.

use std::path::PathBuf;

use anyhow::Result;
use bpaf::*;
use pydoccov::config::Config;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Command line options.
#[derive(Debug, Clone)]
struct Options {
    /// Log debug output to stderr
    verbose: bool,
    /// Number of analysis threads
    jobs:    Option<usize>,
    /// Directory to scan
    root:    PathBuf,
    /// Optional JSON config document
    config:  Option<PathBuf>,
}

/// Parse the command line arguments and return `Options`
fn options() -> Options {
    let verbose = short('v')
        .long("verbose")
        .help("Log debug output to stderr")
        .switch();

    let jobs = short('j')
        .long("jobs")
        .help("Number of threads used to analyse files")
        .argument::<usize>("N")
        .guard(|n| *n > 0, "--jobs must be at least 1")
        .optional();

    let root = positional::<PathBuf>("ROOT").help("Directory to scan for Python files");

    let config = positional::<PathBuf>("CONFIG")
        .help("JSON file overriding the default configuration")
        .optional();

    construct!(Options {
        verbose,
        jobs,
        root,
        config
    })
    .to_options()
    .descr("Docstring coverage for Python source trees")
    .run()
}

fn main() -> Result<()> {
    let opts = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let level = if opts.verbose { Level::DEBUG } else { Level::INFO };
    let filter_layer = LevelFilter::from_level(level);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let config = Config::load_or_default(opts.config.as_deref());
    let report = pydoccov::run(&opts.root, &config, opts.jobs)?;
    print!("{report}");

    Ok(())
}
