#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Text rendering of coverage results.
//!
//! Two layouts exist. The detailed layout lists every missing docstring per
//! file followed by an aggregate total; the percent-only layout prints one
//! summary line per file. Per-file percentages are always computed over
//! everything extracted, while the category toggles only decide which
//! violations are listed and which categories enter the aggregate.

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{config::Config, coverage::CoverageStat, python::FileReport, types::Declaration};

/// A rendered view over the results of one run.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// Per-file results in discovery order.
    files:  &'a IndexMap<String, FileReport>,
    /// Settings of the run.
    config: &'a Config,
}

impl<'a> Report<'a> {
    /// Creates a report over `files`, keyed by path in discovery order.
    pub fn new(files: &'a IndexMap<String, FileReport>, config: &'a Config) -> Self {
        Self { files, config }
    }

    /// Documented/total per category over every file, honouring the
    /// category toggles. A skipped category yields `None`.
    pub fn totals(&self) -> (Option<Totals>, Option<Totals>) {
        let sum = |stat: fn(&FileReport) -> CoverageStat| {
            self.files
                .values()
                .map(stat)
                .fold(Totals::default(), |acc, s| Totals {
                    documented: acc.documented + s.documented,
                    total:      acc.total + s.total,
                })
        };

        let classes = (!self.config.skip_classes()).then(|| sum(FileReport::class_coverage));
        let functions =
            (!self.config.skip_functions()).then(|| sum(FileReport::function_coverage));
        (classes, functions)
    }

    /// Missing-docstring lines for one file under the active toggles.
    fn violations(&self, file: &FileReport) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.config.skip_modules() && !file.module().has_docstring() {
            lines.push(format!("Missing docstring for {}", file.module().kind));
        }
        if !self.config.skip_classes() {
            lines.extend(undocumented(file.classes()));
        }
        if !self.config.skip_functions() {
            lines.extend(undocumented(file.functions()));
        }

        lines
    }

    /// Writes the violation sections and the aggregate total.
    fn fmt_detailed(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (path, file) in self.files {
            let violations = self.violations(file);
            if violations.is_empty() {
                continue;
            }

            writeln!(f, "{path}")?;
            writeln!(f, "{}", coverage_line(file.class_coverage(), "classes"))?;
            writeln!(f, "{}", coverage_line(file.function_coverage(), "functions"))?;
            writeln!(f, "{}", "-".repeat(path.chars().count()))?;
            writeln!(f, "{}", violations.iter().join("\n"))?;
            writeln!(f)?;
            writeln!(f)?;
        }

        let (classes, functions) = self.totals();
        if classes.is_none() && functions.is_none() {
            return Ok(());
        }

        writeln!(f, "Total")?;
        writeln!(f, "-----")?;
        if let Some(classes) = classes {
            writeln!(f, "{}", classes.line("classes"))?;
        }
        if let Some(functions) = functions {
            writeln!(f, "{}", functions.line("functions"))?;
        }

        Ok(())
    }

    /// Writes one summary line per file.
    fn fmt_percent_only(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (path, file) in self.files {
            let classes = file.class_coverage();
            let functions = file.function_coverage();
            writeln!(
                f,
                "{path} | Classes: {}/{} ({:.1}%), Functions: {}/{} ({:.1}%)",
                classes.documented,
                classes.total,
                classes.percentage * 100.0,
                functions.documented,
                functions.total,
                functions.percentage * 100.0,
            )?;
        }

        Ok(())
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.config.report_percent_only() {
            self.fmt_percent_only(f)
        } else {
            self.fmt_detailed(f)
        }
    }
}

/// Aggregate counts for one category across every file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Documented declarations.
    pub documented: usize,
    /// Counted declarations.
    pub total:      usize,
}

impl Totals {
    /// Share of documented declarations; `0.0` when nothing was counted.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.documented as f64 / self.total as f64
        }
    }

    /// The `D of T <label> documented (P%)` line.
    fn line(&self, label: &str) -> String {
        documented_line(self.documented, self.total, self.percentage(), label)
    }
}

/// The `D of T <label> documented (P%)` line for a per-file stat.
fn coverage_line(stat: CoverageStat, label: &str) -> String {
    documented_line(stat.documented, stat.total, stat.percentage, label)
}

/// Formats a ratio with one decimal of percent precision.
fn documented_line(documented: usize, total: usize, ratio: f64, label: &str) -> String {
    format!("{documented} of {total} {label} documented ({:.1}%)", ratio * 100.0)
}

/// One `Line N: Missing docstring for <kind> '<name>'` per undocumented
/// declaration.
fn undocumented(declarations: &[Declaration]) -> impl Iterator<Item = String> + '_ {
    declarations
        .iter()
        .filter(|d| !d.has_docstring())
        .map(|d| format!("Line {}: Missing docstring for {} '{}'", d.line, d.kind, d.name))
}
