#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Documented/total arithmetic for one declaration category.

use crate::types::Declaration;

/// Documentation coverage of one category of declarations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageStat {
    /// Declarations with a docstring.
    pub documented: usize,
    /// Declarations counted.
    pub total:      usize,
    /// `documented / total`, or `1.0` when nothing was counted.
    pub percentage: f64,
}

impl Default for CoverageStat {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl CoverageStat {
    /// Builds a stat from raw counts.
    pub fn new(documented: usize, total: usize) -> Self {
        debug_assert!(documented <= total);
        let percentage = if total == 0 {
            1.0
        } else {
            documented as f64 / total as f64
        };

        Self {
            documented,
            total,
            percentage,
        }
    }

    /// Counts how many of `declarations` are documented.
    pub fn from_declarations<'a>(declarations: impl IntoIterator<Item = &'a Declaration>) -> Self {
        let (documented, total) = declarations
            .into_iter()
            .fold((0, 0), |(documented, total), d| {
                (documented + usize::from(d.has_docstring()), total + 1)
            });
        Self::new(documented, total)
    }
}
