use ndarray::{Array2, ArrayView1};

use super::interp::Interpolator;
use crate::error::Result;

/// Key of the synthetic dataset produced by file-factor combination.
pub const COMBINED_KEY: &str = "//all";

// ---------------------------------------------------------------------------
// Dataset – one loaded (or combined) table
// ---------------------------------------------------------------------------

/// A numeric table: rows are samples, column 0 is x, the rest are y-series.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Source path as given on the command line, or [`COMBINED_KEY`].
    pub key: String,
    pub table: Array2<f64>,
    /// Piecewise-linear model of the y-columns over this table's x column.
    pub interp: Interpolator,
}

impl Dataset {
    pub fn new(key: impl Into<String>, table: Array2<f64>) -> Result<Self> {
        let key = key.into();
        let interp = Interpolator::new(&key, &table)?;
        Ok(Dataset { key, table, interp })
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.table.column(0)
    }

    pub fn ncols(&self) -> usize {
        self.table.ncols()
    }

    pub fn nrows(&self) -> usize {
        self.table.nrows()
    }
}

// ---------------------------------------------------------------------------
// Datasets – ordered mapping source → table
// ---------------------------------------------------------------------------

/// Datasets in load order.  All entries share one column count.
#[derive(Debug, Clone)]
pub struct Datasets {
    entries: Vec<Dataset>,
}

impl Datasets {
    /// Callers guarantee `entries` is non-empty with a common column count.
    pub(crate) fn from_entries(entries: Vec<Dataset>) -> Self {
        debug_assert!(!entries.is_empty());
        Datasets { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Column count shared by every dataset.
    pub fn ncols(&self) -> usize {
        self.entries[0].ncols()
    }

    /// The x column of the first dataset: the common grid for combination.
    pub fn master_x(&self) -> ArrayView1<'_, f64> {
        self.entries[0].x()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.key.as_str()).collect()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Dataset> {
        self.entries.iter().find(|d| d.key == key)
    }
}
