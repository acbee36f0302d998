use ndarray::{s, Array2};

use super::model::{Dataset, Datasets, COMBINED_KEY};
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// File-factor combination
// ---------------------------------------------------------------------------

/// Weighted sum of every dataset, resampled onto the master x grid.
///
/// Output column 0 is the master grid; columns 1.. are
/// `Σ factor_i · interp_i(master_x)`.  The result replaces the whole
/// mapping with a single entry keyed [`COMBINED_KEY`].
pub fn combine_files(datasets: &Datasets, factors: &[f64]) -> Result<Datasets> {
    if factors.len() != datasets.len() {
        return Err(PlotError::argument(
            "file-factors",
            format!(
                "got {} factor(s) for {} file(s)",
                factors.len(),
                datasets.len()
            ),
        ));
    }

    let master_x = datasets.master_x();
    let mut table = Array2::<f64>::zeros((master_x.len(), datasets.ncols()));
    table.column_mut(0).assign(&master_x);

    for (factor, dataset) in factors.iter().zip(datasets.iter()) {
        let resampled = dataset.interp.eval_grid(master_x)?;
        table.slice_mut(s![.., 1..]).scaled_add(*factor, &resampled);
        log::debug!("Combined {} with factor {factor}", dataset.key);
    }

    Ok(Datasets::from_entries(vec![Dataset::new(COMBINED_KEY, table)?]))
}

// ---------------------------------------------------------------------------
// Column-factor combination
// ---------------------------------------------------------------------------

/// Per-column weighting across files.
///
/// The argument checks run first so malformed invocations are reported as
/// such; a well-formed request always ends in
/// [`PlotError::Unimplemented`].
pub fn combine_columns(
    datasets: &Datasets,
    columns: &[usize],
    factors: &[f64],
    axes: usize,
) -> Result<()> {
    if factors.len() != columns.len() {
        return Err(PlotError::argument(
            "column-factors",
            format!(
                "mismatching number of factors and columns: {} factor(s), {} column(s)",
                factors.len(),
                columns.len()
            ),
        ));
    }
    if columns.len() > 1 && axes != datasets.len() {
        return Err(PlotError::argument(
            "column-factors",
            format!(
                "mismatching number of subplots and files: {axes} subplot(s), {} file(s)",
                datasets.len()
            ),
        ));
    }
    Err(PlotError::Unimplemented("column-factor combination"))
}
