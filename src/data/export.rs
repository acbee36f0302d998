use std::path::Path;

use super::model::Datasets;
use crate::error::{PlotError, Result};

/// Write the single dataset that would be plotted as a tab-separated table,
/// readable again as a SOURCE.
pub fn write_table(datasets: &Datasets, path: &Path) -> Result<()> {
    if datasets.len() != 1 {
        return Err(PlotError::argument(
            "dump",
            format!(
                "needs exactly one dataset but {} are loaded; combine them with --file-factors",
                datasets.len()
            ),
        ));
    }
    let Some(dataset) = datasets.iter().next() else {
        return Ok(());
    };

    let io_err = |e: csv::Error| PlotError::Io {
        path: path.to_path_buf(),
        source: e.into(),
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .map_err(io_err)?;

    for row in dataset.table.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(io_err)?;
    }
    writer.flush().map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Wrote {} rows of {} to {}", dataset.nrows(), dataset.key, path.display());
    Ok(())
}
