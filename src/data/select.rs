use crate::config::Columns;
use crate::error::{PlotError, Result};

/// Resolve the `--columns` option against the (possibly combined) data.
///
/// `All` expands to every y-column `1..ncols`; explicit indices must name
/// a y-column, column 0 being the x axis.
pub fn resolve_columns(columns: &Columns, ncols: usize) -> Result<Vec<usize>> {
    match columns {
        Columns::All => Ok((1..ncols).collect()),
        Columns::Explicit(indices) => {
            if let Some(bad) = indices.iter().find(|&&i| i == 0 || i >= ncols) {
                return Err(PlotError::argument(
                    "columns",
                    format!("column {bad} is out of range, valid y-columns are 1..={}", ncols - 1),
                ));
            }
            Ok(indices.clone())
        }
    }
}
