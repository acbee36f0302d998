use std::path::{Path, PathBuf};

use ndarray::Array2;

use super::model::{Dataset, Datasets};
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every source, in order, into one [`Datasets`].
///
/// The first file fixes the column count; any later file that differs
/// aborts the whole load.
pub fn load_sources(paths: &[PathBuf]) -> Result<Datasets> {
    let mut entries: Vec<Dataset> = Vec::with_capacity(paths.len());

    for path in paths {
        let table = load_table(path)?;
        if let Some(first) = entries.first() {
            if table.ncols() != first.ncols() {
                return Err(PlotError::ColumnMismatch {
                    path: path.clone(),
                    expected: first.ncols(),
                    found: table.ncols(),
                });
            }
        }
        log::info!(
            "Loaded {} ({} rows, {} columns)",
            path.display(),
            table.nrows(),
            table.ncols()
        );
        entries.push(Dataset::new(path.display().to_string(), table)?);
    }

    if entries.is_empty() {
        return Err(PlotError::argument("sources", "at least one data file is required"));
    }
    Ok(Datasets::from_entries(entries))
}

// ---------------------------------------------------------------------------
// Whitespace table reader
// ---------------------------------------------------------------------------

/// Layout: one sample per line, values separated by any whitespace.
/// Blank lines and lines starting with `#` are skipped; there is no header.
pub fn load_table(path: &Path) -> Result<Array2<f64>> {
    let text = std::fs::read_to_string(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(path, &text)
}

fn parse_table(path: &Path, text: &str) -> Result<Array2<f64>> {
    let mut values: Vec<f64> = Vec::new();
    let mut ncols: Option<usize> = None;
    let mut nrows = 0;

    for (line_no, line) in text.lines().enumerate() {
        let line_no = line_no + 1;
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let row = parse_row(path, line_no, content)?;
        match ncols {
            None => ncols = Some(row.len()),
            Some(n) if n != row.len() => {
                return Err(PlotError::Parse {
                    path: path.to_path_buf(),
                    line: line_no,
                    message: format!("expected {n} values, found {}", row.len()),
                });
            }
            Some(_) => {}
        }
        values.extend(row);
        nrows += 1;
    }

    let ncols = ncols.unwrap_or(0);
    if ncols < 2 {
        return Err(PlotError::TooFewColumns {
            path: path.to_path_buf(),
            found: ncols,
        });
    }

    Array2::from_shape_vec((nrows, ncols), values).map_err(|e| PlotError::Parse {
        path: path.to_path_buf(),
        line: 0,
        message: e.to_string(),
    })
}

fn parse_row(path: &Path, line: usize, content: &str) -> Result<Vec<f64>> {
    content
        .split_whitespace()
        .enumerate()
        .map(|(j, tok)| {
            tok.parse::<f64>().map_err(|_| PlotError::Parse {
                path: path.to_path_buf(),
                line,
                message: format!("column {j}: '{tok}' is not a number"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::write_temp;

    #[test]
    fn parses_mixed_whitespace_and_comments() {
        let path = Path::new("mem.txt");
        let table = parse_table(path, "# x y z\n0 1\t2\n\n  1   2 3  # trailing\n").unwrap();
        assert_eq!(table.shape(), &[2, 3]);
        assert_eq!(table.row(1).to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn ragged_rows_report_the_line() {
        let err = parse_table(Path::new("bad.txt"), "0 1\n1 2 3\n").unwrap_err();
        assert!(matches!(err, PlotError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn non_numeric_token_is_a_parse_error() {
        let err = parse_table(Path::new("bad.txt"), "0 1\n1 abc\n").unwrap_err();
        assert!(matches!(err, PlotError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn single_column_is_rejected() {
        let err = parse_table(Path::new("x.txt"), "1\n2\n").unwrap_err();
        assert!(matches!(err, PlotError::TooFewColumns { found: 1, .. }));
        let err = parse_table(Path::new("empty.txt"), "\n# nothing\n").unwrap_err();
        assert!(matches!(err, PlotError::TooFewColumns { found: 0, .. }));
    }

    #[test]
    fn sources_keep_order_and_master_grid() {
        let a = write_temp("loader_order_a.txt", "0 1\n1 2\n2 3\n");
        let b = write_temp("loader_order_b.txt", "5 2\n6 4\n");
        let datasets = load_sources(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(datasets.len(), 2);
        assert_eq!(
            datasets.keys(),
            vec![a.display().to_string(), b.display().to_string()]
        );
        assert_eq!(datasets.master_x().to_vec(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn mismatching_column_counts_fail_regardless_of_rows() {
        let a = write_temp("loader_mismatch_a.txt", "0 1\n1 2\n2 3\n");
        let b = write_temp("loader_mismatch_b.txt", "0 1 2\n1 2 3\n2 3 4\n");
        let err = load_sources(&[a, b.clone()]).unwrap_err();
        match err {
            PlotError::ColumnMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, b);
                assert_eq!((expected, found), (2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("instaplot-definitely-missing.txt");
        let err = load_sources(&[path]).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
    }
}
