use std::path::PathBuf;

use crate::cli::Args;
use crate::error::{PlotError, Result};
use crate::savefig::FigureFormat;
use crate::scale::Scale;

/// Literal some users pass to mean "option not given".
const UNSET: &str = "None";

/// Default figure size in inches.
pub const DEFAULT_FIGSIZE: FigureSize = FigureSize {
    width: 6.4,
    height: 4.8,
};

// ---------------------------------------------------------------------------
// Typed option values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubplotGrid {
    pub rows: usize,
    pub cols: usize,
}

impl SubplotGrid {
    /// Total number of axes in the grid.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn to_pixels(self, dpi: f64) -> (u32, u32) {
        (
            (self.width * dpi).round().max(1.0) as u32,
            (self.height * dpi).round().max(1.0) as u32,
        )
    }
}

/// Which y-columns to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    All,
    /// 1-based indices; column 0 is the x column.
    Explicit(Vec<usize>),
}

// ---------------------------------------------------------------------------
// PlotConfig
// ---------------------------------------------------------------------------

/// Fully parsed invocation.  Immutable once built.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub sources: Vec<PathBuf>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub savefig: Option<PathBuf>,
    pub vertical_lines: Vec<f64>,
    /// `Some` (possibly empty) whenever `--labels` was given.
    pub labels: Option<Vec<String>>,
    pub xscale: Scale,
    pub yscale: Scale,
    pub subplots: SubplotGrid,
    pub markers: String,
    pub column_factors: Option<Vec<f64>>,
    pub columns: Columns,
    pub file_factors: Option<Vec<f64>>,
    pub sharex: bool,
    pub sharey: bool,
    pub figsize: FigureSize,
    pub dpi: f64,
    pub dump: Option<PathBuf>,
}

impl PlotConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let (rows, cols) = parse_pair::<usize>("subplots", &args.subplots)?;
        if rows == 0 || cols == 0 {
            return Err(PlotError::argument(
                "subplots",
                format!("grid must have at least one row and column, got {rows},{cols}"),
            ));
        }
        if rows.checked_mul(cols).is_none() {
            return Err(PlotError::argument(
                "subplots",
                format!("{rows}x{cols} subplots is too many"),
            ));
        }

        let figsize = match given(&args.figsize) {
            Some(text) => {
                let (width, height) = parse_pair::<f64>("figsize", text)?;
                if !(width > 0.0 && height > 0.0) {
                    return Err(PlotError::argument(
                        "figsize",
                        format!("width and height must be positive, got {width},{height}"),
                    ));
                }
                FigureSize { width, height }
            }
            None => DEFAULT_FIGSIZE,
        };

        if !(args.dpi.is_finite() && args.dpi > 0.0) {
            return Err(PlotError::argument("dpi", format!("must be positive, got {}", args.dpi)));
        }

        let savefig = given(&args.savefig).map(PathBuf::from);
        if let Some(path) = &savefig {
            FigureFormat::from_path(path)?;
        }

        let vertical_lines = given(&args.vertical_lines)
            .map(|text| parse_float_list("vertical-lines", text))
            .transpose()?
            .unwrap_or_default();

        Ok(PlotConfig {
            sources: args.sources.clone(),
            title: given(&args.title).map(str::to_string),
            x_label: given(&args.xlabel).map(str::to_string),
            y_label: given(&args.ylabel).map(str::to_string),
            savefig,
            vertical_lines,
            labels: given(&args.labels).map(parse_labels),
            xscale: args.xscale,
            yscale: args.yscale,
            subplots: SubplotGrid { rows, cols },
            markers: args.markers.clone(),
            column_factors: given(&args.column_factors)
                .map(|text| parse_float_list("column-factors", text))
                .transpose()?,
            columns: parse_columns(&args.columns)?,
            file_factors: given(&args.file_factors)
                .map(|text| parse_float_list("file-factors", text))
                .transpose()?,
            sharex: args.sharex,
            sharey: args.sharey,
            figsize,
            dpi: args.dpi,
            dump: args.dump.clone(),
        })
    }

    pub fn size_px(&self) -> (u32, u32) {
        self.figsize.to_pixels(self.dpi)
    }
}

// ---------------------------------------------------------------------------
// Option parsers
// ---------------------------------------------------------------------------

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| *v != UNSET)
}

/// Parse exactly two comma-separated values, e.g. `"2,3"`.
pub fn parse_pair<T: std::str::FromStr>(option: &'static str, text: &str) -> Result<(T, T)> {
    let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    let [first, second] = tokens.as_slice() else {
        return Err(PlotError::argument(
            option,
            format!("expected two comma-separated values, got '{text}'"),
        ));
    };
    let parse = |tok: &str| {
        tok.parse::<T>()
            .map_err(|_| PlotError::argument(option, format!("'{tok}' is not a valid number")))
    };
    Ok((parse(*first)?, parse(*second)?))
}

pub fn parse_float_list(option: &'static str, text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| PlotError::argument(option, format!("'{tok}' is not a number")))
        })
        .collect()
}

pub fn parse_columns(text: &str) -> Result<Columns> {
    if text.trim() == "all" {
        return Ok(Columns::All);
    }
    text.split(',')
        .map(str::trim)
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| PlotError::argument("columns", format!("'{tok}' is not a column index")))
        })
        .collect::<Result<Vec<_>>>()
        .map(Columns::Explicit)
}

/// Labels are comma-separated; blank entries fall back to generated names.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.split(',').map(|label| label.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn config(argv: &[&str]) -> Result<PlotConfig> {
        let mut full = vec!["instaplot", "data.txt"];
        full.extend_from_slice(argv);
        PlotConfig::from_args(&Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.subplots, SubplotGrid { rows: 1, cols: 1 });
        assert_eq!(cfg.columns, Columns::All);
        assert_eq!(cfg.figsize, DEFAULT_FIGSIZE);
        assert_eq!(cfg.size_px(), (640, 480));
        assert!(cfg.vertical_lines.is_empty());
        assert!(cfg.labels.is_none());
        assert!(cfg.file_factors.is_none());
        assert!(cfg.savefig.is_none());
    }

    #[test]
    fn none_literal_means_unset() {
        let cfg = config(&[
            "--savefig",
            "None",
            "--figsize",
            "None",
            "--file-factors",
            "None",
            "--labels",
            "None",
            "--xlabel",
            "None",
        ])
        .unwrap();
        assert!(cfg.savefig.is_none());
        assert_eq!(cfg.figsize, DEFAULT_FIGSIZE);
        assert!(cfg.file_factors.is_none());
        assert!(cfg.labels.is_none());
        assert!(cfg.x_label.is_none());
    }

    #[test]
    fn typed_values() {
        let cfg = config(&[
            "--subplots",
            "2,3",
            "--figsize",
            "8,6",
            "--vertical-lines",
            "1.5, 2",
            "--columns",
            "1,3",
            "--file-factors",
            "0.5,0.5",
            "--labels",
            "first,second",
        ])
        .unwrap();
        assert_eq!(cfg.subplots.len(), 6);
        assert_eq!(cfg.size_px(), (800, 600));
        assert_eq!(cfg.vertical_lines, vec![1.5, 2.0]);
        assert_eq!(cfg.columns, Columns::Explicit(vec![1, 3]));
        assert_eq!(cfg.file_factors, Some(vec![0.5, 0.5]));
        assert_eq!(cfg.labels, Some(vec!["first".to_string(), "second".to_string()]));
    }

    #[test]
    fn malformed_subplots_are_rejected() {
        for bad in ["2", "2,3,4", "a,b", "1.5,2", "0,2"] {
            let err = config(&["--subplots", bad]).unwrap_err();
            assert!(
                matches!(err, PlotError::Argument { option: "subplots", .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let huge = format!("{},2", usize::MAX);
        let err = config(&["--subplots", &huge]).unwrap_err();
        assert!(matches!(err, PlotError::Argument { option: "subplots", .. }), "{err}");
    }

    #[test]
    fn malformed_lists_are_rejected() {
        assert!(matches!(
            config(&["--figsize", "8"]).unwrap_err(),
            PlotError::Argument { option: "figsize", .. }
        ));
        assert!(matches!(
            config(&["--vertical-lines", "1,x"]).unwrap_err(),
            PlotError::Argument { option: "vertical-lines", .. }
        ));
        assert!(matches!(
            config(&["--file-factors", "1,,2"]).unwrap_err(),
            PlotError::Argument { option: "file-factors", .. }
        ));
        assert!(matches!(
            config(&["--columns", "1,two"]).unwrap_err(),
            PlotError::Argument { option: "columns", .. }
        ));
        assert!(matches!(
            config(&["--savefig", "figure.docx"]).unwrap_err(),
            PlotError::Argument { option: "savefig", .. }
        ));
        assert!(matches!(
            config(&["--column-factors", "abc"]).unwrap_err(),
            PlotError::Argument { option: "column-factors", .. }
        ));
    }
}
