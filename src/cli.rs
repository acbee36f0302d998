use std::path::PathBuf;

use clap::Parser;

use crate::scale::Scale;

/// Plot whitespace-delimited numeric tables.
///
/// Options that take a value also accept the literal `None`, meaning
/// "not given".
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Data files: column 0 is x, the remaining columns are y-series
    #[arg(value_name = "SOURCE", required = true, num_args = 1..)]
    pub sources: Vec<PathBuf>,

    /// Figure title
    #[arg(long)]
    pub title: Option<String>,

    /// Label of the x axis
    #[arg(long)]
    pub xlabel: Option<String>,

    /// Label of the y axis
    #[arg(long)]
    pub ylabel: Option<String>,

    /// Write the figure to this file instead of opening a window
    #[arg(long, value_name = "PATH")]
    pub savefig: Option<String>,

    /// Comma-separated x positions of vertical reference lines
    #[arg(long, value_name = "F,F,...")]
    pub vertical_lines: Option<String>,

    /// Comma-separated legend labels, in drawing order (enables the legend)
    #[arg(long)]
    pub labels: Option<String>,

    #[arg(long, value_enum, default_value_t = Scale::Linear)]
    pub xscale: Scale,

    #[arg(long, value_enum, default_value_t = Scale::Linear)]
    pub yscale: Scale,

    /// Subplot grid as ROWS,COLS
    #[arg(long, default_value = "1,1", value_name = "R,C")]
    pub subplots: String,

    /// Marker cycle (accepted for compatibility, not drawn)
    #[arg(long, default_value = "osdv*")]
    pub markers: String,

    /// Per-column weights for column combination
    #[arg(long, value_name = "F,F,...")]
    pub column_factors: Option<String>,

    /// `all` or comma-separated 1-based y-column indices
    #[arg(long, default_value = "all", value_name = "all|I,I,...")]
    pub columns: String,

    /// Per-file weights: plot the weighted sum of all files on the first file's x grid
    #[arg(long, value_name = "F,F,...")]
    pub file_factors: Option<String>,

    /// Share the x axis between subplots
    #[arg(long, default_value_t = false, num_args = 0..=1, default_missing_value = "true")]
    pub sharex: bool,

    /// Share the y axis between subplots
    #[arg(long, default_value_t = false, num_args = 0..=1, default_missing_value = "true")]
    pub sharey: bool,

    /// Figure size in inches as W,H
    #[arg(long, value_name = "W,H")]
    pub figsize: Option<String>,

    /// Pixels per inch used to convert the figure size
    #[arg(long, default_value_t = 100.0)]
    pub dpi: f64,

    /// Write the (combined) table that would be plotted to this file
    #[arg(long, value_name = "PATH")]
    pub dump: Option<PathBuf>,
}
