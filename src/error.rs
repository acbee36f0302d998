use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can stop a plotting run.  None of these are recovered
/// from: the first one aborts the run before any figure is shown or saved.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Malformed option value (comma lists, token counts, unknown formats).
    #[error("invalid --{option}: {message}")]
    Argument {
        option: &'static str,
        message: String,
    },

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Every source of one invocation must have the same column count.
    #[error(
        "mismatching number of columns: {} has {found}, expected {expected}",
        path.display()
    )]
    ColumnMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("{}: need an x column and at least one y column, found {found} column(s)", path.display())]
    TooFewColumns { path: PathBuf, found: usize },

    #[error("{key}: linear interpolation needs at least two rows, found {found}")]
    TooFewRows { key: String, found: usize },

    /// Interpolation requested outside the sampled x-range of a dataset.
    #[error("x = {x} is outside the interpolation range [{lo}, {hi}]")]
    OutOfBounds { x: f64, lo: f64, hi: f64 },

    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    #[error("failed to render figure: {0}")]
    Render(String),
}

impl PlotError {
    pub fn argument(option: &'static str, message: impl Into<String>) -> Self {
        PlotError::Argument {
            option,
            message: message.into(),
        }
    }
}

impl<E: std::error::Error + Send + Sync + 'static>
    From<plotters::drawing::DrawingAreaErrorKind<E>> for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(value.to_string())
    }
}

impl From<image::ImageError> for PlotError {
    fn from(value: image::ImageError) -> Self {
        PlotError::Render(value.to_string())
    }
}

impl From<eframe::Error> for PlotError {
    fn from(value: eframe::Error) -> Self {
        PlotError::Render(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
