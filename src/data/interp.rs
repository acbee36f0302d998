use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Piecewise-linear interpolation of all y-columns
// ---------------------------------------------------------------------------

/// Linear interpolator over one table's x column.
///
/// Samples are sorted by x on construction, so input tables need not be
/// monotonic.  Evaluation outside `[min x, max x]` is an error rather than
/// an extrapolation.
#[derive(Debug, Clone)]
pub struct Interpolator {
    xs: Vec<f64>,
    /// y-columns (1..ncols) of the sorted rows.
    ys: Array2<f64>,
}

impl Interpolator {
    pub fn new(key: &str, table: &Array2<f64>) -> Result<Self> {
        if table.nrows() < 2 {
            return Err(PlotError::TooFewRows {
                key: key.to_string(),
                found: table.nrows(),
            });
        }

        let mut order: Vec<usize> = (0..table.nrows()).collect();
        order.sort_by(|&a, &b| table[[a, 0]].total_cmp(&table[[b, 0]]));

        let xs = order.iter().map(|&r| table[[r, 0]]).collect();
        let ys = table.select(Axis(0), &order).slice_move(ndarray::s![.., 1..]);
        Ok(Interpolator { xs, ys })
    }

    /// Number of y-columns produced per evaluation.
    pub fn width(&self) -> usize {
        self.ys.ncols()
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// All y-columns at a single x.
    pub fn eval(&self, x: f64) -> Result<Array1<f64>> {
        let (lo, hi) = self.domain();
        if !(x >= lo && x <= hi) {
            return Err(PlotError::OutOfBounds { x, lo, hi });
        }

        // First sample with xs[idx] >= x; clamp so idx - 1 is a valid left bracket.
        let idx = self.xs.partition_point(|&v| v < x).max(1);
        let (x0, x1) = (self.xs[idx - 1], self.xs[idx]);
        let y0 = self.ys.row(idx - 1);
        let y1 = self.ys.row(idx);
        if x1 == x0 {
            return Ok(y1.to_owned());
        }
        let t = (x - x0) / (x1 - x0);
        Ok(&y0 + &((&y1 - &y0) * t))
    }

    /// Evaluate at every point of `grid`: one output row per grid point.
    pub fn eval_grid(&self, grid: ArrayView1<'_, f64>) -> Result<Array2<f64>> {
        let mut out = Array2::zeros((grid.len(), self.width()));
        for (mut row, &x) in out.rows_mut().into_iter().zip(grid.iter()) {
            row.assign(&self.eval(x)?);
        }
        Ok(out)
    }
}
