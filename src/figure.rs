use crate::color::{generate_palette, Rgb};
use crate::config::{PlotConfig, SubplotGrid};
use crate::data::model::Datasets;
use crate::scale::Scale;

/// Fraction of the data span added on each side of an axis.
const MARGIN: f64 = 0.05;

// ---------------------------------------------------------------------------
// Figure model
// ---------------------------------------------------------------------------

/// One plotted line, in data units.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
}

impl Series {
    /// Points mapped into plot space; points the scales cannot show are dropped.
    pub fn plot_points(&self, xscale: Scale, yscale: Scale) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|&(x, y)| Some((xscale.forward(x)?, yscale.forward(y)?)))
            .collect()
    }
}

/// One subplot.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    pub row: usize,
    pub col: usize,
    pub series: Vec<Series>,
    /// x positions of vertical reference lines, in data units.
    pub vlines: Vec<f64>,
}

/// Plot-space limits of one axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

/// Where a legend sits inside its axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

/// Everything a renderer needs, passed explicitly instead of living in a
/// global "current figure".
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: Option<String>,
    pub grid: SubplotGrid,
    pub size_px: (u32, u32),
    /// Row-major, `grid.len()` entries.
    pub axes: Vec<Axes>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub legend: bool,
    pub sharex: bool,
    pub sharey: bool,
    pub xscale: Scale,
    pub yscale: Scale,
    pub tight_layout: bool,
}

impl Figure {
    /// Lay datasets out over the subplot grid.
    ///
    /// Axes and datasets are paired in order (axes row-major, datasets in
    /// load order); pairing stops at the shorter of the two.  Every selected
    /// column of a dataset becomes one series on its axes.
    pub fn build(datasets: &Datasets, columns: &[usize], config: &PlotConfig) -> Figure {
        let grid = config.subplots;
        let mut axes: Vec<Axes> = (0..grid.len())
            .map(|i| Axes {
                row: i / grid.cols,
                col: i % grid.cols,
                vlines: config.vertical_lines.clone(),
                ..Default::default()
            })
            .collect();

        if datasets.len() > axes.len() {
            let dropped: Vec<&str> = datasets.keys().split_off(axes.len());
            log::warn!(
                "{} subplot(s) for {} dataset(s); not plotting {}",
                axes.len(),
                datasets.len(),
                dropped.join(", ")
            );
        }

        let palette = generate_palette(columns.len().max(1));
        let labels = config.labels.as_deref().unwrap_or(&[]);
        let mut drawn = 0;

        for (ax, dataset) in axes.iter_mut().zip(datasets.iter()) {
            let x = dataset.x();
            for (slot, &col) in columns.iter().enumerate() {
                let label = labels
                    .get(drawn)
                    .filter(|l| !l.is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("{}:{col}", dataset.key));
                let points = x
                    .iter()
                    .zip(dataset.table.column(col).iter())
                    .map(|(&x, &y)| (x, y))
                    .collect();
                ax.series.push(Series {
                    label,
                    points,
                    color: palette[slot],
                });
                drawn += 1;
            }
        }

        if labels.len() > drawn {
            log::warn!("{} label(s) given for {drawn} series", labels.len());
        }

        Figure {
            title: config.title.clone(),
            grid,
            size_px: config.size_px(),
            tight_layout: axes.len() > 1,
            axes,
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            legend: config.labels.is_some(),
            sharex: config.sharex,
            sharey: config.sharey,
            xscale: config.xscale,
            yscale: config.yscale,
        }
    }

    pub fn is_bottom_row(&self, index: usize) -> bool {
        self.axes[index].row + 1 == self.grid.rows
    }

    pub fn is_left_column(&self, index: usize) -> bool {
        self.axes[index].col == 0
    }

    /// The corner of axes `index` whose quadrant holds the fewest plotted
    /// points.  Ties go to the earlier corner, upper right first.
    pub fn legend_corner(&self, index: usize) -> LegendCorner {
        const CORNERS: [LegendCorner; 4] = [
            LegendCorner::UpperRight,
            LegendCorner::UpperLeft,
            LegendCorner::LowerLeft,
            LegendCorner::LowerRight,
        ];

        let Bounds { x, y } = self.view_bounds(index);
        let (x_mid, y_mid) = ((x.0 + x.1) / 2.0, (y.0 + y.1) / 2.0);
        let mut crowding = [0usize; 4];
        for series in &self.axes[index].series {
            for (px, py) in series.plot_points(self.xscale, self.yscale) {
                let quadrant = match (py >= y_mid, px >= x_mid) {
                    (true, true) => 0,
                    (true, false) => 1,
                    (false, false) => 2,
                    (false, true) => 3,
                };
                crowding[quadrant] += 1;
            }
        }

        (0..CORNERS.len())
            .min_by_key(|&i| crowding[i])
            .map_or(LegendCorner::UpperRight, |i| CORNERS[i])
    }

    /// Plot-space view limits of axes `index`, padded by a small margin.
    ///
    /// Shared axes use the extent of every subplot.  Vertical lines widen the
    /// x extent so they stay visible.
    pub fn view_bounds(&self, index: usize) -> Bounds {
        let own = self.data_extent(&self.axes[index]);
        let mut x = own.0;
        let mut y = own.1;
        if self.sharex || self.sharey {
            for ax in &self.axes {
                let (ax_x, ax_y) = self.data_extent(ax);
                if self.sharex {
                    x = merge(x, ax_x);
                }
                if self.sharey {
                    y = merge(y, ax_y);
                }
            }
        }
        Bounds {
            x: pad(x),
            y: pad(y),
        }
    }

    fn data_extent(&self, ax: &Axes) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        let mut x = None;
        let mut y = None;
        for series in &ax.series {
            for (px, py) in series.plot_points(self.xscale, self.yscale) {
                x = merge(x, Some((px, px)));
                y = merge(y, Some((py, py)));
            }
        }
        for &v in &ax.vlines {
            if let Some(px) = self.xscale.forward(v) {
                x = merge(x, Some((px, px)));
            }
        }
        (x, y)
    }
}

fn merge(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((a0, a1)), Some((b0, b1))) => Some((a0.min(b0), a1.max(b1))),
        (a, None) => a,
        (None, b) => b,
    }
}

fn pad(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((lo, hi)) if hi - lo <= f64::EPSILON * lo.abs().max(1.0) => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let margin = (hi - lo) * MARGIN;
            (lo - margin, hi + margin)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ndarray::array;

    use super::*;
    use crate::cli::Args;
    use crate::data::model::Dataset;

    fn config(argv: &[&str]) -> PlotConfig {
        let mut full = vec!["instaplot", "a.txt"];
        full.extend_from_slice(argv);
        PlotConfig::from_args(&Args::try_parse_from(full).unwrap()).unwrap()
    }

    fn two_files() -> Datasets {
        Datasets::from_entries(vec![
            Dataset::new("a.txt", array![[0.0, 1.0, 10.0], [1.0, 2.0, 20.0]]).unwrap(),
            Dataset::new("b.txt", array![[0.0, 3.0, 30.0], [2.0, 4.0, 40.0]]).unwrap(),
        ])
    }

    #[test]
    fn datasets_fill_axes_in_row_major_order() {
        let fig = Figure::build(&two_files(), &[1, 2], &config(&["--subplots", "1,2"]));
        assert_eq!(fig.axes.len(), 2);
        assert_eq!((fig.axes[1].row, fig.axes[1].col), (0, 1));
        assert_eq!(fig.axes[0].series.len(), 2);
        assert_eq!(fig.axes[0].series[0].label, "a.txt:1");
        assert_eq!(fig.axes[1].series[1].label, "b.txt:2");
        assert_eq!(fig.axes[1].series[1].points, vec![(0.0, 30.0), (2.0, 40.0)]);
        assert!(fig.tight_layout);
        assert!(!fig.legend);
    }

    #[test]
    fn extra_datasets_are_not_plotted() {
        let fig = Figure::build(&two_files(), &[1], &config(&[]));
        assert_eq!(fig.axes.len(), 1);
        assert_eq!(fig.axes[0].series.len(), 1);
        assert_eq!(fig.axes[0].series[0].label, "a.txt:1");
        assert!(!fig.tight_layout);
    }

    #[test]
    fn extra_axes_stay_empty() {
        let fig = Figure::build(&two_files(), &[1], &config(&["--subplots", "2,2"]));
        assert_eq!(fig.axes.len(), 4);
        assert!(fig.axes[2].series.is_empty());
        assert!(fig.is_bottom_row(2));
        assert!(fig.is_left_column(2));
        assert!(!fig.is_left_column(3));
        assert_eq!(fig.view_bounds(3), Bounds { x: (0.0, 1.0), y: (0.0, 1.0) });
    }

    #[test]
    fn labels_are_threaded_into_series() {
        let cfg = config(&["--subplots", "1,2", "--labels", "alpha,,gamma"]);
        let fig = Figure::build(&two_files(), &[1, 2], &cfg);
        assert!(fig.legend);
        let names: Vec<&str> = fig
            .axes
            .iter()
            .flat_map(|ax| ax.series.iter().map(|s| s.label.as_str()))
            .collect();
        assert_eq!(names, vec!["alpha", "a.txt:2", "gamma", "b.txt:2"]);
    }

    #[test]
    fn vertical_lines_reach_every_axes_and_widen_x() {
        let cfg = config(&["--subplots", "2,1", "--vertical-lines", "5"]);
        let fig = Figure::build(&two_files(), &[1], &cfg);
        assert!(fig.axes.iter().all(|ax| ax.vlines == vec![5.0]));
        let bounds = fig.view_bounds(0);
        assert!(bounds.x.0 < 0.0 && bounds.x.1 > 5.0);
    }

    #[test]
    fn shared_axes_use_the_common_extent() {
        let unshared = Figure::build(&two_files(), &[1], &config(&["--subplots", "1,2"]));
        assert!(unshared.view_bounds(0).x.1 < 2.0);

        let cfg = config(&["--subplots", "1,2", "--sharex", "--sharey"]);
        let fig = Figure::build(&two_files(), &[1], &cfg);
        assert_eq!(fig.view_bounds(0), fig.view_bounds(1));
        let bounds = fig.view_bounds(0);
        assert!(bounds.x.1 > 2.0);
        assert!(bounds.y.0 < 1.0 && bounds.y.1 > 4.0);
    }

    #[test]
    fn legend_avoids_the_crowded_corner() {
        // Rising line: upper right and lower left are occupied.
        let rising = Datasets::from_entries(vec![Dataset::new(
            "up.txt",
            array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]],
        )
        .unwrap()]);
        let fig = Figure::build(&rising, &[1], &config(&["--labels", "up"]));
        assert_eq!(fig.legend_corner(0), LegendCorner::UpperLeft);

        // Step up to a plateau: only the lower right is free.
        let plateau = Datasets::from_entries(vec![Dataset::new(
            "plateau.txt",
            array![[0.0, 0.0], [1.0, 3.0], [2.0, 3.0], [3.0, 3.0]],
        )
        .unwrap()]);
        let fig = Figure::build(&plateau, &[1], &config(&[]));
        assert_eq!(fig.legend_corner(0), LegendCorner::LowerRight);

        let empty = Figure::build(&plateau, &[1], &config(&["--subplots", "1,2"]));
        assert_eq!(empty.legend_corner(1), LegendCorner::UpperRight);
    }

    #[test]
    fn log_axes_skip_non_positive_points() {
        let datasets = Datasets::from_entries(vec![Dataset::new(
            "a.txt",
            array![[0.0, 1.0], [1.0, 10.0], [2.0, 100.0]],
        )
        .unwrap()]);
        let fig = Figure::build(&datasets, &[1], &config(&["--xscale", "log", "--yscale", "log"]));
        let points = fig.axes[0].series[0].plot_points(fig.xscale, fig.yscale);
        assert_eq!(points.len(), 2);
        assert!((points[1].1 - 2.0).abs() < 1e-12);
    }
}
