use eframe::egui::Ui;
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints, VLine};

use crate::color::REFERENCE_LINE;
use crate::figure::{Figure, LegendCorner};

// ---------------------------------------------------------------------------
// Subplot grid (central panel)
// ---------------------------------------------------------------------------

/// Render every axes of `figure`, filling the available space row by row.
pub fn figure_grid(ui: &mut Ui, figure: &Figure) {
    let spacing = ui.spacing().item_spacing;
    let available = ui.available_size();
    let rows = figure.grid.rows as f32;
    let cols = figure.grid.cols as f32;
    let width = ((available.x - spacing.x * (cols - 1.0)) / cols).max(60.0);
    let height = ((available.y - spacing.y * (rows - 1.0)) / rows).max(60.0);

    for row in 0..figure.grid.rows {
        ui.horizontal(|ui: &mut Ui| {
            for col in 0..figure.grid.cols {
                axes_plot(ui, figure, row * figure.grid.cols + col, width, height);
            }
        });
    }
}

fn axes_plot(ui: &mut Ui, figure: &Figure, index: usize, width: f32, height: f32) {
    let ax = &figure.axes[index];
    let bounds = figure.view_bounds(index);
    let (xscale, yscale) = (figure.xscale, figure.yscale);

    let mut plot = Plot::new(("axes", index))
        .width(width)
        .height(height)
        .include_x(bounds.x.0)
        .include_x(bounds.x.1)
        .include_y(bounds.y.0)
        .include_y(bounds.y.1)
        .x_axis_formatter(move |mark, _range| xscale.format_tick(mark.value))
        .y_axis_formatter(move |mark, _range| yscale.format_tick(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if figure.legend {
        let corner = match figure.legend_corner(index) {
            LegendCorner::UpperRight => Corner::RightTop,
            LegendCorner::UpperLeft => Corner::LeftTop,
            LegendCorner::LowerLeft => Corner::LeftBottom,
            LegendCorner::LowerRight => Corner::RightBottom,
        };
        plot = plot.legend(Legend::default().position(corner));
    }
    if figure.sharex || figure.sharey {
        plot = plot.link_axis("shared_axes", [figure.sharex, figure.sharey]);
    }
    if let Some(label) = figure.x_label.as_deref().filter(|_| figure.is_bottom_row(index)) {
        plot = plot.x_axis_label(label);
    }
    if let Some(label) = figure.y_label.as_deref().filter(|_| figure.is_left_column(index)) {
        plot = plot.y_axis_label(label);
    }

    plot.show(ui, |plot_ui| {
        for series in &ax.series {
            let points: PlotPoints = series
                .plot_points(xscale, yscale)
                .into_iter()
                .map(|(x, y)| [x, y])
                .collect();

            let line = Line::new(points)
                .name(&series.label)
                .color(series.color.to_egui())
                .width(1.5);

            plot_ui.line(line);
        }

        for x in ax.vlines.iter().filter_map(|&v| xscale.forward(v)) {
            plot_ui.vline(VLine::new(x).color(REFERENCE_LINE.to_egui()));
        }
    });
}
