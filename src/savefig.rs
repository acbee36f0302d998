use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::REFERENCE_LINE;
use crate::error::{PlotError, Result};
use crate::figure::{Figure, LegendCorner};

// ---------------------------------------------------------------------------
// Figure files
// ---------------------------------------------------------------------------

/// File formats a figure can be saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureFormat {
    Raster(ImageFormat),
    Svg,
}

impl FigureFormat {
    /// Pick the format from the extension: `.png`, `.jpg`/`.jpeg` and `.bmp`
    /// are raster, `.svg` is vector.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "svg" => Ok(FigureFormat::Svg),
            "png" => Ok(FigureFormat::Raster(ImageFormat::Png)),
            "jpg" | "jpeg" => Ok(FigureFormat::Raster(ImageFormat::Jpeg)),
            "bmp" => Ok(FigureFormat::Raster(ImageFormat::Bmp)),
            other => Err(PlotError::argument(
                "savefig",
                format!("unsupported file extension '.{other}' (use png, jpg, bmp or svg)"),
            )),
        }
    }
}

/// Write `figure` to `path` in the format its extension names.
///
/// The figure is rendered in memory first; `path` is only touched once the
/// whole figure has been drawn and encoded.
pub fn save_figure(figure: &Figure, path: &Path) -> Result<()> {
    let bytes = match FigureFormat::from_path(path)? {
        FigureFormat::Svg => render_svg(figure)?.into_bytes(),
        FigureFormat::Raster(format) => render_raster(figure, format)?,
    };

    std::fs::write(path, bytes).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Saved figure to {}", path.display());
    Ok(())
}

pub fn render_svg(figure: &Figure) -> Result<String> {
    let mut svg = String::new();
    draw_figure(figure, SVGBackend::with_string(&mut svg, figure.size_px).into_drawing_area())?;
    Ok(svg)
}

/// Render to an RGB pixel buffer and encode it as `format`.
pub fn render_raster(figure: &Figure, format: ImageFormat) -> Result<Vec<u8>> {
    let (width, height) = figure.size_px;
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    draw_figure(
        figure,
        BitMapBackend::with_buffer(&mut pixels, figure.size_px).into_drawing_area(),
    )?;

    let image = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| PlotError::Render(format!("pixel buffer does not fit {width}x{height}")))?;
    let mut encoded = Cursor::new(Vec::new());
    image.write_to(&mut encoded, format)?;
    Ok(encoded.into_inner())
}

/// Draw every axes of `figure` onto `root`.
pub fn draw_figure<DB: DrawingBackend>(figure: &Figure, root: DrawingArea<DB, Shift>) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let body = match &figure.title {
        Some(title) => root.titled(title, ("sans-serif", 22))?,
        None => root.clone(),
    };

    let panels = body.split_evenly((figure.grid.rows, figure.grid.cols));
    for (index, panel) in panels.iter().enumerate() {
        draw_axes(figure, index, panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_axes<DB: DrawingBackend>(
    figure: &Figure,
    index: usize,
    area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let ax = &figure.axes[index];
    let bounds = figure.view_bounds(index);
    let (xscale, yscale) = (figure.xscale, figure.yscale);

    let margin = if figure.tight_layout { 5 } else { 15 };
    let mut chart = ChartBuilder::on(area)
        .margin(margin)
        .x_label_area_size(if figure.x_label.is_some() { 45 } else { 30 })
        .y_label_area_size(if figure.y_label.is_some() { 65 } else { 50 })
        .build_cartesian_2d(bounds.x.0..bounds.x.1, bounds.y.0..bounds.y.1)?;

    let x_ticks = |v: &f64| xscale.format_tick(*v);
    let y_ticks = |v: &f64| yscale.format_tick(*v);
    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(BLACK.mix(0.05))
        .x_label_formatter(&x_ticks)
        .y_label_formatter(&y_ticks)
        .axis_desc_style(("sans-serif", 16));
    if let Some(label) = figure.x_label.as_deref().filter(|_| figure.is_bottom_row(index)) {
        mesh.x_desc(label);
    }
    if let Some(label) = figure.y_label.as_deref().filter(|_| figure.is_left_column(index)) {
        mesh.y_desc(label);
    }
    mesh.draw()?;

    for series in &ax.series {
        let color = series.color.to_plotters();
        let drawn = chart.draw_series(LineSeries::new(
            series.plot_points(xscale, yscale),
            color.stroke_width(2),
        ))?;
        if figure.legend {
            drawn
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    let line_color = REFERENCE_LINE.to_plotters();
    for x in ax.vlines.iter().filter_map(|&v| xscale.forward(v)) {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, bounds.y.0), (x, bounds.y.1)],
            line_color.stroke_width(1),
        )))?;
    }

    if figure.legend && !ax.series.is_empty() {
        chart
            .configure_series_labels()
            .position(match figure.legend_corner(index) {
                LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
                LegendCorner::UpperLeft => SeriesLabelPosition::UpperLeft,
                LegendCorner::LowerLeft => SeriesLabelPosition::LowerLeft,
                LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
            })
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()?;
    }
    Ok(())
}
