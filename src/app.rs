use eframe::egui;

use crate::error::Result;
use crate::figure::Figure;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FigureApp {
    pub figure: Figure,
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: figure title ----
        if let Some(title) = &self.figure.title {
            egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
                ui.vertical_centered(|ui| ui.heading(title));
            });
        }

        // ---- Central panel: subplot grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figure_grid(ui, &self.figure);
        });
    }
}

/// Open `figure` in a window; returns once the user closes it.
pub fn show_blocking(figure: Figure) -> Result<()> {
    let (width, height) = figure.size_px;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    let window_title = figure.title.clone().unwrap_or_else(|| "instaplot".to_string());

    log::info!("Showing figure ({} axes); close the window to exit", figure.axes.len());
    eframe::run_native(
        &window_title,
        options,
        Box::new(|_cc| Ok(Box::new(FigureApp { figure }))),
    )?;
    Ok(())
}
