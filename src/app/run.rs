//! Top-level entry point for running the trail demo as a native window.

use eframe::egui;

use crate::config::TrailConfig;

use super::TrailDemoApp;

/// Launch the demo in a native window. Blocks until the window is closed.
pub fn run_demo(config: TrailConfig) -> eframe::Result<()> {
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("plottrail")
            .with_inner_size(egui::vec2(1200.0, 720.0)),
        ..Default::default()
    };

    tracing::info!(
        hit_radius = config.effective_hit_radius(),
        plugins = config.plugins.0.len(),
        "starting trail demo"
    );
    eframe::run_native(
        "plottrail",
        opts,
        Box::new(move |cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(TrailDemoApp::new(&config)))
        }),
    )
}
