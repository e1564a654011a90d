//! A single demo chart: chart model, its plugins and the controls next to it.

use std::path::Path;

use eframe::egui;
use egui_phosphor::regular::{BROOM, FLOPPY_DISK, FOLDER_OPEN};

use crate::chart::Chart;
use crate::config::{PluginOptions, TrailOptions};
use crate::data::trail_look::TrailLook;
use crate::host::{ChartHost, DataPoint};
use crate::persistence::{self, PersistenceError, TrailSnapshot};
use crate::plugin::{ChartPlugin, PluginRegistry};
use crate::view::ChartView;

/// Ten points of a damped wave spread over `0..=100` on both axes.
pub fn sample_series() -> Vec<DataPoint> {
    (0..10)
        .map(|i| {
            let x = 5.0 + i as f64 * 10.0;
            let y = 50.0 + 35.0 * (x / 12.0).sin() * (-x / 150.0).exp();
            DataPoint::new(x, y)
        })
        .collect()
}

pub struct TrailPane {
    pub title: String,
    plot_id: String,
    plugin_id: &'static str,
    pub chart: Chart,
    pub registry: PluginRegistry,
    pub look: TrailLook,
    options: PluginOptions,
}

impl TrailPane {
    /// Build a chart with the sample dataset and attach `plugin` to it.
    pub fn new(title: impl Into<String>, plugin: impl ChartPlugin, look: TrailLook) -> Self {
        let title = title.into();
        let plugin_id = plugin.id();
        let mut chart = Chart::new((0.0, 100.0), (0.0, 100.0), egui::vec2(400.0, 300.0));
        chart.push_dataset("samples", sample_series());
        let mut registry = PluginRegistry::new().with(plugin);
        registry.init(&mut chart);

        let mut options = PluginOptions::default();
        options.set(plugin_id, TrailOptions::from_look(&look));
        Self {
            plot_id: format!("trail_plot_{plugin_id}"),
            title,
            plugin_id,
            chart,
            registry,
            look,
            options,
        }
    }

    pub fn plugin_id(&self) -> &'static str {
        self.plugin_id
    }

    pub fn set_look(&mut self, look: TrailLook) {
        self.look = look;
        self.options
            .set(self.plugin_id, TrailOptions::from_look(&self.look));
    }

    /// Plot area of the pane.
    pub fn show_chart(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ChartView::new(&self.plot_id).show(ui, &mut self.chart, &mut self.registry, &self.options)
    }

    /// Clear, save, load and the style editor. Returns a status line after
    /// a save or load.
    pub fn show_controls(&mut self, ui: &mut egui::Ui) -> Option<String> {
        let mut status = None;
        ui.horizontal(|ui| {
            if ui.button(format!("{BROOM} Clear")).clicked() {
                self.registry.clear_trail(self.plugin_id, &mut self.chart);
            }
            if ui.button(format!("{FLOPPY_DISK} Save")).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name(format!("{}.json", self.plugin_id))
                    .add_filter("JSON", &["json"])
                    .save_file()
                {
                    status = Some(match self.save(&path) {
                        Ok(()) => format!("Saved {} trail to {}", self.title, path.display()),
                        Err(e) => format!("Save failed: {e}"),
                    });
                }
            }
            if ui.button(format!("{FOLDER_OPEN} Load")).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                {
                    status = Some(match self.load(&path) {
                        Ok(()) => format!("Loaded {} trail from {}", self.title, path.display()),
                        Err(e) => format!("Load failed: {e}"),
                    });
                }
            }
        });

        let trail_len = self
            .registry
            .by_id(self.plugin_id)
            .map_or(0, |p| p.trail(self.chart.id()).len());
        ui.label(format!("Trail points: {trail_len}"));

        let mut look = self.look;
        if look.render_editor(ui, Some("Trail style")) {
            self.set_look(look);
        }
        status
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let snapshot = TrailSnapshot::capture(&self.registry, self.plugin_id, &self.chart, &self.look)?;
        persistence::save_snapshot(&snapshot, path)
    }

    pub fn load(&mut self, path: &Path) -> Result<(), PersistenceError> {
        let snapshot = persistence::load_snapshot(path)?;
        let look = snapshot.restore_into(&mut self.registry, &mut self.chart)?;
        self.set_look(look);
        Ok(())
    }

    /// Detach every plugin from the chart.
    pub fn teardown(&mut self) {
        self.registry.destroy(&mut self.chart);
    }
}
