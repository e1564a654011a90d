//! TrailLook: visual styling for trail overlays.

use eframe::egui;

/// Default fill of a trail marker (`#c7c7c7`).
pub const DEFAULT_FILL: egui::Color32 = egui::Color32::from_rgb(0xc7, 0xc7, 0xc7);
/// Default border of a trail marker and of the connecting line (`#9c9c9c`).
pub const DEFAULT_BORDER: egui::Color32 = egui::Color32::from_rgb(0x9c, 0x9c, 0x9c);
pub const DEFAULT_BORDER_WIDTH: f32 = 1.0;
pub const DEFAULT_RADIUS: f32 = 3.0;

/// How trail markers (and the freehand connecting line) are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailLook {
    pub fill: egui::Color32,
    pub border: egui::Color32,
    pub border_width: f32,
    pub radius: f32,
}

impl Default for TrailLook {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL,
            border: DEFAULT_BORDER,
            border_width: DEFAULT_BORDER_WIDTH,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl TrailLook {
    /// Render an inline editor. Returns `true` if any value changed.
    ///
    /// `label_prefix` names the section (e.g. the plugin the look belongs to).
    pub fn render_editor(&mut self, ui: &mut egui::Ui, label_prefix: Option<&str>) -> bool {
        let before = *self;
        if let Some(p) = label_prefix {
            ui.strong(p);
        }
        ui.horizontal(|ui| {
            ui.label("Fill");
            ui.color_edit_button_srgba(&mut self.fill);
            ui.label("Border");
            ui.color_edit_button_srgba(&mut self.border);
        });
        ui.horizontal(|ui| {
            ui.label("Border width");
            ui.add(
                egui::DragValue::new(&mut self.border_width)
                    .range(0.1..=10.0)
                    .speed(0.1),
            );
            ui.label("Radius");
            ui.add(
                egui::DragValue::new(&mut self.radius)
                    .range(0.5..=20.0)
                    .speed(0.1),
            )
            .on_hover_text("Marker radius in pixels");
        });
        if ui.small_button("Reset").clicked() {
            *self = Self::default();
        }
        *self != before
    }
}
