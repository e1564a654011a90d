//! Standalone demo application for the trail plugins.
//!
//! [`TrailDemoApp`] shows a point-drag chart and a freehand chart side by
//! side, with per-chart controls on the right and a log of the emitted
//! [`TrailEvent`]s at the bottom.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::TrailConfig;
use crate::events::{EventController, TrailEvent};
use crate::plugins::{FreehandTrail, PointDragTrail, DRAG_TRAIL_ID, FREEHAND_TRAIL_ID};

use super::TrailPane;

const EVENT_LOG_CAPACITY: usize = 200;

pub struct TrailDemoApp {
    pub panes: Vec<TrailPane>,
    rx: Receiver<TrailEvent>,
    log: VecDeque<String>,
    status: Option<String>,
}

impl TrailDemoApp {
    pub fn new(config: &TrailConfig) -> Self {
        let events = EventController::new();
        let rx = events.subscribe_all();

        let drag = PointDragTrail::new()
            .with_hit_radius(config.effective_hit_radius())
            .with_events(events.clone());
        let freehand = FreehandTrail::new().with_events(events);
        let panes = vec![
            TrailPane::new("Drag a point", drag, config.plugins.look_for(DRAG_TRAIL_ID)),
            TrailPane::new(
                "Draw a trail",
                freehand,
                config.plugins.look_for(FREEHAND_TRAIL_ID),
            ),
        ];

        Self {
            panes,
            rx,
            log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            status: None,
        }
    }

    /// Move pending events into the log, dropping the oldest entries.
    fn drain_events(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            if self.log.len() == EVENT_LOG_CAPACITY {
                self.log.pop_front();
            }
            self.log.push_back(ev.to_string());
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        for pane in &mut self.panes {
            egui::CollapsingHeader::new(pane.title.as_str())
                .default_open(true)
                .show(ui, |ui| {
                    if let Some(status) = pane.show_controls(ui) {
                        self.status = Some(status);
                    }
                });
            ui.separator();
        }
        if let Some(status) = &self.status {
            ui.label(status);
        }
    }

    fn render_event_log(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Events");
            if ui.small_button("Clear log").clicked() {
                self.log.clear();
            }
        });
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.log {
                    ui.monospace(line);
                }
            });
    }
}

impl eframe::App for TrailDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::SidePanel::right("trail_controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.render_controls(ui));

        egui::TopBottomPanel::bottom("trail_events")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| self.render_event_log(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let panes = &mut self.panes;
            ui.columns(panes.len(), |cols| {
                for (ui, pane) in cols.iter_mut().zip(panes.iter_mut()) {
                    ui.heading(pane.title.as_str());
                    pane.show_chart(ui);
                }
            });
        });
    }
}

impl Drop for TrailDemoApp {
    fn drop(&mut self) {
        for pane in &mut self.panes {
            pane.teardown();
        }
        tracing::debug!("trail demo torn down");
    }
}
