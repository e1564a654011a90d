//! egui frontend: show a [`Chart`] in an `egui_plot::Plot` and feed its plugins.
//!
//! Each frame the view
//! - pins the plot bounds to the chart's axes (the plot itself never pans or zooms)
//! - stretches the chart's scales over the plot frame
//! - turns egui pointer input into [`PointerEvent`]s and dispatches them
//! - paints the plugin overlays below the datasets

use egui::{Event, PointerButton, Rect, Shape};
use egui_plot::{Legend, Line, Plot, Points};

use crate::chart::Chart;
use crate::config::PluginOptions;
use crate::draw::ShapeRecorder;
use crate::events::PointerEvent;
use crate::host::ChartHost;
use crate::plugin::PluginRegistry;

/// Translate one egui input event into a chart pointer event.
///
/// Presses and moves only count inside `surface`; a primary release is
/// forwarded wherever it happens so a gesture can always end.
pub fn pointer_event_from_egui(event: &Event, surface: Rect) -> Option<PointerEvent> {
    match event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: true,
            ..
        } if surface.contains(*pos) => Some(PointerEvent::down(*pos)),
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: false,
            ..
        } => Some(PointerEvent::up(*pos)),
        Event::PointerMoved(pos) if surface.contains(*pos) => Some(PointerEvent::moved(*pos)),
        _ => None,
    }
}

pub struct ChartView<'a> {
    plot_id: &'a str,
}

impl<'a> ChartView<'a> {
    pub fn new(plot_id: &'a str) -> Self {
        Self { plot_id }
    }

    pub fn show(
        self,
        ui: &mut egui::Ui,
        chart: &mut Chart,
        registry: &mut PluginRegistry,
        options: &PluginOptions,
    ) -> egui::Response {
        // Reserved before the plot so the overlay ends up underneath the datasets.
        let overlay_slot = ui.painter().add(Shape::Noop);

        let x_range = chart.x_axis().range();
        let y_range = chart.y_axis().range();
        let plot = Plot::new(self.plot_id)
            .legend(Legend::default())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_background(false);

        let plot_resp = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x_range);
            plot_ui.set_plot_bounds_y(y_range);
            for ds in chart.datasets() {
                let pts: Vec<[f64; 2]> = ds.data.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.line(Line::new(&ds.label, pts.clone()).color(ds.color));
                plot_ui.points(
                    Points::new(&ds.label, pts)
                        .radius(4.0)
                        .filled(true)
                        .color(ds.color),
                );
            }
        });

        let frame = *plot_resp.transform.frame();
        chart.resize(frame);

        let events: Vec<PointerEvent> = ui.input(|i| {
            i.events
                .iter()
                .filter_map(|e| pointer_event_from_egui(e, frame))
                .collect()
        });
        for event in &events {
            registry.dispatch(chart, event);
        }
        if let Some(mode) = chart.take_redraw() {
            tracing::trace!(chart = %chart.id(), ?mode, "redraw requested");
            ui.ctx().request_repaint();
        }

        let mut recorder = ShapeRecorder::new(frame.min);
        registry.draw(chart, &mut recorder, options);
        ui.painter()
            .with_clip_rect(frame)
            .set(overlay_slot, Shape::Vec(recorder.into_shapes()));

        plot_resp.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, Modifiers};

    fn surface() -> Rect {
        Rect::from_min_max(pos2(100.0, 100.0), pos2(300.0, 200.0))
    }

    fn button(pos: egui::Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn press_inside_surface_starts_a_gesture() {
        let ev = pointer_event_from_egui(&button(pos2(150.0, 150.0), true), surface());
        assert_eq!(ev, Some(PointerEvent::down(pos2(150.0, 150.0))));
    }

    #[test]
    fn press_outside_surface_is_ignored() {
        assert_eq!(pointer_event_from_egui(&button(pos2(10.0, 10.0), true), surface()), None);
    }

    #[test]
    fn release_is_forwarded_anywhere() {
        let ev = pointer_event_from_egui(&button(pos2(10.0, 10.0), false), surface());
        assert_eq!(ev, Some(PointerEvent::up(pos2(10.0, 10.0))));
    }

    #[test]
    fn secondary_button_is_ignored() {
        let ev = Event::PointerButton {
            pos: pos2(150.0, 150.0),
            button: PointerButton::Secondary,
            pressed: true,
            modifiers: Modifiers::default(),
        };
        assert_eq!(pointer_event_from_egui(&ev, surface()), None);
    }

    #[test]
    fn moves_only_inside_surface() {
        let inside = Event::PointerMoved(pos2(120.0, 180.0));
        let outside = Event::PointerMoved(pos2(400.0, 180.0));
        assert_eq!(
            pointer_event_from_egui(&inside, surface()),
            Some(PointerEvent::moved(pos2(120.0, 180.0)))
        );
        assert_eq!(pointer_event_from_egui(&outside, surface()), None);
    }
}
