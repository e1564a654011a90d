//! Freehand trail: press and move the pointer to draw a trail of points.

use std::collections::HashMap;

use crate::canvas::ListenerSet;
use crate::data::trail::TrailPoint;
use crate::data::trail_look::TrailLook;
use crate::draw::DrawContext;
use crate::events::{
    relative_position, EventController, PointerEvent, PointerKind, TrailEvent, TrailEventKind,
};
use crate::host::{ChartHost, ChartId, UpdateMode};
use crate::plugin::ChartPlugin;

use super::overlay;

pub const FREEHAND_TRAIL_ID: &str = "trail";

/// Per-chart state of [`FreehandTrail`].
#[derive(Debug, Clone, Default)]
pub struct FreehandState {
    pub drawing: bool,
    /// Points of the current (or last finished) gesture.
    pub trail: Vec<TrailPoint>,
    listeners: Option<ListenerSet>,
}

/// Draws a trail wherever the pointer moves while the button is held.
///
/// Each pointer-down starts a new trail; the finished trail stays visible
/// until the next gesture or an explicit clear. Points are painted as
/// circles connected by a polyline in capture order.
#[derive(Default)]
pub struct FreehandTrail {
    states: HashMap<ChartId, FreehandState>,
    events: Option<EventController>,
}

impl FreehandTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(mut self, events: EventController) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self, chart: ChartId) -> Option<&FreehandState> {
        self.states.get(&chart)
    }

    fn emit(&self, event: TrailEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }

    /// Convert the event to data space, append it and redraw without animation.
    fn capture(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent, kinds: TrailEventKind) {
        let id = chart.id();
        let pos = relative_position(chart, event);
        let value = chart.value_for(pos);
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        state.trail.push(value);
        let trail_len = state.trail.len();
        tracing::trace!(chart = %id, x = value.x, y = value.y, trail_len, "trail point captured");

        chart.update(UpdateMode::None);
        self.emit(
            TrailEvent::new(kinds | TrailEventKind::POINT_CAPTURED, FREEHAND_TRAIL_ID, id)
                .with_pixel(pos)
                .with_value(value)
                .with_trail_len(trail_len),
        );
    }

    fn pointer_down(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent) {
        let id = chart.id();
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        state.trail.clear();
        state.drawing = true;
        tracing::debug!(chart = %id, "freehand gesture started");
        self.capture(chart, event, TrailEventKind::GESTURE_STARTED);
    }

    fn pointer_move(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent) {
        if !self.is_active(chart.id()) {
            return;
        }
        self.capture(chart, event, TrailEventKind::empty());
    }

    fn pointer_up(&mut self, chart: &mut dyn ChartHost) {
        let id = chart.id();
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        let was_drawing = state.drawing;
        state.drawing = false;
        let trail_len = state.trail.len();
        if was_drawing {
            tracing::debug!(chart = %id, trail_len, "freehand gesture ended");
            self.emit(
                TrailEvent::new(TrailEventKind::GESTURE_ENDED, FREEHAND_TRAIL_ID, id)
                    .with_trail_len(trail_len),
            );
        }
    }
}

impl ChartPlugin for FreehandTrail {
    fn id(&self) -> &'static str {
        FREEHAND_TRAIL_ID
    }

    fn on_attach(&mut self, chart: &mut dyn ChartHost) {
        let id = chart.id();
        if self.states.contains_key(&id) {
            tracing::warn!(chart = %id, "freehand trail already attached");
            return;
        }
        let listeners = chart
            .canvas_mut()
            .map(|canvas| ListenerSet::install(canvas, FREEHAND_TRAIL_ID));
        if listeners.is_none() {
            tracing::warn!(chart = %id, "chart has no canvas; pointer input disabled");
        }
        self.states.insert(
            id,
            FreehandState {
                listeners,
                ..FreehandState::default()
            },
        );
        tracing::debug!(chart = %id, "freehand trail attached");
        self.emit(TrailEvent::new(TrailEventKind::ATTACHED, FREEHAND_TRAIL_ID, id));
    }

    fn on_pointer(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent) {
        if !self.states.contains_key(&chart.id()) {
            tracing::warn!(chart = %chart.id(), "pointer event for a chart without trail state");
            return;
        }
        match event.kind {
            PointerKind::Down => self.pointer_down(chart, event),
            PointerKind::Move => self.pointer_move(chart, event),
            PointerKind::Up => self.pointer_up(chart),
        }
    }

    fn on_before_draw(&self, chart: &dyn ChartHost, ctx: &mut dyn DrawContext, look: &TrailLook) {
        let points = self.trail(chart.id());
        if points.is_empty() {
            return;
        }
        ctx.save();
        overlay::paint_markers(chart, ctx, points, look);
        overlay::paint_polyline(chart, ctx, points, look);
        ctx.restore();
    }

    fn on_detach(&mut self, chart: &mut dyn ChartHost) {
        let id = chart.id();
        let Some(state) = self.states.remove(&id) else {
            return;
        };
        if let (Some(listeners), Some(canvas)) = (state.listeners, chart.canvas_mut()) {
            listeners.remove(canvas);
        }
        tracing::debug!(chart = %id, "freehand trail detached");
        self.emit(TrailEvent::new(TrailEventKind::DETACHED, FREEHAND_TRAIL_ID, id));
    }

    fn clear_trail(&mut self, chart: &mut dyn ChartHost) {
        let id = chart.id();
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        state.trail.clear();
        chart.update(UpdateMode::Default);
        self.emit(TrailEvent::new(TrailEventKind::TRAIL_CLEARED, FREEHAND_TRAIL_ID, id));
    }

    fn restore_trail(&mut self, chart: &mut dyn ChartHost, points: Vec<TrailPoint>) {
        let id = chart.id();
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        state.trail = points;
        let trail_len = state.trail.len();
        chart.update(UpdateMode::Default);
        self.emit(
            TrailEvent::new(TrailEventKind::TRAIL_RESTORED, FREEHAND_TRAIL_ID, id)
                .with_trail_len(trail_len),
        );
    }

    fn trail(&self, chart: ChartId) -> &[TrailPoint] {
        self.states
            .get(&chart)
            .map(|s| s.trail.as_slice())
            .unwrap_or(&[])
    }

    fn is_active(&self, chart: ChartId) -> bool {
        self.states.get(&chart).is_some_and(|s| s.drawing)
    }

    fn is_attached(&self, chart: ChartId) -> bool {
        self.states.contains_key(&chart)
    }
}
