//! Point-drag trail: grab a rendered data point, drag it, keep its past positions.

use std::collections::HashMap;

use egui::Pos2;

use crate::canvas::ListenerSet;
use crate::config::DEFAULT_HIT_RADIUS;
use crate::data::trail::TrailPoint;
use crate::data::trail_look::TrailLook;
use crate::draw::DrawContext;
use crate::events::{
    relative_position, EventController, PointerEvent, PointerKind, TrailEvent, TrailEventKind,
};
use crate::host::{ChartHost, ChartId, PointRef, UpdateMode};
use crate::plugin::ChartPlugin;

use super::overlay;

pub const DRAG_TRAIL_ID: &str = "dragTrail";

/// Per-chart state of [`PointDragTrail`].
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub dragging: bool,
    pub dragged: Option<PointRef>,
    /// Every position the dragged points went through, across gestures.
    pub trail: Vec<TrailPoint>,
    listeners: Option<ListenerSet>,
}

/// Closest rendered element to `pos` that lies strictly within `radius`
/// pixels. Datasets are scanned in ascending order, then points; on equal
/// distance the first one found wins.
pub fn nearest_point(chart: &dyn ChartHost, pos: Pos2, radius: f32) -> Option<PointRef> {
    let mut best: Option<(PointRef, f32)> = None;
    for dataset_index in 0..chart.dataset_count() {
        for (index, element) in chart.element_positions(dataset_index).into_iter().enumerate() {
            let dist = element.distance(pos);
            if dist >= radius {
                continue;
            }
            match best {
                Some((_, d)) if d <= dist => {}
                _ => best = Some((PointRef::new(dataset_index, index), dist)),
            }
        }
    }
    best.map(|(point, _)| point)
}

/// Lets the user drag existing data points; every new position is appended
/// to a trail drawn as circles underneath the datasets.
///
/// The trail keeps growing across gestures until [`clear_trail`] is called.
///
/// [`clear_trail`]: ChartPlugin::clear_trail
pub struct PointDragTrail {
    states: HashMap<ChartId, DragState>,
    hit_radius: f32,
    events: Option<EventController>,
}

impl Default for PointDragTrail {
    fn default() -> Self {
        Self::new()
    }
}

impl PointDragTrail {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            hit_radius: DEFAULT_HIT_RADIUS,
            events: None,
        }
    }

    pub fn with_hit_radius(mut self, radius: f32) -> Self {
        self.hit_radius = radius;
        self
    }

    /// Publish [`TrailEvent`]s to `events`.
    pub fn with_events(mut self, events: EventController) -> Self {
        self.events = Some(events);
        self
    }

    pub fn hit_radius(&self) -> f32 {
        self.hit_radius
    }

    pub fn state(&self, chart: ChartId) -> Option<&DragState> {
        self.states.get(&chart)
    }

    /// Current drag target on `chart`.
    pub fn dragged_point(&self, chart: ChartId) -> Option<PointRef> {
        self.states.get(&chart).and_then(|s| s.dragged)
    }

    fn emit(&self, event: TrailEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }

    fn pointer_down(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent) {
        let id = chart.id();
        let pos = relative_position(chart, event);
        let Some(target) = nearest_point(chart, pos, self.hit_radius) else {
            tracing::trace!(chart = %id, ?pos, "no point under pointer");
            return;
        };
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        state.dragging = true;
        state.dragged = Some(target);
        let trail_len = state.trail.len();
        tracing::debug!(chart = %id, ?target, "drag started");
        self.emit(
            TrailEvent::new(TrailEventKind::GESTURE_STARTED, DRAG_TRAIL_ID, id)
                .with_pixel(pos)
                .with_target(target)
                .with_trail_len(trail_len),
        );
    }

    fn pointer_move(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent) {
        let id = chart.id();
        let target = match self.states.get(&id) {
            Some(DragState {
                dragging: true,
                dragged: Some(target),
                ..
            }) => *target,
            _ => return,
        };

        let pos = relative_position(chart, event);
        let value = chart.value_for(pos);
        match chart.raw_point_mut(target) {
            Some(raw) => {
                raw.x = value.x;
                raw.y = value.y;
            }
            None => tracing::warn!(chart = %id, ?target, "drag target no longer exists"),
        }

        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        state.trail.push(value);
        let trail_len = state.trail.len();
        tracing::trace!(chart = %id, x = value.x, y = value.y, trail_len, "point dragged");

        chart.update(UpdateMode::None);
        self.emit(
            TrailEvent::new(
                TrailEventKind::POINT_DRAGGED | TrailEventKind::POINT_CAPTURED,
                DRAG_TRAIL_ID,
                id,
            )
            .with_pixel(pos)
            .with_value(value)
            .with_target(target)
            .with_trail_len(trail_len),
        );
    }

    fn pointer_up(&mut self, chart: &mut dyn ChartHost) {
        let id = chart.id();
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        let was_dragging = state.dragging;
        let target = state.dragged.take();
        state.dragging = false;
        let trail_len = state.trail.len();
        if was_dragging {
            tracing::debug!(chart = %id, ?target, trail_len, "drag ended");
            let mut event = TrailEvent::new(TrailEventKind::GESTURE_ENDED, DRAG_TRAIL_ID, id)
                .with_trail_len(trail_len);
            event.target = target;
            self.emit(event);
        }
    }
}

impl ChartPlugin for PointDragTrail {
    fn id(&self) -> &'static str {
        DRAG_TRAIL_ID
    }

    fn on_attach(&mut self, chart: &mut dyn ChartHost) {
        let id = chart.id();
        if self.states.contains_key(&id) {
            tracing::warn!(chart = %id, "drag trail already attached");
            return;
        }
        let listeners = chart
            .canvas_mut()
            .map(|canvas| ListenerSet::install(canvas, DRAG_TRAIL_ID));
        if listeners.is_none() {
            tracing::warn!(chart = %id, "chart has no canvas; pointer input disabled");
        }
        self.states.insert(
            id,
            DragState {
                listeners,
                ..DragState::default()
            },
        );
        tracing::debug!(chart = %id, "drag trail attached");
        self.emit(TrailEvent::new(TrailEventKind::ATTACHED, DRAG_TRAIL_ID, id));
    }

    fn on_pointer(&mut self, chart: &mut dyn ChartHost, event: &PointerEvent) {
        if !self.states.contains_key(&chart.id()) {
            tracing::warn!(chart = %chart.id(), "pointer event for a chart without drag state");
            return;
        }
        match event.kind {
            PointerKind::Down => self.pointer_down(chart, event),
            PointerKind::Move => self.pointer_move(chart, event),
            PointerKind::Up => self.pointer_up(chart),
        }
    }

    fn on_before_draw(&self, chart: &dyn ChartHost, ctx: &mut dyn DrawContext, look: &TrailLook) {
        let Some(state) = self.states.get(&chart.id()) else {
            return;
        };
        ctx.save();
        overlay::paint_markers(chart, ctx, &state.trail, look);
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
        tracing::debug!(chart = %id, "drag trail detached");
        self.emit(TrailEvent::new(TrailEventKind::DETACHED, DRAG_TRAIL_ID, id));
    }

    fn clear_trail(&mut self, chart: &mut dyn ChartHost) {
        let id = chart.id();
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        state.trail.clear();
        chart.update(UpdateMode::Default);
        self.emit(TrailEvent::new(TrailEventKind::TRAIL_CLEARED, DRAG_TRAIL_ID, id));
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
            TrailEvent::new(TrailEventKind::TRAIL_RESTORED, DRAG_TRAIL_ID, id)
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
        self.states.get(&chart).is_some_and(|s| s.dragging)
    }

    fn is_attached(&self, chart: ChartId) -> bool {
        self.states.contains_key(&chart)
    }
}
