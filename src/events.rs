//! Pointer input and trail notifications.
//!
//! Two kinds of events live here:
//!
//! * [`PointerEvent`]s flow *into* the plugins. The host delivers them through
//!   the listeners registered on the chart [`Canvas`](crate::canvas::Canvas).
//! * [`TrailEvent`]s flow *out* of the plugins. Each carries a set of
//!   [`TrailEventKind`] flags (bitflags-style) so one occurrence can match
//!   several categories, e.g. the first point of a freehand gesture is both
//!   `GESTURE_STARTED` and `POINT_CAPTURED`. Callers subscribe through an
//!   [`EventController`] with an [`EventFilter`] and receive the events on an
//!   `mpsc` channel.

use std::fmt;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use egui::Pos2;

use crate::data::trail::TrailPoint;
use crate::host::{ChartHost, ChartId, PointRef};

// ─────────────────────────────────────────────────────────────────────────────
// Pointer input
// ─────────────────────────────────────────────────────────────────────────────

/// Which pointer transition a listener is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in screen coordinates (the equivalent of a DOM `clientX/Y`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Pos2,
}

impl PointerEvent {
    pub fn down(pos: Pos2) -> Self {
        Self {
            kind: PointerKind::Down,
            pos,
        }
    }

    pub fn moved(pos: Pos2) -> Self {
        Self {
            kind: PointerKind::Move,
            pos,
        }
    }

    pub fn up(pos: Pos2) -> Self {
        Self {
            kind: PointerKind::Up,
            pos,
        }
    }
}

/// Event position relative to the chart's canvas.
///
/// A chart without a canvas yields the zero origin instead of failing.
pub fn relative_position(chart: &dyn ChartHost, event: &PointerEvent) -> Pos2 {
    match chart.canvas() {
        Some(canvas) => (event.pos - canvas.bounds().min).to_pos2(),
        None => Pos2::ZERO,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TrailEventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories a [`TrailEvent`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrailEventKind(pub u32);

impl TrailEventKind {
    /// A plugin installed its state and listeners on a chart.
    pub const ATTACHED: Self = Self(1 << 0);
    /// A plugin removed its listeners and state from a chart.
    pub const DETACHED: Self = Self(1 << 1);
    /// A drag or draw gesture began.
    pub const GESTURE_STARTED: Self = Self(1 << 2);
    /// A point was appended to a trail.
    pub const POINT_CAPTURED: Self = Self(1 << 3);
    /// The drag target's raw data was overwritten.
    pub const POINT_DRAGGED: Self = Self(1 << 4);
    /// The pointer was released, ending a gesture.
    pub const GESTURE_ENDED: Self = Self(1 << 5);
    /// A trail was emptied.
    pub const TRAIL_CLEARED: Self = Self(1 << 6);
    /// A trail was replaced from a snapshot.
    pub const TRAIL_RESTORED: Self = Self(1 << 7);

    /// Wildcard: matches every kind.
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for TrailEventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for TrailEventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for TrailEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == TrailEventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(TrailEventKind, &str)] = &[
            (TrailEventKind::ATTACHED, "ATTACHED"),
            (TrailEventKind::DETACHED, "DETACHED"),
            (TrailEventKind::GESTURE_STARTED, "GESTURE_STARTED"),
            (TrailEventKind::POINT_CAPTURED, "POINT_CAPTURED"),
            (TrailEventKind::POINT_DRAGGED, "POINT_DRAGGED"),
            (TrailEventKind::GESTURE_ENDED, "GESTURE_ENDED"),
            (TrailEventKind::TRAIL_CLEARED, "TRAIL_CLEARED"),
            (TrailEventKind::TRAIL_RESTORED, "TRAIL_RESTORED"),
        ];

        let mut names = Vec::new();
        let mut known_bits = 0u32;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{extra:x}"));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TrailEvent
// ─────────────────────────────────────────────────────────────────────────────

/// A notification emitted by a trail plugin.
#[derive(Debug, Clone)]
pub struct TrailEvent {
    pub kinds: TrailEventKind,
    /// Seconds since the controller was created; set on emit.
    pub timestamp: f64,
    /// Id of the emitting plugin.
    pub plugin: &'static str,
    pub chart: ChartId,
    /// Surface position of the pointer, for pointer-driven events.
    pub pixel: Option<Pos2>,
    /// Data-space value captured or written.
    pub value: Option<TrailPoint>,
    /// Drag target, for drag events.
    pub target: Option<PointRef>,
    /// Trail length after the event.
    pub trail_len: usize,
}

impl TrailEvent {
    pub fn new(kinds: TrailEventKind, plugin: &'static str, chart: ChartId) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            plugin,
            chart,
            pixel: None,
            value: None,
            target: None,
            trail_len: 0,
        }
    }

    pub fn with_pixel(mut self, pixel: Pos2) -> Self {
        self.pixel = Some(pixel);
        self
    }

    pub fn with_value(mut self, value: TrailPoint) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_target(mut self, target: PointRef) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_trail_len(mut self, len: usize) -> Self {
        self.trail_len = len;
        self
    }
}

impl fmt::Display for TrailEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:8.3}] {} {} {} (trail: {})",
            self.timestamp, self.plugin, self.chart, self.kinds, self.trail_len
        )?;
        if let Some(v) = self.value {
            write!(f, " at ({:.3}, {:.3})", v.x, v.y)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// OR-mask selecting which events a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: TrailEventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: TrailEventKind::ALL,
        }
    }

    pub const fn only(mask: TrailEventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &TrailEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<TrailEvent>,
}

/// Fans trail events out to subscribers.
///
/// Clone it into every plugin that should publish (see
/// [`PointDragTrail::with_events`](crate::plugins::PointDragTrail::with_events)),
/// then call [`subscribe`](Self::subscribe) to receive events on an `mpsc`
/// channel, possibly from another thread.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EventCtrlInner> {
        // The inner state stays consistent even if a holder panicked.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn subscribe(&self, filter: EventFilter) -> Receiver<TrailEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<TrailEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Send `event` to every matching subscriber. Subscribers whose receiver
    /// was dropped are removed on the next matching send.
    pub fn emit(&self, mut event: TrailEvent) {
        let mut inner = self.lock();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_union_and_intersection() {
        let combined = TrailEventKind::GESTURE_STARTED | TrailEventKind::POINT_CAPTURED;
        assert_eq!(
            combined,
            TrailEventKind::GESTURE_STARTED.union(TrailEventKind::POINT_CAPTURED)
        );
        let mut accumulated = TrailEventKind::empty();
        accumulated |= TrailEventKind::GESTURE_STARTED;
        accumulated |= TrailEventKind::POINT_CAPTURED;
        assert_eq!(accumulated, combined);
        assert!(combined.contains(TrailEventKind::GESTURE_STARTED));
        assert!(combined.intersects(TrailEventKind::POINT_CAPTURED));
        assert!(!combined.intersects(TrailEventKind::TRAIL_CLEARED));
    }

    #[test]
    fn kinds_do_not_overlap() {
        let all = [
            TrailEventKind::ATTACHED,
            TrailEventKind::DETACHED,
            TrailEventKind::GESTURE_STARTED,
            TrailEventKind::POINT_CAPTURED,
            TrailEventKind::POINT_DRAGGED,
            TrailEventKind::GESTURE_ENDED,
            TrailEventKind::TRAIL_CLEARED,
            TrailEventKind::TRAIL_RESTORED,
        ];
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    assert!(!a.intersects(*b), "kinds {i} and {j} overlap");
                }
            }
        }
    }

    #[test]
    fn kind_display() {
        assert_eq!(TrailEventKind::ATTACHED.to_string(), "ATTACHED");
        let combo = TrailEventKind::POINT_CAPTURED | TrailEventKind::POINT_DRAGGED;
        assert_eq!(combo.to_string(), "POINT_CAPTURED|POINT_DRAGGED");
        assert_eq!(TrailEventKind::ALL.to_string(), "ALL");
        assert!(TrailEventKind(1 << 31).to_string().starts_with("0x"));
    }

    #[test]
    fn controller_routes_by_filter() {
        let ctrl = EventController::new();
        let rx_all = ctrl.subscribe_all();
        let rx_clear = ctrl.subscribe(EventFilter::only(TrailEventKind::TRAIL_CLEARED));

        ctrl.emit(TrailEvent::new(
            TrailEventKind::GESTURE_STARTED,
            "trail",
            ChartId(1),
        ));

        assert!(rx_all.try_recv().is_ok());
        assert!(rx_clear.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let ctrl = EventController::new();
        let rx1 = ctrl.subscribe_all();
        let rx2 = ctrl.subscribe_all();
        drop(rx1);

        ctrl.emit(TrailEvent::new(TrailEventKind::ATTACHED, "trail", ChartId(1)));
        assert!(rx2.try_recv().is_ok());
        assert_eq!(ctrl.subscriber_count(), 1);
    }

    #[test]
    fn timestamp_is_set_on_emit() {
        let ctrl = EventController::new();
        let rx = ctrl.subscribe_all();
        std::thread::sleep(std::time::Duration::from_millis(5));
        ctrl.emit(TrailEvent::new(TrailEventKind::DETACHED, "trail", ChartId(2)));
        let evt = rx.try_recv().expect("event delivered");
        assert!(evt.timestamp > 0.0);
        assert_eq!(evt.chart, ChartId(2));
    }
}
