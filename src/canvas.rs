//! Chart drawing surface: screen geometry plus a pointer listener table.

use egui::Rect;

use crate::events::PointerKind;

/// Handle returned by [`Canvas::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A registered pointer listener. `owner` is the id of the plugin that receives the events.
#[derive(Debug, Clone)]
pub struct Listener {
    pub id: ListenerId,
    pub kind: PointerKind,
    pub owner: &'static str,
}

/// The surface a chart is drawn on.
#[derive(Debug, Clone)]
pub struct Canvas {
    bounds: Rect,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Canvas {
    /// `bounds` is the surface rectangle in screen coordinates.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Bounding rectangle in screen coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn add_event_listener(&mut self, kind: PointerKind, owner: &'static str) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, kind, owner });
        id
    }

    /// Returns `false` if the listener was not registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Owners of every listener for `kind`, in registration order.
    pub fn owners_for(&self, kind: PointerKind) -> Vec<&'static str> {
        self.listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.owner)
            .collect()
    }
}

/// The down/move/up listener triple a plugin installs on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerSet {
    pub down: ListenerId,
    pub moved: ListenerId,
    pub up: ListenerId,
}

impl ListenerSet {
    pub fn install(canvas: &mut Canvas, owner: &'static str) -> Self {
        Self {
            down: canvas.add_event_listener(PointerKind::Down, owner),
            moved: canvas.add_event_listener(PointerKind::Move, owner),
            up: canvas.add_event_listener(PointerKind::Up, owner),
        }
    }

    pub fn remove(self, canvas: &mut Canvas) {
        for id in [self.down, self.moved, self.up] {
            canvas.remove_event_listener(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn canvas() -> Canvas {
        Canvas::new(Rect::from_min_size(pos2(10.0, 20.0), vec2(100.0, 50.0)))
    }

    #[test]
    fn listener_ids_are_unique() {
        let mut c = canvas();
        let a = c.add_event_listener(PointerKind::Down, "a");
        let b = c.add_event_listener(PointerKind::Down, "a");
        assert_ne!(a, b);
        assert_eq!(c.listeners().len(), 2);
    }

    #[test]
    fn remove_unknown_listener_reports_false() {
        let mut c = canvas();
        let a = c.add_event_listener(PointerKind::Up, "a");
        assert!(c.remove_event_listener(a));
        assert!(!c.remove_event_listener(a));
    }

    #[test]
    fn listener_set_installs_and_removes_three() {
        let mut c = canvas();
        let other = c.add_event_listener(PointerKind::Move, "other");
        let set = ListenerSet::install(&mut c, "mine");
        assert_eq!(c.owners_for(PointerKind::Move), vec!["other", "mine"]);
        set.remove(&mut c);
        assert_eq!(c.listeners().len(), 1);
        assert_eq!(c.listeners()[0].id, other);
    }
}
