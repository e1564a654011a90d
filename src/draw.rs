//! 2D drawing context used by the overlay hooks.
//!
//! [`DrawContext`] is a small path-based API (save/restore, paths, fill and
//! stroke). [`ShapeRecorder`] implements it by turning the calls into
//! [`egui::Shape`]s, translated from surface coordinates to screen
//! coordinates, ready to hand to an [`egui::Painter`].

use egui::{Color32, Pos2, Shape, Stroke, Vec2};

pub trait DrawContext {
    fn save(&mut self);
    fn restore(&mut self);

    /// Discard the current path.
    fn begin_path(&mut self);
    fn move_to(&mut self, pos: Pos2);
    fn line_to(&mut self, pos: Pos2);
    /// Add a full circle to the current path.
    fn arc(&mut self, center: Pos2, radius: f32);

    fn set_fill_color(&mut self, color: Color32);
    fn set_stroke_color(&mut self, color: Color32);
    fn set_line_width(&mut self, width: f32);

    fn fill(&mut self);
    fn stroke(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    fill: Color32,
    stroke: Color32,
    line_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Color32::BLACK,
            stroke: Color32::BLACK,
            line_width: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
enum SubPath {
    Circle { center: Pos2, radius: f32 },
    Polyline(Vec<Pos2>),
}

/// [`DrawContext`] that records egui shapes.
#[derive(Debug, Clone)]
pub struct ShapeRecorder {
    origin: Vec2,
    state: DrawState,
    saved: Vec<DrawState>,
    path: Vec<SubPath>,
    shapes: Vec<Shape>,
}

impl ShapeRecorder {
    /// `origin` is the screen position of the surface's top-left corner.
    pub fn new(origin: Pos2) -> Self {
        Self {
            origin: origin.to_vec2(),
            state: DrawState::default(),
            saved: Vec::new(),
            path: Vec::new(),
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn filled_circle_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Circle(c) if c.fill != Color32::TRANSPARENT))
            .count()
    }

    /// Open stroked paths, in drawing order.
    pub fn polylines(&self) -> Vec<&[Pos2]> {
        self.shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Path(p) if !p.closed => Some(p.points.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl DrawContext for ShapeRecorder {
    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, pos: Pos2) {
        self.path.push(SubPath::Polyline(vec![pos + self.origin]));
    }

    fn line_to(&mut self, pos: Pos2) {
        let pos = pos + self.origin;
        match self.path.last_mut() {
            Some(SubPath::Polyline(points)) => points.push(pos),
            // Without a current point, line_to behaves like move_to.
            _ => self.path.push(SubPath::Polyline(vec![pos])),
        }
    }

    fn arc(&mut self, center: Pos2, radius: f32) {
        self.path.push(SubPath::Circle {
            center: center + self.origin,
            radius,
        });
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn fill(&mut self) {
        let fill = self.state.fill;
        for sub in &self.path {
            match sub {
                SubPath::Circle { center, radius } => {
                    self.shapes.push(Shape::circle_filled(*center, *radius, fill));
                }
                SubPath::Polyline(points) if points.len() >= 3 => {
                    self.shapes
                        .push(Shape::convex_polygon(points.clone(), fill, Stroke::NONE));
                }
                SubPath::Polyline(_) => {}
            }
        }
    }

    fn stroke(&mut self) {
        let stroke = Stroke::new(self.state.line_width, self.state.stroke);
        for sub in &self.path {
            match sub {
                SubPath::Circle { center, radius } => {
                    self.shapes.push(Shape::circle_stroke(*center, *radius, stroke));
                }
                SubPath::Polyline(points) if points.len() >= 2 => {
                    self.shapes.push(Shape::line(points.clone(), stroke));
                }
                SubPath::Polyline(_) => {}
            }
        }
    }
}
