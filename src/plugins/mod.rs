//! The two trail plugins.
//!
//! * [`PointDragTrail`] grabs an existing data point and leaves a trail of
//!   every position it is dragged through.
//! * [`FreehandTrail`] draws a fresh trail wherever the pointer goes while
//!   the button is held.

mod drag_trail;
mod freehand_trail;
mod overlay;

pub use drag_trail::{nearest_point, DragState, PointDragTrail, DRAG_TRAIL_ID};
pub use freehand_trail::{FreehandState, FreehandTrail, FREEHAND_TRAIL_ID};
