use serde::{Deserialize, Serialize};

/// One captured trail position, in data space.
///
/// Trails are never stored in pixels, so they stay where they were captured
/// when the chart is resized or rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
}

impl TrailPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
