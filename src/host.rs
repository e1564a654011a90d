//! Host chart interface consumed by the trail plugins.
//!
//! The plugins never own a chart. They talk to it through [`ChartHost`], which
//! exposes the drawing surface ([`Canvas`]), the per-axis scale mapping, the
//! rendered geometry of every dataset and the backing raw records. [`Chart`]
//! is the in-memory implementation shipped with this crate.
//!
//! [`Chart`]: crate::chart::Chart

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::data::trail::TrailPoint;

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a chart instance. Plugins key their per-chart state by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartId(pub u64);

impl ChartId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        Self(NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart#{}", self.0)
    }
}

/// How a redraw should be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Regular (animated) update.
    #[default]
    Default,
    /// Immediate update without animation, used while a gesture is running.
    None,
}

/// Mapping between data values and surface pixels along one axis.
pub trait Scale {
    fn pixel_for_value(&self, value: f64) -> f32;
    fn value_for_pixel(&self, pixel: f32) -> f64;
}

/// One raw record of a dataset, in data space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for DataPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Non-owning link to one raw record of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointRef {
    pub dataset_index: usize,
    pub index: usize,
}

impl PointRef {
    pub const fn new(dataset_index: usize, index: usize) -> Self {
        Self {
            dataset_index,
            index,
        }
    }
}

/// Everything a trail plugin needs from the chart it is attached to.
pub trait ChartHost {
    fn id(&self) -> ChartId;

    /// Drawing surface, if one is bound.
    fn canvas(&self) -> Option<&Canvas>;
    fn canvas_mut(&mut self) -> Option<&mut Canvas>;

    fn x_scale(&self) -> &dyn Scale;
    fn y_scale(&self) -> &dyn Scale;

    fn dataset_count(&self) -> usize;

    /// Rendered position of every element of a dataset, in surface coordinates.
    /// Unknown datasets yield an empty list.
    fn element_positions(&self, dataset_index: usize) -> Vec<Pos2>;

    /// Backing record of a rendered element. Writes go straight into the chart data.
    fn raw_point_mut(&mut self, point: PointRef) -> Option<&mut DataPoint>;

    /// Request a redraw.
    fn update(&mut self, mode: UpdateMode);

    /// Surface position of a data-space point.
    fn pixel_for(&self, point: TrailPoint) -> Pos2 {
        Pos2::new(
            self.x_scale().pixel_for_value(point.x),
            self.y_scale().pixel_for_value(point.y),
        )
    }

    /// Data-space point under a surface position.
    fn value_for(&self, pos: Pos2) -> TrailPoint {
        TrailPoint::new(
            self.x_scale().value_for_pixel(pos.x),
            self.y_scale().value_for_pixel(pos.y),
        )
    }
}
