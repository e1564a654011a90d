//! In-memory chart model implementing [`ChartHost`].
//!
//! A [`Chart`] owns its datasets, one linear scale per axis and an optional
//! [`Canvas`]. Redraw requests are counted and parked until the frontend
//! collects them with [`Chart::take_redraw`].

use egui::{Color32, Pos2, Rect, Vec2};

use crate::canvas::Canvas;
use crate::host::{ChartHost, ChartId, DataPoint, PointRef, Scale, UpdateMode};
use crate::scale::LinearScale;

/// Allocate a distinct color for the given dataset index.
pub fn dataset_color(index: usize) -> Color32 {
    const PALETTE: [Color32; 10] = [
        Color32::from_rgb(31, 119, 180),
        Color32::from_rgb(255, 127, 14),
        Color32::from_rgb(44, 160, 44),
        Color32::from_rgb(214, 39, 40),
        Color32::from_rgb(148, 103, 189),
        Color32::from_rgb(140, 86, 75),
        Color32::from_rgb(227, 119, 194),
        Color32::from_rgb(127, 127, 127),
        Color32::from_rgb(188, 189, 34),
        Color32::from_rgb(23, 190, 207),
    ];
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DataPoint>,
    pub color: Color32,
}

pub struct Chart {
    id: ChartId,
    canvas: Option<Canvas>,
    x: LinearScale,
    y: LinearScale,
    datasets: Vec<Dataset>,
    redraws: usize,
    last_update: Option<UpdateMode>,
    pending: Option<UpdateMode>,
}

impl Chart {
    /// Chart with a canvas of `size` at the screen origin and axes spanning
    /// `x_range` / `y_range`.
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), size: Vec2) -> Self {
        Self {
            id: ChartId::next(),
            canvas: Some(Canvas::new(Rect::from_min_size(Pos2::ZERO, size))),
            x: LinearScale::horizontal(x_range.0, x_range.1, size.x),
            y: LinearScale::vertical(y_range.0, y_range.1, size.y),
            datasets: Vec::new(),
            redraws: 0,
            last_update: None,
            pending: None,
        }
    }

    /// Unbind the canvas. Pointer positions then resolve to the zero origin.
    pub fn take_canvas(&mut self) -> Option<Canvas> {
        self.canvas.take()
    }

    /// Append a dataset and return its index.
    pub fn push_dataset(&mut self, label: impl Into<String>, data: Vec<DataPoint>) -> usize {
        let index = self.datasets.len();
        self.datasets.push(Dataset {
            label: label.into(),
            data,
            color: dataset_color(index),
        });
        index
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dataset(&self, index: usize) -> Option<&Dataset> {
        self.datasets.get(index)
    }

    pub fn point(&self, point: PointRef) -> Option<DataPoint> {
        self.datasets
            .get(point.dataset_index)
            .and_then(|ds| ds.data.get(point.index))
            .copied()
    }

    pub fn x_axis(&self) -> &LinearScale {
        &self.x
    }

    pub fn y_axis(&self) -> &LinearScale {
        &self.y
    }

    pub fn x_axis_mut(&mut self) -> &mut LinearScale {
        &mut self.x
    }

    pub fn y_axis_mut(&mut self) -> &mut LinearScale {
        &mut self.y
    }

    /// Move the canvas to `bounds` (screen coordinates) and stretch both
    /// axes over it. Listeners are kept.
    pub fn resize(&mut self, bounds: Rect) {
        match &mut self.canvas {
            Some(canvas) => canvas.set_bounds(bounds),
            None => self.canvas = Some(Canvas::new(bounds)),
        }
        self.x.set_pixel_range(0.0, bounds.width());
        self.y.set_pixel_range(bounds.height(), 0.0);
    }

    /// Total number of redraw requests received.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    pub fn last_update(&self) -> Option<UpdateMode> {
        self.last_update
    }

    /// Collect the outstanding redraw request, if any.
    pub fn take_redraw(&mut self) -> Option<UpdateMode> {
        self.pending.take()
    }
}

impl ChartHost for Chart {
    fn id(&self) -> ChartId {
        self.id
    }

    fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    fn canvas_mut(&mut self) -> Option<&mut Canvas> {
        self.canvas.as_mut()
    }

    fn x_scale(&self) -> &dyn Scale {
        &self.x
    }

    fn y_scale(&self) -> &dyn Scale {
        &self.y
    }

    fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    fn element_positions(&self, dataset_index: usize) -> Vec<Pos2> {
        self.datasets
            .get(dataset_index)
            .map(|ds| {
                ds.data
                    .iter()
                    .map(|p| Pos2::new(self.x.pixel_for_value(p.x), self.y.pixel_for_value(p.y)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn raw_point_mut(&mut self, point: PointRef) -> Option<&mut DataPoint> {
        self.datasets
            .get_mut(point.dataset_index)
            .and_then(|ds| ds.data.get_mut(point.index))
    }

    /// Requests are merged until [`Chart::take_redraw`]: an animated request
    /// wins over a non-animated one issued in the same batch.
    fn update(&mut self, mode: UpdateMode) {
        self.redraws += 1;
        self.last_update = Some(mode);
        self.pending = match (self.pending, mode) {
            (Some(UpdateMode::Default), _) => Some(UpdateMode::Default),
            _ => Some(mode),
        };
    }
}
