//! Linear axis scale.

use std::ops::RangeInclusive;

use crate::host::Scale;

/// Linear mapping from a value range onto a pixel range.
///
/// The pixel range may run backwards (`start_px > end_px`), which is how a
/// vertical axis with values growing upwards is expressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
    pub start_px: f32,
    pub end_px: f32,
}

impl LinearScale {
    pub fn new(min: f64, max: f64, start_px: f32, end_px: f32) -> Self {
        Self {
            min,
            max,
            start_px,
            end_px,
        }
    }

    /// Left-to-right axis spanning `0..width` pixels.
    pub fn horizontal(min: f64, max: f64, width: f32) -> Self {
        Self::new(min, max, 0.0, width)
    }

    /// Bottom-to-top axis spanning `height..0` pixels.
    pub fn vertical(min: f64, max: f64, height: f32) -> Self {
        Self::new(min, max, height, 0.0)
    }

    pub fn set_pixel_range(&mut self, start_px: f32, end_px: f32) {
        self.start_px = start_px;
        self.end_px = end_px;
    }

    pub fn set_value_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }
}

impl Scale for LinearScale {
    fn pixel_for_value(&self, value: f64) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            return self.start_px;
        }
        let t = (value - self.min) / span;
        (self.start_px as f64 + t * (self.end_px as f64 - self.start_px as f64)) as f32
    }

    fn value_for_pixel(&self, pixel: f32) -> f64 {
        let px_span = self.end_px as f64 - self.start_px as f64;
        if px_span == 0.0 {
            return self.min;
        }
        let t = (pixel as f64 - self.start_px as f64) / px_span;
        self.min + t * (self.max - self.min)
    }
}
