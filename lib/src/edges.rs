use crate::ascii::CellRect;
use std::f32::consts::PI;

/// Fraction of masked pixels a cell needs before it is drawn as a stroke
pub const EDGE_RATIO_THRESHOLD: f32 = 0.3;

/// Stroke drawn for an edge-dominated cell
///
/// Buckets are gradient orientations folded into `[0, 180)` degrees; the
/// stroke runs along the edge, perpendicular to the gradient.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeDirection {
    Horizontal, // - (gradient 67.5° to 112.5°)
    Vertical,   // | (gradient below 22.5° or from 157.5°)
    Rising,     // / (gradient 22.5° to 67.5°)
    Falling,    // \ (gradient 112.5° to 157.5°)
}

/// Classify an edge from its gradient angle
///
/// # Arguments
/// * `angle` - Gradient angle in radians from `atan2(Gy, Gx)`, image y axis pointing down
pub fn classify_edge_direction(angle: f32) -> EdgeDirection {
    // A line and its reverse are the same stroke
    let degrees = angle.to_degrees().rem_euclid(180.0);

    if !(22.5..157.5).contains(&degrees) {
        EdgeDirection::Vertical
    } else if degrees < 67.5 {
        EdgeDirection::Rising
    } else if degrees < 112.5 {
        EdgeDirection::Horizontal
    } else {
        EdgeDirection::Falling
    }
}

/// Per-pixel Sobel gradient magnitude and direction, row-major
#[derive(Debug, Clone)]
pub struct EdgeField {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) magnitude: Vec<f32>,
    pub(crate) direction: Vec<f32>,
}

impl EdgeField {
    /// Returns `None` unless both buffers hold `width * height` values
    pub fn new(width: u32, height: u32, magnitude: Vec<f32>, direction: Vec<f32>) -> Option<Self> {
        let size = width as usize * height as usize;
        if magnitude.len() != size || direction.len() != size {
            return None;
        }
        Some(Self {
            width,
            height,
            magnitude,
            direction,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn magnitude(&self, x: u32, y: u32) -> f32 {
        self.magnitude[self.index(x, y)]
    }

    /// Gradient angle in radians, `(-π, π]`
    pub fn direction(&self, x: u32, y: u32) -> f32 {
        self.direction[self.index(x, y)]
    }

    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitude
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Thresholded view of an [`EdgeField`] that decides which cells become strokes
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector<'a> {
    field: &'a EdgeField,
    threshold: f32,
}

impl<'a> EdgeDetector<'a> {
    pub fn new(field: &'a EdgeField, threshold: f32) -> Self {
        Self { field, threshold }
    }

    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        self.field.magnitude(x, y) > self.threshold
    }

    /// Decide whether a cell is edge-dominated and which stroke it gets
    ///
    /// A cell qualifies when more than [`EDGE_RATIO_THRESHOLD`] of its pixels
    /// exceed the magnitude threshold. The stroke follows the median
    /// direction of those pixels only, each folded into `[0, π)` first so a
    /// gradient and its reverse count as the same orientation.
    ///
    /// # Arguments
    /// * `rect` - Source rectangle of the cell in the supersampled grid
    /// * `scratch` - Reusable buffer for the masked directions
    pub fn classify_cell(&self, rect: CellRect, scratch: &mut Vec<f32>) -> Option<EdgeDirection> {
        let total = rect.area();
        if total == 0 {
            return None;
        }

        scratch.clear();
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                if self.is_edge(x, y) {
                    scratch.push(self.field.direction(x, y).rem_euclid(PI));
                }
            }
        }

        let edge_ratio = scratch.len() as f32 / total as f32;
        if edge_ratio <= EDGE_RATIO_THRESHOLD {
            return None;
        }

        median(scratch).map(classify_edge_direction)
    }
}

/// Median of a set of angles; even counts take the lower middle value
///
/// Averaging would blend orientations across the wrap at 0 and π.
/// Reorders `values` in place.
pub fn median(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f32::total_cmp);

    Some(values[(values.len() - 1) / 2])
}
