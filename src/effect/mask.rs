//! Linear gradient mask applied multiplicatively to rendered pixels.

use image::RgbaImage;

use super::config::GradientStop;
use super::geometry::{GradientEndpoints, UnitPoint};

/// A linear opacity ramp stretched between two unit-square points.
///
/// Stops are spaced evenly along the axis. Points before the start take the
/// first stop's opacity and points past the end take the last stop's.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientMask {
    alphas: Vec<f32>,
    endpoints: GradientEndpoints,
}

impl GradientMask {
    pub fn new(stops: &[GradientStop], endpoints: GradientEndpoints) -> Self {
        Self {
            alphas: stops.iter().map(GradientStop::alpha).collect(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> GradientEndpoints {
        self.endpoints
    }

    /// Mask opacity at a unit-square point.
    pub fn opacity_at(&self, point: UnitPoint) -> f32 {
        let Some(&first) = self.alphas.first() else {
            // No stops: nothing to attenuate.
            return 1.0;
        };
        if self.alphas.len() == 1 {
            return first;
        }

        let t = self.axis_position(point);
        let segments = (self.alphas.len() - 1) as f32;
        let scaled = t * segments;
        let index = (scaled.floor() as usize).min(self.alphas.len() - 2);
        let local = scaled - index as f32;

        let a = self.alphas[index];
        let b = self.alphas[index + 1];
        a + (b - a) * local
    }

    /// Projection of `point` onto the start-to-end axis, clamped to 0.0-1.0.
    fn axis_position(&self, point: UnitPoint) -> f32 {
        let GradientEndpoints { start, end } = self.endpoints;
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length_sq = dx * dx + dy * dy;

        if length_sq <= f32::EPSILON {
            // Collapsed axis: everything counts as past the end.
            return 1.0;
        }

        let along = (point.x - start.x) * dx + (point.y - start.y) * dy;
        (along / length_sq).clamp(0.0, 1.0)
    }

    /// Multiplies every pixel's alpha by the mask opacity at its centre.
    pub fn apply(&self, image: &mut RgbaImage) {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let point = UnitPoint::new(
                (x as f32 + 0.5) / width as f32,
                (y as f32 + 0.5) / height as f32,
            );
            let opacity = self.opacity_at(point).clamp(0.0, 1.0);
            pixel.0[3] = (pixel.0[3] as f32 * opacity).round() as u8;
        }
    }
}
