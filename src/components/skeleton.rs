//! Skeleton loading placeholder component.

use super::{Component, ComponentSize, DrawContext, MeasureContext};
use crate::effect::Color;
use crate::render::fill_rounded_rect;

/// Width specification for skeleton components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkeletonWidth {
    /// Fixed width in points
    Fixed(f64),
    /// Fill available width
    Fill,
}

impl Default for SkeletonWidth {
    fn default() -> Self {
        SkeletonWidth::Fixed(100.0)
    }
}

/// A solid rounded block standing in for content that is still loading.
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// Width of the skeleton
    pub width: SkeletonWidth,
    /// Height of the skeleton in points
    pub height: f64,
    /// Corner radius for rounded corners
    pub corner_radius: f64,
    /// Fill color; the draw context's color when unset
    pub color: Option<Color>,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            width: SkeletonWidth::default(),
            height: 16.0,
            corner_radius: 4.0,
            color: None,
        }
    }
}

impl Skeleton {
    /// Creates a new skeleton component with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width to a fixed value in points.
    pub fn width(mut self, width: f64) -> Self {
        self.width = SkeletonWidth::Fixed(width);
        self
    }

    /// Sets the width to fill available space.
    pub fn fill(mut self) -> Self {
        self.width = SkeletonWidth::Fill;
        self
    }

    /// Sets the height in points.
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Sets the corner radius in points.
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Makes the skeleton pill-shaped (full corner radius).
    pub fn pill(mut self) -> Self {
        self.corner_radius = 9999.0;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Component for Skeleton {
    fn measure(&self, ctx: &MeasureContext) -> ComponentSize {
        let width = match self.width {
            SkeletonWidth::Fixed(w) => w,
            SkeletonWidth::Fill => ctx.max_width,
        };
        ComponentSize {
            width,
            height: self.height,
        }
    }

    fn draw(&self, ctx: &mut DrawContext) {
        let width = match self.width {
            SkeletonWidth::Fixed(w) => w,
            SkeletonWidth::Fill => ctx.width,
        };
        let color = self.color.unwrap_or(ctx.color);

        fill_rounded_rect(
            ctx.image,
            ctx.x,
            ctx.y,
            width,
            self.height,
            self.corner_radius,
            color,
        );
    }
}
