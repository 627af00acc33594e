//! Placeholder components drawn into RGBA frames.
//!
//! These are the renderables the shimmer decorates: skeleton blocks and the
//! stacks that lay them out into loading cards.

mod skeleton;
mod stack;

pub use skeleton::{Skeleton, SkeletonWidth};
pub use stack::{Stack, StackAlign, StackDirection};

use std::time::Duration;

use image::RgbaImage;

use crate::effect::{Color, LayoutDirection};

/// Size returned by component measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentSize {
    pub width: f64,
    pub height: f64,
}

/// Context provided during component measurement.
#[derive(Debug, Clone, Copy)]
pub struct MeasureContext {
    /// Maximum available width for the component
    pub max_width: f64,
}

/// Context provided during component drawing.
pub struct DrawContext<'a> {
    /// Frame being drawn into
    pub image: &'a mut RgbaImage,
    /// X position to draw at
    pub x: f64,
    /// Y position to draw at
    pub y: f64,
    /// Available width for the component
    pub width: f64,
    /// Available height for the component
    pub height: f64,
    /// Default fill color for placeholders
    pub color: Color,
    /// Host time of the frame being drawn
    pub time: Duration,
    /// Layout direction of the surrounding environment
    pub direction: LayoutDirection,
}

impl DrawContext<'_> {
    /// Measurement constraints matching this draw area.
    pub fn measure_context(&self) -> MeasureContext {
        MeasureContext {
            max_width: self.width,
        }
    }
}

/// Trait for UI components that can be measured and drawn.
///
/// Components support a two-phase layout: first measure to determine size,
/// then draw at the allocated position.
pub trait Component: Send + Sync {
    /// Measure the component and return its preferred size.
    fn measure(&self, ctx: &MeasureContext) -> ComponentSize;

    /// Draw the component at the position specified in the context.
    fn draw(&self, ctx: &mut DrawContext);
}

impl<T: Component + ?Sized> Component for Box<T> {
    fn measure(&self, ctx: &MeasureContext) -> ComponentSize {
        (**self).measure(ctx)
    }

    fn draw(&self, ctx: &mut DrawContext) {
        (**self).draw(ctx)
    }
}

/// Avatar circle beside two text lines, the usual "loading row".
pub fn card_placeholder() -> Stack {
    Stack::horizontal()
        .gap(12.0)
        .center()
        .child(Skeleton::new().width(40.0).height(40.0).pill())
        .child(
            Stack::vertical()
                .gap(8.0)
                .child(Skeleton::new().fill().height(14.0).corner_radius(2.0))
                .child(Skeleton::new().width(120.0).height(14.0).corner_radius(2.0)),
        )
}
