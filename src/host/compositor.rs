//! Software rendering host for shimmered content.
//!
//! The compositor plays the part a UI framework normally plays around the
//! effect: it owns the environment (layout direction) and the frame clock,
//! and hands both to every component it draws. Shimmer attachments anywhere
//! in the tree use them to pick their endpoints and to notice appearance.

use std::time::Duration;

use image::RgbaImage;

use crate::components::{Component, DrawContext};
use crate::effect::{Color, GradientEndpoints, LayoutDirection, Shimmered};
use crate::render::flatten;

/// Default placeholder fill, a light grey.
const DEFAULT_CONTENT_COLOR: Color = (0.80, 0.84, 0.96, 1.0);
/// Default backdrop for flattened frames.
const DEFAULT_BACKGROUND: Color = (0.12, 0.12, 0.18, 1.0);

/// A view mounted in the compositor.
///
/// Dropping it unmounts the view, discarding the attachment's phase.
#[derive(Debug)]
pub struct Mounted<C> {
    view: Shimmered<C>,
    frames: u64,
}

impl<C> Mounted<C> {
    pub fn view(&self) -> &Shimmered<C> {
        &self.view
    }

    /// Host time the root attachment appeared, if it is active and has.
    pub fn appeared_at(&self) -> Option<Duration> {
        self.view.effect().and_then(|effect| effect.appeared_at())
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn unmount(self) -> Shimmered<C> {
        self.view
    }
}

/// Renders mounted views into RGBA frames.
#[derive(Debug, Clone)]
pub struct Compositor {
    direction: LayoutDirection,
    content_color: Color,
    background: Color,
}

impl Compositor {
    pub fn new(direction: LayoutDirection) -> Self {
        Self {
            direction,
            content_color: DEFAULT_CONTENT_COLOR,
            background: DEFAULT_BACKGROUND,
        }
    }

    pub fn with_content_color(mut self, color: Color) -> Self {
        self.content_color = color;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Changes the environment's layout direction; picked up on the next frame.
    pub fn set_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn mount<C>(&self, view: Shimmered<C>) -> Mounted<C> {
        Mounted { view, frames: 0 }
    }

    /// Gradient endpoints the mounted root view shows at host time `now`.
    ///
    /// Returns `None` for inactive views.
    pub fn endpoints_at<C>(&self, mounted: &Mounted<C>, now: Duration) -> Option<GradientEndpoints> {
        let effect = mounted.view.effect()?;
        Some(effect.endpoints_at(self.direction, now))
    }

    /// Renders one straight-alpha frame of the mounted view.
    ///
    /// Attachments see their initial endpoints on the first frame they are
    /// drawn in and receive the appearance notification right after it.
    pub fn render_frame<C: Component>(
        &self,
        mounted: &mut Mounted<C>,
        size: (u32, u32),
        now: Duration,
    ) -> RgbaImage {
        let (width, height) = size;
        let mut image = RgbaImage::new(width, height);

        let mut ctx = DrawContext {
            image: &mut image,
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
            color: self.content_color,
            time: now,
            direction: self.direction,
        };
        mounted.view.draw(&mut ctx);
        mounted.frames += 1;

        image
    }

    /// Renders a frame and composites it over the background.
    pub fn render_flattened<C: Component>(
        &self,
        mounted: &mut Mounted<C>,
        size: (u32, u32),
        now: Duration,
    ) -> RgbaImage {
        let frame = self.render_frame(mounted, size, now);
        flatten(&frame, self.background)
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(LayoutDirection::default())
    }
}
