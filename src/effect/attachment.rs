//! The shimmer decorator and its per-attachment lifecycle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use image::RgbaImage;

use super::config::{
    default_gradient, GradientStop, ShimmerAnimation, ShimmerConfig, DEFAULT_BAND_SIZE,
};
use super::geometry::{gradient_endpoints, AnimationPhase, GradientEndpoints, LayoutDirection};
use super::mask::GradientMask;
use crate::components::{Component, ComponentSize, DrawContext, MeasureContext};
use crate::host::Timeline;
use crate::render::draw_layer;

/// The value change a host animates once the content has appeared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShimmerTransition {
    pub from: GradientEndpoints,
    pub to: GradientEndpoints,
    pub animation: ShimmerAnimation,
}

impl ShimmerTransition {
    /// Endpoints at the given host progress (0.0 = `from`, 1.0 = `to`).
    pub fn at(&self, progress: f32) -> GradientEndpoints {
        self.from.lerp(self.to, progress)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Lifecycle {
    phase: AnimationPhase,
    appeared_at: Option<Duration>,
}

/// One attachment of the shimmer effect to a piece of content.
///
/// Holds the content and a phase that starts at [`AnimationPhase::Initial`]
/// and moves to [`AnimationPhase::Settled`] on the first [`on_appear`] call.
/// Drawing the effect sends that notification itself once the first masked
/// frame is out, so attachments nested anywhere in a component tree settle
/// and animate on their own.
///
/// [`on_appear`]: ShimmerEffect::on_appear
#[derive(Debug)]
pub struct ShimmerEffect<C> {
    content: C,
    config: Arc<ShimmerConfig>,
    lifecycle: Mutex<Lifecycle>,
}

/// Attaches a shimmer to `content`. Never fails; every parameter is accepted.
pub fn attach_shimmer<C>(content: C, config: impl Into<Arc<ShimmerConfig>>) -> ShimmerEffect<C> {
    ShimmerEffect {
        content,
        config: config.into(),
        lifecycle: Mutex::new(Lifecycle::default()),
    }
}

impl<C> ShimmerEffect<C> {
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Detaches the effect, discarding its phase.
    pub fn into_content(self) -> C {
        self.content
    }

    pub fn config(&self) -> &ShimmerConfig {
        &self.config
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        // Lifecycle is plain data, so a poisoned lock still holds a valid value.
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> AnimationPhase {
        self.lifecycle().phase
    }

    /// Host time of the appearance notification, if it has arrived.
    pub fn appeared_at(&self) -> Option<Duration> {
        self.lifecycle().appeared_at
    }

    /// Appearance notification from the host at host time `now`.
    ///
    /// Returns true if this call settled the attachment; later calls are
    /// no-ops and return false.
    pub fn on_appear(&self, now: Duration) -> bool {
        let mut lifecycle = self.lifecycle();
        if lifecycle.phase == AnimationPhase::Settled {
            return false;
        }
        lifecycle.phase = AnimationPhase::Settled;
        lifecycle.appeared_at = Some(now);
        log::trace!("Shimmer attachment settled at {:?}", now);
        true
    }

    /// Endpoints for the current phase.
    pub fn endpoints(&self, direction: LayoutDirection) -> GradientEndpoints {
        gradient_endpoints(self.phase(), direction, self.config.band_size)
    }

    /// The initial-to-settled change and the timing the host should animate it with.
    pub fn transition(&self, direction: LayoutDirection) -> ShimmerTransition {
        let band = self.config.band_size;
        ShimmerTransition {
            from: gradient_endpoints(AnimationPhase::Initial, direction, band),
            to: gradient_endpoints(AnimationPhase::Settled, direction, band),
            animation: self.config.animation,
        }
    }

    /// Endpoints on screen at host time `now`.
    ///
    /// Before appearance these are the initial endpoints. Afterwards the
    /// transition is interpolated from the moment the attachment appeared.
    pub fn endpoints_at(&self, direction: LayoutDirection, now: Duration) -> GradientEndpoints {
        match self.appeared_at() {
            None => self.endpoints(direction),
            Some(appeared) => {
                let transition = self.transition(direction);
                let progress = Timeline::new(transition.animation).progress(now.saturating_sub(appeared));
                transition.at(progress)
            }
        }
    }

    /// Builds the mask for a set of (possibly interpolated) endpoints.
    pub fn mask(&self, endpoints: GradientEndpoints) -> GradientMask {
        GradientMask::new(&self.config.gradient, endpoints)
    }
}

// Layout is unaffected by the mask. Drawing renders the content into its own
// layer, masks that layer and composites it back.
impl<C: Component> Component for ShimmerEffect<C> {
    fn measure(&self, ctx: &MeasureContext) -> ComponentSize {
        self.content.measure(ctx)
    }

    fn draw(&self, ctx: &mut DrawContext) {
        let endpoints = self.endpoints_at(ctx.direction, ctx.time);

        // Layer origin sits on the pixel grid; the content keeps its sub-pixel offset.
        let left = ctx.x.floor();
        let top = ctx.y.floor();
        let width = (ctx.x - left + ctx.width).ceil().max(0.0) as u32;
        let height = (ctx.y - top + ctx.height).ceil().max(0.0) as u32;

        if width > 0 && height > 0 {
            let mut layer = RgbaImage::new(width, height);
            let mut layer_ctx = DrawContext {
                image: &mut layer,
                x: ctx.x - left,
                y: ctx.y - top,
                width: ctx.width,
                height: ctx.height,
                color: ctx.color,
                time: ctx.time,
                direction: ctx.direction,
            };
            self.content.draw(&mut layer_ctx);
            self.mask(endpoints).apply(&mut layer);
            draw_layer(ctx.image, &layer, left as i64, top as i64);
        }

        if self.on_appear(ctx.time) {
            log::debug!("Shimmer appeared at {:?}", ctx.time);
        }
    }
}

/// Content with the shimmer either applied or absent.
#[derive(Debug)]
pub enum Shimmered<C> {
    /// Inactive: the content untouched, no effect state.
    Plain(C),
    Active(ShimmerEffect<C>),
}

impl<C> Shimmered<C> {
    pub fn content(&self) -> &C {
        match self {
            Self::Plain(content) => content,
            Self::Active(effect) => effect.content(),
        }
    }

    pub fn into_content(self) -> C {
        match self {
            Self::Plain(content) => content,
            Self::Active(effect) => effect.into_content(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn effect(&self) -> Option<&ShimmerEffect<C>> {
        match self {
            Self::Plain(_) => None,
            Self::Active(effect) => Some(effect),
        }
    }
}

impl<C: Component> Component for Shimmered<C> {
    fn measure(&self, ctx: &MeasureContext) -> ComponentSize {
        self.content().measure(ctx)
    }

    fn draw(&self, ctx: &mut DrawContext) {
        match self {
            Self::Plain(content) => content.draw(ctx),
            Self::Active(effect) => effect.draw(ctx),
        }
    }
}

/// Extension methods for decorating any component with a shimmer.
pub trait Shimmering: Component + Sized {
    /// Applies the shimmer when `active`, otherwise returns the content as is.
    fn shimmering(self, active: bool, config: impl Into<Arc<ShimmerConfig>>) -> Shimmered<Self> {
        if active {
            Shimmered::Active(attach_shimmer(self, config))
        } else {
            Shimmered::Plain(self)
        }
    }

    /// Same as [`Shimmering::shimmering`] with the config given field by field.
    fn shimmering_with(
        self,
        active: bool,
        animation: ShimmerAnimation,
        gradient: Vec<GradientStop>,
        band_size: f32,
    ) -> Shimmered<Self> {
        self.shimmering(active, ShimmerConfig::new(animation, gradient, band_size))
    }

    /// Seconds-based form kept for older callers.
    #[deprecated(note = "use `shimmering` with a `ShimmerAnimation` instead")]
    fn shimmering_legacy(self, active: bool, duration: f64, bounce: bool, delay: f64) -> Shimmered<Self> {
        let animation = ShimmerAnimation::from_seconds(duration, bounce, delay);
        self.shimmering_with(active, animation, default_gradient(), DEFAULT_BAND_SIZE)
    }
}

impl<C: Component> Shimmering for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Skeleton;
    use crate::effect::config::default_animation;
    use crate::effect::geometry::UnitPoint;

    fn placeholder() -> Skeleton {
        Skeleton::new().width(40.0).height(10.0)
    }

    #[test]
    fn test_new_attachment_starts_initial() {
        let effect = attach_shimmer(placeholder(), ShimmerConfig::default());
        assert_eq!(effect.phase(), AnimationPhase::Initial);
        let e = effect.endpoints(LayoutDirection::LeftToRight);
        assert_eq!(e.end, UnitPoint::TOP_LEFT);
    }

    #[test]
    fn test_on_appear_settles() {
        let effect = attach_shimmer(placeholder(), ShimmerConfig::default());
        assert!(effect.on_appear(Duration::ZERO));
        assert_eq!(effect.phase(), AnimationPhase::Settled);
        assert_eq!(
            effect.endpoints(LayoutDirection::LeftToRight).start,
            UnitPoint::BOTTOM_RIGHT
        );
    }

    #[test]
    fn test_on_appear_is_idempotent() {
        let effect = attach_shimmer(placeholder(), ShimmerConfig::default());
        effect.on_appear(Duration::ZERO);
        let before = effect.endpoints(LayoutDirection::RightToLeft);
        assert!(!effect.on_appear(Duration::ZERO));
        assert_eq!(effect.phase(), AnimationPhase::Settled);
        assert_eq!(effect.endpoints(LayoutDirection::RightToLeft), before);
    }

    #[test]
    fn test_appearance_time_is_kept_from_first_call() {
        let effect = attach_shimmer(placeholder(), ShimmerConfig::default());
        assert_eq!(effect.appeared_at(), None);
        effect.on_appear(Duration::from_millis(40));
        effect.on_appear(Duration::from_millis(90));
        assert_eq!(effect.appeared_at(), Some(Duration::from_millis(40)));
    }

    #[test]
    fn test_endpoints_at_runs_from_appearance() {
        let ltr = LayoutDirection::LeftToRight;
        let effect = attach_shimmer(placeholder(), ShimmerConfig::default());
        let transition = effect.transition(ltr);

        assert_eq!(effect.endpoints_at(ltr, Duration::from_secs(5)), transition.from);

        effect.on_appear(Duration::from_secs(1));
        // Inside the 250ms delay
        assert_eq!(effect.endpoints_at(ltr, Duration::from_millis(1100)), transition.from);
        let mid = effect.endpoints_at(ltr, Duration::from_millis(1000 + 250 + 750));
        let expected = transition.at(0.5);
        assert!((mid.start.x - expected.start.x).abs() < 1e-4);
        assert!((mid.end.y - expected.end.y).abs() < 1e-4);
    }

    #[test]
    fn test_draw_masks_content_and_settles() {
        let effect = attach_shimmer(
            Skeleton::new().fill().height(10.0).corner_radius(0.0),
            ShimmerConfig::default(),
        );
        let mut image = RgbaImage::new(20, 10);
        let mut ctx = DrawContext {
            image: &mut image,
            x: 0.0,
            y: 0.0,
            width: 20.0,
            height: 10.0,
            color: (1.0, 1.0, 1.0, 1.0),
            time: Duration::ZERO,
            direction: LayoutDirection::LeftToRight,
        };
        effect.draw(&mut ctx);

        // The band starts outside the content, leaving everything dimmed.
        assert!(image.pixels().all(|p| p.0[3] > 0 && p.0[3] < 255));
        assert_eq!(effect.phase(), AnimationPhase::Settled);
        assert_eq!(effect.appeared_at(), Some(Duration::ZERO));
    }

    #[test]
    fn test_attachments_are_independent() {
        let config = Arc::new(ShimmerConfig::default());
        let first = attach_shimmer(placeholder(), Arc::clone(&config));
        let second = attach_shimmer(Skeleton::new().fill(), Arc::clone(&config));

        first.on_appear(Duration::ZERO);

        assert_eq!(first.phase(), AnimationPhase::Settled);
        assert_eq!(second.phase(), AnimationPhase::Initial);
    }

    #[test]
    fn test_reattach_starts_fresh() {
        let effect = attach_shimmer(placeholder(), ShimmerConfig::default());
        effect.on_appear(Duration::ZERO);
        let content = effect.into_content();
        let again = attach_shimmer(content, ShimmerConfig::default());
        assert_eq!(again.phase(), AnimationPhase::Initial);
    }

    #[test]
    fn test_transition_spans_both_phases() {
        let effect = attach_shimmer(placeholder(), ShimmerConfig::default());
        let t = effect.transition(LayoutDirection::LeftToRight);
        assert_eq!(
            t.from,
            gradient_endpoints(AnimationPhase::Initial, LayoutDirection::LeftToRight, 0.3)
        );
        assert_eq!(
            t.to,
            gradient_endpoints(AnimationPhase::Settled, LayoutDirection::LeftToRight, 0.3)
        );
        assert_eq!(t.animation, default_animation());
        assert_eq!(t.at(0.0), t.from);
        assert_eq!(t.at(1.0), t.to);
    }

    #[test]
    fn test_inactive_creates_no_effect() {
        let shimmered = placeholder().shimmering(false, ShimmerConfig::default());
        assert!(!shimmered.is_active());
        assert!(shimmered.effect().is_none());
    }

    #[test]
    fn test_active_behaves_as_attach() {
        let shimmered = placeholder().shimmering(true, ShimmerConfig::default());
        let effect = shimmered.effect().expect("active shimmer");
        assert_eq!(effect.phase(), AnimationPhase::Initial);
        assert_eq!(effect.config(), &ShimmerConfig::default());
    }

    #[test]
    #[allow(deprecated)]
    fn test_legacy_overload_matches_primary() {
        let legacy = placeholder().shimmering_legacy(true, 2.0, true, 0.1);
        let animation = ShimmerAnimation::linear(Duration::from_secs(2))
            .delay(Duration::from_millis(100))
            .auto_reverses(true);
        let primary = placeholder().shimmering(true, ShimmerConfig::default().with_animation(animation));

        let legacy = legacy.effect().expect("legacy active");
        let primary = primary.effect().expect("primary active");
        assert_eq!(legacy.config(), primary.config());
        for direction in [LayoutDirection::LeftToRight, LayoutDirection::RightToLeft] {
            assert_eq!(legacy.transition(direction), primary.transition(direction));
        }
    }

    #[test]
    #[allow(deprecated)]
    fn test_legacy_overload_inactive_passes_through() {
        let legacy = placeholder().shimmering_legacy(false, 1.0, false, 0.25);
        assert!(!legacy.is_active());
    }
}
