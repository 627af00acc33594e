//! The shimmer effect: a loading-state decorator that masks content with a
//! translucent gradient band sweeping diagonally across it.
//!
//! Each attachment keeps one piece of mutable state: its [`AnimationPhase`]
//! and the host time it appeared. Gradient endpoints for a phase are a pure
//! function of that phase, the host's [`LayoutDirection`] and the configured
//! band size. In between, endpoints follow the [`ShimmerAnimation`] timing
//! description, evaluated against the clock the host draws with.

mod attachment;
mod config;
mod geometry;
mod mask;

pub use attachment::{attach_shimmer, ShimmerEffect, ShimmerTransition, Shimmered, Shimmering};
pub use config::{
    default_animation, default_gradient, Color, GradientStop, ShimmerAnimation, ShimmerConfig,
    TimingCurve, DEFAULT_ANIMATION, DEFAULT_BAND_SIZE,
};
pub use geometry::{gradient_endpoints, AnimationPhase, GradientEndpoints, LayoutDirection, UnitPoint};
pub use mask::GradientMask;
