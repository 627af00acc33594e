//! Shimmer loading effect.
//!
//! Decorates any [`Component`](components::Component) with a translucent
//! gradient band that sweeps diagonally across it while content loads.
//!
//! ```
//! use shimmer::components::card_placeholder;
//! use shimmer::host::Compositor;
//! use shimmer::{LayoutDirection, ShimmerConfig, Shimmering};
//! use std::time::Duration;
//!
//! let compositor = Compositor::new(LayoutDirection::LeftToRight);
//! let mut view = compositor.mount(card_placeholder().shimmering(true, ShimmerConfig::default()));
//! let frame = compositor.render_frame(&mut view, (160, 48), Duration::ZERO);
//! assert_eq!(frame.dimensions(), (160, 48));
//! ```

pub mod components;
pub mod config;
pub mod effect;
pub mod host;
pub mod render;

pub use effect::{
    attach_shimmer, default_animation, default_gradient, gradient_endpoints, AnimationPhase,
    GradientEndpoints, GradientMask, GradientStop, LayoutDirection, ShimmerAnimation,
    ShimmerConfig, ShimmerEffect, ShimmerTransition, Shimmered, Shimmering, TimingCurve,
    UnitPoint, DEFAULT_ANIMATION, DEFAULT_BAND_SIZE,
};
