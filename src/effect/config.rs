//! Immutable parameters of a shimmer attachment.

use std::time::Duration;

/// RGBA color with components in 0.0-1.0.
pub type Color = (f32, f32, f32, f32);

/// Default width of the highlight band, as a fraction of the content size.
pub const DEFAULT_BAND_SIZE: f32 = 0.3;

/// Linear, 1.5s cycle after a 0.25s delay, repeating forever without reversing.
pub const DEFAULT_ANIMATION: ShimmerAnimation = ShimmerAnimation {
    curve: TimingCurve::Linear,
    duration: Duration::from_millis(1500),
    delay: Duration::from_millis(250),
    repeat_forever: true,
    auto_reverses: false,
};

/// Returns the default animation timing.
pub fn default_animation() -> ShimmerAnimation {
    DEFAULT_ANIMATION
}

/// Returns the default mask ramp: dim, opaque, dim.
pub fn default_gradient() -> Vec<GradientStop> {
    vec![
        GradientStop::black(0.3),
        GradientStop::black(1.0),
        GradientStop::black(0.3),
    ]
}

/// Easing applied to each animation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingCurve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl TimingCurve {
    /// Parses a curve name as written in config files.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "linear" => Some(Self::Linear),
            "ease_in" => Some(Self::EaseIn),
            "ease_out" => Some(Self::EaseOut),
            "ease_in_out" => Some(Self::EaseInOut),
            _ => None,
        }
    }

    /// Maps linear cycle progress (clamped to 0.0-1.0) onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Timing description handed to the host. The effect never runs it itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShimmerAnimation {
    pub curve: TimingCurve,
    /// Length of one cycle (one leg when auto-reversing).
    pub duration: Duration,
    /// Wait before the first cycle starts.
    pub delay: Duration,
    pub repeat_forever: bool,
    /// Play every other cycle backwards ("bounce").
    pub auto_reverses: bool,
}

impl ShimmerAnimation {
    /// Creates a linear, repeat-forever animation with no delay.
    pub fn linear(duration: Duration) -> Self {
        Self {
            curve: TimingCurve::Linear,
            duration,
            delay: Duration::ZERO,
            repeat_forever: true,
            auto_reverses: false,
        }
    }

    /// Builds the animation the legacy seconds-based overload describes.
    ///
    /// Negative or non-finite values collapse to zero instead of panicking.
    pub fn from_seconds(duration: f64, bounce: bool, delay: f64) -> Self {
        Self::linear(seconds(duration))
            .delay(seconds(delay))
            .auto_reverses(bounce)
    }

    pub fn curve(mut self, curve: TimingCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn repeat_forever(mut self, repeat: bool) -> Self {
        self.repeat_forever = repeat;
        self
    }

    pub fn auto_reverses(mut self, bounce: bool) -> Self {
        self.auto_reverses = bounce;
        self
    }

    /// Delay plus every leg of one non-repeating run.
    ///
    /// `None` when the total does not fit in a `Duration`.
    pub fn cycle_length(&self) -> Option<Duration> {
        let legs = if self.auto_reverses { 2 } else { 1 };
        self.duration.checked_mul(legs)?.checked_add(self.delay)
    }
}

impl Default for ShimmerAnimation {
    fn default() -> Self {
        DEFAULT_ANIMATION
    }
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// One stop of the mask ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Color,
    pub opacity: f32,
}

impl GradientStop {
    pub fn new(color: Color, opacity: f32) -> Self {
        Self { color, opacity }
    }

    /// An opaque black stop at the given opacity.
    pub fn black(opacity: f32) -> Self {
        Self::new((0.0, 0.0, 0.0, 1.0), opacity)
    }

    /// Effective mask alpha: the color's own alpha scaled by the stop opacity.
    pub fn alpha(&self) -> f32 {
        self.color.3 * self.opacity
    }
}

/// Parameters for one shimmer attachment.
///
/// Immutable once built; share one instance (for example through an `Arc`)
/// across as many attachments as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ShimmerConfig {
    pub animation: ShimmerAnimation,
    pub gradient: Vec<GradientStop>,
    /// Extension of the gradient bounds past the unit square on both ends.
    /// Not validated: negative values narrow the band inside the content.
    pub band_size: f32,
}

impl ShimmerConfig {
    pub fn new(animation: ShimmerAnimation, gradient: Vec<GradientStop>, band_size: f32) -> Self {
        Self {
            animation,
            gradient,
            band_size,
        }
    }

    pub fn with_animation(mut self, animation: ShimmerAnimation) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_gradient(mut self, gradient: Vec<GradientStop>) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn with_band_size(mut self, band_size: f32) -> Self {
        self.band_size = band_size;
        self
    }

    /// Lower bound of the extended gradient box.
    pub fn min(&self) -> f32 {
        -self.band_size
    }

    /// Upper bound of the extended gradient box.
    pub fn max(&self) -> f32 {
        1.0 + self.band_size
    }
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self::new(default_animation(), default_gradient(), DEFAULT_BAND_SIZE)
    }
}
