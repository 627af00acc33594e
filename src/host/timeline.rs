//! Host-side animation driver.
//!
//! Turns a [`ShimmerAnimation`] description and the time elapsed since the
//! animation started into interpolation progress. This is the piece a UI
//! framework's animation engine would normally supply.

use std::time::Duration;

use crate::effect::ShimmerAnimation;

/// Evaluates one animation over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    animation: ShimmerAnimation,
}

impl Timeline {
    pub fn new(animation: ShimmerAnimation) -> Self {
        Self { animation }
    }

    pub fn animation(&self) -> &ShimmerAnimation {
        &self.animation
    }

    /// Number of legs in a single non-repeating run.
    fn legs(&self) -> u32 {
        if self.animation.auto_reverses {
            2
        } else {
            1
        }
    }

    /// Progress (0.0-1.0, after the timing curve) at `elapsed` since start.
    ///
    /// Holds at 0.0 during the delay. With zero duration the value jumps
    /// straight to its end.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let anim = &self.animation;
        if elapsed < anim.delay {
            return 0.0;
        }
        let active = elapsed - anim.delay;

        if anim.duration.is_zero() {
            return if anim.auto_reverses && !anim.repeat_forever {
                0.0
            } else {
                1.0
            };
        }

        let position = active.as_secs_f64() / anim.duration.as_secs_f64();
        if !anim.repeat_forever && position >= self.legs() as f64 {
            // Finished: rest on the last leg's end value.
            return if anim.auto_reverses { 0.0 } else { 1.0 };
        }

        let leg = position.floor();
        let fraction = (position - leg) as f32;
        let forward = !anim.auto_reverses || (leg as u64) % 2 == 0;
        let raw = if forward { fraction } else { 1.0 - fraction };

        anim.curve.apply(raw)
    }

    /// True once a non-repeating animation has played all of its legs.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        if self.animation.repeat_forever {
            return false;
        }
        // A run too long to represent never finishes.
        self.animation
            .cycle_length()
            .is_some_and(|total| elapsed >= total)
    }
}
