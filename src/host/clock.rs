//! Frame pacing for live previews.

use std::time::{Duration, Instant};

/// Tracks wall-clock time since a host started presenting and when the next
/// frame is due.
pub struct FrameClock {
    interval: Duration,
    started: Instant,
    last_frame: Option<Instant>,
}

impl FrameClock {
    /// Create a clock that paces frames at `fps` frames per second.
    pub fn new(fps: u32) -> Self {
        Self::with_interval(Duration::from_secs(1) / fps.max(1))
    }

    /// Create a clock with an explicit frame interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            started: Instant::now(),
            last_frame: None,
        }
    }

    /// Check if the next frame is due. If true, the frame is recorded.
    ///
    /// Returns true on the first call (no previous frame).
    pub fn should_render(&mut self) -> bool {
        let due = self.is_due();
        if due {
            self.last_frame = Some(Instant::now());
        }
        due
    }

    /// Check if a frame is due without recording one.
    pub fn is_due(&self) -> bool {
        match self.last_frame {
            None => true,
            Some(time) => time.elapsed() >= self.interval,
        }
    }

    /// Restart the clock, as when a view is remounted.
    pub fn reset(&mut self) {
        self.started = Instant::now();
        self.last_frame = None;
    }

    /// Time since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Get time until the next frame (zero if already due).
    pub fn time_until_next(&self) -> Duration {
        match self.last_frame {
            None => Duration::ZERO,
            Some(time) => self.interval.saturating_sub(time.elapsed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_first_call_renders() {
        let mut clock = FrameClock::new(30);
        assert!(clock.should_render());
    }

    #[test]
    fn test_immediate_second_call_waits() {
        let mut clock = FrameClock::new(1);
        clock.should_render();
        assert!(!clock.should_render());
        assert!(clock.time_until_next() > Duration::ZERO);
    }

    #[test]
    fn test_after_interval_renders() {
        let mut clock = FrameClock::with_interval(Duration::from_millis(30));
        clock.should_render();
        sleep(Duration::from_millis(40));
        assert!(clock.should_render());
    }

    #[test]
    fn test_reset_makes_frame_due() {
        let mut clock = FrameClock::new(1);
        clock.should_render();
        clock.reset();
        assert!(clock.is_due());
        assert_eq!(clock.time_until_next(), Duration::ZERO);
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.interval(), Duration::from_secs(1));
    }
}
