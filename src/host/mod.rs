//! The rendering host side: time, frame pacing and compositing.
//!
//! The effect only describes what to animate. Everything that advances over
//! time lives here.

mod clock;
mod compositor;
mod timeline;

pub use clock::FrameClock;
pub use compositor::{Compositor, Mounted};
pub use timeline::Timeline;
