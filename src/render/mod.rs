//! Software drawing helpers for RGBA frames.

mod graphics;

pub use graphics::{blend_pixel, draw_layer, fill_rounded_rect, flatten, to_rgba8};
