use image::{Rgba, RgbaImage};

use crate::effect::Color;

/// Converts a 0.0-1.0 color into 8-bit RGBA.
pub fn to_rgba8(color: Color) -> Rgba<u8> {
    let (r, g, b, a) = color;
    Rgba([channel(r), channel(g), channel(b), channel(a)])
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn to_color(pixel: &Rgba<u8>) -> Color {
    let [r, g, b, a] = pixel.0;
    (
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    )
}

/// Source-over blend of `color` at `coverage` onto a straight-alpha pixel.
pub fn blend_pixel(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let (r, g, b, a) = color;
    let src_a = (a * coverage).clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }

    let [dr, dg, db, da] = dst.0;
    let dst_a = da as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let mix = |s: f32, d: u8| -> u8 {
        let d = d as f32 / 255.0;
        channel((s * src_a + d * dst_a * (1.0 - src_a)) / out_a)
    };

    dst.0 = [mix(r, dr), mix(g, dg), mix(b, db), channel(out_a)];
}

/// Fills an anti-aliased rounded rectangle.
///
/// The radius is clamped to half the shorter side.
pub fn fill_rounded_rect(
    image: &mut RgbaImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    color: Color,
) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let r = radius.max(0.0).min(width / 2.0).min(height / 2.0);

    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let cx = x + half_w;
    let cy = y + half_h;

    let (img_w, img_h) = image.dimensions();
    let x0 = x.floor().max(0.0) as u32;
    let y0 = y.floor().max(0.0) as u32;
    let x1 = ((x + width).ceil().max(0.0) as u32).min(img_w);
    let y1 = ((y + height).ceil().max(0.0) as u32).min(img_h);

    for py in y0..y1 {
        for px in x0..x1 {
            // Signed distance from the pixel centre to the rounded box edge
            let qx = ((px as f64 + 0.5) - cx).abs() - (half_w - r);
            let qy = ((py as f64 + 0.5) - cy).abs() - (half_h - r);
            let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
            let inside = qx.max(qy).min(0.0);
            let distance = outside + inside - r;

            let coverage = (0.5 - distance).clamp(0.0, 1.0) as f32;
            if coverage > 0.0 {
                blend_pixel(image.get_pixel_mut(px, py), color, coverage);
            }
        }
    }
}

/// Composites a straight-alpha frame over an opaque background.
pub fn flatten(frame: &RgbaImage, background: Color) -> RgbaImage {
    let (r, g, b, _) = background;
    let mut out = RgbaImage::from_pixel(frame.width(), frame.height(), to_rgba8((r, g, b, 1.0)));
    for (x, y, pixel) in frame.enumerate_pixels() {
        blend_pixel(out.get_pixel_mut(x, y), to_color(pixel), 1.0);
    }
    out
}

/// Composites a straight-alpha layer onto `image` with its top-left corner
/// at (`x`, `y`). Parts outside the image are dropped.
///
/// Layer pixels over fully transparent pixels are copied unchanged.
pub fn draw_layer(image: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    let (img_w, img_h) = (image.width() as i64, image.height() as i64);
    for (lx, ly, pixel) in layer.enumerate_pixels() {
        let (px, py) = (x + lx as i64, y + ly as i64);
        if px < 0 || py < 0 || px >= img_w || py >= img_h {
            continue;
        }
        let dst = image.get_pixel_mut(px as u32, py as u32);
        if dst.0[3] == 0 {
            *dst = *pixel;
        } else {
            blend_pixel(dst, to_color(pixel), 1.0);
        }
    }
}
