use crate::foundation::core::Rgb8;
use crate::foundation::error::RasterFxResult;
use crate::foundation::math::luma_px;
use crate::params::records::{DotsParams, GridLayout, Shape};
use crate::render::canvas::Canvas;
use crate::render::raster::RasterBuffer;

const LIGHT_BG: Rgb8 = Rgb8::new(0xf5, 0xf5, 0xf5);
const DARK_BG: Rgb8 = Rgb8::new(0x05, 0x07, 0x0b);

/// Grid step in pixels.
pub fn step(p: &DotsParams) -> u32 {
    (8.0 * p.spacing).floor().max(4.0) as u32
}

pub fn apply(src: &RasterBuffer, out: &mut RasterBuffer, p: &DotsParams) -> RasterFxResult<()> {
    let (width, height) = (src.width(), src.height());
    let step = step(p);
    let radius = (f64::from(step) * 0.45 * p.size).max(1.0);
    let (bg, ink) = if p.invert {
        (LIGHT_BG, Rgb8::BLACK)
    } else {
        (DARK_BG, Rgb8::WHITE)
    };
    out.fill(bg);
    let mut canvas = Canvas::new(out.size())?;

    for y in (0..height).step_by(step as usize) {
        let offset = match p.grid {
            GridLayout::Offset if (y / step) % 2 == 1 => f64::from(step) * 0.5,
            _ => 0.0,
        };
        for x in (0..width).step_by(step as usize) {
            let cx = f64::from(x) + offset;
            let px = (cx.floor() as u32).min(width - 1);
            let l = luma_px(&src.pixel(px, y));
            let value = if p.invert { l } else { 255.0 - l };
            let alpha = value / 255.0;
            let size = radius * alpha;
            let cy = f64::from(y);
            match p.shape {
                Shape::Square => {
                    canvas.fill_rect(cx - size / 2.0, cy - size / 2.0, size, size, ink, alpha);
                }
                Shape::Circle => canvas.fill_circle(cx, cy, size / 2.0, ink, alpha),
            }
        }
    }
    canvas.composite_onto(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/dots.rs"]
mod tests;
