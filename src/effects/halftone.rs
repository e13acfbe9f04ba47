use crate::foundation::core::Rgb8;
use crate::foundation::error::RasterFxResult;
use crate::foundation::math::luma_px;
use crate::params::records::{HalftoneParams, Shape};
use crate::render::canvas::Canvas;
use crate::render::raster::RasterBuffer;

const BG: Rgb8 = Rgb8::new(0x05, 0x07, 0x0c);
const INK: Rgb8 = Rgb8::new(0xef, 0xef, 0xef);

/// Dot radius for a sample of luma `l` in a cell of `cell` pixels.
pub fn dot_radius(l: f64, cell: f64) -> f64 {
    (1.0 - l / 255.0) * cell * 0.55
}

pub fn apply(src: &RasterBuffer, out: &mut RasterBuffer, p: &HalftoneParams) -> RasterFxResult<()> {
    let (width, height) = (src.width(), src.height());
    let cell = p.cell.max(3.0);
    out.fill(BG);
    let mut canvas = Canvas::new(out.size())?;

    let mut y = 0.0;
    while y < f64::from(height) {
        let mut x = 0.0;
        while x < f64::from(width) {
            let sx = (x as u32).min(width - 1);
            let sy = (y as u32).min(height - 1);
            let r = dot_radius(luma_px(&src.pixel(sx, sy)), cell);
            match p.shape {
                Shape::Square => {
                    let size = (r * 1.2).max(1.0);
                    canvas.fill_rect(x - size / 2.0, y - size / 2.0, size, size, INK, 1.0);
                }
                Shape::Circle => canvas.fill_circle(x, y, r.max(0.8), INK, 1.0),
            }
            x += cell;
        }
        y += cell;
    }
    canvas.composite_onto(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/halftone.rs"]
mod tests;
