use kurbo::Point;

use crate::foundation::core::Rgb8;
use crate::foundation::error::RasterFxResult;
use crate::foundation::math::luma_px;
use crate::params::records::CrosshatchParams;
use crate::render::canvas::Canvas;
use crate::render::raster::RasterBuffer;

const BG: Rgb8 = Rgb8::new(0x05, 0x07, 0x0c);
const STROKE: Rgb8 = Rgb8::new(0xf5, 0xf5, 0xf5);
const STROKE_WIDTH: f64 = 1.0;

/// Hatching tiers for one sample: diagonal, anti-diagonal, vertical.
pub fn tiers(l: f64) -> [bool; 3] {
    [l < 210.0, l < 150.0, l < 90.0]
}

pub fn apply(src: &RasterBuffer, out: &mut RasterBuffer, p: &CrosshatchParams) -> RasterFxResult<()> {
    let (width, height) = (src.width(), src.height());
    let d = p.density.max(4.0);
    out.fill(BG);
    let mut canvas = Canvas::new(out.size())?;

    let mut y = 0.0;
    while y < f64::from(height) {
        let mut x = 0.0;
        while x < f64::from(width) {
            let l = luma_px(&src.pixel(x as u32, y as u32));
            let [diag, anti, vert] = tiers(l);
            let mut stroke = |from: Point, to: Point| {
                canvas.stroke_line(from, to, STROKE_WIDTH, STROKE, 1.0);
            };
            if diag {
                stroke(Point::new(x, y), Point::new(x + d, y + d));
            }
            if anti {
                stroke(Point::new(x + d, y), Point::new(x, y + d));
            }
            if vert {
                stroke(Point::new(x + d / 2.0, y), Point::new(x + d / 2.0, y + d));
            }
            x += d;
        }
        y += d;
    }
    canvas.composite_onto(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/crosshatch.rs"]
mod tests;
