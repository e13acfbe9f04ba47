use crate::params::records::VhsParams;
use crate::render::raster::RasterBuffer;

/// Vertical row offset at clock `time` (milliseconds).
pub fn jitter_offset(time: f64, p: &VhsParams) -> i64 {
    (p.jitter * (time * 0.01).sin()).floor() as i64
}

pub fn apply(src: &RasterBuffer, out: &mut RasterBuffer, p: &VhsParams, time: f64) {
    let (w, h) = (i64::from(src.width()), i64::from(src.height()));
    let shift = p.shift.floor() as i64;
    let jitter = jitter_offset(time, p);
    let keep = 1.0 - p.scan;

    for y in 0..h {
        let sy = (y + jitter).rem_euclid(h);
        for x in 0..w {
            let r = src.pixel_clamped(x + shift, sy)[0];
            let g = src.pixel_clamped(x, sy)[1];
            let b = src.pixel_clamped(x - shift, sy)[2];
            let mut px = [r, g, b, 255];
            if y % 2 == 0 {
                for c in &mut px[..3] {
                    *c = (f64::from(*c) * keep).round() as u8;
                }
            }
            out.put(x as u32, y as u32, px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/vhs.rs"]
mod tests;
