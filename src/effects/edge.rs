//! Sobel edge detection over the luma plane.

use rayon::prelude::*;

use crate::foundation::math::luma_px;
use crate::params::records::EdgeParams;
use crate::render::raster::RasterBuffer;

/// Sobel gradient magnitude at interior pixel `(x, y)` of a `width`-wide luma plane.
pub fn sobel_magnitude(gray: &[f64], width: usize, x: usize, y: usize) -> f64 {
    let at = |dx: isize, dy: isize| {
        let xx = (x as isize + dx) as usize;
        let yy = (y as isize + dy) as usize;
        gray[yy * width + xx]
    };
    let gx = -at(-1, -1) - 2.0 * at(-1, 0) - at(-1, 1) + at(1, -1) + 2.0 * at(1, 0) + at(1, 1);
    let gy = -at(-1, -1) - 2.0 * at(0, -1) - at(1, -1) + at(-1, 1) + 2.0 * at(0, 1) + at(1, 1);
    (gx * gx + gy * gy).sqrt()
}

pub fn apply(src: &RasterBuffer, out: &mut RasterBuffer, p: &EdgeParams) {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let gray: Vec<f64> = src.data().chunks_exact(4).map(luma_px).collect();
    let line = p.line_color.to_rgba();
    let black = [0, 0, 0, 255];

    out.data_mut()
        .par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let interior = x > 0 && y > 0 && x + 1 < w && y + 1 < h;
                let edge = interior && sobel_magnitude(&gray, w, x, y) * p.strength > p.threshold;
                px.copy_from_slice(if edge { &line } else { &black });
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/edge.rs"]
mod tests;
