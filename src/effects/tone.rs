//! Binary tone effects: luma threshold and 4×4 ordered dithering.

use crate::foundation::math::{brightness_contrast, luma_px};
use crate::params::records::{DitherParams, ThresholdParams};
use crate::render::raster::RasterBuffer;

/// Bayer levels 0..=15.
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

fn binarize(src: &RasterBuffer, out: &mut RasterBuffer, mut on: impl FnMut(u32, u32, f64) -> bool) {
    let width = src.width();
    for (i, (d, s)) in out
        .data_mut()
        .chunks_exact_mut(4)
        .zip(src.data().chunks_exact(4))
        .enumerate()
    {
        let (x, y) = ((i as u32) % width, (i as u32) / width);
        let v = if on(x, y, luma_px(s)) { 255 } else { 0 };
        d.copy_from_slice(&[v, v, v, 255]);
    }
}

pub fn threshold(src: &RasterBuffer, out: &mut RasterBuffer, p: &ThresholdParams) {
    binarize(src, out, |_, _, l| l > p.level);
}

pub fn dither(src: &RasterBuffer, out: &mut RasterBuffer, p: &DitherParams) {
    binarize(src, out, |x, y, l| {
        let level = BAYER_4X4[(y % 4) as usize][(x % 4) as usize];
        let t = f64::from(level) / 16.0 * 255.0;
        brightness_contrast(l, 0.0, p.contrast) > t
    });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/tone.rs"]
mod tests;
