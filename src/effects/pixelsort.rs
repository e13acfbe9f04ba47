use crate::foundation::math::luma_px;
use crate::params::records::PixelSortParams;
use crate::render::raster::RasterBuffer;

/// Stable ascending luma sort of every maximal above-threshold run in one row.
pub fn sort_row(row: &mut [u8], threshold: f64) {
    let n = row.len() / 4;
    let mut x = 0;
    while x < n {
        if luma_px(&row[x * 4..x * 4 + 4]) <= threshold {
            x += 1;
            continue;
        }
        let start = x;
        while x < n && luma_px(&row[x * 4..x * 4 + 4]) > threshold {
            x += 1;
        }
        if x - start > 1 {
            let run = &mut row[start * 4..x * 4];
            let mut pixels: Vec<[u8; 4]> = run
                .chunks_exact(4)
                .map(|p| [p[0], p[1], p[2], p[3]])
                .collect();
            pixels.sort_by(|a, b| luma_px(a).total_cmp(&luma_px(b)));
            for (dst, px) in run.chunks_exact_mut(4).zip(pixels) {
                dst.copy_from_slice(&px);
            }
        }
    }
}

pub fn apply(src: &RasterBuffer, out: &mut RasterBuffer, p: &PixelSortParams) {
    out.copy_from(src);
    let stride = src.width() as usize * 4;
    for row in out.data_mut().chunks_exact_mut(stride) {
        sort_row(row, p.threshold);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pixelsort.rs"]
mod tests;
