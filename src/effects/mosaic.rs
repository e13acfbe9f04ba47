//! Mosaic-Glyph: one glyph per grid cell, picked from a ramp by the cell's brightness.

use crate::foundation::core::Rgb8;
use crate::foundation::error::RasterFxResult;
use crate::foundation::math::{brightness_contrast, clamp_channel, luma};
use crate::params::records::{AsciiParams, GlyphColorMode};
use crate::render::canvas::{Canvas, GlyphPlacement};
use crate::render::fonts::FontBook;
use crate::render::raster::RasterBuffer;
use crate::schema::ramps::ramp_index;

const MIN_COLUMNS: f64 = 10.0;
const DARK_BG: Rgb8 = Rgb8::new(0x06, 0x08, 0x0d);

/// Grid geometry derived from the raster width and the effect parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellGrid {
    pub columns: u32,
    pub cell_w: f64,
    pub cell_h: f64,
    pub font_size: f64,
    pub aspect: f64,
}

impl CellGrid {
    pub fn new(width: u32, p: &AsciiParams) -> Self {
        let columns = (p.output_width / p.scale.max(0.2)).floor().max(MIN_COLUMNS);
        let cell_w = f64::from(width) / columns;
        let cell_h = cell_w * (1.0 + p.spacing);
        let aspect = p.ramp.aspect();
        let font_size = (cell_h * 1.05).min(cell_w / aspect).floor().max(8.0);
        Self {
            columns: columns as u32,
            cell_w,
            cell_h,
            font_size,
            aspect,
        }
    }
}

/// One planned glyph: cell origin, ramp index and ink color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphCell {
    pub x: f64,
    pub y: f64,
    pub index: usize,
    pub color: Rgb8,
}

/// Background fill for the current mode.
pub fn background(p: &AsciiParams) -> Rgb8 {
    match p.mode {
        GlyphColorMode::Monochrome => {
            Rgb8::gray(clamp_channel(255.0 * p.background_intensity / 2.0) as u8)
        }
        GlyphColorMode::Original => DARK_BG,
    }
}

/// Sample every cell and decide its glyph and color.
pub fn plan_cells(src: &RasterBuffer, p: &AsciiParams) -> Vec<GlyphCell> {
    let grid = CellGrid::new(src.width(), p);
    let ramp_len = p.ramp.glyphs().len();
    let (w, h) = (f64::from(src.width()), f64::from(src.height()));
    let mut cells = Vec::new();

    let mut y = 0.0;
    while y < h {
        let mut x = 0.0;
        while x < w {
            let (r, g, b) = sample_adjusted(src, x.floor() as i64, y.floor() as i64, p);
            let l = luma(r, g, b) / 255.0;
            let corrected = l.powf(1.0 / p.gamma);
            let mut value = clamp_channel(corrected * 255.0 * p.brightness_map);
            if p.invert {
                value = 255.0 - value;
            }
            let color = match p.mode {
                GlyphColorMode::Monochrome => Rgb8::gray(value as u8),
                GlyphColorMode::Original => Rgb8::new(r as u8, g as u8, b as u8),
            };
            cells.push(GlyphCell {
                x,
                y,
                index: ramp_index(value, ramp_len),
                color,
            });
            x += grid.cell_w;
        }
        y += grid.cell_h;
    }
    cells
}

/// Per-channel brightness/contrast, then the optional color adjustments.
fn sample_adjusted(src: &RasterBuffer, x: i64, y: i64, p: &AsciiParams) -> (f64, f64, f64) {
    let adjust = |px: [u8; 4]| -> [f64; 3] {
        [0, 1, 2].map(|c| brightness_contrast(f64::from(px[c]), p.brightness, p.contrast + 100.0))
    };
    let mut rgb = adjust(src.pixel_clamped(x, y));

    if p.sharpness > 0.0 {
        let n = [(0, -1), (-1, 0), (1, 0), (0, 1)].map(|(dx, dy)| adjust(src.pixel_clamped(x + dx, y + dy)));
        for c in 0..3 {
            let mean = n.iter().map(|v| v[c]).sum::<f64>() / 4.0;
            rgb[c] = clamp_channel(rgb[c] + p.sharpness * (rgb[c] - mean));
        }
    }
    if p.saturation != 0.0 {
        let l = luma(rgb[0], rgb[1], rgb[2]);
        let k = 1.0 + p.saturation / 100.0;
        for v in &mut rgb {
            *v = clamp_channel(l + (*v - l) * k);
        }
    }
    if p.hue_rotation != 0.0 {
        rgb = hue_rotate(rgb, p.hue_rotation);
    }
    (rgb[0], rgb[1], rgb[2])
}

/// Luma-preserving hue rotation by `degrees`.
fn hue_rotate([r, g, b]: [f64; 3], degrees: f64) -> [f64; 3] {
    let (s, c) = degrees.to_radians().sin_cos();
    let m = [
        [
            0.213 + c * 0.787 - s * 0.213,
            0.715 - c * 0.715 - s * 0.715,
            0.072 - c * 0.072 + s * 0.928,
        ],
        [
            0.213 - c * 0.213 + s * 0.143,
            0.715 + c * 0.285 + s * 0.140,
            0.072 - c * 0.072 - s * 0.283,
        ],
        [
            0.213 - c * 0.213 - s * 0.787,
            0.715 - c * 0.715 + s * 0.715,
            0.072 + c * 0.928 + s * 0.072,
        ],
    ];
    m.map(|row| clamp_channel(row[0] * r + row[1] * g + row[2] * b))
}

pub fn apply(
    src: &RasterBuffer,
    out: &mut RasterBuffer,
    p: &AsciiParams,
    fonts: &mut FontBook,
) -> RasterFxResult<()> {
    out.fill(background(p));
    let grid = CellGrid::new(src.width(), p);
    let glyphs = fonts.glyph_set(p.ramp)?;
    let mut canvas = Canvas::new(out.size())?;
    for cell in plan_cells(src, p) {
        canvas.fill_glyph(
            glyphs.get(cell.index),
            GlyphPlacement {
                cx: cell.x + grid.cell_w / 2.0,
                cy: cell.y + grid.cell_h / 2.0,
                size: grid.font_size,
                aspect: grid.aspect,
                color: cell.color,
                alpha: 1.0,
            },
        );
    }
    canvas.composite_onto(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mosaic.rs"]
mod tests;
