//! Falling-Stream ("matrix rain").
//!
//! Unlike every other transform this one reads its own previous output: a translucent
//! black veil is laid over the prior frame before new glyphs are drawn, so trails fade
//! out over several frames instead of being cleared.

use rand::Rng as _;

use crate::effects::cache::{FallingCache, MotionSource};
use crate::foundation::core::Rgb8;
use crate::foundation::error::RasterFxResult;
use crate::foundation::math::{brightness_contrast, luma_px};
use crate::params::records::{Direction, MatrixParams};
use crate::render::canvas::{Canvas, GlyphPlacement};
use crate::render::fonts::FontBook;
use crate::render::raster::RasterBuffer;

const MAX_TRAIL_DRAW: u32 = 72;

/// Column geometry for a raster width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamGrid {
    pub cell: f64,
    pub step: f64,
    pub columns: u32,
}

impl StreamGrid {
    pub fn new(width: u32, p: &MatrixParams) -> Self {
        let cell = p.cell_size.floor().max(6.0);
        let step = (cell * (0.78 + p.spacing)).floor().max(4.0);
        let columns = (f64::from(width) / step).ceil() as u32;
        Self {
            cell,
            step,
            columns,
        }
    }
}

/// Opacity of the glyph `trail` steps behind the head.
pub fn trail_alpha(adjusted: f64, trail: u32, count: u32, threshold: f64) -> f64 {
    let fade = 1.0 - f64::from(trail) / f64::from(count);
    let active = 0.2 + (adjusted / 255.0) * 0.8;
    let mask = if adjusted >= threshold { 1.0 } else { 0.35 };
    (active * fade * mask).max(0.05)
}

/// Soft halo behind a glyph; `glow` is the blur radius in pixels.
fn fill_glow(canvas: &mut Canvas, at: GlyphPlacement, glow: f64) {
    if glow <= 0.0 || at.alpha <= 0.0 {
        return;
    }
    let radius = at.size * 0.5 + glow * 0.5;
    let strength = (glow / 40.0).min(1.0) * 0.2 * at.alpha;
    canvas.fill_circle(at.cx, at.cy, radius, at.color, strength);
}

/// Advance one frame, compositing onto `out`'s existing contents.
pub fn apply(
    src: &RasterBuffer,
    out: &mut RasterBuffer,
    p: &MatrixParams,
    fonts: &mut FontBook,
    cache: &mut Option<FallingCache>,
    motion: &mut MotionSource,
) -> RasterFxResult<()> {
    let (width, height) = (src.width(), src.height());
    let grid = StreamGrid::new(width, p);
    let fresh = cache.as_ref().is_none_or(|c| c.columns != grid.columns);
    if fresh {
        tracing::debug!(columns = grid.columns, "falling stream heads reset");
        *cache = Some(FallingCache::seeded(grid.columns, height, motion));
    }
    let Some(state) = cache.as_mut() else {
        return Ok(());
    };

    let glyphs = fonts.glyph_set(p.ramp)?;
    let mut canvas = Canvas::new(out.size())?;
    canvas.fill_all(Rgb8::BLACK, p.bg_opacity);

    let mut picker = rand::rng();
    let speed = match p.direction {
        Direction::Down => p.speed,
        Direction::Up => -p.speed,
    };
    let sign = if speed < 0.0 { -1.0 } else { 1.0 };
    let threshold = p.threshold * 255.0;
    let trail_len = p.trail_length.floor().max(6.0);
    let count = (trail_len as u32).min(MAX_TRAIL_DRAW);
    let span = trail_len * grid.step;
    let h = f64::from(height);
    let glow = (12.0 * p.glow).max(0.0);

    for (col, head) in state.heads.iter_mut().enumerate() {
        let x = col as f64 * grid.step + grid.step * 0.5;
        let px = (x.floor() as i64).clamp(0, i64::from(width) - 1);
        for trail in 0..count {
            let y = *head - f64::from(trail) * grid.step * sign;
            let py = (y.floor() as i64).rem_euclid(i64::from(height));
            let l = luma_px(&src.pixel_clamped(px, py));
            let adjusted = brightness_contrast(l, p.brightness - 100.0, p.contrast);
            let at = GlyphPlacement {
                cx: x,
                cy: py as f64,
                size: grid.cell,
                aspect: p.ramp.aspect(),
                color: p.rain_color,
                alpha: trail_alpha(adjusted, trail, count, threshold),
            };
            let glyph = glyphs.get(picker.random_range(0..glyphs.len().max(1)));
            if glyph.has_ink() {
                fill_glow(&mut canvas, at, glow);
                canvas.fill_glyph(glyph, at);
            }
        }

        *head += speed * (1.0 + motion.next_f64() * 0.8);
        if *head > h + span {
            *head = -motion.next_f64() * span;
        }
        if *head < -span {
            *head = h + motion.next_f64() * span;
        }
    }

    canvas.composite_onto(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/falling.rs"]
mod tests;
