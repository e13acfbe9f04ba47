//! Vector painting for the shape and glyph effects.
//!
//! Shapes are built as `kurbo` paths and glyphs as `vello_cpu` glyph runs. Everything is
//! rasterized into one transparent layer, which is then composited source-over onto an
//! opaque target raster.

use kurbo::Shape as _;

use crate::foundation::core::{Rgb8, Size};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::glyph::{Glyph, GlyphBitmap, OutlineGlyph};
use crate::render::raster::RasterBuffer;

/// Largest raster edge a canvas can cover.
pub const MAX_CANVAS_EDGE: u32 = u16::MAX as u32;

const CURVE_TOLERANCE: f64 = 0.1;

/// Where and how to draw one glyph.
#[derive(Clone, Copy, Debug)]
pub struct GlyphPlacement {
    /// Center of the glyph box.
    pub cx: f64,
    pub cy: f64,
    /// Font size in pixels.
    pub size: f64,
    /// Bitmap box width relative to its height. Outlines keep their own advance.
    pub aspect: f64,
    pub color: Rgb8,
    pub alpha: f64,
}

/// A transparent drawing layer the size of one raster.
pub struct Canvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Canvas {
    pub fn new(size: Size) -> RasterFxResult<Self> {
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| RasterFxError::validation("canvas width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| RasterFxError::validation("canvas height exceeds u16"))?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    /// Select a solid paint; `false` when `alpha` rounds to fully transparent.
    fn set_color(&mut self, color: Rgb8, alpha: f64) -> bool {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        if a == 0 {
            return false;
        }
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, a));
        true
    }

    /// Cover the whole canvas, e.g. for a translucent veil.
    pub fn fill_all(&mut self, color: Rgb8, alpha: f64) {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        self.fill_rect(0.0, 0.0, w, h, color, alpha);
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb8, alpha: f64) {
        if w <= 0.0 || h <= 0.0 || !self.set_color(color, alpha) {
            return;
        }
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x, y, x + w, y + h));
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb8, alpha: f64) {
        if r <= 0.0 || !self.set_color(color, alpha) {
            return;
        }
        let path = kurbo::Circle::new((cx, cy), r).to_path(CURVE_TOLERANCE);
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }

    /// Straight stroke of `width` pixels with butt ends.
    pub fn stroke_line(
        &mut self,
        from: kurbo::Point,
        to: kurbo::Point,
        width: f64,
        color: Rgb8,
        alpha: f64,
    ) {
        let d = to - from;
        let len = d.hypot();
        if len <= 0.0 || width <= 0.0 || !self.set_color(color, alpha) {
            return;
        }
        let n = kurbo::Vec2::new(-d.y, d.x) * (width * 0.5 / len);
        let mut path = kurbo::BezPath::new();
        path.move_to(from + n);
        path.line_to(to + n);
        path.line_to(to - n);
        path.line_to(from - n);
        path.close_path();
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }

    /// Draw `glyph` centered on the placement point. Blank glyphs draw nothing.
    pub fn fill_glyph(&mut self, glyph: &Glyph, at: GlyphPlacement) {
        if at.size <= 0.0 || !glyph.has_ink() || !self.set_color(at.color, at.alpha) {
            return;
        }
        match glyph {
            Glyph::Blank => {}
            Glyph::Outline(outline) => self.fill_outline(outline, at),
            Glyph::Bitmap(rows) => self.fill_bitmap(rows, at),
        }
    }

    fn fill_outline(&mut self, outline: &OutlineGlyph, at: GlyphPlacement) {
        let size = at.size as f32;
        let glyph = vello_cpu::Glyph {
            id: outline.id,
            x: at.cx as f32 - outline.advance * size * 0.5,
            y: at.cy as f32 + outline.baseline * size,
        };
        self.ctx
            .glyph_run(&outline.font)
            .font_size(size)
            .fill_glyphs(std::iter::once(glyph));
    }

    /// Lit bitmap cells, one rectangle per horizontal run.
    fn fill_bitmap(&mut self, rows: &GlyphBitmap, at: GlyphPlacement) {
        let h = at.size;
        let w = (at.size * at.aspect).max(1.0);
        let (left, top) = (at.cx - w / 2.0, at.cy - h / 2.0);
        let (cw, ch) = (w / 8.0, h / 8.0);
        for (row, &bits) in rows.iter().enumerate() {
            let y = top + row as f64 * ch;
            let mut col = 0u32;
            while col < 8 {
                if bits & (1 << col) == 0 {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < 8 && bits & (1 << col) != 0 {
                    col += 1;
                }
                let x = left + f64::from(start) * cw;
                self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    x,
                    y,
                    x + f64::from(col - start) * cw,
                    y + ch,
                ));
            }
        }
    }

    /// Rasterize everything drawn so far and composite it over `target`.
    pub fn composite_onto(mut self, target: &mut RasterBuffer) -> RasterFxResult<()> {
        if target.width() != u32::from(self.width) || target.height() != u32::from(self.height) {
            return Err(RasterFxError::validation(format!(
                "canvas is {}x{}, target raster is {}",
                self.width,
                self.height,
                target.size()
            )));
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        over_opaque_in_place(target.data_mut(), pixmap.data_as_u8_slice())
    }
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Premultiplied `src` over an opaque `dst`. The result stays opaque.
pub fn over_opaque(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8, 0, 0, 255];
    for i in 0..3 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_opaque_in_place(dst: &mut [u8], src: &[u8]) -> RasterFxResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RasterFxError::validation(
            "over_opaque_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over_opaque([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
