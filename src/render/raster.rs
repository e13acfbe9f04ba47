use crate::foundation::core::{Rgb8, Size};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::canvas::MAX_CANVAS_EDGE;

/// Row-major RGBA8 pixels (straight alpha).
///
/// Invariant: `data.len() == width * height * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a raster filled with one opaque color.
    pub fn filled(size: Size, color: Rgb8) -> Self {
        let data = color.to_rgba().repeat(size.area());
        Self {
            width: size.width,
            height: size.height,
            data,
        }
    }

    /// Allocate an opaque black raster.
    pub fn black(size: Size) -> Self {
        Self::filled(size, Rgb8::BLACK)
    }

    /// Wrap existing RGBA8 bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> RasterFxResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| RasterFxError::validation("raster size overflow"))?;
        if data.len() != expected {
            return Err(RasterFxError::validation(format!(
                "raster data has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of a decoded `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Copy into an `image` buffer.
    pub fn to_image(&self) -> RasterFxResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| RasterFxError::validation("raster data does not match its dimensions"))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume into raw RGBA8 bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// The four bytes of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Pixel at integer coordinates clamped into the raster.
    #[inline]
    pub(crate) fn pixel_clamped(&self, x: i64, y: i64) -> [u8; 4] {
        let x = x.clamp(0, i64::from(self.width) - 1) as u32;
        let y = y.clamp(0, i64::from(self.height) - 1) as u32;
        self.pixel(x, y)
    }

    #[inline]
    pub(crate) fn put(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Overwrite every pixel with one opaque color.
    pub fn fill(&mut self, color: Rgb8) {
        let px = color.to_rgba();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Copy another raster of identical size.
    pub(crate) fn copy_from(&mut self, src: &RasterBuffer) {
        debug_assert_eq!(self.size(), src.size());
        self.data.copy_from_slice(&src.data);
    }

    /// Return `true` when every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }

    /// Nearest-neighbor resample of `src`'s `src_size` top-left region onto `dst_size` of
    /// `self`'s top-left region. Pixels outside `dst_size` are left as-is.
    pub(crate) fn resample_nearest_from(
        &mut self,
        src: &RasterBuffer,
        src_size: Size,
        dst_size: Size,
    ) {
        if src_size.is_empty() || dst_size.is_empty() {
            return;
        }
        let sw = src_size.width.min(src.width);
        let sh = src_size.height.min(src.height);
        let dw = dst_size.width.min(self.width);
        let dh = dst_size.height.min(self.height);
        for y in 0..dh {
            let sy = (((u64::from(y) * 2 + 1) * u64::from(sh)) / (u64::from(dh) * 2)) as u32;
            let sy = sy.min(sh - 1);
            for x in 0..dw {
                let sx = (((u64::from(x) * 2 + 1) * u64::from(sw)) / (u64::from(dw) * 2)) as u32;
                let sx = sx.min(sw - 1);
                let px = src.pixel(sx, sy);
                self.put(x, y, px);
            }
        }
    }

    /// Integer nearest-neighbor upscale.
    pub fn upscale_nearest(&self, factor: u32) -> RasterBuffer {
        let factor = factor.max(1);
        let size = Size::new(self.width * factor, self.height * factor);
        let mut out = RasterBuffer::black(size);
        for y in 0..size.height {
            for x in 0..size.width {
                out.put(x, y, self.pixel(x / factor, y / factor));
            }
        }
        out
    }

    /// Bilinear resize (via `image`) followed by flattening over `bg`, producing a fully
    /// opaque raster of `size`.
    pub(crate) fn resized_opaque(&self, size: Size, bg: Rgb8) -> RasterFxResult<RasterBuffer> {
        let img = self.to_image()?;
        let resized = if size == self.size() {
            img
        } else {
            image::imageops::resize(
                &img,
                size.width,
                size.height,
                image::imageops::FilterType::Triangle,
            )
        };
        let mut out = RasterBuffer::from_image(resized);
        flatten_to_opaque(&mut out.data, bg);
        Ok(out)
    }
}

/// Composite straight-alpha pixels over an opaque background, in place.
pub(crate) fn flatten_to_opaque(data: &mut [u8], bg: Rgb8) {
    let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let v = mul_div255_u16(u16::from(px[c]), a) + mul_div255_u16(bg[c], inv);
            px[c] = v.min(255) as u8;
        }
        px[3] = 255;
    }
}

/// Fit a source into a display area: scale down (never up) to fit within
/// `max(min, viewport - margin - reserved)`, flooring the result.
pub fn fit_to_viewport(source: Size, viewport: Size, fit: &crate::config::FitOpts) -> Size {
    if source.is_empty() {
        return Size::new(0, 0);
    }
    let max_w = f64::from(fit.min_width).max(
        f64::from(viewport.width) - f64::from(fit.margin) - f64::from(fit.reserved_width),
    );
    let max_h = f64::from(fit.min_height).max(f64::from(viewport.height) - f64::from(fit.margin));
    let ratio = (max_w / f64::from(source.width))
        .min(max_h / f64::from(source.height))
        .min(1.0);
    let w = (f64::from(source.width) * ratio).floor().max(1.0) as u32;
    let h = (f64::from(source.height) * ratio).floor().max(1.0) as u32;
    Size::new(w, h)
}

/// The engine's exclusively owned rasters.
///
/// Reallocated wholesale whenever the source or the display size changes.
#[derive(Clone, Debug)]
pub struct RasterSet {
    /// Decoded source, immutable once loaded.
    pub source: RasterBuffer,
    /// Source resampled to the display size, fully opaque.
    pub working: RasterBuffer,
    /// Transient buffer for multi-pass effects.
    pub scratch: RasterBuffer,
    /// Last rendered output.
    pub output: RasterBuffer,
}

impl RasterSet {
    /// Allocate working, scratch and output rasters for `display`.
    pub fn allocate(source: RasterBuffer, display: Size) -> RasterFxResult<Self> {
        if display.is_empty() {
            return Err(RasterFxError::validation(format!(
                "display size must be non-zero, got {display}"
            )));
        }
        if display.width > MAX_CANVAS_EDGE || display.height > MAX_CANVAS_EDGE {
            return Err(RasterFxError::validation(format!(
                "display size {display} exceeds {MAX_CANVAS_EDGE} pixels per edge"
            )));
        }
        let working = source.resized_opaque(display, Rgb8::BLACK)?;
        Ok(Self {
            source,
            working,
            scratch: RasterBuffer::black(display),
            output: RasterBuffer::black(display),
        })
    }

    /// Display size shared by working, scratch and output.
    pub fn display_size(&self) -> Size {
        self.working.size()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
