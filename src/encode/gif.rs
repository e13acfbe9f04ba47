//! Animated GIF output through the `image` crate's GIF codec.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::encode::sink::{EncoderConfig, EncoderOutcome, FrameEncoder};
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::render::raster::RasterBuffer;

/// Buffers frames, then quantizes and writes a looping GIF in `finish`.
pub struct GifFrameEncoder {
    speed: i32,
    cfg: Option<EncoderConfig>,
    frames: Vec<Frame>,
}

impl std::fmt::Debug for GifFrameEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifFrameEncoder")
            .field("speed", &self.speed)
            .field("cfg", &self.cfg)
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl GifFrameEncoder {
    /// `speed` trades quality for time, 1 (best) to 30 (fastest).
    pub fn new(speed: i32) -> Self {
        Self {
            speed: speed.clamp(1, 30),
            cfg: None,
            frames: Vec::new(),
        }
    }

    fn write_all(&mut self, progress: &mut dyn FnMut(f64)) -> image::ImageResult<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut enc = GifEncoder::new_with_speed(&mut bytes, self.speed);
            enc.set_repeat(Repeat::Infinite)?;
            let total = self.frames.len().max(1) as f64;
            for (i, frame) in self.frames.drain(..).enumerate() {
                enc.encode_frame(frame)?;
                progress((i + 1) as f64 / total);
            }
        }
        Ok(bytes)
    }
}

impl FrameEncoder for GifFrameEncoder {
    fn begin(&mut self, cfg: EncoderConfig) -> RasterFxResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(RasterFxError::validation("gif width/height must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(RasterFxError::validation(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        self.cfg = Some(cfg);
        self.frames.clear();
        self.frames.reserve(cfg.frame_count as usize);
        Ok(())
    }

    fn add_frame(&mut self, frame: &RasterBuffer, delay_ms: u32) -> RasterFxResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| RasterFxError::encoding_failure("add_frame called before begin"))?;
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(RasterFxError::encoding_failure(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        self.frames
            .push(Frame::from_parts(frame.to_image()?, 0, 0, delay));
        Ok(())
    }

    fn finish(&mut self, progress: &mut dyn FnMut(f64)) -> EncoderOutcome {
        if self.cfg.is_none() {
            return EncoderOutcome::Errored("finish called before begin".to_owned());
        }
        match self.write_all(progress) {
            Ok(bytes) => EncoderOutcome::Finished(bytes),
            Err(e) => EncoderOutcome::Errored(e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
