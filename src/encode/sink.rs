use crate::foundation::error::RasterFxResult;
use crate::render::raster::RasterBuffer;

/// Configuration handed to a [`FrameEncoder`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will be added.
    pub frame_count: u32,
}

/// How an encoder run terminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncoderOutcome {
    /// Encoded bytes.
    Finished(Vec<u8>),
    /// The encoder gave up without an error.
    Aborted,
    /// The encoder failed.
    Errored(String),
}

/// Byte-level animation encoder.
///
/// Contract: `begin` once, `add_frame` once per captured frame in order, then `finish`
/// exactly once. `finish` may report progress in `[0, 1]` and terminates with exactly one
/// [`EncoderOutcome`].
pub trait FrameEncoder {
    /// Called once before any frame is added.
    fn begin(&mut self, cfg: EncoderConfig) -> RasterFxResult<()>;
    /// Queue one frame shown for `delay_ms` milliseconds.
    fn add_frame(&mut self, frame: &RasterBuffer, delay_ms: u32) -> RasterFxResult<()>;
    /// Encode everything queued.
    fn finish(&mut self, progress: &mut dyn FnMut(f64)) -> EncoderOutcome;
}

/// In-memory encoder for tests and debugging.
///
/// Frames are kept as-is; `finish` yields their raw bytes concatenated, or a scripted
/// outcome.
#[derive(Debug, Default)]
pub struct InMemoryEncoder {
    cfg: Option<EncoderConfig>,
    frames: Vec<(RasterBuffer, u32)>,
    scripted: Option<EncoderOutcome>,
    finished: bool,
}

impl InMemoryEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// An encoder whose `finish` returns `outcome` instead of the frame bytes.
    pub fn with_outcome(outcome: EncoderOutcome) -> Self {
        Self {
            scripted: Some(outcome),
            ..Self::default()
        }
    }

    pub fn config(&self) -> Option<EncoderConfig> {
        self.cfg
    }

    /// Frames and their delays, in the order they were added.
    pub fn frames(&self) -> &[(RasterBuffer, u32)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameEncoder for InMemoryEncoder {
    fn begin(&mut self, cfg: EncoderConfig) -> RasterFxResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn add_frame(&mut self, frame: &RasterBuffer, delay_ms: u32) -> RasterFxResult<()> {
        self.frames.push((frame.clone(), delay_ms));
        Ok(())
    }

    fn finish(&mut self, progress: &mut dyn FnMut(f64)) -> EncoderOutcome {
        self.finished = true;
        progress(0.5);
        if let Some(outcome) = self.scripted.clone() {
            return outcome;
        }
        progress(1.0);
        EncoderOutcome::Finished(
            self.frames
                .iter()
                .flat_map(|(f, _)| f.data().iter().copied())
                .collect(),
        )
    }
}

/// Forwarding impl so callers can keep ownership of an encoder and inspect it afterwards.
impl<E: FrameEncoder + ?Sized> FrameEncoder for &mut E {
    fn begin(&mut self, cfg: EncoderConfig) -> RasterFxResult<()> {
        (**self).begin(cfg)
    }

    fn add_frame(&mut self, frame: &RasterBuffer, delay_ms: u32) -> RasterFxResult<()> {
        (**self).add_frame(frame, delay_ms)
    }

    fn finish(&mut self, progress: &mut dyn FnMut(f64)) -> EncoderOutcome {
        (**self).finish(progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
