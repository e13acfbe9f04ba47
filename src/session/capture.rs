//! Animated Falling-Stream export.
//!
//! The capture runs the stream from a fresh, seeded state into its own raster, feeds
//! each frame to a [`FrameEncoder`], and puts the live stream state back afterwards no
//! matter how the export ends.

use crate::effects::cache::{FallingSnapshot, MotionSource};
use crate::encode::sink::{EncoderConfig, EncoderOutcome, FrameEncoder};
use crate::foundation::core::Size;
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::foundation::math::SeededRng;
use crate::params::records::Effect;
use crate::render::raster::RasterBuffer;
use crate::schema::EffectId;
use crate::session::engine::Engine;

/// Where the host process was started from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostOrigin {
    /// Local process with full I/O.
    #[default]
    Native,
    /// Served over a network origin.
    Network,
    /// Opened from a local file without network semantics; the encoder cannot run.
    LocalFile,
}

impl HostOrigin {
    pub fn supports_encoder(self) -> bool {
        !matches!(self, HostOrigin::LocalFile)
    }
}

/// Progress of an animated export; `percent` is in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum ExportProgress {
    Capturing { current: u32, total: u32, percent: f64 },
    Encoding { percent: f64 },
}

/// Frame count and per-frame delay of an animated export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationRequest {
    pub frame_count: u32,
    pub delay_ms: u32,
}

impl AnimationRequest {
    /// The engine's configured defaults.
    pub fn from_opts(engine: &Engine) -> Self {
        let export = &engine.opts().export;
        Self {
            frame_count: export.frame_count,
            delay_ms: export.delay_ms,
        }
    }
}

/// Result of one capture tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureStep {
    /// Frame `n` (1-based) was captured; more remain.
    Captured(u32),
    /// Every frame has been captured; call [`AnimatedExport::finish`].
    Complete,
}

/// An in-progress animated export. Holds the engine exclusively, so live renders cannot
/// interleave with capture ticks.
pub struct AnimatedExport<'e, E: FrameEncoder> {
    engine: &'e mut Engine,
    encoder: E,
    effect: Effect,
    request: AnimationRequest,
    capture: RasterBuffer,
    snapshot: Option<FallingSnapshot>,
    captured: u32,
}

impl<'e, E: FrameEncoder> AnimatedExport<'e, E> {
    /// Check preconditions, save live state and start the encoder.
    ///
    /// Fails fast, before the encoder is touched, when no encoder is supplied or the host
    /// cannot run it.
    #[tracing::instrument(skip(engine, encoder), fields(frames = request.frame_count, delay = request.delay_ms))]
    pub fn begin(
        engine: &'e mut Engine,
        encoder: Option<E>,
        origin: HostOrigin,
        request: AnimationRequest,
    ) -> RasterFxResult<Self> {
        let encoder = encoder.ok_or_else(|| {
            RasterFxError::encoder_unavailable("no animation encoder was supplied")
        })?;
        if !origin.supports_encoder() {
            return Err(RasterFxError::unsupported_environment(
                "animated export cannot run from a local-file origin",
            ));
        }
        if request.frame_count == 0 {
            return Err(RasterFxError::validation("frame count must be non-zero"));
        }
        let display_size: Size = engine
            .display_size()
            .ok_or_else(|| RasterFxError::validation("no source image loaded"))?;
        let effect = Effect::decode(EffectId::Matrix, engine.store().params(EffectId::Matrix)?)?;

        let seed = engine.opts().export.capture_seed;
        let state = engine.state_mut();
        let snapshot = state.snapshot_falling();
        state.falling = None;
        state.frame_counter = 0;
        state.motion = MotionSource::Seeded(SeededRng::new(seed));

        let mut export = Self {
            engine,
            encoder,
            effect,
            request,
            capture: RasterBuffer::black(display_size),
            snapshot: Some(snapshot),
            captured: 0,
        };
        let cfg = EncoderConfig {
            width: display_size.width,
            height: display_size.height,
            frame_count: request.frame_count,
        };
        export.encoder.begin(cfg).map_err(|e| {
            RasterFxError::encoding_failure(format!("encoder rejected setup: {e}"))
        })?;
        tracing::info!(%display_size, "animated capture started");
        Ok(export)
    }

    pub fn request(&self) -> AnimationRequest {
        self.request
    }

    /// Frames captured so far.
    pub fn captured(&self) -> u32 {
        self.captured
    }

    /// Capture one frame and hand it to the encoder.
    pub fn capture_tick(
        &mut self,
        progress: &mut dyn FnMut(ExportProgress),
    ) -> RasterFxResult<CaptureStep> {
        let total = self.request.frame_count;
        if self.captured >= total {
            return Ok(CaptureStep::Complete);
        }
        let time = f64::from(self.captured) * f64::from(self.request.delay_ms);
        self.engine
            .render_into(&self.effect, &mut self.capture, time)?;
        self.encoder
            .add_frame(&self.capture, self.request.delay_ms)
            .map_err(|e| RasterFxError::encoding_failure(format!("encoder rejected frame: {e}")))?;
        self.captured += 1;
        progress(ExportProgress::Capturing {
            current: self.captured,
            total,
            percent: f64::from(self.captured) / f64::from(total),
        });
        Ok(CaptureStep::Captured(self.captured))
    }

    /// Finalize the encoder and restore live state.
    ///
    /// Progress from the encoder is forwarded as [`ExportProgress::Encoding`].
    #[tracing::instrument(skip_all)]
    pub fn finish(mut self, progress: &mut dyn FnMut(ExportProgress)) -> RasterFxResult<Vec<u8>> {
        if self.captured < self.request.frame_count {
            return Err(RasterFxError::validation(format!(
                "finish called after {} of {} frames",
                self.captured, self.request.frame_count
            )));
        }
        progress(ExportProgress::Encoding { percent: 0.0 });
        let outcome = self.encoder.finish(&mut |p| {
            progress(ExportProgress::Encoding {
                percent: p.clamp(0.0, 1.0),
            })
        });
        self.restore();
        match outcome {
            EncoderOutcome::Finished(bytes) => {
                tracing::info!(bytes = bytes.len(), "animated export finished");
                Ok(bytes)
            }
            EncoderOutcome::Aborted => Err(RasterFxError::encoding_failure("encoder aborted")),
            EncoderOutcome::Errored(cause) => Err(RasterFxError::encoding_failure(cause)),
        }
    }

    /// Stop early; live state is restored and the export resolves to a failure.
    pub fn abort(mut self) -> RasterFxError {
        self.restore();
        tracing::warn!(captured = self.captured, "animated export aborted");
        RasterFxError::encoding_failure("animated export aborted")
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.engine.state_mut().restore_falling(snapshot);
        }
    }
}

impl<E: FrameEncoder> Drop for AnimatedExport<'_, E> {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Run a complete animated export: begin, one capture tick per frame, finish.
pub fn export_animation<E: FrameEncoder>(
    engine: &mut Engine,
    encoder: Option<E>,
    origin: HostOrigin,
    request: AnimationRequest,
    progress: &mut dyn FnMut(ExportProgress),
) -> RasterFxResult<Vec<u8>> {
    let mut export = AnimatedExport::begin(engine, encoder, origin, request)?;
    while let CaptureStep::Captured(_) = export.capture_tick(progress)? {}
    export.finish(progress)
}

#[cfg(test)]
#[path = "../../tests/unit/session/capture.rs"]
mod tests;
