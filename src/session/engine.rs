use std::io::Cursor;

use image::ImageEncoder as _;
use image::codecs::png::PngEncoder;

use crate::config::EngineOpts;
use crate::effects::cache::{FallingSnapshot, RenderState};
use crate::effects::voronoi::VoronoiReport;
use crate::effects::{DispatchTable, RenderTargets, TransformKind, apply_effect};
use crate::foundation::core::Size;
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::params::records::Effect;
use crate::params::store::{EffectStateStore, ParamSet};
use crate::render::fonts::FontBook;
use crate::render::raster::{RasterBuffer, RasterSet, fit_to_viewport};
use crate::schema::{EffectId, ParamValue, Schema};

/// What one render call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderReport {
    pub effect: EffectId,
    pub kind: TransformKind,
    /// Frame counter after this render.
    pub frame: u64,
    /// Present for Voronoi renders.
    pub voronoi: Option<VoronoiReport>,
}

/// The stylization engine: parameters, rasters and persistent effect state.
///
/// One engine owns exactly one set of rasters; renders are synchronous and never overlap.
#[derive(Debug)]
pub struct Engine {
    opts: EngineOpts,
    store: EffectStateStore,
    table: DispatchTable,
    active: EffectId,
    viewport: Option<Size>,
    rasters: Option<RasterSet>,
    state: RenderState,
    fonts: FontBook,
}

impl Engine {
    /// Create an engine over the built-in schema with every effect at its defaults.
    pub fn new(opts: EngineOpts) -> RasterFxResult<Self> {
        opts.validate()?;
        let schema = Schema::builtin();
        let table = DispatchTable::for_schema(schema)?;
        Ok(Self {
            fonts: FontBook::new(opts.fonts.clone()),
            opts,
            store: EffectStateStore::new(schema),
            table,
            active: EffectId::Ascii,
            viewport: None,
            rasters: None,
            state: RenderState::default(),
        })
    }

    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    pub fn store(&self) -> &EffectStateStore {
        &self.store
    }

    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.table
    }

    /// Replace the source image and reallocate every raster.
    #[tracing::instrument(skip(self, source), fields(width = source.width(), height = source.height()))]
    pub fn load_source(&mut self, source: RasterBuffer) -> RasterFxResult<Size> {
        if source.size().is_empty() {
            return Err(RasterFxError::validation("source image must be non-empty"));
        }
        let display_size = self.display_for(source.size());
        self.rasters = Some(RasterSet::allocate(source, display_size)?);
        self.state.invalidate();
        tracing::info!(%display_size, "source loaded");
        Ok(display_size)
    }

    /// Set the available display area. `None` renders at source resolution.
    ///
    /// Rasters are reallocated (and caches invalidated) only when the fitted size changes.
    pub fn set_viewport(&mut self, viewport: Option<Size>) -> RasterFxResult<()> {
        self.viewport = viewport;
        let Some(current) = self.rasters.as_ref() else {
            return Ok(());
        };
        let display_size = self.display_for(current.source.size());
        if display_size == current.display_size() {
            return Ok(());
        }
        if let Some(old) = self.rasters.take() {
            self.rasters = Some(RasterSet::allocate(old.source, display_size)?);
            self.state.invalidate();
            tracing::info!(%display_size, "rasters reallocated");
        }
        Ok(())
    }

    fn display_for(&self, source: Size) -> Size {
        match self.viewport {
            Some(viewport) => fit_to_viewport(source, viewport, &self.opts.fit),
            None => source,
        }
    }

    pub fn has_image(&self) -> bool {
        self.rasters.is_some()
    }

    pub fn display_size(&self) -> Option<Size> {
        self.rasters.as_ref().map(RasterSet::display_size)
    }

    pub fn active_effect(&self) -> EffectId {
        self.active
    }

    pub fn select_effect(&mut self, id: EffectId) {
        self.active = id;
    }

    /// Set one control of `effect`; see [`EffectStateStore::set`].
    pub fn set_param(&mut self, effect: EffectId, key: &str, value: ParamValue) -> RasterFxResult<()> {
        self.store.set(effect, key, value)
    }

    pub fn set_param_str(&mut self, effect: EffectId, key: &str, raw: &str) -> RasterFxResult<()> {
        self.store.set_str(effect, key, raw)
    }

    pub fn apply_param_json(&mut self, effect: EffectId, json: &serde_json::Value) -> RasterFxResult<()> {
        self.store.apply_json(effect, json)
    }

    pub fn reset_effect(&mut self, effect: EffectId) -> RasterFxResult<()> {
        self.store.reset_effect(effect)
    }

    /// Last rendered output, if an image is loaded.
    pub fn output(&self) -> Option<&RasterBuffer> {
        self.rasters.as_ref().map(|r| &r.output)
    }

    /// Renders since the last invalidation.
    pub fn frame_counter(&self) -> u64 {
        self.state.frame_counter
    }

    /// Current Falling-Stream state (heads, frame counter, motion source).
    pub fn falling_snapshot(&self) -> FallingSnapshot {
        self.state.snapshot_falling()
    }

    pub(crate) fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    /// Render `effect` with its stored parameters.
    pub fn render(&mut self, effect: EffectId, time: f64) -> RasterFxResult<RenderReport> {
        let decoded = Effect::decode(effect, self.store.params(effect)?)?;
        self.render_effect(&decoded, time)
    }

    /// Render `effect` with an explicit parameter set.
    pub fn render_with(
        &mut self,
        effect: EffectId,
        params: &ParamSet,
        time: f64,
    ) -> RasterFxResult<RenderReport> {
        let decoded = Effect::decode(effect, params)?;
        self.render_effect(&decoded, time)
    }

    fn render_effect(&mut self, effect: &Effect, time: f64) -> RasterFxResult<RenderReport> {
        let id = effect.id();
        let kind = self.table.kind(id)?;
        let rasters = self
            .rasters
            .as_mut()
            .ok_or_else(|| RasterFxError::validation("no source image loaded"))?;
        let outcome = apply_effect(
            effect,
            RenderTargets {
                working: &rasters.working,
                scratch: &mut rasters.scratch,
                output: &mut rasters.output,
            },
            &mut self.state,
            &mut self.fonts,
            time,
        )?;
        self.state.frame_counter += 1;
        tracing::debug!(effect = %id, frame = self.state.frame_counter, time, "rendered");
        Ok(RenderReport {
            effect: id,
            kind,
            frame: self.state.frame_counter,
            voronoi: outcome.voronoi,
        })
    }

    /// Render into an external raster (used by animated capture) instead of the live output.
    pub(crate) fn render_into(
        &mut self,
        effect: &Effect,
        target: &mut RasterBuffer,
        time: f64,
    ) -> RasterFxResult<()> {
        let rasters = self
            .rasters
            .as_mut()
            .ok_or_else(|| RasterFxError::validation("no source image loaded"))?;
        if target.size() != rasters.display_size() {
            return Err(RasterFxError::validation(format!(
                "capture raster is {}, display is {}",
                target.size(),
                rasters.display_size()
            )));
        }
        apply_effect(
            effect,
            RenderTargets {
                working: &rasters.working,
                scratch: &mut rasters.scratch,
                output: target,
            },
            &mut self.state,
            &mut self.fonts,
            time,
        )?;
        self.state.frame_counter += 1;
        Ok(())
    }

    /// Encode the current output as PNG, optionally upscaled 2× nearest-neighbor.
    #[tracing::instrument(skip(self))]
    pub fn export_still(&self, high_quality: bool) -> RasterFxResult<Vec<u8>> {
        let output = self
            .output()
            .ok_or_else(|| RasterFxError::validation("nothing rendered: no source image loaded"))?;
        let upscaled;
        let frame = if high_quality {
            upscaled = output.upscale_nearest(2);
            &upscaled
        } else {
            output
        };
        let mut bytes = Vec::new();
        PngEncoder::new(Cursor::new(&mut bytes)).write_image(
            frame.data(),
            frame.width(),
            frame.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        tracing::info!(size = %frame.size(), bytes = bytes.len(), "still exported");
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/engine.rs"]
mod tests;
