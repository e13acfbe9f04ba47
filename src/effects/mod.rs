//! Effect dispatch: identifier → transform, plus the transforms themselves.

pub(crate) mod blockify;
pub(crate) mod cache;
pub(crate) mod crosshatch;
pub(crate) mod dots;
pub(crate) mod edge;
pub(crate) mod falling;
pub(crate) mod halftone;
pub(crate) mod mosaic;
pub(crate) mod noise;
pub(crate) mod pixelsort;
pub(crate) mod tone;
pub(crate) mod vhs;
pub(crate) mod voronoi;
pub(crate) mod wave;

use std::collections::BTreeMap;

use crate::effects::cache::RenderState;
use crate::effects::voronoi::VoronoiReport;
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::params::records::{EdgeParams, Effect};
use crate::params::store::ParamSet;
use crate::render::fonts::FontBook;
use crate::render::raster::RasterBuffer;
use crate::schema::{EffectId, Schema};

/// How a transform relates to time, scratch space and persisted state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Reads the working raster and parameters only.
    Pure,
    /// Also reads the animation clock.
    Timed,
    /// Uses the scratch raster as an intermediate.
    Scratch,
    /// Reads and refreshes a tagged cache entry.
    Cached,
    /// Composites onto its own previous output.
    Feedback,
}

impl TransformKind {
    /// Transform kind of each built-in effect.
    pub fn of(id: EffectId) -> Self {
        match id {
            EffectId::Ascii
            | EffectId::Dithering
            | EffectId::Halftone
            | EffectId::Dots
            | EffectId::Contour
            | EffectId::PixelSort
            | EffectId::Threshold
            | EffectId::Edge
            | EffectId::Crosshatch
            | EffectId::NoiseField => TransformKind::Pure,
            EffectId::WaveLines | EffectId::Vhs => TransformKind::Timed,
            EffectId::Blockify => TransformKind::Scratch,
            EffectId::Voronoi => TransformKind::Cached,
            EffectId::Matrix => TransformKind::Feedback,
        }
    }
}

/// Registered transforms, checked against a schema at construction.
#[derive(Clone, Debug)]
pub struct DispatchTable {
    entries: BTreeMap<EffectId, TransformKind>,
}

impl DispatchTable {
    /// Register every schema effect and check that its defaults decode into a record.
    pub fn for_schema(schema: &Schema) -> RasterFxResult<Self> {
        let mut entries = BTreeMap::new();
        for desc in schema.effects() {
            Effect::decode(desc.id, &ParamSet::defaults_for(desc)).map_err(|e| {
                RasterFxError::validation(format!("effect '{}' defaults do not decode: {e}", desc.id))
            })?;
            if entries.insert(desc.id, TransformKind::of(desc.id)).is_some() {
                return Err(RasterFxError::validation(format!(
                    "effect '{}' is declared twice",
                    desc.id
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn kind(&self, id: EffectId) -> RasterFxResult<TransformKind> {
        self.entries
            .get(&id)
            .copied()
            .ok_or_else(|| RasterFxError::validation(format!("no transform registered for '{id}'")))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.entries.keys().copied()
    }
}

/// Rasters one transform invocation may touch.
#[derive(Debug)]
pub struct RenderTargets<'a> {
    pub working: &'a RasterBuffer,
    pub scratch: &'a mut RasterBuffer,
    /// For [`TransformKind::Feedback`] this also holds the previous frame.
    pub output: &'a mut RasterBuffer,
}

/// Side information from one transform run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub voronoi: Option<VoronoiReport>,
}

/// Run `effect` once.
///
/// Fails only when glyph fonts cannot be loaded or a raster is too large to paint.
pub fn apply_effect(
    effect: &Effect,
    targets: RenderTargets<'_>,
    state: &mut RenderState,
    fonts: &mut FontBook,
    time: f64,
) -> RasterFxResult<EffectOutcome> {
    let RenderTargets {
        working: src,
        scratch,
        output: out,
    } = targets;
    let mut outcome = EffectOutcome::default();
    match effect {
        Effect::Ascii(p) => mosaic::apply(src, out, p, fonts)?,
        Effect::Dithering(p) => tone::dither(src, out, p),
        Effect::Halftone(p) => halftone::apply(src, out, p)?,
        Effect::Matrix(p) => {
            falling::apply(src, out, p, fonts, &mut state.falling, &mut state.motion)?;
        }
        Effect::Dots(p) => dots::apply(src, out, p)?,
        Effect::Contour => edge::apply(src, out, &EdgeParams::CONTOUR),
        Effect::PixelSort(p) => pixelsort::apply(src, out, p),
        Effect::Blockify(p) => blockify::apply(src, scratch, out, p),
        Effect::Threshold(p) => tone::threshold(src, out, p),
        Effect::Edge(p) => edge::apply(src, out, p),
        Effect::Crosshatch(p) => crosshatch::apply(src, out, p)?,
        Effect::WaveLines(p) => wave::apply(src, out, p, time),
        Effect::NoiseField(p) => noise::apply(src, out, p),
        Effect::Voronoi(p) => {
            outcome.voronoi = Some(voronoi::apply(src, out, p, &mut state.voronoi));
        }
        Effect::Vhs(p) => vhs::apply(src, out, p, time),
    }
    Ok(outcome)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/dispatch.rs"]
mod tests;
