//! rasterfx is a raster-image stylization engine.
//!
//! A decoded source image is fitted to a display size, then one of fifteen effects
//! (glyph mosaics, ordered dithering, halftone, falling glyph streams, Voronoi cells, VHS
//! distortion and more) turns it into an output raster. The output can be exported as a
//! PNG still, and the falling-stream effect as a looping animated GIF.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `RasterBuffer -> RasterSet` (source fitted and flattened to an opaque
//!    working raster)
//! 2. **Parameterize**: `Schema -> EffectStateStore -> ParamSet -> Effect` (validated
//!    controls decoded into a typed record)
//! 3. **Render**: `Engine::render` runs the effect's transform into the output raster,
//!    and a `RenderScheduler` decides when that happens. Shape and glyph effects paint
//!    with `vello_cpu`; glyphs are shaped by `parley` from installed fonts or the files
//!    listed in `FontOpts`.
//! 4. **Export**: `Engine::export_still` (PNG) or `export_animation` (frames streamed into a
//!    `FrameEncoder`)
#![forbid(unsafe_code)]

mod config;
mod effects;
mod encode;
mod foundation;
mod params;
mod render;
mod schema;
mod session;

pub use config::{EngineOpts, ExportOpts, FitOpts, FontOpts};
pub use effects::cache::{
    FallingCache, FallingSnapshot, MotionSource, RenderState, VoronoiCache, VoronoiTag,
};
pub use effects::mosaic::{CellGrid, GlyphCell, plan_cells};
pub use effects::pixelsort::sort_row;
pub use effects::voronoi::{MAX_ACTIVE_SEEDS, VoronoiReport};
pub use effects::{DispatchTable, TransformKind};
pub use encode::gif::GifFrameEncoder;
pub use encode::sink::{EncoderConfig, EncoderOutcome, FrameEncoder, InMemoryEncoder};
pub use foundation::core::{Rgb8, Size};
pub use foundation::error::{RasterFxError, RasterFxResult};
pub use foundation::math::{SeededRng, brightness_contrast, clamp, luma};
pub use params::records::{
    AsciiParams, BlockifyParams, CrosshatchParams, Direction, DitherParams, DotsParams,
    EdgeParams, Effect, GlyphColorMode, GridLayout, HalftoneParams, MatrixParams, NoiseParams,
    PixelSortParams, Shape, ThresholdParams, VhsParams, VoronoiParams, WaveParams,
};
pub use params::store::{EffectStateStore, ParamSet};
pub use render::raster::{RasterBuffer, RasterSet, fit_to_viewport};
pub use schema::ramps::{GlyphRamp, ramp_index};
pub use schema::{ControlDescriptor, ControlKind, EffectDescriptor, EffectId, ParamValue, Schema};
pub use session::capture::{
    AnimatedExport, AnimationRequest, CaptureStep, ExportProgress, HostOrigin, export_animation,
};
pub use session::engine::{Engine, RenderReport};
pub use session::scheduler::RenderScheduler;
