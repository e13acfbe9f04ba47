//! Font discovery and per-ramp glyph resolution.
//!
//! Each ramp character is shaped once with `parley` against the glyph font stack (any
//! configured font files first). The resulting glyph id and font are kept for `vello_cpu`
//! to fill at whatever size an effect asks for.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context as _;

use crate::config::FontOpts;
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::render::glyph::{Glyph, GlyphSet, OutlineGlyph, fallback_glyph};
use crate::schema::ramps::GlyphRamp;

/// Families searched for ramp glyphs, Latin monospace first, then Japanese UI fonts.
pub const GLYPH_FONT_STACK: &str =
    r#""IBM Plex Mono", "Noto Sans JP", "BIZ UDゴシック", "Yu Gothic UI", "Meiryo", monospace"#;

const REFERENCE_SIZE: f32 = 64.0;

/// Shaping contexts plus the font stack they resolve against.
struct Shaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    stack: String,
}

impl Shaper {
    /// `None` when there is nothing to search.
    fn new(opts: &FontOpts) -> RasterFxResult<Option<Self>> {
        if !opts.system_fonts && opts.files.is_empty() {
            return Ok(None);
        }
        let mut font_ctx = parley::FontContext {
            collection: parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                system_fonts: opts.system_fonts,
                ..Default::default()
            }),
            source_cache: parley::fontique::SourceCache::default(),
        };

        let mut families = Vec::new();
        for path in &opts.files {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font file '{}'", path.display()))?;
            let registered = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes), None);
            if registered.is_empty() {
                return Err(RasterFxError::validation(format!(
                    "no font families found in '{}'",
                    path.display()
                )));
            }
            for (family_id, _) in registered {
                if let Some(name) = font_ctx.collection.family_name(family_id) {
                    families.push(format!("\"{name}\""));
                }
            }
        }
        if font_ctx.collection.family_names().next().is_none() {
            tracing::warn!("no fonts installed; glyphs fall back to bitmaps");
            return Ok(None);
        }
        families.push(GLYPH_FONT_STACK.to_owned());
        tracing::debug!(files = opts.files.len(), system = opts.system_fonts, "font shaper ready");

        Ok(Some(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            stack: families.join(", "),
        }))
    }

    /// Shape `ch` alone and keep its first glyph, unless the font stack has no real glyph for it.
    fn outline(
        &mut self,
        ch: char,
        fonts: &mut HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    ) -> Option<OutlineGlyph> {
        let mut buf = [0u8; 4];
        let text: &str = ch.encode_utf8(&mut buf);

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Borrowed(self.stack.as_str())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(REFERENCE_SIZE));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let line = layout.lines().next()?;
        let metrics = line.metrics();
        let baseline = (metrics.ascent - metrics.descent) * 0.5 / REFERENCE_SIZE;
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyph = run.glyphs().next()?;
            if glyph.id == 0 {
                return None;
            }
            let source = run.run().font();
            let font = fonts
                .entry((source.data.id(), source.index))
                .or_insert_with(|| {
                    vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::from(source.data.data().to_vec()),
                        source.index,
                    )
                })
                .clone();
            return Some(OutlineGlyph {
                font,
                id: glyph.id,
                advance: glyph.advance / REFERENCE_SIZE,
                baseline,
            });
        }
        None
    }
}

/// Fonts and resolved glyph sets for one engine.
///
/// Font discovery is deferred to the first glyph request, so engines that never draw
/// glyphs never scan installed fonts.
pub struct FontBook {
    opts: FontOpts,
    shaper: Option<Shaper>,
    ready: bool,
    fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    sets: HashMap<GlyphRamp, Arc<GlyphSet>>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("opts", &self.opts)
            .field("ready", &self.ready)
            .field("fonts", &self.fonts.len())
            .field("ramps", &self.sets.len())
            .finish()
    }
}

impl FontBook {
    pub fn new(opts: FontOpts) -> Self {
        Self {
            opts,
            shaper: None,
            ready: false,
            fonts: HashMap::new(),
            sets: HashMap::new(),
        }
    }

    /// Glyphs for `ramp`, resolved on first use and cached afterwards.
    pub fn glyph_set(&mut self, ramp: GlyphRamp) -> RasterFxResult<Arc<GlyphSet>> {
        if let Some(set) = self.sets.get(&ramp) {
            return Ok(Arc::clone(set));
        }
        if !self.ready {
            self.shaper = Shaper::new(&self.opts)?;
            self.ready = true;
        }

        let mut outlines = 0usize;
        let mut unresolved = Vec::new();
        let glyphs = ramp
            .symbols()
            .chars()
            .map(|ch| {
                if ch.is_whitespace() {
                    return Glyph::Blank;
                }
                if let Some(outline) = self
                    .shaper
                    .as_mut()
                    .and_then(|s| s.outline(ch, &mut self.fonts))
                {
                    outlines += 1;
                    return Glyph::Outline(outline);
                }
                let glyph = fallback_glyph(ch);
                if !glyph.has_ink() {
                    unresolved.push(ch);
                }
                glyph
            })
            .collect();

        if !unresolved.is_empty() {
            let missing: String = unresolved.into_iter().collect();
            tracing::warn!(?ramp, %missing, "no font covers these glyphs; they are drawn blank");
        }
        tracing::debug!(?ramp, outlines, "glyph set resolved");

        let set = Arc::new(GlyphSet::new(glyphs));
        self.sets.insert(ramp, Arc::clone(&set));
        Ok(set)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
