//! Ramp glyphs as the canvas draws them.
//!
//! A glyph is a font outline when some font covers the character. Otherwise it falls back
//! to a `font8x8` bitmap, which covers ASCII and hiragana. Characters neither source
//! covers are drawn blank.

use font8x8::{BASIC_FONTS, HIRAGANA_FONTS, UnicodeFonts};

/// Eight rows, bit 0 is the leftmost column.
pub type GlyphBitmap = [u8; 8];

/// One shaped glyph with its metrics normalized to a font size of 1.
#[derive(Clone)]
pub struct OutlineGlyph {
    pub font: vello_cpu::peniko::FontData,
    pub id: u32,
    /// Horizontal advance per pixel of font size.
    pub advance: f32,
    /// Distance from the em-box middle down to the baseline, per pixel of font size.
    pub baseline: f32,
}

impl std::fmt::Debug for OutlineGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineGlyph")
            .field("id", &self.id)
            .field("font_index", &self.font.index)
            .field("advance", &self.advance)
            .field("baseline", &self.baseline)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub enum Glyph {
    /// Whitespace, or a character no font covers.
    Blank,
    Outline(OutlineGlyph),
    Bitmap(GlyphBitmap),
}

impl Glyph {
    pub fn has_ink(&self) -> bool {
        !matches!(self, Glyph::Blank)
    }
}

/// `font8x8` bitmap for `ch`, if it has one with any ink.
pub fn bitmap_glyph(ch: char) -> Option<GlyphBitmap> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| HIRAGANA_FONTS.get(ch))
        .filter(|rows| rows.iter().any(|&r| r != 0))
}

/// Bitmap or blank for `ch`; the resolution used when no font is available.
pub fn fallback_glyph(ch: char) -> Glyph {
    if ch.is_whitespace() {
        return Glyph::Blank;
    }
    bitmap_glyph(ch).map_or(Glyph::Blank, Glyph::Bitmap)
}

/// Resolved glyphs for one ramp, indexed like the ramp.
#[derive(Clone, Debug)]
pub struct GlyphSet {
    glyphs: Vec<Glyph>,
}

impl GlyphSet {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph at `index`, clamped to the last one.
    pub fn get(&self, index: usize) -> &Glyph {
        const BLANK: &Glyph = &Glyph::Blank;
        self.glyphs
            .get(index.min(self.glyphs.len().saturating_sub(1)))
            .unwrap_or(BLANK)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;
