use crate::foundation::error::{RasterFxError, RasterFxResult};

/// Ordered glyph sequences, darkest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphRamp {
    /// ` .:-=+*#%@`
    Standard,
    /// Dense ASCII ramp.
    Blocks,
    /// Digits.
    Numeric,
    /// Punctuation and brackets.
    Symbol,
    /// Hiragana phrase.
    Hiragana,
    /// Dense kanji.
    Kanji,
    /// Hiragana followed by kanji.
    JapaneseMix,
}

impl GlyphRamp {
    /// Every ramp, in catalog order.
    pub const ALL: [GlyphRamp; 7] = [
        GlyphRamp::Standard,
        GlyphRamp::Blocks,
        GlyphRamp::Numeric,
        GlyphRamp::Symbol,
        GlyphRamp::Hiragana,
        GlyphRamp::Kanji,
        GlyphRamp::JapaneseMix,
    ];

    /// Catalog name used in parameter sets.
    pub fn name(self) -> &'static str {
        match self {
            GlyphRamp::Standard => "STANDARD",
            GlyphRamp::Blocks => "BLOCKS",
            GlyphRamp::Numeric => "NUMERIC",
            GlyphRamp::Symbol => "SYMBOL",
            GlyphRamp::Hiragana => "HIRAGANA",
            GlyphRamp::Kanji => "KANJI",
            GlyphRamp::JapaneseMix => "JAPANESE_MIX",
        }
    }

    /// Resolve a catalog name.
    pub fn from_name(name: &str) -> RasterFxResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| RasterFxError::validation(format!("unknown glyph ramp '{name}'")))
    }

    /// The ramp's symbols as a string.
    pub fn symbols(self) -> &'static str {
        match self {
            GlyphRamp::Standard => " .:-=+*#%@",
            GlyphRamp::Blocks => " .,:;irsXA253hMHGS#9B&@",
            GlyphRamp::Numeric => "0123456789",
            GlyphRamp::Symbol => "<>/\\{}[]!?+-=~",
            GlyphRamp::Hiragana => "\u{3000}くるしいくらいいたいしぬかなしい",
            GlyphRamp::Kanji => {
                "\u{3000}鬱彙鬱欝魑魅魍魎蠱麒麟饕餮贔屓齟齬蹉跌曖昧朦朧薔薇憂鬱慟哭煩悶懊悩逡巡躊躇矜持僥倖邂逅漆黒玲瓏驟雨晦冥艱難晦渋"
            }
            GlyphRamp::JapaneseMix => {
                "\u{3000}くるしいくらいいたいしぬかなしい・鬱彙魑魅魍魎蠱麒麟饕餮贔屓齟齬蹉跌曖昧朦朧薔薇憂鬱慟哭煩悶懊悩逡巡躊躇矜持僥倖邂逅"
            }
        }
    }

    /// The ramp's symbols as a char vector.
    pub fn glyphs(self) -> Vec<char> {
        self.symbols().chars().collect()
    }

    /// Full-width ramps use a square glyph cell.
    pub fn is_wide(self) -> bool {
        matches!(
            self,
            GlyphRamp::Hiragana | GlyphRamp::Kanji | GlyphRamp::JapaneseMix
        )
    }

    /// Width/height ratio of one glyph cell.
    pub fn aspect(self) -> f64 {
        if self.is_wide() { 1.0 } else { 0.62 }
    }
}

/// Map a `[0, 255]` value linearly onto an index into a ramp of `len` glyphs.
pub fn ramp_index(value: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let idx = ((value.clamp(0.0, 255.0) / 255.0) * (len - 1) as f64).floor() as usize;
    idx.min(len - 1)
}
