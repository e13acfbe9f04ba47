use super::*;
use std::path::PathBuf;

fn bitmap_only() -> FontBook {
    FontBook::new(FontOpts {
        system_fonts: false,
        files: Vec::new(),
    })
}

#[test]
fn without_fonts_ascii_ramps_use_bitmaps() {
    let mut book = bitmap_only();
    let set = book.glyph_set(GlyphRamp::Standard).unwrap();
    assert_eq!(set.len(), GlyphRamp::Standard.glyphs().len());
    assert!(!set.get(0).has_ink());
    for i in 1..set.len() {
        assert!(matches!(set.get(i), Glyph::Bitmap(_)), "glyph {i}");
    }
}

#[test]
fn without_fonts_kanji_stay_blank() {
    let mut book = bitmap_only();
    let set = book.glyph_set(GlyphRamp::Kanji).unwrap();
    assert!((0..set.len()).all(|i| !set.get(i).has_ink()));
}

#[test]
fn sets_are_resolved_once_per_ramp() {
    let mut book = bitmap_only();
    let a = book.glyph_set(GlyphRamp::Numeric).unwrap();
    let b = book.glyph_set(GlyphRamp::Numeric).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn unreadable_font_file_fails_every_request() {
    let mut book = FontBook::new(FontOpts {
        system_fonts: false,
        files: vec![PathBuf::from("does/not/exist.ttf")],
    });
    let err = book.glyph_set(GlyphRamp::Standard).unwrap_err();
    assert!(err.to_string().contains("exist.ttf"));
    assert!(book.glyph_set(GlyphRamp::Standard).is_err());
}

#[test]
fn installed_fonts_never_lose_ascii_ink() {
    let mut book = FontBook::new(FontOpts::default());
    let set = book.glyph_set(GlyphRamp::Standard).unwrap();
    assert!(!set.get(0).has_ink());
    assert!(set.get(usize::MAX).has_ink());
}

#[test]
fn stack_prefers_latin_monospace_then_japanese() {
    assert!(GLYPH_FONT_STACK.starts_with("\"IBM Plex Mono\""));
    assert!(GLYPH_FONT_STACK.contains("\"Noto Sans JP\""));
    assert!(GLYPH_FONT_STACK.ends_with("monospace"));
}
