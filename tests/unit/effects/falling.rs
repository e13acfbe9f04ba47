use super::*;
use crate::foundation::core::Size;
use crate::config::FontOpts;
use crate::foundation::math::SeededRng;
use crate::params::records::Effect;
use crate::params::store::ParamSet;
use crate::schema::ramps::GlyphRamp;
use crate::schema::{EffectId, Schema};

fn bitmap_fonts() -> FontBook {
    FontBook::new(FontOpts {
        system_fonts: false,
        files: Vec::new(),
    })
}

fn defaults() -> MatrixParams {
    let desc = Schema::builtin().effect(EffectId::Matrix).unwrap();
    match Effect::decode(EffectId::Matrix, &ParamSet::defaults_for(desc)).unwrap() {
        Effect::Matrix(p) => p,
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn grid_uses_step_floors() {
    let mut p = defaults();
    assert_eq!(StreamGrid::new(100, &p).step, 12.0);
    assert_eq!(StreamGrid::new(100, &p).columns, 9);
    p.cell_size = 8.0;
    assert_eq!(StreamGrid::new(100, &p).step, 6.0);
}

#[test]
fn trail_alpha_fades_and_never_vanishes() {
    assert!((trail_alpha(255.0, 0, 10, 0.0) - 1.0).abs() < 1e-12);
    assert!(trail_alpha(255.0, 5, 10, 0.0) < trail_alpha(255.0, 1, 10, 0.0));
    assert_eq!(trail_alpha(0.0, 9, 10, 200.0), 0.05);
    // Below threshold the hard mask dims the glyph.
    let masked = trail_alpha(100.0, 0, 10, 200.0);
    let unmasked = trail_alpha(100.0, 0, 10, 50.0);
    assert!((masked - unmasked * 0.35).abs() < 1e-12);
}

#[test]
fn heads_are_created_per_column_and_reset_on_resize() {
    let p = defaults();
    let mut cache = None;
    let mut motion = MotionSource::Seeded(SeededRng::new(3));
    let mut fonts = bitmap_fonts();
    let src = RasterBuffer::black(Size::new(100, 40));
    let mut out = RasterBuffer::black(Size::new(100, 40));
    apply(&src, &mut out, &p, &mut fonts, &mut cache, &mut motion).unwrap();
    assert_eq!(cache.as_ref().map(|c| c.heads.len()), Some(9));

    let wide = RasterBuffer::black(Size::new(200, 40));
    let mut out = RasterBuffer::black(Size::new(200, 40));
    apply(&wide, &mut out, &p, &mut fonts, &mut cache, &mut motion).unwrap();
    let c = cache.as_ref().unwrap();
    assert_eq!(c.columns, 17);
    assert_eq!(c.heads.len(), 17);
}

#[test]
fn seeded_motion_makes_heads_reproducible() {
    let p = defaults();
    let src = RasterBuffer::filled(Size::new(64, 48), Rgb8::WHITE);
    let run = || {
        let mut cache = None;
        let mut motion = MotionSource::Seeded(SeededRng::new(11));
        let mut fonts = bitmap_fonts();
        let mut out = RasterBuffer::black(src.size());
        for _ in 0..5 {
            apply(&src, &mut out, &p, &mut fonts, &mut cache, &mut motion).unwrap();
        }
        cache.map(|c| c.heads)
    };
    assert_eq!(run(), run());
}

#[test]
fn prior_output_is_veiled_not_cleared() {
    let mut p = defaults();
    p.bg_opacity = 0.05;
    p.glow = 0.0;
    let src = RasterBuffer::black(Size::new(48, 32));
    let mut out = RasterBuffer::filled(src.size(), Rgb8::WHITE);
    let mut cache = None;
    let mut motion = MotionSource::Seeded(SeededRng::new(1));
    let mut fonts = bitmap_fonts();
    apply(&src, &mut out, &p, &mut fonts, &mut cache, &mut motion).unwrap();
    assert!(out.is_opaque());
    assert!(out.data().chunks_exact(4).all(|px| px[0] > 200));
}

#[test]
fn heads_wrap_past_the_far_edge() {
    let p = defaults();
    let src = RasterBuffer::black(Size::new(12, 40));
    let mut out = RasterBuffer::black(src.size());
    let span = 30.0 * 12.0;
    let mut cache = Some(FallingCache {
        columns: 1,
        heads: vec![40.0 + span],
    });
    let mut motion = MotionSource::Seeded(SeededRng::new(5));
    let mut fonts = bitmap_fonts();
    apply(&src, &mut out, &p, &mut fonts, &mut cache, &mut motion).unwrap();
    let head = cache.unwrap().heads[0];
    assert!(head <= 0.0 && head >= -span, "head {head}");
}

#[test]
fn upward_heads_wrap_below_the_bottom_edge() {
    let mut p = defaults();
    p.direction = Direction::Up;
    let src = RasterBuffer::black(Size::new(12, 40));
    let mut out = RasterBuffer::black(src.size());
    let span = 30.0 * 12.0;
    let mut cache = Some(FallingCache {
        columns: 1,
        heads: vec![-span],
    });
    let mut motion = MotionSource::Seeded(SeededRng::new(9));
    let mut fonts = bitmap_fonts();
    apply(&src, &mut out, &p, &mut fonts, &mut cache, &mut motion).unwrap();
    let head = cache.unwrap().heads[0];
    assert!((40.0..=40.0 + span).contains(&head), "head {head}");
}

#[test]
fn blank_glyphs_get_no_glow() {
    let mut p = defaults();
    p.ramp = GlyphRamp::Kanji;
    p.glow = 2.4;
    let src = RasterBuffer::filled(Size::new(48, 32), Rgb8::WHITE);
    let mut out = RasterBuffer::black(src.size());
    let mut cache = None;
    let mut motion = MotionSource::Seeded(SeededRng::new(2));
    let mut fonts = bitmap_fonts();
    apply(&src, &mut out, &p, &mut fonts, &mut cache, &mut motion).unwrap();
    assert_eq!(out, RasterBuffer::black(src.size()));
}

#[test]
fn inked_glyphs_draw_in_the_rain_color() {
    let mut p = defaults();
    p.ramp = GlyphRamp::Standard;
    p.bg_opacity = 0.95;
    let src = RasterBuffer::filled(Size::new(48, 32), Rgb8::WHITE);
    let mut out = RasterBuffer::black(src.size());
    let mut cache = None;
    let mut motion = MotionSource::Seeded(SeededRng::new(4));
    let mut fonts = bitmap_fonts();
    for _ in 0..4 {
        apply(&src, &mut out, &p, &mut fonts, &mut cache, &mut motion).unwrap();
    }
    assert!(out.is_opaque());
    let c = p.rain_color;
    let mut inked = 0;
    for px in out.data().chunks_exact(4) {
        // Ink and glow are scaled copies of the rain color over black.
        assert!(px[0] <= c.r.saturating_add(2) && px[1] <= c.g.saturating_add(2) && px[2] <= c.b.saturating_add(2));
        if px[0] > 0 {
            inked += 1;
        }
    }
    assert!(inked > 0);
}
