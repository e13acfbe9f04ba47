use super::*;
use crate::config::FontOpts;
use crate::foundation::core::Size;
use crate::params::records::Effect;
use crate::params::store::ParamSet;
use crate::schema::{EffectId, Schema};

fn bitmap_fonts() -> FontBook {
    FontBook::new(FontOpts {
        system_fonts: false,
        files: Vec::new(),
    })
}

fn defaults() -> AsciiParams {
    let desc = Schema::builtin().effect(EffectId::Ascii).unwrap();
    match Effect::decode(EffectId::Ascii, &ParamSet::defaults_for(desc)).unwrap() {
        Effect::Ascii(p) => p,
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn black_source_maps_every_cell_to_the_darkest_glyph() {
    let src = RasterBuffer::black(Size::new(4, 4));
    let cells = plan_cells(&src, &defaults());
    assert!(!cells.is_empty());
    assert!(cells.iter().all(|c| c.index == 0));
}

#[test]
fn white_source_maps_to_the_brightest_glyph() {
    let p = defaults();
    let src = RasterBuffer::filled(Size::new(40, 20), Rgb8::WHITE);
    let last = p.ramp.glyphs().len() - 1;
    // Luma weights sum to one only up to rounding.
    assert!(plan_cells(&src, &p).iter().all(|c| c.index + 1 >= last));
}

#[test]
fn invert_flips_the_mapping() {
    let mut p = defaults();
    p.invert = true;
    let src = RasterBuffer::black(Size::new(8, 8));
    let last = p.ramp.glyphs().len() - 1;
    assert!(plan_cells(&src, &p).iter().all(|c| c.index == last));
}

#[test]
fn grid_has_at_least_ten_columns() {
    let mut p = defaults();
    p.output_width = 64.0;
    p.scale = 4.0;
    let grid = CellGrid::new(100, &p);
    assert_eq!(grid.columns, 16);
    p.scale = 40.0;
    assert_eq!(CellGrid::new(100, &p).columns, 10);
    assert!(CellGrid::new(100, &p).font_size >= 8.0);
}

#[test]
fn blank_glyphs_leave_only_background() {
    let p = defaults();
    let src = RasterBuffer::black(Size::new(4, 4));
    let mut out = RasterBuffer::black(Size::new(4, 4));
    apply(&src, &mut out, &p, &mut bitmap_fonts()).unwrap();
    let bg = background(&p).to_rgba();
    assert!(out.data().chunks_exact(4).all(|px| px == bg));
}

#[test]
fn neutral_adjustments_do_not_change_samples() {
    let p = defaults();
    let src = RasterBuffer::filled(Size::new(2, 2), Rgb8::new(90, 160, 30));
    let cells = plan_cells(&src, &p);
    assert_eq!(cells[0].color, Rgb8::new(90, 160, 30));
}

#[test]
fn monochrome_background_follows_intensity() {
    let mut p = defaults();
    p.mode = GlyphColorMode::Monochrome;
    p.background_intensity = 1.0;
    assert_eq!(background(&p), Rgb8::gray(127));
    p.background_intensity = 2.0;
    assert_eq!(background(&p), Rgb8::gray(255));
}

#[test]
fn bright_cells_are_inked_in_their_sampled_color() {
    let p = defaults();
    let src = RasterBuffer::filled(Size::new(120, 40), Rgb8::WHITE);
    let mut out = RasterBuffer::black(src.size());
    apply(&src, &mut out, &p, &mut bitmap_fonts()).unwrap();
    assert!(out.is_opaque());
    let bg = background(&p).to_rgba();
    assert!(out.data().chunks_exact(4).any(|px| px != bg));
    // Glyph ink only ever moves pixels from the background toward the cell color.
    let ink = plan_cells(&src, &p)[0].color;
    assert!(out.data().chunks_exact(4).all(|px| px[0] >= bg[0] && px[0] <= ink.r));
}
