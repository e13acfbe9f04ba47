use super::*;

fn close(a: u8, b: u8) -> bool {
    (i32::from(a) - i32::from(b)).abs() <= 2
}

#[test]
fn over_transparent_is_noop_and_opaque_replaces() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over_opaque(dst, [0, 0, 0, 0]), dst);
    assert_eq!(over_opaque(dst, [200, 100, 0, 255]), [200, 100, 0, 255]);
}

#[test]
fn over_premultiplied_half_mixes_channels() {
    let out = over_opaque([200, 200, 200, 255], [50, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert!(close(out[0], 50 + 99));
    assert!(close(out[1], 99));
}

#[test]
fn in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_opaque_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn pixel_aligned_rect_covers_its_pixels() {
    let mut r = RasterBuffer::black(Size::new(4, 4));
    let mut canvas = Canvas::new(r.size()).unwrap();
    canvas.fill_rect(1.0, 1.0, 2.0, 2.0, Rgb8::WHITE, 1.0);
    canvas.composite_onto(&mut r).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let inside = (1..3).contains(&x) && (1..3).contains(&y);
            let expected = if inside { 255 } else { 0 };
            assert!(close(r.pixel(x, y)[0], expected), "pixel ({x},{y})");
        }
    }
}

#[test]
fn translucent_veil_darkens_but_keeps_opacity() {
    let mut r = RasterBuffer::filled(Size::new(3, 2), Rgb8::WHITE);
    let mut canvas = Canvas::new(r.size()).unwrap();
    canvas.fill_all(Rgb8::BLACK, 0.25);
    canvas.composite_onto(&mut r).unwrap();
    assert!(r.is_opaque());
    assert!(r.data().chunks_exact(4).all(|px| close(px[0], 191)));
}

#[test]
fn shapes_clip_at_raster_edges() {
    let mut r = RasterBuffer::black(Size::new(3, 3));
    let mut canvas = Canvas::new(r.size()).unwrap();
    canvas.fill_circle(0.0, 0.0, 5.0, Rgb8::WHITE, 1.0);
    canvas.fill_rect(-4.0, -4.0, 20.0, 20.0, Rgb8::WHITE, 1.0);
    canvas.stroke_line(
        kurbo::Point::new(-10.0, 1.5),
        kurbo::Point::new(10.0, 1.5),
        1.0,
        Rgb8::WHITE,
        1.0,
    );
    canvas.composite_onto(&mut r).unwrap();
    assert!(r.is_opaque());
    assert!(close(r.pixel(2, 2)[0], 255));
}

#[test]
fn diagonal_stroke_crosses_each_inner_pixel() {
    let mut r = RasterBuffer::black(Size::new(5, 5));
    let mut canvas = Canvas::new(r.size()).unwrap();
    canvas.stroke_line(
        kurbo::Point::new(0.0, 0.0),
        kurbo::Point::new(5.0, 5.0),
        1.5,
        Rgb8::WHITE,
        1.0,
    );
    canvas.composite_onto(&mut r).unwrap();
    for i in 1..4 {
        assert!(r.pixel(i, i)[0] > 128, "pixel ({i},{i})");
    }
    assert!(r.pixel(4, 0)[0] < 16);
}

#[test]
fn full_bitmap_glyph_fills_its_box() {
    let mut r = RasterBuffer::black(Size::new(8, 8));
    let mut canvas = Canvas::new(r.size()).unwrap();
    let at = GlyphPlacement {
        cx: 4.0,
        cy: 4.0,
        size: 8.0,
        aspect: 1.0,
        color: Rgb8::WHITE,
        alpha: 1.0,
    };
    canvas.fill_glyph(&Glyph::Bitmap([0xff; 8]), at);
    canvas.composite_onto(&mut r).unwrap();
    assert!(r.data().chunks_exact(4).all(|px| close(px[0], 255)));
}

#[test]
fn blank_glyph_draws_nothing() {
    let mut r = RasterBuffer::black(Size::new(8, 8));
    let mut canvas = Canvas::new(r.size()).unwrap();
    let at = GlyphPlacement {
        cx: 4.0,
        cy: 4.0,
        size: 16.0,
        aspect: 1.0,
        color: Rgb8::WHITE,
        alpha: 1.0,
    };
    canvas.fill_glyph(&Glyph::Blank, at);
    canvas.composite_onto(&mut r).unwrap();
    assert_eq!(r, RasterBuffer::black(Size::new(8, 8)));
}

#[test]
fn composite_requires_matching_size() {
    let mut r = RasterBuffer::black(Size::new(4, 4));
    let canvas = Canvas::new(Size::new(4, 3)).unwrap();
    assert!(canvas.composite_onto(&mut r).is_err());
    assert!(Canvas::new(Size::new(MAX_CANVAS_EDGE + 1, 1)).is_err());
}
