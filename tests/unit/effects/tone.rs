use super::*;
use crate::foundation::core::{Rgb8, Size};

fn two_by_two(top: Rgb8, bottom: Rgb8) -> RasterBuffer {
    let mut data = Vec::new();
    for c in [top, top, bottom, bottom] {
        data.extend_from_slice(&c.to_rgba());
    }
    RasterBuffer::from_rgba(2, 2, data).unwrap()
}

#[test]
fn threshold_white_over_black() {
    let src = two_by_two(Rgb8::WHITE, Rgb8::BLACK);
    let mut out = RasterBuffer::black(Size::new(2, 2));
    threshold(&src, &mut out, &ThresholdParams { level: 120.0 });
    assert_eq!(
        out.data(),
        &[255, 255, 255, 255, 255, 255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 255]
    );
}

#[test]
fn threshold_is_strictly_greater() {
    let src = two_by_two(Rgb8::gray(120), Rgb8::gray(121));
    let mut out = RasterBuffer::black(Size::new(2, 2));
    threshold(&src, &mut out, &ThresholdParams { level: 120.5 });
    assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(out.pixel(0, 1), [255, 255, 255, 255]);
}

#[test]
fn dither_extremes_are_flat() {
    let mut out = RasterBuffer::black(Size::new(8, 8));
    let black = RasterBuffer::black(Size::new(8, 8));
    dither(&black, &mut out, &DitherParams { contrast: 100.0 });
    assert!(out.data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));

    let white = RasterBuffer::filled(Size::new(8, 8), Rgb8::WHITE);
    dither(&white, &mut out, &DitherParams { contrast: 100.0 });
    assert!(out.data().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn dither_mid_gray_follows_bayer_pattern() {
    let src = RasterBuffer::filled(Size::new(4, 4), Rgb8::gray(128));
    let mut out = RasterBuffer::black(Size::new(4, 4));
    dither(&src, &mut out, &DitherParams { contrast: 100.0 });
    let lit = out.data().chunks_exact(4).filter(|px| px[0] == 255).count();
    // Gray 128 clears the thresholds of levels 0..=8 only.
    assert_eq!(lit, 9);
    assert_eq!(out.pixel(0, 0)[0], 255);
    assert_eq!(out.pixel(0, 3)[0], 0);
}
