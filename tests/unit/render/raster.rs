use super::*;
use crate::config::FitOpts;

#[test]
fn from_rgba_checks_length() {
    assert!(RasterBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
    assert!(RasterBuffer::from_rgba(2, 2, vec![0; 15]).is_err());
}

#[test]
fn flatten_straight_over_black() {
    let mut px = vec![255u8, 0, 0, 128];
    flatten_to_opaque(&mut px, Rgb8::BLACK);
    assert_eq!(px, vec![128, 0, 0, 255]);
}

#[test]
fn working_raster_is_opaque_even_for_transparent_sources() {
    let src = RasterBuffer::from_rgba(2, 1, vec![255, 255, 255, 0, 10, 20, 30, 255]).unwrap();
    let set = RasterSet::allocate(src, Size::new(2, 1)).unwrap();
    assert!(set.working.is_opaque());
    assert_eq!(set.working.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(set.working.pixel(1, 0), [10, 20, 30, 255]);
    assert_eq!(set.scratch.size(), Size::new(2, 1));
    assert_eq!(set.output.size(), Size::new(2, 1));
}

#[test]
fn fit_never_upscales_and_respects_budget() {
    let fit = FitOpts::default();
    assert_eq!(
        fit_to_viewport(Size::new(100, 50), Size::new(1920, 1080), &fit),
        Size::new(100, 50)
    );
    let fitted = fit_to_viewport(Size::new(4000, 2000), Size::new(1018, 1018), &fit);
    assert_eq!(fitted, Size::new(1000, 500));
    // Tiny viewports still get the minimum budget.
    let fitted = fit_to_viewport(Size::new(640, 440), Size::new(10, 10), &fit);
    assert_eq!(fitted, Size::new(320, 220));
}

#[test]
fn nearest_resample_replicates_blocks() {
    let src = RasterBuffer::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut dst = RasterBuffer::black(Size::new(4, 2));
    dst.resample_nearest_from(&src, Size::new(2, 1), Size::new(4, 2));
    assert_eq!(dst.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(dst.pixel(1, 1), [255, 0, 0, 255]);
    assert_eq!(dst.pixel(2, 0), [0, 0, 255, 255]);
    assert_eq!(dst.pixel(3, 1), [0, 0, 255, 255]);
}

#[test]
fn upscale_doubles_dimensions() {
    let src = RasterBuffer::from_rgba(1, 1, vec![1, 2, 3, 255]).unwrap();
    let up = src.upscale_nearest(2);
    assert_eq!(up.size(), Size::new(2, 2));
    assert!(up.data().chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn oversized_display_is_rejected_before_allocating() {
    let src = RasterBuffer::black(Size::new(1, 1));
    let err = RasterSet::allocate(src, Size::new(MAX_CANVAS_EDGE + 1, 1)).unwrap_err();
    assert!(err.to_string().contains("exceeds"));
}
