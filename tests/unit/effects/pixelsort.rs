use super::*;
use crate::foundation::core::Size;

fn row(grays: &[u8]) -> Vec<u8> {
    grays.iter().flat_map(|&g| [g, g, g, 255]).collect()
}

#[test]
fn runs_above_threshold_are_sorted_ascending() {
    let mut r = row(&[200, 150, 250, 10, 240, 130, 20]);
    sort_row(&mut r, 100.0);
    assert_eq!(r, row(&[150, 200, 250, 10, 130, 240, 20]));
}

#[test]
fn dark_pixels_and_single_runs_are_untouched() {
    let before = row(&[10, 200, 50, 30, 255]);
    let mut r = before.clone();
    sort_row(&mut r, 100.0);
    assert_eq!(r, before);
}

#[test]
fn sort_is_a_permutation_per_run() {
    let mut data = Vec::new();
    for i in 0..40u32 {
        let v = ((i * 97 + 13) % 256) as u8;
        data.extend_from_slice(&[v, v.wrapping_mul(3), 255 - v, 255]);
    }
    let src = RasterBuffer::from_rgba(10, 4, data).unwrap();
    let mut out = RasterBuffer::black(Size::new(10, 4));
    let threshold = 90.0;
    apply(&src, &mut out, &PixelSortParams { threshold });

    for y in 0..4 {
        let a: Vec<[u8; 4]> = (0..10).map(|x| src.pixel(x, y)).collect();
        let b: Vec<[u8; 4]> = (0..10).map(|x| out.pixel(x, y)).collect();
        let mut x = 0;
        while x < 10 {
            if luma_px(&a[x]) <= threshold {
                assert_eq!(a[x], b[x]);
                x += 1;
                continue;
            }
            let start = x;
            while x < 10 && luma_px(&a[x]) > threshold {
                x += 1;
            }
            let mut sa = a[start..x].to_vec();
            let mut sb = b[start..x].to_vec();
            assert!(sb.windows(2).all(|w| luma_px(&w[0]) <= luma_px(&w[1])));
            sa.sort();
            sb.sort();
            assert_eq!(sa, sb);
        }
    }
}
