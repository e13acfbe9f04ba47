use super::*;

#[test]
fn luma_weights_sum_to_one() {
    assert!((luma(255.0, 255.0, 255.0) - 255.0).abs() < 1e-9);
    assert_eq!(luma(0.0, 0.0, 0.0), 0.0);
    assert!(luma(0.0, 255.0, 0.0) > luma(255.0, 0.0, 0.0));
}

#[test]
fn brightness_contrast_identity_at_defaults() {
    for v in [0.0, 17.0, 128.0, 200.0, 255.0] {
        let out = brightness_contrast(v, 0.0, 100.0);
        assert!((out - v).abs() < 1e-9, "{v} -> {out}");
    }
}

#[test]
fn brightness_contrast_clamps() {
    assert_eq!(brightness_contrast(250.0, 100.0, 100.0), 255.0);
    assert_eq!(brightness_contrast(10.0, -100.0, 100.0), 0.0);
    // More contrast pushes values away from the midpoint.
    assert!(brightness_contrast(160.0, 0.0, 150.0) > 160.0);
    assert!(brightness_contrast(90.0, 0.0, 150.0) < 90.0);
}

#[test]
fn seeded_rng_is_reproducible_and_in_range() {
    let mut a = SeededRng::new(42);
    let mut b = SeededRng::new(42);
    for _ in 0..1000 {
        let va = a.next_f64();
        assert_eq!(va, b.next_f64());
        assert!((0.0..1.0).contains(&va));
    }
}

#[test]
fn seeded_rng_matches_recurrence() {
    let mut rng = SeededRng::new(0);
    let first = rng.next_f64();
    assert_eq!(first, 1_013_904_223.0 / 4_294_967_296.0);
    let second_state = 1_664_525u64 * 1_013_904_223u64 + 1_013_904_223u64;
    let expected = (second_state % (1u64 << 32)) as f64 / 4_294_967_296.0;
    assert_eq!(rng.next_f64(), expected);
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 128), 128);
    assert_eq!(mul_div255_u8(0, 255), 0);
}
