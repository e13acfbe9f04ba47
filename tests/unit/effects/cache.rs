use super::*;

#[test]
fn voronoi_seed_follows_the_tag() {
    let tag = VoronoiTag {
        points: 800,
        width: 640,
        height: 480,
    };
    assert_eq!(tag.seed(), 800 * 17 + 640 * 11 + 480 * 5);
}

#[test]
fn voronoi_generation_is_reproducible_and_in_bounds() {
    let tag = VoronoiTag {
        points: 120,
        width: 30,
        height: 20,
    };
    let a = VoronoiCache::generate(tag);
    let b = VoronoiCache::generate(tag);
    assert_eq!(a, b);
    assert_eq!(a.seeds.len(), 120);
    assert!(
        a.seeds
            .iter()
            .all(|&(x, y)| (0.0..30.0).contains(&x) && (0.0..20.0).contains(&y))
    );

    let resized = VoronoiCache::generate(VoronoiTag { width: 31, ..tag });
    assert_ne!(a.seeds, resized.seeds);
}

#[test]
fn seeded_motion_repeats() {
    let mut a = MotionSource::Seeded(SeededRng::new(9));
    let mut b = MotionSource::Seeded(SeededRng::new(9));
    let fa = FallingCache::seeded(12, 100, &mut a);
    let fb = FallingCache::seeded(12, 100, &mut b);
    assert_eq!(fa, fb);
    assert!(fa.heads.iter().all(|h| (0.0..100.0).contains(h)));
}

#[test]
fn entropy_motion_stays_in_unit_interval() {
    let mut m = MotionSource::Entropy;
    for _ in 0..100 {
        let v = m.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn snapshot_restore_roundtrips_falling_state() {
    let mut state = RenderState {
        frame_counter: 7,
        ..RenderState::default()
    };
    state.falling = Some(FallingCache {
        columns: 2,
        heads: vec![1.0, 2.0],
    });
    let snap = state.snapshot_falling();
    state.invalidate();
    state.motion = MotionSource::Seeded(SeededRng::new(1));
    assert_eq!(state.frame_counter, 0);
    assert!(state.falling.is_none());

    state.restore_falling(snap);
    assert_eq!(state.frame_counter, 7);
    assert_eq!(state.falling.as_ref().map(|f| f.heads.clone()), Some(vec![1.0, 2.0]));
    assert_eq!(state.motion, MotionSource::Entropy);
}
