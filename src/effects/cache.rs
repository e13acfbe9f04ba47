//! Per-engine persistent effect state.
//!
//! Each cache entry carries the sizing it was built for and is rebuilt when that tag no
//! longer matches.

use rand::Rng as _;

use crate::foundation::math::SeededRng;

/// Random source for falling-head motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionSource {
    /// Thread-local entropy; live preview.
    #[default]
    Entropy,
    /// Deterministic sequence; animated capture.
    Seeded(SeededRng),
}

impl MotionSource {
    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        match self {
            MotionSource::Entropy => rand::rng().random::<f64>(),
            MotionSource::Seeded(rng) => rng.next_f64(),
        }
    }
}

/// Fall-head y coordinate per column, valid for one column count.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingCache {
    pub columns: u32,
    pub heads: Vec<f64>,
}

impl FallingCache {
    /// Fresh heads spread uniformly over `[0, height)`.
    pub fn seeded(columns: u32, height: u32, motion: &mut MotionSource) -> Self {
        let heads = (0..columns)
            .map(|_| motion.next_f64() * f64::from(height))
            .collect();
        Self { columns, heads }
    }
}

/// The `(pointCount, width, height)` a seed set was generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VoronoiTag {
    pub points: u32,
    pub width: u32,
    pub height: u32,
}

impl VoronoiTag {
    /// Generator seed derived from the tag.
    pub fn seed(self) -> u32 {
        self.points
            .wrapping_mul(17)
            .wrapping_add(self.width.wrapping_mul(11))
            .wrapping_add(self.height.wrapping_mul(5))
    }
}

/// Generated Voronoi seed points.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiCache {
    pub tag: VoronoiTag,
    pub seeds: Vec<(f64, f64)>,
}

impl VoronoiCache {
    pub fn generate(tag: VoronoiTag) -> Self {
        let mut rng = SeededRng::new(tag.seed());
        let (w, h) = (f64::from(tag.width), f64::from(tag.height));
        let seeds = (0..tag.points)
            .map(|_| {
                let x = rng.next_f64() * w;
                let y = rng.next_f64() * h;
                (x, y)
            })
            .collect();
        Self { tag, seeds }
    }
}

/// Falling-Stream state saved around an animated capture.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingSnapshot {
    pub frame_counter: u64,
    pub falling: Option<FallingCache>,
    pub motion: MotionSource,
}

/// All mutable effect state owned by one engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderState {
    /// Renders performed since the last reset.
    pub frame_counter: u64,
    pub falling: Option<FallingCache>,
    pub motion: MotionSource,
    pub voronoi: Option<VoronoiCache>,
}

impl RenderState {
    /// Drop every cache entry and restart the frame counter.
    pub fn invalidate(&mut self) {
        self.frame_counter = 0;
        self.falling = None;
        self.voronoi = None;
    }

    pub fn snapshot_falling(&self) -> FallingSnapshot {
        FallingSnapshot {
            frame_counter: self.frame_counter,
            falling: self.falling.clone(),
            motion: self.motion,
        }
    }

    pub fn restore_falling(&mut self, snapshot: FallingSnapshot) {
        self.frame_counter = snapshot.frame_counter;
        self.falling = snapshot.falling;
        self.motion = snapshot.motion;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/cache.rs"]
mod tests;
