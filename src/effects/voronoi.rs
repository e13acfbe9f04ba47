//! Flat-color Voronoi cells from a cached, deterministically seeded point set.

use rayon::prelude::*;

use crate::effects::cache::{VoronoiCache, VoronoiTag};
use crate::params::records::VoronoiParams;
use crate::render::raster::RasterBuffer;

/// Upper bound on seeds used for cell assignment.
pub const MAX_ACTIVE_SEEDS: usize = 220;

/// What a Voronoi render actually used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoronoiReport {
    /// Configured point count.
    pub requested: usize,
    /// Seeds used for assignment, after the cap.
    pub effective: usize,
    /// `true` when the seed set was (re)generated by this render.
    pub regenerated: bool,
}

/// Index of the nearest seed by squared distance; ties keep the earliest.
pub fn nearest_seed(seeds: &[(f64, f64)], x: f64, y: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &(sx, sy)) in seeds.iter().enumerate() {
        let (dx, dy) = (x - sx, y - sy);
        let d = dx * dx + dy * dy;
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

pub fn apply(
    src: &RasterBuffer,
    out: &mut RasterBuffer,
    p: &VoronoiParams,
    cache: &mut Option<VoronoiCache>,
) -> VoronoiReport {
    let (width, height) = (src.width(), src.height());
    let tag = VoronoiTag {
        points: p.points.floor().max(0.0) as u32,
        width,
        height,
    };
    let regenerated = cache.as_ref().is_none_or(|c| c.tag != tag);
    if regenerated {
        tracing::debug!(points = tag.points, width, height, "voronoi seeds generated");
        *cache = Some(VoronoiCache::generate(tag));
    }
    let seeds: &[(f64, f64)] = match cache.as_ref() {
        Some(c) => &c.seeds,
        None => &[],
    };
    let requested = seeds.len();
    let active = &seeds[..requested.min(MAX_ACTIVE_SEEDS)];
    if requested > MAX_ACTIVE_SEEDS && regenerated {
        tracing::warn!(
            requested,
            effective = active.len(),
            "voronoi seed count capped"
        );
    }

    if active.is_empty() {
        out.copy_from(src);
    } else {
        let stride = width as usize * 4;
        out.data_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let (sx, sy) = active[nearest_seed(active, x as f64, y as f64)];
                    let [r, g, b, _] = src.pixel_clamped(sx.floor() as i64, sy.floor() as i64);
                    px.copy_from_slice(&[r, g, b, 255]);
                }
            });
    }

    VoronoiReport {
        requested,
        effective: active.len(),
        regenerated,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/voronoi.rs"]
mod tests;
