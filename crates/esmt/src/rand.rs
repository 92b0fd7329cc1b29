//! Deterministic random planar instances.
//!
//! Benches and property tests need reproducible clouds; draws are addressed
//! by a `(seed, index)` replay token mixed into a single `StdRng`. A
//! minimum-separation rejection rule keeps the documented degenerate inputs
//! (duplicate or near-duplicate points) out of sampled instances.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Point-cloud sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CloudCfg {
    pub count: usize,
    /// Points are drawn uniformly from the square [0, extent]².
    pub extent: f64,
    /// Draws closer than this to an accepted point are rejected.
    pub min_separation: f64,
}

impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            count: 16,
            extent: 100.0,
            min_separation: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a reproducible point cloud.
///
/// Rejection keeps pairwise separation at `min_separation`; after too many
/// consecutive rejections the separation demand is halved so dense requests
/// still terminate.
pub fn draw_cloud(cfg: CloudCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let extent = cfg.extent.max(f64::MIN_POSITIVE);
    let mut sep = cfg.min_separation.max(0.0);
    let mut points: Vec<Vector2<f64>> = Vec::with_capacity(cfg.count);
    let mut rejections = 0usize;
    while points.len() < cfg.count {
        let p = Vector2::new(rng.gen::<f64>() * extent, rng.gen::<f64>() * extent);
        if points.iter().all(|q| (p - q).norm() >= sep) {
            points.push(p);
            rejections = 0;
        } else {
            rejections += 1;
            if rejections > 64 {
                sep *= 0.5;
                rejections = 0;
            }
        }
    }
    points
}
