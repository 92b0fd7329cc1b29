//! Candidate Steiner points, one per eligible triangle.
//!
//! A triangle whose largest interior angle exceeds 120° has its Fermat point
//! at that vertex, so an added junction cannot shorten the network; those
//! triangles yield no candidate. Degenerate solves likewise drop only their
//! own triangle.

use std::f64::consts::PI;

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::geom::{torricelli_point, GeomCfg, Triangle};

/// Largest angle beyond which an interior junction stops helping.
const ANGLE_GATE: f64 = 2.0 * PI / 3.0;

/// One candidate per eligible triangle, indexed in triangle order.
///
/// The per-triangle work is independent; the parallel map writes each result
/// into its own slot, so the candidate index assignment is stable.
pub fn candidates(triangles: &[Triangle], cfg: GeomCfg) -> Vec<Vector2<f64>> {
    triangles
        .par_iter()
        .filter_map(|t| candidate_for(t, cfg))
        .collect()
}

/// Torricelli candidate for one triangle, or `None` when the 120° gate or a
/// degenerate solve rules it out.
pub fn candidate_for(triangle: &Triangle, cfg: GeomCfg) -> Option<Vector2<f64>> {
    let (which, largest) = triangle.largest_angle();
    if !largest.is_finite() || largest > ANGLE_GATE {
        return None;
    }
    let v = triangle.vertices();
    let apex = v[which];
    let (b1, b2) = match which {
        0 => (v[1], v[2]),
        1 => (v[0], v[2]),
        _ => (v[0], v[1]),
    };
    torricelli_point(apex, b1, b2, cfg)
}
