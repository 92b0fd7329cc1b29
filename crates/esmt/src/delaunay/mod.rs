//! Incremental (Bowyer–Watson) Delaunay triangulation.
//!
//! Each point is inserted by carving the cavity of triangles whose
//! circumcircle contains it: cavity edges shared by two removed triangles
//! are interior and dropped, the rest form the boundary polygon that is
//! re-fanned to the new point. A super-triangle far outside the input's
//! bounding box seeds the construction and is purged at the end.
//!
//! "Bad" membership is pass-local state (the retain scan plus the cavity
//! buffer), never a flag on the triangles themselves.

use nalgebra::Vector2;
use thiserror::Error;

use crate::geom::{all_collinear, Edge, GeomCfg, Triangle};

/// Triangulation output: surviving triangles, deduplicated edges, and an
/// owned copy of the input vertices.
#[derive(Clone, Debug, Default)]
pub struct Triangulation {
    pub triangles: Vec<Triangle>,
    pub edges: Vec<Edge>,
    pub vertices: Vec<Vector2<f64>>,
}

/// Structural input errors; these abort the run before any triangle exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriangulateError {
    #[error("empty point set")]
    Empty,
    #[error("need at least 3 points, got {0}")]
    TooFew(usize),
    #[error("input points are collinear")]
    Collinear,
}

/// Delaunay triangulation of `points` (order-insensitive up to co-circular
/// tie-breaks).
///
/// The naive circumcircle scan is O(n²) per insertion, which is fine for the
/// instance sizes the subset search downstream can handle anyway. Duplicate
/// input points are not detected; the result for such inputs is unspecified.
pub fn triangulate(
    points: &[Vector2<f64>],
    cfg: GeomCfg,
) -> Result<Triangulation, TriangulateError> {
    if points.is_empty() {
        return Err(TriangulateError::Empty);
    }
    if points.len() < 3 {
        return Err(TriangulateError::TooFew(points.len()));
    }
    if all_collinear(points) {
        return Err(TriangulateError::Collinear);
    }

    let (sa, sb, sc) = super_triangle(points);
    let mut triangles = vec![Triangle::new(sa, sb, sc)];
    let mut cavity: Vec<Edge> = Vec::new();

    for &p in points {
        // Carve the cavity: drop every triangle whose circumcircle strictly
        // contains `p`, remembering its edges. Degenerate triangles have no
        // circumcircle and are left alone.
        cavity.clear();
        triangles.retain(|t| {
            let bad = t.circumcircle(cfg).is_some_and(|cc| cc.contains_strict(p));
            if bad {
                cavity.extend(t.edges());
            }
            !bad
        });

        // Edges collected twice were interior to the cavity; the once-seen
        // boundary is re-fanned to `p`.
        for (i, e) in cavity.iter().enumerate() {
            let boundary = cavity
                .iter()
                .enumerate()
                .all(|(j, other)| i == j || e != other);
            if boundary {
                triangles.push(Triangle::new(e.a, e.b, p));
            }
        }
    }

    triangles.retain(|t| !(t.has_vertex(sa) || t.has_vertex(sb) || t.has_vertex(sc)));

    // Near-collinear input can slip past the pre-check and still leave
    // nothing behind once the super-triangle is purged.
    if triangles.is_empty() {
        return Err(TriangulateError::Collinear);
    }

    let edges = dedup_edges(&triangles);
    Ok(Triangulation {
        triangles,
        edges,
        vertices: points.to_vec(),
    })
}

/// Super-triangle containing every input point, scaled 20x past the
/// bounding box.
fn super_triangle(points: &[Vector2<f64>]) -> (Vector2<f64>, Vector2<f64>, Vector2<f64>) {
    let mut min = points[0];
    let mut max = points[0];
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    let delta = (max.x - min.x).max(max.y - min.y);
    let mid = (min + max) * 0.5;
    (
        Vector2::new(mid.x - 20.0 * delta, mid.y - delta),
        Vector2::new(mid.x, mid.y + 20.0 * delta),
        Vector2::new(mid.x + 20.0 * delta, mid.y - delta),
    )
}

/// Unique edges over the final triangle set (set-equality on endpoints).
fn dedup_edges(triangles: &[Triangle]) -> Vec<Edge> {
    let mut edges: Vec<Edge> = Vec::with_capacity(triangles.len() * 3);
    for t in triangles {
        for e in t.edges() {
            if !edges.contains(&e) {
                edges.push(e);
            }
        }
    }
    edges
}
