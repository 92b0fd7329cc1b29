//! Geometric solves behind the Torricelli construction.
//!
//! Each solve resolves the two roots of an underlying quadratic the way the
//! construction demands: equilateral erections keep the root on the far side
//! of the base (away from the triangle's apex), and the final circle
//! intersection keeps the root minimizing the three-way distance sum.

use nalgebra::Vector2;

use super::types::GeomCfg;
use super::util::distance;

#[inline]
fn perp(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

/// Apex of the equilateral triangle erected on segment `b1`–`b2`, on the
/// side away from `away_from`. `None` when the base (near-)vanishes.
pub fn equilateral_apex(
    b1: Vector2<f64>,
    b2: Vector2<f64>,
    away_from: Vector2<f64>,
    cfg: GeomCfg,
) -> Option<Vector2<f64>> {
    offset_on_bisector(b1, b2, away_from, 3f64.sqrt() / 2.0, cfg)
}

/// Circumcenter of that external equilateral triangle. Its circumradius is
/// `|b1 - b2| / sqrt(3)`.
pub fn equilateral_circumcenter(
    b1: Vector2<f64>,
    b2: Vector2<f64>,
    away_from: Vector2<f64>,
    cfg: GeomCfg,
) -> Option<Vector2<f64>> {
    offset_on_bisector(b1, b2, away_from, 0.5 / 3f64.sqrt(), cfg)
}

/// Both roots sit on the perpendicular bisector of `b1`–`b2`, at
/// `scale * |b2 - b1|` from the midpoint. Each is equidistant from the base
/// endpoints by construction, which stands in for the equidistance filter on
/// the raw quadratic roots; the remaining ambiguity goes to the root farther
/// from `away_from`.
fn offset_on_bisector(
    b1: Vector2<f64>,
    b2: Vector2<f64>,
    away_from: Vector2<f64>,
    scale: f64,
    cfg: GeomCfg,
) -> Option<Vector2<f64>> {
    let base = b2 - b1;
    let len = base.norm();
    if len <= cfg.eps_det {
        return None;
    }
    let mid = (b1 + b2) * 0.5;
    let n = perp(base) / len;
    let c1 = mid + n * (scale * len);
    let c2 = mid - n * (scale * len);
    debug_assert!((distance(c1, b1) - distance(c1, b2)).abs() <= cfg.eps_eq * len.max(1.0));
    Some(if distance(c1, away_from) > distance(c2, away_from) {
        c1
    } else {
        c2
    })
}

/// Torricelli point of a triangle with all angles <= 120°: the intersection
/// of the line through `apex` and the external equilateral apex with the
/// circumscribed circle of that equilateral triangle. Among the real
/// intersections, the sum of distances to the three vertices decides.
///
/// `None` when the construction degenerates (vanishing base, or the line
/// missing the circle beyond tolerance).
pub fn torricelli_point(
    apex: Vector2<f64>,
    b1: Vector2<f64>,
    b2: Vector2<f64>,
    cfg: GeomCfg,
) -> Option<Vector2<f64>> {
    let outer = equilateral_apex(b1, b2, apex, cfg)?;
    let center = equilateral_circumcenter(b1, b2, apex, cfg)?;
    let radius = distance(b1, b2) / 3f64.sqrt();

    // Line p(t) = apex + t*(outer - apex) against |p - center| = radius.
    let dir = outer - apex;
    let rel = apex - center;
    let aa = dir.dot(&dir);
    if aa <= cfg.eps_det {
        return None;
    }
    let bb = 2.0 * dir.dot(&rel);
    let cc = rel.dot(&rel) - radius * radius;
    let mut disc = bb * bb - 4.0 * aa * cc;
    if disc < 0.0 {
        // `outer` lies on the circle, so a negative discriminant is numeric
        // noise up to tolerance.
        if disc < -cfg.eps_eq * aa {
            return None;
        }
        disc = 0.0;
    }
    let sq = disc.sqrt();
    let sum = |p: Vector2<f64>| distance(p, apex) + distance(p, b1) + distance(p, b2);
    let mut best: Option<(Vector2<f64>, f64)> = None;
    for t in [(-bb - sq) / (2.0 * aa), (-bb + sq) / (2.0 * aa)] {
        let p = apex + dir * t;
        let s = sum(p);
        if best.as_ref().is_none_or(|(_, v)| s < *v) {
            best = Some((p, s));
        }
    }
    best.map(|(p, _)| p)
}
