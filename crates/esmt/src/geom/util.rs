use nalgebra::Vector2;

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: Vector2<f64>, q: Vector2<f64>) -> f64 {
    (q - p).norm()
}

/// Signed cross product of `b - a` and `c - a` (twice the triangle area).
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// True if every point lies on one line, within a scale-relative slack.
/// Coincident point sets count as collinear.
pub fn all_collinear(points: &[Vector2<f64>]) -> bool {
    let Some((&first, rest)) = points.split_first() else {
        return true;
    };
    let Some(&anchor) = rest.iter().find(|p| (**p - first).norm() > 0.0) else {
        return true;
    };
    let base = (anchor - first).norm();
    points.iter().all(|&p| {
        let dev = cross(first, anchor, p).abs();
        dev <= 1e-9 * base * (p - first).norm().max(base)
    })
}
