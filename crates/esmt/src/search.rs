//! Exhaustive subset selection over the Steiner candidates.
//!
//! Every bitmask over the candidate set is scored by the MST weight of
//! terminals ∪ subset. The sweep is a parallel reduction under the total
//! order (weight, then mask), so the winner is deterministic no matter how
//! the work is split.

use nalgebra::Vector2;
use rayon::prelude::*;
use thiserror::Error;

use crate::delaunay::{triangulate, TriangulateError, Triangulation};
use crate::fermat;
use crate::geom::GeomCfg;
use crate::mst::{prim, DistanceGraph, MstEdge};

/// Search configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// Hard cap on the candidate count before the 2^k sweep is refused.
    /// Twenty candidates already mean a million MST runs; past that the
    /// caller must thin the candidate set itself.
    pub max_candidates: usize,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self { max_candidates: 20 }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("{got} Steiner candidates exceed the exhaustive-search cap of {cap}")]
    TooManyCandidates { got: usize, cap: usize },
}

/// Winning subset with its spanning tree.
#[derive(Clone, Debug)]
pub struct Selection {
    /// Inclusion mask over the candidate indices 0..k.
    pub chosen: Vec<bool>,
    /// Terminals followed by the chosen candidates; edges index into this.
    pub points: Vec<Vector2<f64>>,
    pub edges: Vec<MstEdge>,
    pub weight: f64,
}

/// Best subset of `candidates` to join `terminals`, by exhaustive sweep.
///
/// With no candidates only the empty subset is scored, so the result is the
/// MST of the terminals themselves.
pub fn select(
    terminals: &[Vector2<f64>],
    candidates: &[Vector2<f64>],
    cfg: SearchCfg,
) -> Result<Selection, SearchError> {
    let k = candidates.len();
    // Masks are u64, so 63 bounds the cap no matter what the config says.
    let cap = cfg.max_candidates.min(63);
    if k > cap {
        return Err(SearchError::TooManyCandidates { got: k, cap });
    }

    let (_, mask) = (0u64..1u64 << k)
        .into_par_iter()
        .map(|mask| {
            let pts = merge(terminals, candidates, mask);
            let mst = prim(&DistanceGraph::complete(&pts));
            (mst.weight, mask)
        })
        .reduce(|| (f64::INFINITY, u64::MAX), |a, b| if better(a, b) { a } else { b });

    let points = merge(terminals, candidates, mask);
    let graph = DistanceGraph::complete(&points);
    let mst = prim(&graph);
    Ok(Selection {
        chosen: (0..k).map(|j| mask >> j & 1 == 1).collect(),
        points,
        edges: mst.edges(&graph),
        weight: mst.weight,
    })
}

/// Total order on (weight, mask): lighter wins, equal weights go to the
/// smaller mask.
#[inline]
fn better(a: (f64, u64), b: (f64, u64)) -> bool {
    a.0 < b.0 || (a.0 == b.0 && a.1 < b.1)
}

fn merge(
    terminals: &[Vector2<f64>],
    candidates: &[Vector2<f64>],
    mask: u64,
) -> Vec<Vector2<f64>> {
    let mut pts = terminals.to_vec();
    pts.extend(
        candidates
            .iter()
            .enumerate()
            .filter(|(j, _)| mask >> j & 1 == 1)
            .map(|(_, &p)| p),
    );
    pts
}

/// Full pipeline output.
#[derive(Clone, Debug)]
pub struct Solution {
    pub triangulation: Triangulation,
    pub candidates: Vec<Vector2<f64>>,
    pub selection: Selection,
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Triangulate(#[from] TriangulateError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Triangulate, synthesize candidates, and sweep subsets in one call.
pub fn solve(
    points: &[Vector2<f64>],
    geom: GeomCfg,
    search: SearchCfg,
) -> Result<Solution, SolveError> {
    let triangulation = triangulate(points, geom)?;
    let candidates = fermat::candidates(&triangulation.triangles, geom);
    let selection = select(&triangulation.vertices, &candidates, search)?;
    Ok(Solution {
        triangulation,
        candidates,
        selection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::distance;
    use crate::rand::{draw_cloud, CloudCfg, ReplayToken};
    use nalgebra::vector;
    use proptest::prelude::*;

    fn square() -> Vec<Vector2<f64>> {
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 1.0],
        ]
    }

    fn equilateral() -> Vec<Vector2<f64>> {
        vec![vector![0.0, 0.0], vector![10.0, 0.0], vector![5.0, 8.660]]
    }

    #[test]
    fn empty_candidate_set_reduces_to_terminal_mst() {
        let sel = select(&square(), &[], SearchCfg::default()).unwrap();
        assert!(sel.chosen.is_empty());
        assert!((sel.weight - 3.0).abs() < 1e-12);
        assert_eq!(sel.edges.len(), 3);
    }

    #[test]
    fn candidate_cap_is_enforced() {
        let cands = vec![vector![0.5, 0.5]; 3];
        let err = select(&square(), &cands, SearchCfg { max_candidates: 2 }).unwrap_err();
        assert_eq!(
            err,
            SearchError::TooManyCandidates { got: 3, cap: 2 }
        );
    }

    #[test]
    fn harmful_candidate_is_left_out() {
        // A far-away junction can only lengthen the tree.
        let sel = select(&square(), &[vector![50.0, 50.0]], SearchCfg::default()).unwrap();
        assert_eq!(sel.chosen, vec![false]);
        assert!((sel.weight - 3.0).abs() < 1e-12);
    }

    #[test]
    fn helpful_candidate_is_kept() {
        // The Fermat point turns two 10-unit sides into three spokes of
        // total length ~17.32.
        let fermat = vector![5.0, 2.8868];
        let sel = select(&equilateral(), &[fermat], SearchCfg::default()).unwrap();
        assert_eq!(sel.chosen, vec![true]);
        assert_eq!(sel.points.len(), 4);
        assert_eq!(sel.edges.len(), 3);
        assert!(sel.weight < 17.4);
    }

    #[test]
    fn solve_runs_the_whole_pipeline() {
        let sol = solve(&equilateral(), GeomCfg::default(), SearchCfg::default()).unwrap();
        assert_eq!(sol.triangulation.triangles.len(), 1);
        assert_eq!(sol.candidates.len(), 1);
        assert!(distance(sol.candidates[0], vector![5.0, 2.887]) < 1e-2);
        assert_eq!(sol.selection.chosen, vec![true]);
        assert!(sol.selection.weight < 17.4);
    }

    #[test]
    fn solve_rejects_collinear_input() {
        let line = [vector![0.0, 0.0], vector![1.0, 0.0], vector![2.0, 0.0]];
        let err = solve(&line, GeomCfg::default(), SearchCfg::default()).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Triangulate(TriangulateError::Collinear)
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn selection_never_beats_nothing(seed in 0u64..64) {
            let cloud = draw_cloud(
                CloudCfg { count: 7, extent: 40.0, min_separation: 1.0 },
                ReplayToken { seed, index: 2 },
            );
            let base = prim(&DistanceGraph::complete(&cloud)).weight;
            let res = solve(&cloud, GeomCfg::default(), SearchCfg::default());
            prop_assume!(res.is_ok());
            prop_assert!(res.unwrap().selection.weight <= base + 1e-9);
        }
    }
}
