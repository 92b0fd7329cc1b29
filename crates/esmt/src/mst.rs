//! Dense Euclidean distance graphs and Prim's minimum spanning tree.

use nalgebra::Vector2;

use crate::geom::distance;

/// Complete symmetric distance matrix over a point list (zero diagonal).
#[derive(Clone, Debug)]
pub struct DistanceGraph {
    n: usize,
    w: Vec<f64>,
}

impl DistanceGraph {
    pub fn complete(points: &[Vector2<f64>]) -> Self {
        let n = points.len();
        let mut w = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(points[i], points[j]);
                w[i * n + j] = d;
                w[j * n + i] = d;
            }
        }
        Self { n, w }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.w[i * self.n + j]
    }
}

/// MST as a parent forest: `parent[v]` is `None` exactly for the root.
#[derive(Clone, Debug)]
pub struct Mst {
    pub parent: Vec<Option<usize>>,
    pub weight: f64,
}

/// Tree edge in the shape consumers report: endpoint indices plus length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MstEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

impl Mst {
    /// Edge list `(parent, child, weight)` over the non-root vertices.
    pub fn edges(&self, graph: &DistanceGraph) -> Vec<MstEdge> {
        self.parent
            .iter()
            .enumerate()
            .filter_map(|(v, p)| {
                p.map(|u| MstEdge {
                    a: u,
                    b: v,
                    weight: graph.weight(u, v),
                })
            })
            .collect()
    }
}

/// Prim's algorithm from vertex 0. The total weight is the sum of the final
/// attachment keys over the non-root vertices.
pub fn prim(graph: &DistanceGraph) -> Mst {
    let n = graph.len();
    if n == 0 {
        return Mst {
            parent: Vec::new(),
            weight: 0.0,
        };
    }
    let mut key = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    key[0] = 0.0;

    for _ in 0..n {
        let Some(u) = min_key(&key, &visited) else {
            break;
        };
        visited[u] = true;
        for v in 0..n {
            if !visited[v] && graph.weight(u, v) < key[v] {
                key[v] = graph.weight(u, v);
                parent[v] = Some(u);
            }
        }
    }

    let weight: f64 = key.iter().skip(1).sum();
    Mst { parent, weight }
}

/// Unvisited vertex with the smallest key; the lowest index wins ties.
fn min_key(key: &[f64], visited: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (v, &k) in key.iter().enumerate() {
        if visited[v] {
            continue;
        }
        if best.is_none_or(|b| k < key[b]) {
            best = Some(v);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn unit_square_mst_weight_is_three() {
        // Three unit edges, never the diagonal.
        let mst = prim(&DistanceGraph::complete(&square()));
        assert!((mst.weight - 3.0).abs() < 1e-12);
    }

    #[test]
    fn tree_shape() {
        let g = DistanceGraph::complete(&square());
        let mst = prim(&g);
        let edges = mst.edges(&g);
        assert_eq!(edges.len(), 3);
        assert_eq!(mst.parent[0], None);
        for e in &edges {
            assert!((e.weight - g.weight(e.a, e.b)).abs() < 1e-12);
        }
        // Every vertex reaches the root through the parent chain.
        for start in 0..4 {
            let mut v = start;
            let mut hops = 0;
            while let Some(u) = mst.parent[v] {
                v = u;
                hops += 1;
                assert!(hops <= 4);
            }
            assert_eq!(v, 0);
        }
    }

    #[test]
    fn ties_pick_lowest_index() {
        // Vertices 1 and 2 are equidistant from the root.
        let pts = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![-1.0, 0.0]];
        let mst = prim(&DistanceGraph::complete(&pts));
        assert_eq!(mst.parent[1], Some(0));
        assert_eq!(mst.parent[2], Some(0));
        assert!((mst.weight - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_graph() {
        let mst = prim(&DistanceGraph::complete(&[]));
        assert!(mst.parent.is_empty());
        assert_eq!(mst.weight, 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn spanning_tree_invariants(seed in 0u64..128) {
            let cloud = draw_cloud(
                CloudCfg { count: 9, extent: 20.0, min_separation: 0.5 },
                ReplayToken { seed, index: 1 },
            );
            let g = DistanceGraph::complete(&cloud);
            let mst = prim(&g);
            let edges = mst.edges(&g);
            prop_assert_eq!(edges.len(), cloud.len() - 1);
            let total: f64 = edges.iter().map(|e| e.weight).sum();
            prop_assert!((total - mst.weight).abs() < 1e-9);
            // Acyclic and connected: every parent chain ends at the root.
            for start in 0..cloud.len() {
                let mut v = start;
                let mut hops = 0;
                while let Some(u) = mst.parent[v] {
                    v = u;
                    hops += 1;
                    prop_assert!(hops < cloud.len());
                }
                prop_assert_eq!(v, 0);
            }
        }
    }
}
