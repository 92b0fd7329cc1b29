//! Approximate Euclidean Steiner minimal trees in the plane.
//!
//! Pipeline
//! - `delaunay`: incremental (Bowyer–Watson) triangulation of the terminals.
//! - `fermat`: one candidate junction per triangle via the Torricelli
//!   equilateral construction; triangles with an angle over 120° yield none.
//! - `search`: exhaustive sweep over candidate subsets, each scored by the
//!   Prim MST weight of terminals ∪ subset.
//!
//! The stages are plain functions over owned values; `search::solve` chains
//! all three. Coordinates are ordinary `f64` throughout, with the tolerances
//! collected in `geom::GeomCfg`.

pub mod delaunay;
pub mod fermat;
pub mod geom;
pub mod mst;
pub mod rand;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Every pipeline point is a plain nalgebra vector.
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::delaunay::{triangulate, TriangulateError, Triangulation};
    pub use crate::fermat::candidates;
    pub use crate::geom::{Circumcircle, Edge, GeomCfg, Triangle};
    pub use crate::mst::{prim, DistanceGraph, Mst, MstEdge};
    pub use crate::rand::{draw_cloud, CloudCfg, ReplayToken};
    pub use crate::search::{select, solve, SearchCfg, Selection, Solution, SolveError};
    pub use nalgebra::Vector2 as Vec2;
}
