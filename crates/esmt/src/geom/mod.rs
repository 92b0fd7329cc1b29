//! Planar primitives for the Steiner pipeline.
//!
//! - `types`: tolerance config, undirected edges, triangles with circumcircle
//!   and angle queries.
//! - `solvers`: the equilateral-erection and circle-intersection solves
//!   behind the Torricelli construction.
//! - `util`: distance and collinearity helpers.

mod solvers;
mod types;
mod util;

pub use solvers::{equilateral_apex, equilateral_circumcenter, torricelli_point};
pub use types::{Circumcircle, Edge, GeomCfg, Triangle};
pub use util::{all_collinear, distance};
