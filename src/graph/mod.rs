//! The attributed adjacency graph: one node per face, one edge per adjacent
//! face pair, each annotated with the geometry feature detectors need.

mod builder;
mod model;
mod params;

pub use builder::BuildGraph;
pub use model::{
    AdjacencyEdge, AttributedAdjacencyGraph, EdgeConvexity, FaceAttributes, ZLevelGroup,
};
pub use params::{GraphParams, DEFAULT_MAX_SHARED_EDGES};
