pub mod error;
pub mod features;
pub mod geometry;
pub mod graph;
pub mod math;
pub mod operations;
pub mod query;
pub mod topology;

pub use error::{AagError, Result};
pub use features::{recognize, HoleFeature, PocketFeature, RecognizedFeatures};
pub use graph::{AttributedAdjacencyGraph, BuildGraph, EdgeConvexity, GraphParams};
pub use query::GeometryQuery;
