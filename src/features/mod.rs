//! Machining feature recognition over an attributed adjacency graph.
//!
//! Detectors read only the graph; they never query the kernel again.

mod hole;
mod pocket;

pub use hole::{DetectHoles, HoleFeature, CIRCULAR_ASPECT_LIMIT};
pub use pocket::{DetectPockets, PocketFeature};

use tracing::info;

use crate::error::Result;
use crate::graph::{AttributedAdjacencyGraph, BuildGraph, GraphParams};
use crate::query::GeometryQuery;

/// Everything recognized on one solid.
#[derive(Debug, Clone)]
pub struct RecognizedFeatures {
    /// The graph the features were read from.
    pub graph: AttributedAdjacencyGraph,
    /// Detected pockets, deepest first.
    pub pockets: Vec<PocketFeature>,
    /// Detected holes in face order.
    pub holes: Vec<HoleFeature>,
}

/// Builds the graph of `solid` once and runs both detectors on it.
///
/// # Errors
///
/// Returns an error if the graph build fails.
pub fn recognize<Q: GeometryQuery>(
    query: &Q,
    solid: Q::Solid,
    params: &GraphParams,
) -> Result<RecognizedFeatures> {
    let graph = BuildGraph::new(solid)
        .with_params(params.clone())
        .execute(query)?;
    let (pockets, holes) = rayon::join(
        || DetectPockets::new().execute(&graph),
        || DetectHoles::new().execute(&graph),
    );
    info!(
        pockets = pockets.len(),
        holes = holes.len(),
        "feature recognition finished"
    );
    Ok(RecognizedFeatures {
        graph,
        pockets,
        holes,
    })
}
