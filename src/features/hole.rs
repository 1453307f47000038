use tracing::{debug, trace};

use crate::graph::{AttributedAdjacencyGraph, FaceAttributes};
use crate::math::TOLERANCE;

/// Largest XY aspect ratio of a face's bounds still screened as circular.
pub const CIRCULAR_ASPECT_LIMIT: f64 = 1.2;

/// A curved face recessed on every side, screened as a drilled hole.
///
/// Radius and depth are estimated from the face's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleFeature {
    /// Index of the hole wall face.
    pub face_index: usize,
    /// Mean half-extent of the face in X and Y.
    pub radius: f64,
    /// Z extent of the face.
    pub depth: f64,
}

/// Detects holes in an attributed adjacency graph.
///
/// A face is a candidate when it has at least one neighbor and every
/// neighbor is joined through a concave edge. Candidates that are curved and
/// roughly circular in XY are reported in ascending face order.
#[derive(Debug, Clone)]
pub struct DetectHoles {
    aspect_limit: f64,
}

impl Default for DetectHoles {
    fn default() -> Self {
        Self {
            aspect_limit: CIRCULAR_ASPECT_LIMIT,
        }
    }
}

impl DetectHoles {
    /// Creates a new `DetectHoles` operation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the XY aspect ratio limit.
    #[must_use]
    pub fn with_aspect_limit(mut self, limit: f64) -> Self {
        self.aspect_limit = limit;
        self
    }

    /// Executes the detection.
    #[must_use]
    pub fn execute(&self, graph: &AttributedAdjacencyGraph) -> Vec<HoleFeature> {
        graph
            .nodes()
            .iter()
            .filter(|node| is_fully_recessed(graph, node.face_index))
            .filter_map(|node| self.screen(node))
            .collect()
    }

    fn screen(&self, node: &FaceAttributes) -> Option<HoleFeature> {
        let extents = node.bounds.extents();
        let (width, height, depth) = (extents.x, extents.y, extents.z);
        let narrow = width.min(height);
        if narrow < TOLERANCE {
            trace!(face = node.face_index, "hole candidate has no XY extent");
            return None;
        }
        let aspect = width.max(height) / narrow;
        if node.is_planar || aspect >= self.aspect_limit {
            trace!(
                face = node.face_index,
                aspect,
                "hole candidate is not circular"
            );
            return None;
        }

        let radius = (width + height) / 4.0;
        debug!(face = node.face_index, radius, depth, "hole detected");
        Some(HoleFeature {
            face_index: node.face_index,
            radius,
            depth,
        })
    }
}

fn is_fully_recessed(graph: &AttributedAdjacencyGraph, face_index: usize) -> bool {
    let concave = graph.concave_neighbors(face_index).len();
    concave >= 1 && concave == graph.neighbors(face_index).len()
}
