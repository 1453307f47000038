use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a wire in the topology store.
    pub struct WireId;
}

/// An edge with orientation information within a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedEdge {
    /// The edge identifier.
    pub edge: EdgeId,
    /// `true` when the wire runs along the edge's natural direction.
    pub forward: bool,
}

impl OrientedEdge {
    /// Creates a new oriented edge.
    #[must_use]
    pub fn new(edge: EdgeId, forward: bool) -> Self {
        Self { edge, forward }
    }
}

/// A closed loop of oriented edges bounding a face.
///
/// Loops keep the face material on their left when viewed from the side the
/// face's outward normal points to: outer loops run counter-clockwise,
/// inner loops clockwise.
#[derive(Debug, Clone)]
pub struct WireData {
    /// The ordered sequence of oriented edges.
    pub edges: Vec<OrientedEdge>,
}
