use crate::error::Result;
use crate::geometry::curve::{Arc, Curve, Line};
use crate::math::{Aabb, Point3, Vector3};

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// The geometric curve associated with an edge.
#[derive(Debug, Clone)]
pub enum EdgeCurve {
    /// A line segment.
    Line(Line),
    /// A circular arc, possibly a full circle.
    Arc(Arc),
}

impl EdgeCurve {
    fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Line(line) => line,
            Self::Arc(arc) => arc,
        }
    }
}

/// Data associated with a topological edge.
///
/// The natural direction runs from `start` at `t_start` to `end` at `t_end`;
/// `t_start < t_end`. A closed circle has `start == end`.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// The geometric curve defining this edge's shape.
    pub curve: EdgeCurve,
    /// Parameter on the curve corresponding to the start vertex.
    pub t_start: f64,
    /// Parameter on the curve corresponding to the end vertex.
    pub t_end: f64,
}

impl EdgeData {
    /// Returns the midpoint of the edge and the unit tangent there,
    /// in the edge's natural direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve tangent is degenerate.
    pub fn midpoint_frame(&self) -> Result<(Point3, Vector3)> {
        let t = 0.5 * (self.t_start + self.t_end);
        let curve = self.curve.as_curve();
        Ok((curve.evaluate(t)?, curve.tangent(t)?))
    }

    /// Returns the exact bounding box of the edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be evaluated.
    pub fn bounds(&self) -> Result<Aabb> {
        self.curve.as_curve().bounds(self.t_start, self.t_end)
    }
}
