//! The boundary between feature recognition and a B-Rep kernel.
//!
//! Graph construction only ever talks to a kernel through [`GeometryQuery`].
//! [`TopologyStore`](crate::topology::TopologyStore) implements it over this
//! crate's own arena, and [`FixtureKernel`] implements it from declared tables.

mod fixture;
mod store;

pub use fixture::{FixtureEdge, FixtureFace, FixtureKernel};

use crate::error::Result;
use crate::graph::EdgeConvexity;
use crate::math::{Aabb, Vector3};

/// Geometric and topological queries against a solid and its faces.
///
/// Methods return `Err` only for hard kernel failures (unknown handles,
/// corrupt solids); degenerate geometry is reported as `Ok(None)` or
/// [`EdgeConvexity::Smooth`].
///
/// The trait is `Sync` so the graph builder can issue queries from several
/// worker threads against one kernel.
pub trait GeometryQuery: Sync {
    /// Handle to a solid.
    type Solid: Copy + Send + Sync;
    /// Handle to a face of a solid.
    type Face: Copy + Send + Sync;
    /// Handle to an edge of a solid.
    type Edge: Copy + Send + Sync;

    /// Enumerates the faces of `solid`.
    ///
    /// The order defines face indices and must be stable across calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid cannot be enumerated.
    fn faces(&self, solid: Self::Solid) -> Result<Vec<Self::Face>>;

    /// Outward unit normal at the face center, or `None` if it cannot be computed.
    ///
    /// # Errors
    ///
    /// Returns an error if the face handle is invalid.
    fn normal(&self, face: Self::Face) -> Result<Option<Vector3>>;

    /// Whether the face lies on a plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the face handle is invalid.
    fn is_planar(&self, face: Self::Face) -> Result<bool>;

    /// Whether the normal points straight up or down within `angle_tolerance` radians.
    ///
    /// # Errors
    ///
    /// Returns an error if the face handle is invalid.
    fn is_horizontal(&self, face: Self::Face, angle_tolerance: f64) -> Result<bool> {
        Ok(self
            .normal(face)?
            .is_some_and(|n| n.z.abs() > angle_tolerance.cos()))
    }

    /// Whether the normal points up within `angle_tolerance` radians.
    ///
    /// # Errors
    ///
    /// Returns an error if the face handle is invalid.
    fn is_upward_facing(&self, face: Self::Face, angle_tolerance: f64) -> Result<bool> {
        Ok(self
            .normal(face)?
            .is_some_and(|n| n.z > angle_tolerance.cos()))
    }

    /// Whether the normal points down within `angle_tolerance` radians.
    ///
    /// # Errors
    ///
    /// Returns an error if the face handle is invalid.
    fn is_downward_facing(&self, face: Self::Face, angle_tolerance: f64) -> Result<bool> {
        Ok(self
            .normal(face)?
            .is_some_and(|n| n.z < -angle_tolerance.cos()))
    }

    /// Whether the normal is horizontal (the face stands upright) within
    /// `angle_tolerance` radians.
    ///
    /// # Errors
    ///
    /// Returns an error if the face handle is invalid.
    fn is_vertical(&self, face: Self::Face, angle_tolerance: f64) -> Result<bool> {
        Ok(self
            .normal(face)?
            .is_some_and(|n| n.z.abs() < angle_tolerance.sin()))
    }

    /// Z coordinate of a planar face that is horizontal within
    /// `angle_tolerance` radians, `None` for any other face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face handle is invalid.
    fn z_level(&self, face: Self::Face, angle_tolerance: f64) -> Result<Option<f64>>;

    /// Axis-aligned bounds of the face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face handle is invalid.
    fn bounds(&self, face: Self::Face) -> Result<Aabb>;

    /// Whether two faces of `solid` share at least one edge.
    ///
    /// # Errors
    ///
    /// Returns an error if either handle is invalid.
    fn are_adjacent(&self, solid: Self::Solid, face1: Self::Face, face2: Self::Face)
        -> Result<bool>;

    /// Edges common to both faces, at most `max_count` of them.
    ///
    /// # Errors
    ///
    /// Returns an error if either handle is invalid.
    fn shared_edges(
        &self,
        solid: Self::Solid,
        face1: Self::Face,
        face2: Self::Face,
        max_count: usize,
    ) -> Result<Vec<Self::Edge>>;

    /// Dihedral classification of `edge` between the two faces.
    ///
    /// # Errors
    ///
    /// Returns an error if a handle is invalid.
    fn edge_convexity(
        &self,
        solid: Self::Solid,
        edge: Self::Edge,
        face1: Self::Face,
        face2: Self::Face,
    ) -> Result<EdgeConvexity>;
}
