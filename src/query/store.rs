use std::collections::HashSet;

use tracing::trace;

use crate::error::{Result, TopologyError};
use crate::graph::EdgeConvexity;
use crate::math::{Aabb, Vector3, ANGLE_TOLERANCE};
use crate::topology::{EdgeId, FaceId, FaceSurface, SolidId, TopologyStore};

use super::GeometryQuery;

/// Classifies the dihedral at an edge from the outward normals of both faces
/// and the edge tangent as face 1 traverses it.
///
/// `n1 x tangent` points into face 1; the edge is convex when face 2's normal
/// leans away from face 1 and concave when it leans over it.
pub(crate) fn classify_dihedral(
    n1: &Vector3,
    n2: &Vector3,
    tangent: &Vector3,
    angle_tolerance: f64,
) -> EdgeConvexity {
    if n1.dot(n2) > angle_tolerance.cos() {
        return EdgeConvexity::Smooth;
    }
    let into_face1 = n1.cross(tangent);
    let lean = n2.dot(&into_face1);
    if lean > angle_tolerance.sin() {
        EdgeConvexity::Concave
    } else if lean < -angle_tolerance.sin() {
        EdgeConvexity::Convex
    } else {
        EdgeConvexity::Smooth
    }
}

impl GeometryQuery for TopologyStore {
    type Solid = SolidId;
    type Face = FaceId;
    type Edge = EdgeId;

    fn faces(&self, solid: SolidId) -> Result<Vec<FaceId>> {
        Ok(self.solid_faces(solid)?)
    }

    fn normal(&self, face: FaceId) -> Result<Option<Vector3>> {
        Ok(self.face(face)?.mid_normal().ok())
    }

    fn is_planar(&self, face: FaceId) -> Result<bool> {
        Ok(self.face(face)?.is_planar())
    }

    fn z_level(&self, face: FaceId, angle_tolerance: f64) -> Result<Option<f64>> {
        let FaceSurface::Plane(plane) = &self.face(face)?.surface else {
            return Ok(None);
        };
        if !self.is_horizontal(face, angle_tolerance)? {
            return Ok(None);
        }
        Ok(Some(plane.origin().z))
    }

    fn bounds(&self, face: FaceId) -> Result<Aabb> {
        let mut bounds: Option<Aabb> = None;
        for oe in self.face_edges(face)? {
            let edge_bounds = self.edge(oe.edge)?.bounds()?;
            bounds = Some(bounds.map_or(edge_bounds, |b| b.union(&edge_bounds)));
        }
        bounds.ok_or_else(|| {
            TopologyError::InvalidTopology(format!("face {face:?} has no boundary edges")).into()
        })
    }

    fn are_adjacent(&self, solid: SolidId, face1: FaceId, face2: FaceId) -> Result<bool> {
        Ok(!self.shared_edges(solid, face1, face2, 1)?.is_empty())
    }

    fn shared_edges(
        &self,
        _solid: SolidId,
        face1: FaceId,
        face2: FaceId,
        max_count: usize,
    ) -> Result<Vec<EdgeId>> {
        let other: HashSet<EdgeId> = self.face_edges(face2)?.iter().map(|oe| oe.edge).collect();
        let mut shared = Vec::new();
        for oe in self.face_edges(face1)? {
            if shared.len() >= max_count {
                break;
            }
            if other.contains(&oe.edge) && !shared.contains(&oe.edge) {
                shared.push(oe.edge);
            }
        }
        Ok(shared)
    }

    fn edge_convexity(
        &self,
        _solid: SolidId,
        edge: EdgeId,
        face1: FaceId,
        face2: FaceId,
    ) -> Result<EdgeConvexity> {
        let (data1, data2) = (self.face(face1)?, self.face(face2)?);
        let edge_data = self.edge(edge)?;
        let usages = self.face_edges(face1)?;
        let Some(usage) = usages.into_iter().find(|oe| oe.edge == edge) else {
            trace!(?edge, ?face1, "edge does not bound the first face");
            return Ok(EdgeConvexity::Smooth);
        };
        let Ok((point, tangent)) = edge_data.midpoint_frame() else {
            return Ok(EdgeConvexity::Smooth);
        };
        let tangent = if usage.forward { tangent } else { -tangent };
        let (Ok(n1), Ok(n2)) = (data1.normal_at(&point), data2.normal_at(&point)) else {
            trace!(?edge, "face normal undefined at edge midpoint");
            return Ok(EdgeConvexity::Smooth);
        };
        Ok(classify_dihedral(&n1, &n2, &tangent, ANGLE_TOLERANCE))
    }
}
