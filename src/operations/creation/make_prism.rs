use crate::error::{OperationError, Result};
use crate::geometry::surface::Plane;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{SolidId, TopologyStore};

use super::{MakePolyhedron, PolygonFace};

/// Extrudes a planar polygon along a direction vector to create a prism.
///
/// Faces are enumerated bottom, top, then one side per profile edge.
pub struct MakePrism {
    profile: Vec<Point3>,
    direction: Vector3,
}

impl MakePrism {
    /// Creates a new `MakePrism` operation.
    #[must_use]
    pub fn new(profile: Vec<Point3>, direction: Vector3) -> Self {
        Self { profile, direction }
    }

    /// Executes the extrusion, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the direction is zero-length
    /// or parallel to the profile plane, or the profile is degenerate.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.direction.norm() < TOLERANCE {
            return Err(
                OperationError::InvalidInput("extrude direction must be non-zero".into()).into(),
            );
        }
        let plane = Plane::from_polygon(&self.profile)
            .map_err(|err| OperationError::InvalidInput(format!("invalid profile: {err}")))?;
        let alignment = plane.plane_normal().dot(&self.direction);
        if alignment.abs() < TOLERANCE {
            return Err(OperationError::InvalidInput(
                "extrude direction lies in the profile plane".into(),
            )
            .into());
        }

        // Base runs counter-clockwise about the direction so the top keeps its order.
        let base: Vec<Point3> = if alignment > 0.0 {
            self.profile.clone()
        } else {
            self.profile.iter().rev().copied().collect()
        };
        let top: Vec<Point3> = base.iter().map(|p| p + self.direction).collect();

        let n = base.len();
        let mut faces = Vec::with_capacity(n + 2);
        faces.push(PolygonFace::new(base.iter().rev().copied().collect()));
        faces.push(PolygonFace::new(top.clone()));
        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(PolygonFace::new(vec![base[i], base[j], top[j], top[i]]));
        }

        MakePolyhedron::new(faces).execute(store)
    }
}
