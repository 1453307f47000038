use crate::error::Result;
use crate::geometry::surface::{Cone, Cylinder, Plane, Surface};
use crate::math::{Point3, Vector3};

use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// The geometric surface associated with a face.
#[derive(Debug, Clone)]
pub enum FaceSurface {
    /// A planar surface.
    Plane(Plane),
    /// A cylindrical surface.
    Cylinder(Cylinder),
    /// A conical surface.
    Cone(Cone),
}

impl FaceSurface {
    fn as_surface(&self) -> &dyn Surface {
        match self {
            Self::Plane(plane) => plane,
            Self::Cylinder(cylinder) => cylinder,
            Self::Cone(cone) => cone,
        }
    }
}

/// Data associated with a topological face.
///
/// A face is a bounded region on a surface, defined by an outer wire
/// and optionally inner wires (holes).
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The geometric surface on which this face lies.
    pub surface: FaceSurface,
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Inner boundary wires (holes).
    pub inner_wires: Vec<WireId>,
    /// If `true`, the face normal agrees with the surface normal.
    pub same_sense: bool,
}

impl FaceData {
    /// Iterates the outer wire followed by the inner wires.
    pub fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
        std::iter::once(self.outer_wire).chain(self.inner_wires.iter().copied())
    }

    /// Returns `true` if the face lies on a plane.
    #[must_use]
    pub fn is_planar(&self) -> bool {
        self.surface.as_surface().is_planar()
    }

    fn oriented(&self, n: Vector3) -> Vector3 {
        if self.same_sense {
            n
        } else {
            -n
        }
    }

    /// Outward normal of the face at `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface normal is degenerate at `point`.
    pub fn normal_at(&self, point: &Point3) -> Result<Vector3> {
        Ok(self.oriented(self.surface.as_surface().normal_at(point)?))
    }

    /// Outward normal of the face at the middle of its surface's parameter range.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface normal is degenerate there.
    pub fn mid_normal(&self) -> Result<Vector3> {
        Ok(self.oriented(self.surface.as_surface().mid_normal()?))
    }
}
