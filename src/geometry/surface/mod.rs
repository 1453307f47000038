mod cone;
mod cylinder;
mod plane;

pub use cone::Cone;
pub use cylinder::Cylinder;
pub use plane::Plane;

use crate::error::Result;
use crate::math::{Point3, Vector3};

/// Trait for analytic surfaces carried by B-Rep faces.
///
/// Normals are the surface's natural normals; a face that runs against its
/// surface flips them.
pub trait Surface {
    /// Computes the unit normal at the surface point closest to `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is degenerate at that point
    /// (for example on a cone apex or a cylinder axis).
    fn normal_at(&self, point: &Point3) -> Result<Vector3>;

    /// Computes the unit normal at the middle of the natural parameter range.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is degenerate there.
    fn mid_normal(&self) -> Result<Vector3>;

    /// Returns `true` if the surface is a plane.
    fn is_planar(&self) -> bool {
        false
    }
}
