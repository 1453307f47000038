use std::f64::consts::PI;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::Surface;

/// A cylindrical surface in 3D space.
///
/// Defined by a center point on the axis, radius, axis direction, and
/// a reference direction for u=0. The natural normal points away from the axis:
/// `cos(u) * ref_dir + sin(u) * (axis x ref_dir)`.
#[derive(Debug, Clone)]
pub struct Cylinder {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, axis is zero-length,
    /// or the reference direction is not perpendicular to the axis.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("cylinder radius must be positive".into()).into(),
            );
        }

        let axis_len = axis.norm();
        if axis_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let axis = axis / axis_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if axis.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to axis".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
        })
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the axis direction (unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    fn radial(&self, u: f64) -> Vector3 {
        self.ref_dir * u.cos() + self.axis.cross(&self.ref_dir) * u.sin()
    }
}

impl Surface for Cylinder {
    fn normal_at(&self, point: &Point3) -> Result<Vector3> {
        let dp = point - self.center;
        let radial = dp - self.axis * dp.dot(&self.axis);
        let len = radial.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("point lies on the cylinder axis".into()).into());
        }
        Ok(radial / len)
    }

    fn mid_normal(&self) -> Result<Vector3> {
        Ok(self.radial(PI))
    }
}
