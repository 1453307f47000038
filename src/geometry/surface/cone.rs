use std::f64::consts::PI;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::Surface;

/// A conical surface in 3D space.
///
/// Defined by an apex point, an axis direction (opening direction), a
/// half-angle, and a reference direction for u=0. The natural normal points
/// away from the axis and back towards the apex side.
#[derive(Debug, Clone)]
pub struct Cone {
    apex: Point3,
    axis: Vector3,
    half_angle: f64,
    ref_dir: Vector3,
}

impl Cone {
    /// Creates a new cone.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-angle is outside `(0, pi/2)`, axis is
    /// zero-length, or the reference direction is not perpendicular to the axis.
    pub fn new(apex: Point3, axis: Vector3, half_angle: f64, ref_dir: Vector3) -> Result<Self> {
        if half_angle <= TOLERANCE || half_angle >= std::f64::consts::FRAC_PI_2 - TOLERANCE {
            return Err(GeometryError::Degenerate(
                "cone half-angle must be in (0, pi/2)".into(),
            )
            .into());
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
            apex,
            axis,
            half_angle,
            ref_dir,
        })
    }

    /// Returns the half-angle in radians.
    #[must_use]
    pub fn half_angle(&self) -> f64 {
        self.half_angle
    }

    fn normal_from_radial(&self, radial: &Vector3) -> Vector3 {
        radial * self.half_angle.cos() - self.axis * self.half_angle.sin()
    }
}

impl Surface for Cone {
    fn normal_at(&self, point: &Point3) -> Result<Vector3> {
        let dp = point - self.apex;
        let radial = dp - self.axis * dp.dot(&self.axis);
        let len = radial.norm();
        if len < TOLERANCE {
            return Err(
                GeometryError::Degenerate("cone normal undefined on the axis".into()).into(),
            );
        }
        Ok(self.normal_from_radial(&(radial / len)))
    }

    fn mid_normal(&self) -> Result<Vector3> {
        let radial = self.ref_dir * PI.cos() + self.axis.cross(&self.ref_dir) * PI.sin();
        Ok(self.normal_from_radial(&radial))
    }
}
