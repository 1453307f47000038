use std::f64::consts::{PI, TAU};

use crate::error::{GeometryError, Result};
use crate::math::{Aabb, Point3, Vector3, TOLERANCE};

use super::Curve;

/// A circle in 3D space, used by edges as an arc between two angles.
///
/// Defined by a center, radius, normal axis, and a reference direction
/// for the zero angle. Angles increase counter-clockwise about `normal`.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl Arc {
    /// Creates a new arc circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// or the reference direction is not perpendicular to the normal.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the arc plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

/// Returns `true` if angle `theta` lies on the sweep from `start` to `end`.
fn angle_in_sweep(theta: f64, start: f64, end: f64) -> bool {
    let sweep = end - start;
    if sweep >= TAU - TOLERANCE {
        return true;
    }
    (theta - start).rem_euclid(TAU) <= sweep + TOLERANCE
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let binormal = self.binormal();
        Ok(self.center + (self.ref_dir * t.cos() + binormal * t.sin()) * self.radius)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let binormal = self.binormal();
        let tangent = self.ref_dir * -t.sin() + binormal * t.cos();
        let len = tangent.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(tangent / len)
    }

    fn bounds(&self, t_start: f64, t_end: f64) -> Result<Aabb> {
        let mut bounds = Aabb::new(self.evaluate(t_start)?, self.evaluate(t_end)?);
        let binormal = self.binormal();

        // Each world axis peaks where d/dt (ref_k cos t + bin_k sin t) vanishes.
        for axis in 0..3 {
            let (r, b) = (self.ref_dir[axis], binormal[axis]);
            if r.abs() < TOLERANCE && b.abs() < TOLERANCE {
                continue;
            }
            let peak = b.atan2(r);
            for theta in [peak, peak + PI] {
                if angle_in_sweep(theta, t_start, t_end) {
                    bounds = bounds.including(&self.evaluate(theta)?);
                }
            }
        }
        Ok(bounds)
    }
}
