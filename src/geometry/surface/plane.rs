use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::Surface;

/// An infinite plane in 3D space, defined by an origin and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            normal: normal / len,
        })
    }

    /// Fits a plane to a closed polygon using Newell's method.
    ///
    /// The normal follows the right-hand rule over the point order and the
    /// origin is the first point.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon has fewer than three points or zero area.
    pub fn from_polygon(points: &[Point3]) -> Result<Self> {
        let Some(&origin) = points.first() else {
            return Err(GeometryError::Degenerate("empty polygon".into()).into());
        };
        let n = points.len();
        if n < 3 {
            return Err(GeometryError::Degenerate(format!("polygon has only {n} points")).into());
        }
        let mut normal = Vector3::zeros();
        for (i, curr) in points.iter().enumerate() {
            let next = &points[(i + 1) % n];
            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }
        if normal.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("polygon has zero area".into()).into());
        }
        Self::from_normal(origin, normal)
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from `point` to the plane along its normal.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }
}

impl Surface for Plane {
    fn normal_at(&self, _point: &Point3) -> Result<Vector3> {
        Ok(self.normal)
    }

    fn mid_normal(&self) -> Result<Vector3> {
        Ok(self.normal)
    }

    fn is_planar(&self) -> bool {
        true
    }
}
