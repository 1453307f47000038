use crate::error::{GeometryError, Result};
use crate::math::{Aabb, Point3, Vector3, TOLERANCE};

use super::Curve;

/// An infinite line defined by an origin point and a unit direction.
///
/// The parametric form is `P(t) = origin + t * direction`, so `t` measures
/// arc length from the origin.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Creates the line through `from` and `to`, returning it together with
    /// the parameter of `to` (the segment length).
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn through(from: Point3, to: Point3) -> Result<(Self, f64)> {
        let line = Self::new(from, to - from)?;
        Ok((line, (to - from).norm()))
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.origin + self.direction * t)
    }

    fn tangent(&self, _t: f64) -> Result<Vector3> {
        Ok(self.direction)
    }

    fn bounds(&self, t_start: f64, t_end: f64) -> Result<Aabb> {
        Ok(Aabb::new(self.evaluate(t_start)?, self.evaluate(t_end)?))
    }
}
