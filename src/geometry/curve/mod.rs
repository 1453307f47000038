mod arc;
mod line;

pub use arc::Arc;
pub use line::Line;

use crate::error::Result;
use crate::math::{Aabb, Point3, Vector3};

/// Trait for parametric curves carried by B-Rep edges.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the unit tangent at parameter `t`, pointing towards increasing `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Returns the exact bounding box of the curve between `t_start` and `t_end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be evaluated on the range.
    fn bounds(&self, t_start: f64, t_end: f64) -> Result<Aabb>;
}
