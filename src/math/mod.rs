mod aabb;

pub use aabb::Aabb;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Angle tolerance in radians shared by every face orientation predicate.
///
/// Using one value for all predicates keeps "horizontal" and "vertical"
/// mutually exclusive.
pub const ANGLE_TOLERANCE: f64 = 0.01;
