use super::{Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a bounding box from two corners, sorting each axis.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates a degenerate box containing a single point.
    #[must_use]
    pub fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// Creates the smallest box containing all `points`, or `None` if empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_point(first), |acc, p| acc.including(&p)))
    }

    /// Returns this box grown to contain `p`.
    #[must_use]
    pub fn including(mut self, p: &Point3) -> Self {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
        self
    }

    /// Returns the smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Returns this box grown by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vector3::repeat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Returns `true` if the two boxes touch or overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }

    /// Returns the box extents along X, Y and Z.
    #[must_use]
    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }
}
