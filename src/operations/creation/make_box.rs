use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{SolidId, TopologyStore};

use super::MakePrism;

/// Creates an axis-aligned box solid from two corner points.
///
/// Faces are enumerated bottom, top, then the sides at `y = min`, `x = max`,
/// `y = max` and `x = min`.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation, creating the box in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if any extent is not positive.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        let size = hi - lo;
        if size.x < TOLERANCE || size.y < TOLERANCE || size.z < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "box extents must be positive, got {:?}",
                size.as_slice()
            ))
            .into());
        }
        let profile = vec![
            lo,
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
        ];
        MakePrism::new(profile, Vector3::new(0.0, 0.0, size.z)).execute(store)
    }
}
