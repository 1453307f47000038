use std::f64::consts::FRAC_PI_4;

use crate::error::{OperationError, Result};
use crate::geometry::surface::{Cone, Cylinder, Plane};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{FaceSurface, OrientedEdge, SolidId, TopologyStore};

use super::shell_builder::ShellBuilder;

/// Creates an axis-aligned block with a vertical cylindrical hole drilled
/// down from the top face at the block's XY center.
///
/// Faces are enumerated top, bottom, the four sides (`y = min`, `x = max`,
/// `y = max`, `x = min`), the cylindrical wall, the hole floor for blind
/// holes, then the countersink cone when one is requested.
pub struct MakeDrilledBlock {
    min_corner: Point3,
    max_corner: Point3,
    radius: f64,
    depth: Option<f64>,
    countersink: Option<f64>,
}

impl MakeDrilledBlock {
    /// Creates a block with a hole running through its full height.
    #[must_use]
    pub fn through(min_corner: Point3, max_corner: Point3, radius: f64) -> Self {
        Self {
            min_corner,
            max_corner,
            radius,
            depth: None,
            countersink: None,
        }
    }

    /// Creates a block with a blind hole of the given depth.
    #[must_use]
    pub fn blind(min_corner: Point3, max_corner: Point3, radius: f64, depth: f64) -> Self {
        Self {
            min_corner,
            max_corner,
            radius,
            depth: Some(depth),
            countersink: None,
        }
    }

    /// Chamfers the hole mouth with a 90 degree countersink that opens to
    /// `radius` at the top face.
    #[must_use]
    pub fn with_countersink(mut self, radius: f64) -> Self {
        self.countersink = Some(radius);
        self
    }

    /// Height of the countersink cone; zero without one.
    fn countersink_depth(&self) -> f64 {
        self.countersink.map_or(0.0, |mouth| mouth - self.radius)
    }

    fn validate(&self) -> Result<()> {
        let size = self.max_corner - self.min_corner;
        if size.x < TOLERANCE || size.y < TOLERANCE || size.z < TOLERANCE {
            return Err(
                OperationError::InvalidInput("block extents must be positive".into()).into(),
            );
        }
        if self.radius < TOLERANCE || 2.0 * self.radius >= size.x.min(size.y) {
            return Err(OperationError::InvalidInput(format!(
                "hole radius {} does not fit a {} x {} block",
                self.radius, size.x, size.y
            ))
            .into());
        }
        if let Some(depth) = self.depth {
            if depth < TOLERANCE || depth >= size.z {
                return Err(OperationError::InvalidInput(format!(
                    "blind hole depth {depth} must be in (0, {})",
                    size.z
                ))
                .into());
            }
        }
        if let Some(mouth) = self.countersink {
            let hole_depth = self.depth.unwrap_or(size.z);
            if mouth < self.radius + TOLERANCE || 2.0 * mouth >= size.x.min(size.y) {
                return Err(OperationError::InvalidInput(format!(
                    "countersink radius {mouth} must exceed hole radius {} and fit the block",
                    self.radius
                ))
                .into());
            }
            if self.countersink_depth() >= hole_depth - TOLERANCE {
                let msg = format!("countersink radius {mouth} leaves no cylindrical bore");
                return Err(OperationError::InvalidInput(msg).into());
            }
        }
        Ok(())
    }

    /// Executes the operation, creating the drilled block in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the block is degenerate, the
    /// hole or its countersink does not fit inside it, or a blind depth reaches
    /// the bottom.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        self.validate()?;

        let (lo, hi) = (self.min_corner, self.max_corner);
        let (cx, cy) = (0.5 * (lo.x + hi.x), 0.5 * (lo.y + hi.y));
        let hole_bottom = self.depth.map_or(lo.z, |depth| hi.z - depth);
        let bore_top = hi.z - self.countersink_depth();

        let corners = |z: f64| {
            [
                Point3::new(lo.x, lo.y, z),
                Point3::new(hi.x, lo.y, z),
                Point3::new(hi.x, hi.y, z),
                Point3::new(lo.x, hi.y, z),
            ]
        };
        let (bottom, top) = (corners(lo.z), corners(hi.z));

        let mut builder = ShellBuilder::new(store);
        let rim = builder.circle(
            Point3::new(cx, cy, bore_top),
            self.radius,
            Vector3::z(),
            Vector3::x(),
        )?;
        let base = builder.circle(
            Point3::new(cx, cy, hole_bottom),
            self.radius,
            Vector3::z(),
            Vector3::x(),
        )?;

        let mouth = match self.countersink {
            Some(radius) => builder.circle(
                Point3::new(cx, cy, hi.z),
                radius,
                Vector3::z(),
                Vector3::x(),
            )?,
            None => rim,
        };

        let top_outer = builder.polygon_wire(&top)?;
        let top_hole = builder.wire(vec![OrientedEdge::new(mouth, false)]);
        builder.face(
            FaceSurface::Plane(Plane::from_normal(top[0], Vector3::z())?),
            top_outer,
            vec![top_hole],
            true,
        );

        let bottom_outer = builder.polygon_wire(&[bottom[0], bottom[3], bottom[2], bottom[1]])?;
        let bottom_holes = if self.depth.is_none() {
            vec![builder.wire(vec![OrientedEdge::new(base, true)])]
        } else {
            vec![]
        };
        builder.face(
            FaceSurface::Plane(Plane::from_normal(bottom[0], -Vector3::z())?),
            bottom_outer,
            bottom_holes,
            true,
        );

        for i in 0..4 {
            let j = (i + 1) % 4;
            let quad = [bottom[i], bottom[j], top[j], top[i]];
            let wire = builder.polygon_wire(&quad)?;
            let plane = Plane::from_polygon(&quad)?;
            builder.face(FaceSurface::Plane(plane), wire, vec![], true);
        }

        // The wall's material lies outside the cylinder, so it runs against the surface normal.
        let wall_outer = builder.wire(vec![OrientedEdge::new(rim, true)]);
        let wall_inner = builder.wire(vec![OrientedEdge::new(base, false)]);
        let cylinder = Cylinder::new(
            Point3::new(cx, cy, hole_bottom),
            self.radius,
            Vector3::z(),
            Vector3::x(),
        )?;
        builder.face(
            FaceSurface::Cylinder(cylinder),
            wall_outer,
            vec![wall_inner],
            false,
        );

        if self.depth.is_some() {
            let floor = builder.wire(vec![OrientedEdge::new(base, true)]);
            builder.face(
                FaceSurface::Plane(Plane::from_normal(
                    Point3::new(cx, cy, hole_bottom),
                    Vector3::z(),
                )?),
                floor,
                vec![],
                true,
            );
        }

        if let Some(radius) = self.countersink {
            let outer = builder.wire(vec![OrientedEdge::new(mouth, true)]);
            let inner = builder.wire(vec![OrientedEdge::new(rim, false)]);
            let cone = Cone::new(
                Point3::new(cx, cy, hi.z - radius),
                Vector3::z(),
                FRAC_PI_4,
                Vector3::x(),
            )?;
            builder.face(FaceSurface::Cone(cone), outer, vec![inner], false);
        }

        Ok(builder.finish())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn through_hole_block_has_seven_closed_faces() {
        let mut store = TopologyStore::new();
        let solid = MakeDrilledBlock::through(p(0.0, 0.0, 0.0), p(10.0, 10.0, 2.0), 1.5)
            .execute(&mut store)
            .unwrap();

        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(faces.len(), 7);
        let outer = store.solid(solid).unwrap().outer_shell;
        assert!(store.shell(outer).unwrap().is_closed);

        let wall = store.face(faces[6]).unwrap();
        assert!(!wall.is_planar());
        assert!(!wall.same_sense);
    }

    #[test]
    fn blind_hole_block_adds_a_floor() {
        let mut store = TopologyStore::new();
        let solid = MakeDrilledBlock::blind(p(0.0, 0.0, 0.0), p(10.0, 10.0, 5.0), 2.0, 3.0)
            .execute(&mut store)
            .unwrap();

        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(faces.len(), 8);
        let outer = store.solid(solid).unwrap().outer_shell;
        assert!(store.shell(outer).unwrap().is_closed);
        assert!(store.face(faces[7]).unwrap().is_planar());
    }

    #[test]
    fn countersink_adds_a_cone_at_the_mouth() {
        let mut store = TopologyStore::new();
        let solid = MakeDrilledBlock::through(p(0.0, 0.0, 0.0), p(10.0, 10.0, 4.0), 1.0)
            .with_countersink(2.0)
            .execute(&mut store)
            .unwrap();

        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(faces.len(), 8);
        let outer = store.solid(solid).unwrap().outer_shell;
        assert!(store.shell(outer).unwrap().is_closed);

        let countersink = store.face(faces[7]).unwrap();
        assert!(matches!(countersink.surface, FaceSurface::Cone(_)));
        assert!(!countersink.same_sense);
        let n = countersink.mid_normal().unwrap();
        assert!((n - Vector3::new(1.0, 0.0, 1.0).normalize()).norm() < 1e-9);
    }

    #[test]
    fn countersink_must_clear_the_bore() {
        let mut store = TopologyStore::new();
        let narrow = MakeDrilledBlock::through(p(0.0, 0.0, 0.0), p(10.0, 10.0, 4.0), 1.0)
            .with_countersink(1.0)
            .execute(&mut store);
        assert!(narrow.is_err());

        let deep = MakeDrilledBlock::blind(p(0.0, 0.0, 0.0), p(10.0, 10.0, 4.0), 1.0, 2.0)
            .with_countersink(3.5)
            .execute(&mut store);
        assert!(deep.is_err());
    }

    #[test]
    fn oversized_hole_fails() {
        let mut store = TopologyStore::new();
        let r = MakeDrilledBlock::through(p(0.0, 0.0, 0.0), p(4.0, 10.0, 2.0), 2.0)
            .execute(&mut store);
        assert!(r.is_err());
    }

    #[test]
    fn blind_depth_through_bottom_fails() {
        let mut store = TopologyStore::new();
        let r = MakeDrilledBlock::blind(p(0.0, 0.0, 0.0), p(10.0, 10.0, 2.0), 1.0, 2.0)
            .execute(&mut store);
        assert!(r.is_err());
    }
}
