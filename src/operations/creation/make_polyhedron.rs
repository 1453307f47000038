use crate::error::{OperationError, Result};
use crate::geometry::surface::Plane;
use crate::math::Point3;
use crate::topology::{FaceSurface, SolidId, TopologyStore};

use super::shell_builder::ShellBuilder;

/// Maximum distance of a loop point from its face plane.
const PLANARITY_TOLERANCE: f64 = 1e-7;

/// A planar face described by point loops.
///
/// The outer loop runs counter-clockwise when viewed from outside the solid;
/// hole loops run clockwise.
#[derive(Debug, Clone)]
pub struct PolygonFace {
    /// The outer boundary.
    pub outer: Vec<Point3>,
    /// Inner boundaries (holes in the face).
    pub holes: Vec<Vec<Point3>>,
}

impl PolygonFace {
    /// Creates a face without holes.
    #[must_use]
    pub fn new(outer: Vec<Point3>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Adds a hole loop to the face.
    #[must_use]
    pub fn with_hole(mut self, hole: Vec<Point3>) -> Self {
        self.holes.push(hole);
        self
    }
}

/// Creates a polyhedral solid by sewing planar faces along coincident edges.
///
/// Face enumeration order of the resulting solid matches the input order.
pub struct MakePolyhedron {
    faces: Vec<PolygonFace>,
}

impl MakePolyhedron {
    /// Creates a new `MakePolyhedron` operation.
    #[must_use]
    pub fn new(faces: Vec<PolygonFace>) -> Self {
        Self { faces }
    }

    /// Executes the operation, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if a loop has fewer than three
    /// points, an outer loop has zero area, or a loop point leaves the face plane.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        for (index, face) in self.faces.iter().enumerate() {
            validate_face(index, face)?;
        }

        let mut builder = ShellBuilder::new(store);
        for face in &self.faces {
            let plane = Plane::from_polygon(&face.outer)?;
            let outer = builder.polygon_wire(&face.outer)?;
            let mut inner = Vec::with_capacity(face.holes.len());
            for hole in &face.holes {
                inner.push(builder.polygon_wire(hole)?);
            }
            builder.face(FaceSurface::Plane(plane), outer, inner, true);
        }
        Ok(builder.finish())
    }
}

fn validate_face(index: usize, face: &PolygonFace) -> Result<()> {
    for points in std::iter::once(&face.outer).chain(&face.holes) {
        if points.len() < 3 {
            return Err(OperationError::InvalidInput(format!(
                "face {index} has a loop with {} points",
                points.len()
            ))
            .into());
        }
    }
    let plane = Plane::from_polygon(&face.outer).map_err(|err| {
        OperationError::InvalidInput(format!("face {index} has no plane: {err}"))
    })?;
    let off_plane = std::iter::once(&face.outer)
        .chain(&face.holes)
        .flatten()
        .any(|p| plane.signed_distance(p).abs() > PLANARITY_TOLERANCE);
    if off_plane {
        return Err(OperationError::InvalidInput(format!("face {index} is not planar")).into());
    }
    Ok(())
}
