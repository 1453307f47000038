use std::collections::BTreeMap;

use crate::error::{QueryError, Result};
use crate::graph::EdgeConvexity;
use crate::math::{Aabb, Vector3};

use super::GeometryQuery;

/// A declared face of a [`FixtureKernel`].
#[derive(Debug, Clone)]
pub struct FixtureFace {
    normal: Option<Vector3>,
    planar: bool,
    bounds: Aabb,
}

impl FixtureFace {
    /// A planar face with the given outward normal and bounds.
    #[must_use]
    pub fn planar(normal: Vector3, bounds: Aabb) -> Self {
        Self {
            normal: Some(normal.normalize()),
            planar: true,
            bounds,
        }
    }

    /// A curved face whose center normal is `normal`.
    #[must_use]
    pub fn curved(normal: Vector3, bounds: Aabb) -> Self {
        Self {
            normal: Some(normal.normalize()),
            planar: false,
            bounds,
        }
    }

    /// A face without a computable normal.
    #[must_use]
    pub fn degenerate(bounds: Aabb) -> Self {
        Self {
            normal: None,
            planar: false,
            bounds,
        }
    }
}

/// Handle to one declared shared edge between two fixture faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureEdge {
    faces: (usize, usize),
    slot: usize,
}

/// A table-driven [`GeometryQuery`] backend.
///
/// Faces and adjacencies are declared up front, with one convexity per
/// shared edge. The kernel holds a single solid addressed by `()`; face
/// handles are the declaration indices.
#[derive(Debug, Clone, Default)]
pub struct FixtureKernel {
    faces: Vec<FixtureFace>,
    adjacency: BTreeMap<(usize, usize), Vec<EdgeConvexity>>,
    corrupt: Option<String>,
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

impl FixtureKernel {
    /// Creates an empty kernel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a face and returns its index.
    pub fn add_face(&mut self, face: FixtureFace) -> usize {
        self.faces.push(face);
        self.faces.len() - 1
    }

    /// Declares one more shared edge between faces `a` and `b`.
    ///
    /// Self-adjacency is ignored.
    pub fn connect(&mut self, a: usize, b: usize, convexity: EdgeConvexity) -> &mut Self {
        if a != b {
            self.adjacency
                .entry(pair_key(a, b))
                .or_default()
                .push(convexity);
        }
        self
    }

    /// Declares two faces adjacent without any shared edge geometry.
    pub fn touch(&mut self, a: usize, b: usize) -> &mut Self {
        if a != b {
            self.adjacency.entry(pair_key(a, b)).or_default();
        }
        self
    }

    /// Makes every subsequent face enumeration fail with `reason`.
    pub fn mark_corrupt(&mut self, reason: impl Into<String>) {
        self.corrupt = Some(reason.into());
    }

    fn face(&self, index: usize) -> Result<&FixtureFace> {
        self.faces
            .get(index)
            .ok_or_else(|| QueryError::UnknownFace(format!("fixture face {index}")).into())
    }
}

impl GeometryQuery for FixtureKernel {
    type Solid = ();
    type Face = usize;
    type Edge = FixtureEdge;

    fn faces(&self, (): ()) -> Result<Vec<usize>> {
        if let Some(reason) = &self.corrupt {
            return Err(QueryError::CorruptSolid(reason.clone()).into());
        }
        Ok((0..self.faces.len()).collect())
    }

    fn normal(&self, face: usize) -> Result<Option<Vector3>> {
        Ok(self.face(face)?.normal)
    }

    fn is_planar(&self, face: usize) -> Result<bool> {
        Ok(self.face(face)?.planar)
    }

    fn z_level(&self, face: usize, angle_tolerance: f64) -> Result<Option<f64>> {
        let data = self.face(face)?;
        if data.planar && self.is_horizontal(face, angle_tolerance)? {
            Ok(Some(data.bounds.min.z))
        } else {
            Ok(None)
        }
    }

    fn bounds(&self, face: usize) -> Result<Aabb> {
        Ok(self.face(face)?.bounds)
    }

    fn are_adjacent(&self, (): (), face1: usize, face2: usize) -> Result<bool> {
        self.face(face1)?;
        self.face(face2)?;
        let key = pair_key(face1, face2);
        Ok(face1 != face2 && self.adjacency.contains_key(&key))
    }

    fn shared_edges(
        &self,
        (): (),
        face1: usize,
        face2: usize,
        max_count: usize,
    ) -> Result<Vec<FixtureEdge>> {
        let faces = pair_key(face1, face2);
        let count = self.adjacency.get(&faces).map_or(0, Vec::len);
        Ok((0..count.min(max_count))
            .map(|slot| FixtureEdge { faces, slot })
            .collect())
    }

    fn edge_convexity(
        &self,
        (): (),
        edge: FixtureEdge,
        _face1: usize,
        _face2: usize,
    ) -> Result<EdgeConvexity> {
        Ok(self
            .adjacency
            .get(&edge.faces)
            .and_then(|edges| edges.get(edge.slot))
            .copied()
            .unwrap_or_default())
    }
}
