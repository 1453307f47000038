use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::error::Result;
use crate::geometry::curve::{Arc, Line};
use crate::math::{Point3, Vector3};
use crate::topology::{
    EdgeCurve, EdgeData, EdgeId, FaceData, FaceId, FaceSurface, OrientedEdge, ShellData,
    SolidData, SolidId, TopologyStore, VertexData, VertexId, WireData, WireId,
};

/// Distance below which two points are merged into one vertex.
const MERGE_TOLERANCE: f64 = 1e-9;

/// Incrementally sews faces into a single-shell solid.
///
/// Vertices are merged by position and straight edges by their end vertices,
/// so two faces that trace the same segment share one `EdgeId`.
pub(crate) struct ShellBuilder<'s> {
    store: &'s mut TopologyStore,
    vertices: Vec<(Point3, VertexId)>,
    lines: HashMap<(VertexId, VertexId), EdgeId>,
    uses: HashMap<EdgeId, usize>,
    faces: Vec<FaceId>,
}

impl<'s> ShellBuilder<'s> {
    pub(crate) fn new(store: &'s mut TopologyStore) -> Self {
        Self {
            store,
            vertices: Vec::new(),
            lines: HashMap::new(),
            uses: HashMap::new(),
            faces: Vec::new(),
        }
    }

    pub(crate) fn vertex(&mut self, point: Point3) -> VertexId {
        if let Some(&(_, id)) = self
            .vertices
            .iter()
            .find(|(p, _)| (p - point).norm() < MERGE_TOLERANCE)
        {
            return id;
        }
        let id = self.store.add_vertex(VertexData::new(point));
        self.vertices.push((point, id));
        id
    }

    /// Returns the straight edge from `a` to `b`, reusing a reversed one if it exists.
    pub(crate) fn line(&mut self, a: Point3, b: Point3) -> Result<OrientedEdge> {
        let (va, vb) = (self.vertex(a), self.vertex(b));
        if let Some(&edge) = self.lines.get(&(va, vb)) {
            return Ok(OrientedEdge::new(edge, true));
        }
        if let Some(&edge) = self.lines.get(&(vb, va)) {
            return Ok(OrientedEdge::new(edge, false));
        }
        let (line, length) = Line::through(a, b)?;
        let edge = self.store.add_edge(EdgeData {
            start: va,
            end: vb,
            curve: EdgeCurve::Line(line),
            t_start: 0.0,
            t_end: length,
        });
        self.lines.insert((va, vb), edge);
        Ok(OrientedEdge::new(edge, true))
    }

    /// Creates a closed circle edge running counter-clockwise about `axis`.
    pub(crate) fn circle(
        &mut self,
        center: Point3,
        radius: f64,
        axis: Vector3,
        ref_dir: Vector3,
    ) -> Result<EdgeId> {
        let arc = Arc::new(center, radius, axis, ref_dir)?;
        let seam = self.vertex(center + ref_dir.normalize() * radius);
        Ok(self.store.add_edge(EdgeData {
            start: seam,
            end: seam,
            curve: EdgeCurve::Arc(arc),
            t_start: 0.0,
            t_end: TAU,
        }))
    }

    pub(crate) fn wire(&mut self, edges: Vec<OrientedEdge>) -> WireId {
        for oe in &edges {
            *self.uses.entry(oe.edge).or_default() += 1;
        }
        self.store.add_wire(WireData { edges })
    }

    /// Builds a closed wire through `points`, closing back to the first one.
    pub(crate) fn polygon_wire(&mut self, points: &[Point3]) -> Result<WireId> {
        let n = points.len();
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            edges.push(self.line(points[i], points[(i + 1) % n])?);
        }
        Ok(self.wire(edges))
    }

    pub(crate) fn face(
        &mut self,
        surface: FaceSurface,
        outer_wire: WireId,
        inner_wires: Vec<WireId>,
        same_sense: bool,
    ) -> FaceId {
        let id = self.store.add_face(FaceData {
            surface,
            outer_wire,
            inner_wires,
            same_sense,
        });
        self.faces.push(id);
        id
    }

    /// Wraps the collected faces into a shell and solid.
    pub(crate) fn finish(self) -> SolidId {
        let is_closed = self.uses.values().all(|&count| count == 2);
        let outer_shell = self.store.add_shell(ShellData {
            faces: self.faces,
            is_closed,
        });
        self.store.add_solid(SolidData {
            outer_shell,
            inner_shells: vec![],
        })
    }
}
