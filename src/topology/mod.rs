pub mod edge;
pub mod face;
pub mod shell;
pub mod solid;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceData, FaceId, FaceSurface};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use slotmap::{Key, SlotMap};

/// Central arena that owns all topological entities.
///
/// Entities reference each other via typed IDs (generational indices),
/// so a stale or foreign ID surfaces as [`TopologyError::EntityNotFound`]
/// instead of a dangling reference.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

fn lookup<'a, K: Key, V>(
    map: &'a SlotMap<K, V>,
    id: K,
    kind: &str,
) -> Result<&'a V, TopologyError> {
    map.get(id)
        .ok_or_else(|| TopologyError::EntityNotFound(format!("{kind} {:?}", id.data())))
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Inserts a wire and returns its ID.
    pub fn add_wire(&mut self, data: WireData) -> WireId {
        self.wires.insert(data)
    }

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Inserts a shell and returns its ID.
    pub fn add_shell(&mut self, data: ShellData) -> ShellId {
        self.shells.insert(data)
    }

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns the vertex data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        lookup(&self.vertices, id, "vertex")
    }

    /// Returns the edge data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        lookup(&self.edges, id, "edge")
    }

    /// Returns the wire data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wire(&self, id: WireId) -> Result<&WireData, TopologyError> {
        lookup(&self.wires, id, "wire")
    }

    /// Returns the face data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        lookup(&self.faces, id, "face")
    }

    /// Returns the shell data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell(&self, id: ShellId) -> Result<&ShellData, TopologyError> {
        lookup(&self.shells, id, "shell")
    }

    /// Returns the solid data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        lookup(&self.solids, id, "solid")
    }

    /// Removes a face from the store, leaving any shell that lists it dangling.
    ///
    /// Used to model corrupt input.
    pub fn remove_face(&mut self, id: FaceId) -> Option<FaceData> {
        self.faces.remove(id)
    }

    /// Lists the faces of a solid: outer shell first, then void shells.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or any of its shells is missing.
    pub fn solid_faces(&self, id: SolidId) -> Result<Vec<FaceId>, TopologyError> {
        let solid = self.solid(id)?;
        let mut faces = self.shell(solid.outer_shell)?.faces.clone();
        for &shell in &solid.inner_shells {
            faces.extend_from_slice(&self.shell(shell)?.faces);
        }
        Ok(faces)
    }

    /// Lists every oriented edge bounding a face, outer wire first.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its wires is missing.
    pub fn face_edges(&self, id: FaceId) -> Result<Vec<OrientedEdge>, TopologyError> {
        let face = self.face(id)?;
        let mut edges = Vec::new();
        for wire in face.wires() {
            edges.extend_from_slice(&self.wire(wire)?.edges);
        }
        Ok(edges)
    }
}
