use std::collections::{BTreeSet, HashMap};

use crate::math::{Aabb, Vector3};

/// Classification of the dihedral angle at an edge between two faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EdgeConvexity {
    /// Interior angle above 180 degrees: the material is re-entrant, as at pocket walls.
    Concave,
    /// Tangent faces, or a classification that could not be determined.
    #[default]
    Smooth,
    /// Interior angle below 180 degrees, as at box corners and bosses.
    Convex,
}

/// Cached geometric attributes of one face; the payload of a graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAttributes {
    /// Index of the face in the solid's enumeration order.
    pub face_index: usize,
    /// Outward normal at the face center, if computable.
    pub normal: Option<Vector3>,
    /// Whether the face is planar.
    pub is_planar: bool,
    /// Whether the normal points up or down.
    pub is_horizontal: bool,
    /// Whether the normal points up.
    pub is_upward: bool,
    /// Whether the normal points down.
    pub is_downward: bool,
    /// Whether the normal is horizontal.
    pub is_vertical: bool,
    /// Z level of a planar horizontal face.
    pub z_level: Option<f64>,
    /// Bounding box of the face.
    pub bounds: Aabb,
}

/// Adjacency between two faces; the payload of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyEdge {
    /// The lower face index of the pair.
    pub face1_index: usize,
    /// The higher face index of the pair.
    pub face2_index: usize,
    /// Convexity of the first shared edge found.
    pub convexity: EdgeConvexity,
    /// Number of B-Rep edges common to both faces.
    pub shared_edge_count: usize,
}

impl AdjacencyEdge {
    /// Returns the face on the other end of this edge, if `face` is one end.
    #[must_use]
    pub fn other(&self, face: usize) -> Option<usize> {
        if face == self.face1_index {
            Some(self.face2_index)
        } else if face == self.face2_index {
            Some(self.face1_index)
        } else {
            None
        }
    }
}

/// Planar horizontal faces sharing (approximately) one Z level.
#[derive(Debug, Clone, PartialEq)]
pub struct ZLevelGroup {
    /// Z level of the first face assigned to the group.
    pub z_level: f64,
    /// Face indices in the group, ascending.
    pub faces: Vec<usize>,
}

/// Attributed adjacency graph of a solid.
///
/// Nodes and edges live in flat arenas addressed by index. `adjacency[f]`
/// maps each neighbor of face `f` to the index of the connecting edge, and is
/// kept symmetric. Once built the graph is immutable and can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct AttributedAdjacencyGraph {
    nodes: Vec<FaceAttributes>,
    edges: Vec<AdjacencyEdge>,
    adjacency: Vec<HashMap<usize, usize>>,
}

impl AttributedAdjacencyGraph {
    /// Creates a graph with the given nodes and no edges.
    ///
    /// `nodes[i].face_index` must equal `i`.
    pub(crate) fn with_nodes(nodes: Vec<FaceAttributes>) -> Self {
        debug_assert!(nodes.iter().enumerate().all(|(i, n)| n.face_index == i));
        let adjacency = vec![HashMap::new(); nodes.len()];
        Self {
            nodes,
            edges: Vec::new(),
            adjacency,
        }
    }

    /// Records an adjacency, returning its edge index.
    ///
    /// Self-loops, out-of-range faces and already-connected pairs are refused.
    pub(crate) fn insert_edge(
        &mut self,
        a: usize,
        b: usize,
        convexity: EdgeConvexity,
        shared_edge_count: usize,
    ) -> Option<usize> {
        let n = self.nodes.len();
        if a == b || a >= n || b >= n || self.adjacency[a].contains_key(&b) {
            return None;
        }
        let index = self.edges.len();
        self.edges.push(AdjacencyEdge {
            face1_index: a.min(b),
            face2_index: a.max(b),
            convexity,
            shared_edge_count,
        });
        self.adjacency[a].insert(b, index);
        self.adjacency[b].insert(a, index);
        Some(index)
    }

    /// Number of nodes (faces).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of adjacency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes, indexed by face index.
    #[must_use]
    pub fn nodes(&self) -> &[FaceAttributes] {
        &self.nodes
    }

    /// All adjacency edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[AdjacencyEdge] {
        &self.edges
    }

    /// The node of a face, or `None` if out of range.
    #[must_use]
    pub fn node(&self, face_index: usize) -> Option<&FaceAttributes> {
        self.nodes.get(face_index)
    }

    /// All faces adjacent to `face_index`; empty if out of range or isolated.
    #[must_use]
    pub fn neighbors(&self, face_index: usize) -> BTreeSet<usize> {
        self.adjacency
            .get(face_index)
            .map(|map| map.keys().copied().collect())
            .unwrap_or_default()
    }

    /// The adjacency edge between two faces, or `None` if they are not adjacent.
    #[must_use]
    pub fn edge(&self, face1: usize, face2: usize) -> Option<&AdjacencyEdge> {
        let index = *self.adjacency.get(face1)?.get(&face2)?;
        self.edges.get(index)
    }

    fn neighbors_with(&self, face_index: usize, convexity: EdgeConvexity) -> Vec<usize> {
        let Some(map) = self.adjacency.get(face_index) else {
            return Vec::new();
        };
        let mut found: Vec<usize> = map
            .iter()
            .filter(|&(_, &edge)| self.edges[edge].convexity == convexity)
            .map(|(&neighbor, _)| neighbor)
            .collect();
        found.sort_unstable();
        found
    }

    /// Neighbors connected through a concave edge, ascending.
    #[must_use]
    pub fn concave_neighbors(&self, face_index: usize) -> Vec<usize> {
        self.neighbors_with(face_index, EdgeConvexity::Concave)
    }

    /// Neighbors connected through a convex edge, ascending.
    #[must_use]
    pub fn convex_neighbors(&self, face_index: usize) -> Vec<usize> {
        self.neighbors_with(face_index, EdgeConvexity::Convex)
    }

    /// Faces whose normal points up or down.
    #[must_use]
    pub fn horizontal_faces(&self) -> Vec<usize> {
        self.select(|n| n.is_horizontal)
    }

    /// Upward-facing faces: the candidates for pocket floors.
    #[must_use]
    pub fn upward_faces(&self) -> Vec<usize> {
        self.select(|n| n.is_upward)
    }

    fn select(&self, keep: impl Fn(&FaceAttributes) -> bool) -> Vec<usize> {
        self.nodes
            .iter()
            .filter(|n| keep(n))
            .map(|n| n.face_index)
            .collect()
    }

    /// Groups faces with a Z level by height.
    ///
    /// A face joins the first group whose Z lies within `tolerance` of its own;
    /// otherwise it starts a new group. Groups are returned in ascending Z.
    #[must_use]
    pub fn faces_by_z_level(&self, tolerance: f64) -> Vec<ZLevelGroup> {
        let mut groups: Vec<ZLevelGroup> = Vec::new();
        for node in &self.nodes {
            let Some(z) = node.z_level else { continue };
            let near = |g: &ZLevelGroup| (g.z_level - z).abs() < tolerance;
            match groups.iter_mut().find(|g| near(g)) {
                Some(group) => group.faces.push(node.face_index),
                None => groups.push(ZLevelGroup {
                    z_level: z,
                    faces: vec![node.face_index],
                }),
            }
        }
        groups.sort_by(|a, b| a.z_level.total_cmp(&b.z_level));
        groups
    }
}
