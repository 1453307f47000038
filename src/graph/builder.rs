use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{GraphError, Result};
use crate::query::GeometryQuery;

use super::model::{AttributedAdjacencyGraph, EdgeConvexity, FaceAttributes};
use super::params::GraphParams;

/// Builds the attributed adjacency graph of a solid.
///
/// Every face becomes a node carrying its cached orientation attributes, and
/// every unordered face pair the kernel reports adjacent becomes an edge. The
/// pair scan is quadratic in face count and is split into one row per face;
/// rows run on the rayon pool when [`GraphParams::parallel`] is set and are
/// concatenated in row order, so the result does not depend on scheduling.
pub struct BuildGraph<'a, S> {
    solid: S,
    params: GraphParams,
    cancel: Option<&'a AtomicBool>,
}

/// Adjacency found for one face pair during the scan.
struct PairAdjacency {
    face1: usize,
    face2: usize,
    convexity: EdgeConvexity,
    shared_edge_count: usize,
}

impl<'a, S: Copy + Send + Sync> BuildGraph<'a, S> {
    /// Creates a new `BuildGraph` operation with default parameters.
    #[must_use]
    pub fn new(solid: S) -> Self {
        Self {
            solid,
            params: GraphParams::default(),
            cancel: None,
        }
    }

    /// Replaces the build parameters.
    #[must_use]
    pub fn with_params(mut self, params: GraphParams) -> Self {
        self.params = params;
        self
    }

    /// Registers a flag polled once per row of the pair scan.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Executes the build against `query`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParams`] for unusable parameters,
    /// [`GraphError::Cancelled`] if the cancel flag is raised mid-scan, or the
    /// kernel's own error if any query fails.
    pub fn execute<Q>(&self, query: &Q) -> Result<AttributedAdjacencyGraph>
    where
        Q: GeometryQuery<Solid = S>,
    {
        self.params.validate()?;

        let faces = query.faces(self.solid)?;
        let face_count = faces.len();
        info!(
            faces = face_count,
            pairs = face_count * face_count.saturating_sub(1) / 2,
            parallel = self.params.parallel,
            "building adjacency graph"
        );

        let nodes = run_indexed(self.params.parallel, face_count, |index| {
            face_attributes(query, faces[index], index, self.params.angle_tolerance)
        })?;

        let completed = AtomicUsize::new(0);
        let rows = run_indexed(self.params.parallel, face_count, |row| {
            if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(GraphError::Cancelled {
                    completed: completed.load(Ordering::Relaxed),
                    total: face_count,
                }
                .into());
            }
            let found = self.scan_row(query, &faces, &nodes, row)?;
            completed.fetch_add(1, Ordering::Relaxed);
            Ok(found)
        })?;

        let mut graph = AttributedAdjacencyGraph::with_nodes(nodes);
        for pair in rows.into_iter().flatten() {
            graph.insert_edge(
                pair.face1,
                pair.face2,
                pair.convexity,
                pair.shared_edge_count,
            );
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "adjacency graph built"
        );
        Ok(graph)
    }

    /// Tests face `row` against every later face.
    fn scan_row<Q>(
        &self,
        query: &Q,
        faces: &[Q::Face],
        nodes: &[FaceAttributes],
        row: usize,
    ) -> Result<Vec<PairAdjacency>>
    where
        Q: GeometryQuery<Solid = S>,
    {
        let cap = self.params.max_shared_edges;
        let margin = self.params.prefilter_margin;
        let row_bounds = nodes[row].bounds.expanded(margin);
        let mut found = Vec::new();

        for col in row + 1..faces.len() {
            if self.params.bounds_prefilter
                && !row_bounds.overlaps(&nodes[col].bounds.expanded(margin))
            {
                continue;
            }
            let (face1, face2) = (faces[row], faces[col]);
            if !query.are_adjacent(self.solid, face1, face2)? {
                continue;
            }

            let shared = query.shared_edges(self.solid, face1, face2, cap)?;
            if shared.len() >= cap {
                warn!(
                    face1 = row,
                    face2 = col,
                    cap,
                    "shared edge list reached the cap"
                );
            }
            let convexity = match shared.first() {
                Some(&edge) => query.edge_convexity(self.solid, edge, face1, face2)?,
                None => {
                    debug!(
                        face1 = row,
                        face2 = col,
                        "adjacent faces report no shared edges"
                    );
                    EdgeConvexity::Smooth
                }
            };

            found.push(PairAdjacency {
                face1: row,
                face2: col,
                convexity,
                shared_edge_count: shared.len().clamp(1, cap),
            });
        }
        Ok(found)
    }
}

impl AttributedAdjacencyGraph {
    /// Builds the graph of `solid` with default parameters.
    ///
    /// # Errors
    ///
    /// Returns the kernel's error if any query fails.
    pub fn build<Q: GeometryQuery>(query: &Q, solid: Q::Solid) -> Result<Self> {
        BuildGraph::new(solid).execute(query)
    }
}

/// Maps `0..count` through `f`, on the rayon pool when `parallel` is set.
///
/// Output order is index order either way; the first error wins.
fn run_indexed<T, F>(parallel: bool, count: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Send + Sync,
{
    if parallel {
        (0..count).into_par_iter().map(f).collect()
    } else {
        (0..count).map(f).collect()
    }
}

fn face_attributes<Q: GeometryQuery>(
    query: &Q,
    face: Q::Face,
    face_index: usize,
    angle_tolerance: f64,
) -> Result<FaceAttributes> {
    let normal = query.normal(face)?;
    let is_planar = query.is_planar(face)?;
    let is_horizontal = query.is_horizontal(face, angle_tolerance)?;
    let z_level = if is_planar && is_horizontal {
        query.z_level(face, angle_tolerance)?
    } else {
        None
    };
    if normal.is_none() {
        debug!(face = face_index, "face normal is undefined");
    }

    Ok(FaceAttributes {
        face_index,
        normal,
        is_planar,
        is_horizontal,
        is_upward: query.is_upward_facing(face, angle_tolerance)?,
        is_downward: query.is_downward_facing(face, angle_tolerance)?,
        is_vertical: query.is_vertical(face, angle_tolerance)?,
        z_level,
        bounds: query.bounds(face)?,
    })
}
