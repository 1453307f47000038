use tracing::{debug, trace};

use crate::graph::AttributedAdjacencyGraph;
use crate::math::Aabb;

/// Walls needed before a pocket counts as enclosed.
const ENCLOSING_WALL_COUNT: usize = 3;

/// A recessed floor bounded by concave vertical walls.
#[derive(Debug, Clone, PartialEq)]
pub struct PocketFeature {
    /// Index of the upward-facing floor face.
    pub floor_face_index: usize,
    /// Indices of the wall faces, ascending; never empty.
    pub wall_face_indices: Vec<usize>,
    /// Z level of the floor.
    pub z_level: f64,
    /// Union of the floor and wall bounds.
    pub bounds: Aabb,
    /// Whether fewer than three walls bound the floor.
    pub is_open: bool,
}

impl PocketFeature {
    /// Height of the walls above the floor.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.bounds.max.z - self.z_level
    }
}

/// Detects pockets in an attributed adjacency graph.
///
/// A pocket is a planar upward-facing floor with at least one vertical
/// neighbor joined through a concave edge. Pockets are returned deepest first
/// (ascending floor Z); floors at equal Z keep face order.
#[derive(Debug, Clone, Default)]
pub struct DetectPockets;

impl DetectPockets {
    /// Creates a new `DetectPockets` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the detection.
    #[must_use]
    pub fn execute(&self, graph: &AttributedAdjacencyGraph) -> Vec<PocketFeature> {
        let mut pockets: Vec<PocketFeature> = graph
            .nodes()
            .iter()
            .filter(|n| n.is_upward && n.is_horizontal && n.is_planar)
            .filter_map(|floor| {
                let z_level = floor.z_level?;
                let walls: Vec<usize> = graph
                    .concave_neighbors(floor.face_index)
                    .into_iter()
                    .filter(|&w| graph.node(w).is_some_and(|n| n.is_vertical))
                    .collect();
                if walls.is_empty() {
                    trace!(floor = floor.face_index, "floor has no concave walls");
                    return None;
                }

                let bounds = walls
                    .iter()
                    .filter_map(|&w| graph.node(w))
                    .fold(floor.bounds, |acc, wall| acc.union(&wall.bounds));
                let is_open = walls.len() < ENCLOSING_WALL_COUNT;
                debug!(
                    floor = floor.face_index,
                    walls = walls.len(),
                    z = z_level,
                    is_open,
                    "pocket detected"
                );
                Some(PocketFeature {
                    floor_face_index: floor.face_index,
                    wall_face_indices: walls,
                    z_level,
                    bounds,
                    is_open,
                })
            })
            .collect();

        pockets.sort_by(|a, b| a.z_level.total_cmp(&b.z_level));
        pockets
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::EdgeConvexity;
    use crate::math::{Point3, Vector3};
    use crate::query::{FixtureFace, FixtureKernel};
    use approx::assert_relative_eq;

    fn slab(lo: (f64, f64, f64), hi: (f64, f64, f64)) -> Aabb {
        Aabb::new(Point3::new(lo.0, lo.1, lo.2), Point3::new(hi.0, hi.1, hi.2))
    }

    /// Adds a floor at `z` with `walls` concave vertical walls rising to `rim`.
    fn add_pocket(kernel: &mut FixtureKernel, z: f64, rim: f64, walls: usize) -> usize {
        let floor = kernel.add_face(FixtureFace::planar(
            Vector3::z(),
            slab((1.0, 1.0, z), (4.0, 4.0, z)),
        ));
        let normals = [Vector3::y(), -Vector3::x(), -Vector3::y(), Vector3::x()];
        for normal in normals.into_iter().take(walls) {
            let wall = kernel.add_face(FixtureFace::planar(
                normal,
                slab((1.0, 1.0, z), (4.0, 1.0, rim)),
            ));
            kernel.connect(floor, wall, EdgeConvexity::Concave);
        }
        floor
    }

    fn detect(kernel: &FixtureKernel) -> Vec<PocketFeature> {
        let graph = AttributedAdjacencyGraph::build(kernel, ()).unwrap();
        DetectPockets::new().execute(&graph)
    }

    #[test]
    fn enclosed_pocket() {
        let mut kernel = FixtureKernel::new();
        let floor = add_pocket(&mut kernel, 2.0, 5.0, 4);
        let pockets = detect(&kernel);

        assert_eq!(pockets.len(), 1);
        let pocket = &pockets[0];
        assert_eq!(pocket.floor_face_index, floor);
        assert_eq!(pocket.wall_face_indices, vec![1, 2, 3, 4]);
        assert!(!pocket.is_open);
        assert_relative_eq!(pocket.z_level, 2.0);
        assert_relative_eq!(pocket.bounds.max.z, 5.0);
        assert_relative_eq!(pocket.depth(), 3.0);
    }

    #[test]
    fn two_walls_make_an_open_pocket() {
        let mut kernel = FixtureKernel::new();
        add_pocket(&mut kernel, 0.0, 1.0, 2);
        let pockets = detect(&kernel);
        assert_eq!(pockets.len(), 1);
        assert!(pockets[0].is_open);
    }

    #[test]
    fn floor_without_walls_is_rejected() {
        let mut kernel = FixtureKernel::new();
        add_pocket(&mut kernel, 0.0, 1.0, 0);
        assert!(detect(&kernel).is_empty());
    }

    #[test]
    fn convex_and_sloped_neighbors_are_not_walls() {
        let mut kernel = FixtureKernel::new();
        let floor = add_pocket(&mut kernel, 0.0, 1.0, 1);
        let boss = kernel.add_face(FixtureFace::planar(
            Vector3::x(),
            slab((0.0, 0.0, 0.0), (0.0, 1.0, 1.0)),
        ));
        let ramp = kernel.add_face(FixtureFace::planar(
            Vector3::new(1.0, 0.0, 1.0),
            slab((0.0, 0.0, 0.0), (1.0, 1.0, 9.0)),
        ));
        kernel.connect(floor, boss, EdgeConvexity::Convex);
        kernel.connect(floor, ramp, EdgeConvexity::Concave);

        let pockets = detect(&kernel);
        assert_eq!(pockets[0].wall_face_indices, vec![1]);
        assert_relative_eq!(pockets[0].bounds.max.z, 1.0);
    }

    #[test]
    fn pockets_are_ordered_deepest_first() {
        let mut kernel = FixtureKernel::new();
        let high = add_pocket(&mut kernel, 6.0, 8.0, 4);
        let low = add_pocket(&mut kernel, -3.0, 8.0, 3);
        let mid = add_pocket(&mut kernel, 1.0, 8.0, 1);
        let order: Vec<usize> = detect(&kernel).iter().map(|p| p.floor_face_index).collect();
        assert_eq!(order, vec![low, mid, high]);
    }
}
