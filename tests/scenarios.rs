#![allow(clippy::unwrap_used)]

mod common;

use approx::assert_relative_eq;
use brep_aag::features::{DetectHoles, DetectPockets};
use brep_aag::math::{Aabb, Point3, Vector3};
use brep_aag::operations::creation::{MakeBox, MakeDrilledBlock};
use brep_aag::query::{FixtureFace, FixtureKernel};
use brep_aag::topology::TopologyStore;
use brep_aag::{
    recognize, AagError, AttributedAdjacencyGraph, BuildGraph, EdgeConvexity, GeometryQuery,
    GraphParams,
};

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

#[test]
fn unit_cube() {
    common::init_tracing();
    let mut store = TopologyStore::new();
    let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))
        .execute(&mut store)
        .unwrap();
    let graph = AttributedAdjacencyGraph::build(&store, solid).unwrap();

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 12);
    for edge in graph.edges() {
        assert_eq!(edge.convexity, EdgeConvexity::Convex);
        assert_eq!(edge.shared_edge_count, 1);
        assert!(edge.face1_index < edge.face2_index);
    }
    for face in 0..6 {
        assert_eq!(graph.neighbors(face).len(), 4);
    }
    assert!(DetectPockets::new().execute(&graph).is_empty());
    assert!(DetectHoles::new().execute(&graph).is_empty());
}

#[test]
fn rectangular_pocket() {
    common::init_tracing();
    let mut store = TopologyStore::new();
    let solid = common::pocketed_block(&mut store);
    let found = recognize(&store, solid, &GraphParams::default()).unwrap();

    assert_eq!(found.graph.node_count(), 11);
    assert_eq!(found.graph.edge_count(), 24);
    assert_eq!(found.pockets.len(), 1);
    let pocket = &found.pockets[0];
    assert_eq!(pocket.floor_face_index, 6);
    assert_eq!(pocket.wall_face_indices, vec![7, 8, 9, 10]);
    assert!(!pocket.is_open);
    assert_relative_eq!(pocket.z_level, 2.0);
    assert_relative_eq!(pocket.depth(), 3.0);
    assert_eq!(pocket.bounds.min, p(3.0, 3.0, 2.0));
    assert_eq!(pocket.bounds.max, p(7.0, 7.0, 5.0));
    assert!(found.holes.is_empty());

    // The stock top is convex to the pocket walls, so it never reads as a floor.
    assert_eq!(
        found.graph.convex_neighbors(1),
        vec![2, 3, 4, 5, 7, 8, 9, 10]
    );
    assert!(found.graph.concave_neighbors(1).is_empty());
}

#[test]
fn open_notch() {
    common::init_tracing();
    let mut store = TopologyStore::new();
    let solid = common::notched_block(&mut store);
    let found = recognize(&store, solid, &GraphParams::default()).unwrap();

    assert_eq!(found.graph.node_count(), 9);
    assert_eq!(found.pockets.len(), 1);
    let notch = &found.pockets[0];
    assert_eq!(notch.floor_face_index, 2);
    assert_eq!(notch.wall_face_indices, vec![3, 4]);
    assert!(notch.is_open);
    assert_eq!(found.graph.convex_neighbors(2), vec![6, 7]);
}

#[test]
fn plate_with_through_hole() {
    common::init_tracing();
    let plate = Aabb::new(p(0.0, 0.0, 0.0), p(20.0, 20.0, 4.0));
    let side = |x0: f64, y0: f64, x1: f64, y1: f64| Aabb::new(p(x0, y0, 0.0), p(x1, y1, 4.0));

    let mut kernel = FixtureKernel::new();
    let top = kernel.add_face(FixtureFace::planar(Vector3::z(), plate));
    let bottom = kernel.add_face(FixtureFace::planar(-Vector3::z(), plate));
    let walls = [
        (-Vector3::y(), side(0.0, 0.0, 20.0, 0.0)),
        (Vector3::x(), side(20.0, 0.0, 20.0, 20.0)),
        (Vector3::y(), side(0.0, 20.0, 20.0, 20.0)),
        (-Vector3::x(), side(0.0, 0.0, 0.0, 20.0)),
    ];
    let mut sides = Vec::new();
    for (normal, bounds) in walls {
        sides.push(kernel.add_face(FixtureFace::planar(normal, bounds)));
    }
    let bore = kernel.add_face(FixtureFace::curved(
        -Vector3::x(),
        Aabb::new(p(8.0, 8.0, 0.0), p(12.0, 12.0, 4.0)),
    ));
    for (i, &s) in sides.iter().enumerate() {
        kernel
            .connect(top, s, EdgeConvexity::Convex)
            .connect(bottom, s, EdgeConvexity::Convex)
            .connect(s, sides[(i + 1) % 4], EdgeConvexity::Convex);
    }
    kernel
        .connect(top, bore, EdgeConvexity::Concave)
        .connect(bottom, bore, EdgeConvexity::Concave);

    let graph = AttributedAdjacencyGraph::build(&kernel, ()).unwrap();
    assert_eq!(graph.edge_count(), 14);
    let holes = DetectHoles::new().execute(&graph);
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].face_index, bore);
    assert_relative_eq!(holes[0].depth, 4.0);
    assert_relative_eq!(holes[0].radius, 2.0);
}

#[test]
fn empty_solid() {
    common::init_tracing();
    let kernel = FixtureKernel::new();
    let graph = AttributedAdjacencyGraph::build(&kernel, ()).unwrap();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(DetectPockets::new().execute(&graph).is_empty());
    assert!(DetectHoles::new().execute(&graph).is_empty());
    assert!(graph.neighbors(0).is_empty());
}

#[test]
fn drilled_block_rims_classify_from_geometry() {
    common::init_tracing();
    let mut store = TopologyStore::new();
    let solid = MakeDrilledBlock::through(p(0.0, 0.0, 0.0), p(10.0, 10.0, 2.0), 1.5)
        .execute(&mut store)
        .unwrap();
    let found = recognize(&store, solid, &GraphParams::default()).unwrap();

    // Top, bottom, four sides, bore.
    assert_eq!(found.graph.node_count(), 7);
    let bore = 6;
    assert_eq!(found.graph.convex_neighbors(bore), vec![0, 1]);
    assert!(found.holes.is_empty());
    assert!(found.pockets.is_empty());
}

#[test]
fn countersunk_hole_cone_is_convex_to_its_neighbours() {
    common::init_tracing();
    let mut store = TopologyStore::new();
    let solid = MakeDrilledBlock::through(p(0.0, 0.0, 0.0), p(10.0, 10.0, 4.0), 1.0)
        .with_countersink(2.0)
        .execute(&mut store)
        .unwrap();
    let found = recognize(&store, solid, &GraphParams::default()).unwrap();

    // Top, bottom, four sides, bore, countersink.
    assert_eq!(found.graph.node_count(), 8);
    let (top, bore, countersink) = (0, 6, 7);
    assert_eq!(found.graph.neighbors(countersink).len(), 2);
    assert_eq!(found.graph.convex_neighbors(countersink), vec![top, bore]);

    let cone = found.graph.node(countersink).unwrap();
    assert!(!cone.is_planar && !cone.is_horizontal && !cone.is_vertical);
    assert!(cone.z_level.is_none());
    assert!((cone.bounds.min - p(3.0, 3.0, 3.0)).norm() < 1e-9);
    assert!((cone.bounds.max - p(7.0, 7.0, 4.0)).norm() < 1e-9);

    assert!(found.holes.is_empty());
    assert!(found.pockets.is_empty());
}

#[test]
fn blind_hole_floor_reads_as_open_pocket() {
    common::init_tracing();
    let mut store = TopologyStore::new();
    let solid = MakeDrilledBlock::blind(p(0.0, 0.0, 0.0), p(10.0, 10.0, 5.0), 2.0, 3.0)
        .execute(&mut store)
        .unwrap();
    let found = recognize(&store, solid, &GraphParams::default()).unwrap();

    let (bore, floor) = (6, 7);
    assert_eq!(found.graph.concave_neighbors(bore), vec![floor]);
    assert_eq!(found.pockets.len(), 1);
    let pocket = &found.pockets[0];
    assert_eq!(pocket.floor_face_index, floor);
    assert_eq!(pocket.wall_face_indices, vec![bore]);
    assert!(pocket.is_open);
    assert_relative_eq!(pocket.depth(), 3.0, epsilon = 1e-9);
    assert!(found.holes.is_empty());
}

#[test]
fn build_variants_agree() {
    common::init_tracing();
    let mut store = TopologyStore::new();
    let solid = common::pocketed_block(&mut store);

    let reference = BuildGraph::new(solid)
        .with_params(GraphParams::sequential())
        .execute(&store)
        .unwrap();
    for params in [
        GraphParams::default(),
        GraphParams::default().bounds_prefilter(1e-6),
        GraphParams::sequential().bounds_prefilter(1e-6),
    ] {
        let graph = BuildGraph::new(solid)
            .with_params(params)
            .execute(&store)
            .unwrap();
        assert_eq!(graph.edges(), reference.edges());
        assert_eq!(graph.nodes(), reference.nodes());
    }
}

#[test]
fn missing_face_fails_the_build() {
    common::init_tracing();
    let mut store = TopologyStore::new();
    let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))
        .execute(&mut store)
        .unwrap();
    let faces = store.faces(solid).unwrap();
    store.remove_face(faces[3]);

    let err = AttributedAdjacencyGraph::build(&store, solid).unwrap_err();
    assert!(matches!(err, AagError::Topology(_)));
}
