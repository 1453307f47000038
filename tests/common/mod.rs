#![allow(dead_code)]

use brep_aag::math::Point3;
use brep_aag::operations::creation::{MakePolyhedron, PolygonFace};
use brep_aag::topology::{SolidId, TopologyStore};
use tracing_subscriber::EnvFilter;

/// Routes crate logs to the test harness; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn points(coords: &[(i32, i32, i32)]) -> Vec<Point3> {
    coords
        .iter()
        .map(|&(x, y, z)| Point3::new(x.into(), y.into(), z.into()))
        .collect()
}

fn face(coords: &[(i32, i32, i32)]) -> PolygonFace {
    PolygonFace::new(points(coords))
}

/// A 10 x 10 x 5 block with a 4 x 4 pocket milled 3 deep into its top.
///
/// Faces: 0 bottom, 1 top (with the pocket opening as a hole), 2..=5 sides,
/// 6 pocket floor, 7..=10 pocket walls.
pub fn pocketed_block(store: &mut TopologyStore) -> SolidId {
    let opening = points(&[(3, 3, 5), (3, 7, 5), (7, 7, 5), (7, 3, 5)]);
    let top = face(&[(0, 0, 5), (10, 0, 5), (10, 10, 5), (0, 10, 5)]).with_hole(opening);
    let faces = vec![
        face(&[(0, 0, 0), (0, 10, 0), (10, 10, 0), (10, 0, 0)]),
        top,
        face(&[(0, 0, 0), (10, 0, 0), (10, 0, 5), (0, 0, 5)]),
        face(&[(10, 0, 0), (10, 10, 0), (10, 10, 5), (10, 0, 5)]),
        face(&[(10, 10, 0), (0, 10, 0), (0, 10, 5), (10, 10, 5)]),
        face(&[(0, 10, 0), (0, 0, 0), (0, 0, 5), (0, 10, 5)]),
        face(&[(3, 3, 2), (7, 3, 2), (7, 7, 2), (3, 7, 2)]),
        face(&[(7, 3, 2), (3, 3, 2), (3, 3, 5), (7, 3, 5)]),
        face(&[(7, 7, 2), (7, 3, 2), (7, 3, 5), (7, 7, 5)]),
        face(&[(3, 7, 2), (7, 7, 2), (7, 7, 5), (3, 7, 5)]),
        face(&[(3, 3, 2), (3, 7, 2), (3, 7, 5), (3, 3, 5)]),
    ];
    MakePolyhedron::new(faces)
        .execute(store)
        .unwrap_or_else(|e| panic!("pocketed block: {e}"))
}

/// A 10 x 10 x 5 block with its `x, y > 6` corner notched down to `z = 2`.
///
/// Faces: 0 bottom, 1 L-shaped top, 2 notch floor, 3 and 4 notch walls,
/// 5..=8 sides.
pub fn notched_block(store: &mut TopologyStore) -> SolidId {
    let faces = vec![
        face(&[(0, 0, 0), (0, 10, 0), (10, 10, 0), (10, 0, 0)]),
        face(&[
            (0, 0, 5),
            (10, 0, 5),
            (10, 6, 5),
            (6, 6, 5),
            (6, 10, 5),
            (0, 10, 5),
        ]),
        face(&[(6, 6, 2), (10, 6, 2), (10, 10, 2), (6, 10, 2)]),
        face(&[(10, 6, 2), (6, 6, 2), (6, 6, 5), (10, 6, 5)]),
        face(&[(6, 6, 2), (6, 10, 2), (6, 10, 5), (6, 6, 5)]),
        face(&[(0, 0, 0), (10, 0, 0), (10, 0, 5), (0, 0, 5)]),
        face(&[
            (10, 0, 0),
            (10, 10, 0),
            (10, 10, 2),
            (10, 6, 2),
            (10, 6, 5),
            (10, 0, 5),
        ]),
        face(&[
            (10, 10, 0),
            (0, 10, 0),
            (0, 10, 5),
            (6, 10, 5),
            (6, 10, 2),
            (10, 10, 2),
        ]),
        face(&[(0, 10, 0), (0, 0, 0), (0, 0, 5), (0, 10, 5)]),
    ];
    MakePolyhedron::new(faces)
        .execute(store)
        .unwrap_or_else(|e| panic!("notched block: {e}"))
}
