mod make_box;
mod make_drilled_block;
mod make_polyhedron;
mod make_prism;
mod shell_builder;

pub use make_box::MakeBox;
pub use make_drilled_block::MakeDrilledBlock;
pub use make_polyhedron::{MakePolyhedron, PolygonFace};
pub use make_prism::MakePrism;
