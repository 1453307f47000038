use thiserror::Error;

/// Top-level error type for graph construction and feature recognition.
#[derive(Debug, Error)]
pub enum AagError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to topological lookups.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors raised by solid construction operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Hard failures reported by a geometry query backend.
///
/// These are the only kernel conditions that abort a graph build.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("solid is corrupt: {0}")]
    CorruptSolid(String),

    #[error("unknown face handle: {0}")]
    UnknownFace(String),
}

/// Errors raised while building the adjacency graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph build cancelled after {completed} of {total} rows")]
    Cancelled { completed: usize, total: usize },

    #[error("invalid graph parameters: {0}")]
    InvalidParams(String),
}

/// Convenience type alias for results using [`AagError`].
pub type Result<T> = std::result::Result<T, AagError>;
