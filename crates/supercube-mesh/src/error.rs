use thiserror::Error;

/// Reasons a cube or plane rebuild is refused. The previous mesh is never touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error(
        "mesh would have {count} vertices (limit {limit}); increase the slice distance or hide unnecessary faces"
    )]
    VertexLimitExceeded { count: usize, limit: usize },
    #[error("extents must be positive and finite, got ({x}, {y}, {z})")]
    InvalidExtents { x: f32, y: f32, z: f32 },
    #[error("slice distance must be positive and finite, got {0}")]
    InvalidSliceDistance(f32),
}

/// Violations of the [`MeshBuffers`](crate::MeshBuffers) shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("{stream} has {len} entries but the mesh has {vertices} vertices")]
    ArrayLengthMismatch {
        stream: &'static str,
        len: usize,
        vertices: usize,
    },
    #[error("submesh {submesh} references vertex {index} of {vertices}")]
    IndexOutOfRange {
        submesh: usize,
        index: u32,
        vertices: usize,
    },
    #[error("submesh {submesh} has {count} indices, not a multiple of 3")]
    IndexCountNotTriangles { submesh: usize, count: usize },
}
