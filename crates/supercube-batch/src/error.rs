use supercube_mesh::MeshError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("source {source_index} is malformed: {error}")]
    InvalidSource {
        source_index: usize,
        #[source]
        error: MeshError,
    },
    #[error("vertex cap must be at least 3, got {0}")]
    InvalidCap(usize),
}
