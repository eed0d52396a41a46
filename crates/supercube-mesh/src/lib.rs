//! Procedural box and plane meshes: face grids, UV modes, tangents, submeshes.
#![forbid(unsafe_code)]

mod buffers;
mod built;
mod colors;
pub mod constants;
mod cube;
mod error;
mod face;
mod face_builder;
mod material;
mod pivot;
mod plane;
mod slicing;
mod uv;

pub use buffers::{MeshBuffers, Submesh};
pub use built::{BoxProxy, BuildWarning, BuiltMesh};
pub use colors::{ColorGrid, resample_colors};
pub use cube::{CubeSpec, build_cube, rebuild_cube};
pub use error::{BuildError, MeshError};
pub use face::{Face, FaceRole, FaceSettings};
pub use face_builder::{FaceSpan, FaceSpec, add_face, solve_tangent};
pub use material::{Material, MaterialId, TextureSize};
pub use pivot::{Pivot, cube_center_from_pivot, plane_center_from_pivot};
pub use plane::{PlaneSpec, Rect, build_plane, rebuild_plane};
pub use slicing::Slicing;
pub use uv::{UvMode, UvSettings, planar_uv};
