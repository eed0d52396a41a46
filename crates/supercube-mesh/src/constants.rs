//! Shared constants for supercube-mesh. Centralizes common magic numbers.

use supercube_geom::Vec4;

/// Builders refuse to emit this many vertices or more (16-bit index headroom).
pub const MAX_BUILD_VERTS: usize = 65_000;

/// Smallest grid a face can be sliced into: 2x2 vertices, one quad.
pub const MIN_SLICES: usize = 2;

/// Substituted when the UV Jacobian of a face cannot be inverted.
pub const DEFAULT_TANGENT: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

// Below this the UV Jacobian determinant counts as singular
pub(crate) const DEGENERATE_UV_EPSILON: f32 = 1e-8;

// Cube faces sit half an extent away from the center
pub(crate) const CUBE_FACE_OFFSET: f32 = 0.5;
