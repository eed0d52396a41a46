use supercube_geom::{Mat4, Vec2, Vec3, Vec4};

use crate::buffers::MeshBuffers;
use crate::constants::{DEFAULT_TANGENT, DEGENERATE_UV_EPSILON, MIN_SLICES};
use crate::uv::{UvSettings, raw_uv};

/// One rectangular face: a unit quad in the transform's local XY plane,
/// pushed `offset` along local -Z and mapped into object space by `transform`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceSpec {
    pub transform: Mat4,
    pub offset: f32,
    pub uv: UvSettings,
    /// `[u_start, u_end)` for WallSlide; ignored by the other modes.
    pub u_start: f32,
    pub u_end: f32,
    /// Vertex columns/rows; anything below 2 is raised to 2.
    pub slices_x: usize,
    pub slices_y: usize,
}

/// Where a face landed in the vertex streams.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FaceSpan {
    pub start: usize,
    pub slices_x: usize,
    pub slices_y: usize,
    /// The UV Jacobian was singular and the default tangent was used.
    pub degenerate_uv: bool,
}

impl FaceSpan {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.slices_x * self.slices_y
    }
}

/// Appends one face grid to `mesh` and its triangles to `mesh.submeshes[submesh]`.
///
/// Colors are left to the caller. Panics if `submesh` is out of range.
pub fn add_face(
    spec: &FaceSpec,
    object: &Mat4,
    mesh: &mut MeshBuffers,
    submesh: usize,
) -> FaceSpan {
    let sx = spec.slices_x.max(MIN_SLICES);
    let sy = spec.slices_y.max(MIN_SLICES);
    let start = mesh.vertex_count();
    let normal = spec
        .transform
        .transform_vector(Vec3::new(0.0, 0.0, -1.0))
        .normalized();

    mesh.reserve_vertices(sx * sy);
    let indices = &mut mesh.submeshes[submesh].indices;
    indices.reserve((sx - 1) * (sy - 1) * 6);

    for y in 0..sy {
        let percent_y = y as f32 / (sy - 1) as f32 - 0.5;
        for x in 0..sx {
            let percent_x = x as f32 / (sx - 1) as f32 - 0.5;
            let pos = spec
                .transform
                .transform_point(Vec3::new(percent_x, percent_y, -spec.offset));
            let raw = raw_uv(
                spec.uv.mode,
                object,
                pos,
                normal,
                (spec.u_start, spec.u_end),
                Vec2::new(percent_x, percent_y),
            );
            mesh.positions.push(pos);
            mesh.normals.push(normal);
            mesh.uvs.push(spec.uv.apply(raw));

            if x > 0 && y > 0 {
                let at = |cx: usize, cy: usize| (start + cx + cy * sx) as u32;
                // Alternate the cell diagonal in a checkerboard so shading has no directional seam bias.
                if (x + y) % 2 == 0 {
                    indices.extend_from_slice(&[
                        at(x, y),
                        at(x, y - 1),
                        at(x - 1, y - 1),
                        at(x - 1, y),
                        at(x, y),
                        at(x - 1, y - 1),
                    ]);
                } else {
                    indices.extend_from_slice(&[
                        at(x, y),
                        at(x, y - 1),
                        at(x - 1, y),
                        at(x - 1, y),
                        at(x, y - 1),
                        at(x - 1, y - 1),
                    ]);
                }
            }
        }
    }

    // One tangent for the whole face, from the first row/column UV steps scaled to
    // full-face spans so they pair with the full-face edge vectors.
    let dir1 = spec.transform.transform_vector(Vec3::new(1.0, 0.0, 0.0));
    let dir2 = spec.transform.transform_vector(Vec3::new(0.0, -1.0, 0.0));
    let uv1 = (mesh.uvs[start + 1] - mesh.uvs[start]) * (sx - 1) as f32;
    let uv2 = (mesh.uvs[start + sx] - mesh.uvs[start]) * (sy - 1) as f32;
    let solved = solve_tangent(normal, dir1, dir2, uv1, uv2);
    if solved.is_none() {
        log::debug!("degenerate face UVs (du={:?}, dv={:?}); using default tangent", uv1, uv2);
    }
    let tangent = solved.unwrap_or(DEFAULT_TANGENT);
    mesh.tangents.resize(start + sx * sy, tangent);

    FaceSpan {
        start,
        slices_x: sx,
        slices_y: sy,
        degenerate_uv: solved.is_none(),
    }
}

/// Tangent from two edge directions and their UV deltas, Gram-Schmidt'ed against
/// `normal`, with the bitangent handedness in `w`. `None` when the UV Jacobian is singular.
pub fn solve_tangent(normal: Vec3, dir1: Vec3, dir2: Vec3, uv1: Vec2, uv2: Vec2) -> Option<Vec4> {
    let det = uv1.x * uv2.y - uv2.x * uv1.y;
    // also rejects NaN
    if !(det.abs() > DEGENERATE_UV_EPSILON) {
        return None;
    }
    let r = 1.0 / det;
    let s_dir = (dir1 * uv2.y - dir2 * uv1.y) * r;
    let t_dir = (dir2 * uv1.x - dir1 * uv2.x) * r;

    let ortho = s_dir - normal * normal.dot(s_dir);
    if !(ortho.length() > DEGENERATE_UV_EPSILON) {
        return None;
    }
    let t = ortho.normalized();
    let w = if normal.cross(t).dot(t_dir) < 0.0 { -1.0 } else { 1.0 };
    Some(Vec4::new(t.x, t.y, t.z, w))
}
