//! Six-face box builder with per-face visibility, material overrides and slicing.

use supercube_geom::{Mat4, Vec3};

use crate::buffers::{MeshBuffers, Submesh};
use crate::built::{BuiltMesh, finish, push_face_colors};
use crate::constants::{CUBE_FACE_OFFSET, MAX_BUILD_VERTS};
use crate::error::BuildError;
use crate::face::{Face, FaceRole, FaceSettings};
use crate::face_builder::{FaceSpec, add_face};
use crate::material::{Material, MaterialId};
use crate::pivot::Pivot;
use crate::slicing::Slicing;
use crate::uv::{UvMode, UvSettings};

/// Everything that shapes a box mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeSpec {
    /// Full edge lengths; the box is centered on the object origin.
    pub extents: Vec3,
    /// Used by faces without an override; its texture drives the WallSlide aspect ratio.
    pub default_material: Material,
    /// Indexed by [`Face::index`].
    pub faces: [FaceSettings; 6],
    pub wall_uv: UvSettings,
    pub top_bottom_uv: UvSettings,
    pub slicing: Slicing,
}

impl CubeSpec {
    pub fn new(extents: Vec3, default_material: Material) -> Self {
        Self {
            extents,
            default_material,
            faces: [FaceSettings::default(); 6],
            wall_uv: UvSettings::new(UvMode::WorldCoordinates),
            top_bottom_uv: UvSettings::new(UvMode::WorldCoordinates),
            slicing: Slicing::default(),
        }
    }

    #[inline]
    pub fn face(&self, face: Face) -> &FaceSettings {
        &self.faces[face.index()]
    }

    #[inline]
    pub fn face_mut(&mut self, face: Face) -> &mut FaceSettings {
        &mut self.faces[face.index()]
    }

    /// Hides every face whose side bit is set in `mask`.
    pub fn hide(&mut self, mask: Pivot) {
        for face in Face::ALL {
            if mask.contains(Pivot::of_face(face)) {
                self.face_mut(face).visible = false;
            }
        }
    }

    /// Vertex columns/rows per axis.
    pub fn slice_counts(&self) -> (usize, usize, usize) {
        (
            self.slicing.count(self.extents.x),
            self.slicing.count(self.extents.y),
            self.slicing.count(self.extents.z),
        )
    }

    /// Vertices a build would produce, summed over visible faces. Saturates
    /// rather than overflowing.
    pub fn vertex_count(&self) -> usize {
        let slices = self.slice_counts();
        Face::ALL
            .iter()
            .filter(|&&f| self.face(f).visible)
            .map(|&f| {
                let layout = face_layout(f, self.extents, slices);
                layout.slices_x.saturating_mul(layout.slices_y)
            })
            .fold(0, usize::saturating_add)
    }

    /// Default material first, then each distinct override in face order.
    pub fn material_list(&self) -> Vec<MaterialId> {
        let mut list = vec![self.default_material.id];
        for face in OVERRIDE_ORDER {
            let id = self.material_for(face);
            if !list.contains(&id) {
                list.push(id);
            }
        }
        list
    }

    #[inline]
    pub fn material_for(&self, face: Face) -> MaterialId {
        self.face(face).material.unwrap_or(self.default_material.id)
    }

    /// `[u_start, u_end)` of each wall in [`Face::WALLS`] order. Each wall spans
    /// `width * aspect / height`, so the ranges chain edge to edge.
    pub fn wall_u_ranges(&self) -> [(f32, f32); 4] {
        let ratio = self.default_material.aspect_ratio();
        let mut u = 0.0f32;
        Face::WALLS.map(|face| {
            let width = match face {
                Face::NegZ | Face::PosZ => self.extents.x,
                _ => self.extents.z,
            };
            let start = u;
            u += width * ratio / self.extents.y;
            (start, u)
        })
    }

    fn validate(&self) -> Result<(), BuildError> {
        let e = self.extents;
        if !(e.x > 0.0 && e.y > 0.0 && e.z > 0.0 && e.x.is_finite() && e.y.is_finite() && e.z.is_finite()) {
            return Err(BuildError::InvalidExtents {
                x: e.x,
                y: e.y,
                z: e.z,
            });
        }
        self.slicing.validate()
    }
}

// Order in which override materials claim submesh slots.
const OVERRIDE_ORDER: [Face; 6] = [
    Face::NegZ,
    Face::PosZ,
    Face::NegX,
    Face::PosX,
    Face::PosY,
    Face::NegY,
];

// Order faces are emitted into the vertex streams.
const BUILD_ORDER: [Face; 6] = [
    Face::NegZ,
    Face::NegX,
    Face::PosZ,
    Face::PosX,
    Face::PosY,
    Face::NegY,
];

struct FaceLayout {
    euler: Vec3,
    scale: Vec3,
    slices_x: usize,
    slices_y: usize,
}

/// Rotation and scale that carry the unit face quad onto `face`.
fn face_layout(face: Face, e: Vec3, (sx, sy, sz): (usize, usize, usize)) -> FaceLayout {
    let (euler, scale, slices_x, slices_y) = match face {
        Face::NegZ => (Vec3::new(0.0, 0.0, 0.0), Vec3::new(e.x, e.y, e.z), sx, sy),
        Face::NegX => (Vec3::new(0.0, 90.0, 0.0), Vec3::new(e.z, e.y, e.x), sz, sy),
        Face::PosZ => (Vec3::new(0.0, 180.0, 0.0), Vec3::new(e.x, e.y, e.z), sx, sy),
        Face::PosX => (Vec3::new(0.0, 270.0, 0.0), Vec3::new(e.z, e.y, e.x), sz, sy),
        Face::PosY => (Vec3::new(90.0, 0.0, 0.0), Vec3::new(e.x, e.z, e.y), sx, sz),
        Face::NegY => (Vec3::new(270.0, 0.0, 0.0), Vec3::new(e.x, e.z, e.y), sx, sz),
    };
    FaceLayout {
        euler,
        scale,
        slices_x,
        slices_y,
    }
}

/// Builds a box mesh. `object` is the object-to-world transform, only read by
/// world-coordinate UVs; vertices stay in object space.
///
/// `prior` is the previous build of the same object, if any: faces it had colors
/// for are resampled onto the new slicing.
pub fn build_cube(
    spec: &CubeSpec,
    object: &Mat4,
    prior: Option<&BuiltMesh>,
) -> Result<BuiltMesh, BuildError> {
    spec.validate()?;
    let count = spec.vertex_count();
    if count >= MAX_BUILD_VERTS {
        return Err(BuildError::VertexLimitExceeded {
            count,
            limit: MAX_BUILD_VERTS,
        });
    }

    let materials = spec.material_list();
    let mut mesh = MeshBuffers {
        submeshes: materials.iter().map(|&m| Submesh::new(m)).collect(),
        ..MeshBuffers::default()
    };
    mesh.reserve_vertices(count);
    mesh.colors.reserve(count);

    let slices = spec.slice_counts();
    let wall_ranges = spec.wall_u_ranges();
    let caps_u_start = wall_ranges[3].1;
    let mut faces = Vec::with_capacity(6);

    for face in BUILD_ORDER {
        if !spec.face(face).visible {
            continue;
        }
        let layout = face_layout(face, spec.extents, slices);
        let (uv, (u_start, u_end)) = match face.role() {
            FaceRole::Wall => {
                let slot = Face::WALLS.iter().position(|&w| w == face).unwrap_or(0);
                (spec.wall_uv, wall_ranges[slot])
            }
            FaceRole::Cap => (spec.top_bottom_uv, (caps_u_start, caps_u_start + spec.extents.x)),
        };
        let face_spec = FaceSpec {
            transform: Mat4::from_trs(Vec3::ZERO, layout.euler, layout.scale),
            offset: CUBE_FACE_OFFSET,
            uv,
            u_start,
            u_end,
            slices_x: layout.slices_x,
            slices_y: layout.slices_y,
        };
        let material = spec.material_for(face);
        let submesh = materials.iter().position(|&m| m == material).unwrap_or(0);
        let span = add_face(&face_spec, object, &mut mesh, submesh);
        push_face_colors(&mut mesh.colors, prior, face, &span);
        faces.push((face, span));
    }

    Ok(finish(mesh, faces, spec.extents))
}

/// Rebuilds `target` in place. On error `target` is left exactly as it was.
pub fn rebuild_cube(spec: &CubeSpec, object: &Mat4, target: &mut BuiltMesh) -> Result<(), BuildError> {
    match build_cube(spec, object, Some(target)) {
        Ok(built) => {
            *target = built;
            Ok(())
        }
        Err(err) => {
            log::warn!("cube rebuild skipped: {err}");
            Err(err)
        }
    }
}
