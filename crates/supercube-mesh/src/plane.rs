use supercube_geom::{Mat4, Vec2, Vec3};

use crate::buffers::{MeshBuffers, Submesh};
use crate::built::{BuiltMesh, finish, push_face_colors};
use crate::constants::MAX_BUILD_VERTS;
use crate::error::BuildError;
use crate::face::Face;
use crate::face_builder::{FaceSpec, add_face};
use crate::material::Material;
use crate::slicing::Slicing;
use crate::uv::{UvMode, UvSettings};

/// A single upward-facing (+Y) quad grid on the XZ plane.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneSpec {
    /// X and Z edge lengths; Y is ignored.
    pub extents: Vec3,
    pub material: Material,
    pub uv: UvSettings,
    /// Applies to X and Z only.
    pub slicing: Slicing,
}

/// Axis-aligned rectangle; `y` grows toward -Z when laid on the XZ plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x_min: f32,
    pub y_min: f32,
    pub width: f32,
    pub height: f32,
}

impl PlaneSpec {
    pub fn new(extents: Vec3, material: Material) -> Self {
        Self {
            extents,
            material,
            uv: UvSettings::new(UvMode::Unit),
            slicing: Slicing::default(),
        }
    }

    /// Spec and object position for a plane covering `rect` on the XZ plane at Y = 0.
    pub fn from_rect_xz(rect: Rect, material: Material) -> (PlaneSpec, Vec3) {
        let center = Vec3::new(
            rect.x_min + rect.width / 2.0,
            0.0,
            rect.y_min - rect.height / 2.0,
        );
        (
            PlaneSpec::new(Vec3::new(rect.width, 0.0, rect.height), material),
            center,
        )
    }

    /// Spec, object position and Euler rotation for a plane covering `rect` on
    /// the XY plane at Z = 0, facing -Z.
    pub fn from_rect_xy(rect: Rect, material: Material) -> (PlaneSpec, Vec3, Vec3) {
        let center = Vec3::new(
            rect.x_min + rect.width / 2.0,
            rect.y_min - rect.height / 2.0,
            0.0,
        );
        (
            PlaneSpec::new(Vec3::new(rect.width, 0.0, rect.height), material),
            center,
            Vec3::new(-90.0, 0.0, 0.0),
        )
    }

    pub fn slice_counts(&self) -> (usize, usize) {
        (
            self.slicing.count(self.extents.x),
            self.slicing.count(self.extents.z),
        )
    }

    pub fn vertex_count(&self) -> usize {
        let (sx, sz) = self.slice_counts();
        sx.saturating_mul(sz)
    }

    /// WallSlide span along X, keeping texels square over the Z extent.
    pub fn u_span(&self) -> f32 {
        self.extents.x * self.material.aspect_ratio() / self.extents.z
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.extents.x, self.extents.z)
    }

    fn validate(&self) -> Result<(), BuildError> {
        let e = self.extents;
        if !(e.x > 0.0 && e.z > 0.0 && e.x.is_finite() && e.z.is_finite()) {
            return Err(BuildError::InvalidExtents {
                x: e.x,
                y: e.y,
                z: e.z,
            });
        }
        self.slicing.validate()
    }
}

/// Builds a plane mesh with exactly one submesh. See [`build_cube`](crate::build_cube)
/// for the roles of `object` and `prior`.
pub fn build_plane(
    spec: &PlaneSpec,
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

    let (sx, sz) = spec.slice_counts();
    let face_spec = FaceSpec {
        transform: Mat4::from_trs(
            Vec3::ZERO,
            Vec3::new(90.0, 0.0, 0.0),
            Vec3::new(spec.extents.x, spec.extents.z, 1.0),
        ),
        offset: 0.0,
        uv: spec.uv,
        u_start: 0.0,
        u_end: spec.u_span(),
        slices_x: sx,
        slices_y: sz,
    };

    let mut mesh = MeshBuffers {
        submeshes: vec![Submesh::new(spec.material.id)],
        ..MeshBuffers::default()
    };
    let span = add_face(&face_spec, object, &mut mesh, 0);
    push_face_colors(&mut mesh.colors, prior, Face::PosY, &span);

    let collider = Vec3::new(spec.extents.x, 0.0, spec.extents.z);
    Ok(finish(mesh, vec![(Face::PosY, span)], collider))
}

/// Rebuilds `target` in place. On error `target` is left exactly as it was.
pub fn rebuild_plane(spec: &PlaneSpec, object: &Mat4, target: &mut BuiltMesh) -> Result<(), BuildError> {
    match build_plane(spec, object, Some(target)) {
        Ok(built) => {
            *target = built;
            Ok(())
        }
        Err(err) => {
            log::warn!("plane rebuild skipped: {err}");
            Err(err)
        }
    }
}
