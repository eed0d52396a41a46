use supercube_geom::{Aabb, Color, Vec3};

use crate::buffers::MeshBuffers;
use crate::colors::{ColorGrid, resample_colors};
use crate::face::Face;
use crate::face_builder::FaceSpan;

/// Axis-aligned collision box in object space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxProxy {
    pub center: Vec3,
    pub size: Vec3,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuildWarning {
    /// The face's UVs collapse along an axis; it carries the default tangent.
    DegenerateUv { face: Face },
}

/// Result of a cube or plane build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuiltMesh {
    pub mesh: MeshBuffers,
    pub bounds: Aabb,
    pub collider: BoxProxy,
    /// Face layout in vertex order; feeds color resampling of the next rebuild.
    pub faces: Vec<(Face, FaceSpan)>,
    pub warnings: Vec<BuildWarning>,
}

impl BuiltMesh {
    pub fn span(&self, face: Face) -> Option<&FaceSpan> {
        self.faces.iter().find(|(f, _)| *f == face).map(|(_, s)| s)
    }

    /// The colors this mesh holds for `face`, if it has any.
    pub fn color_grid(&self, face: Face) -> Option<ColorGrid<'_>> {
        if self.mesh.colors.is_empty() {
            return None;
        }
        let span = self.span(face)?;
        Some(ColorGrid {
            colors: &self.mesh.colors,
            start: span.start,
            width: span.slices_x,
            height: span.slices_y,
        })
    }
}

/// Appends colors for a freshly added face: resampled from `prior` when it
/// had colors for the same face, white otherwise.
pub(crate) fn push_face_colors(
    colors: &mut Vec<Color>,
    prior: Option<&BuiltMesh>,
    face: Face,
    span: &FaceSpan,
) {
    match prior.and_then(|p| p.color_grid(face)) {
        Some(grid) => resample_colors(colors, &grid, span.slices_x, span.slices_y),
        None => colors.extend(std::iter::repeat_n(Color::WHITE, span.vertex_count())),
    }
}

/// Bounds, collider, and warnings shared by the cube and plane builders.
pub(crate) fn finish(
    mut mesh: MeshBuffers,
    faces: Vec<(Face, FaceSpan)>,
    collider_size: Vec3,
) -> BuiltMesh {
    mesh.drop_empty_submeshes();
    let warnings = faces
        .iter()
        .filter(|(_, s)| s.degenerate_uv)
        .map(|&(face, _)| BuildWarning::DegenerateUv { face })
        .collect();
    BuiltMesh {
        bounds: mesh.recalculate_bounds(),
        collider: BoxProxy {
            center: Vec3::ZERO,
            size: collider_size,
        },
        mesh,
        faces,
        warnings,
    }
}
