use supercube_geom::{Aabb, Color, Vec2, Vec3, Vec4};

use crate::error::MeshError;
use crate::material::MaterialId;

/// Triangle list over the shared vertex streams, drawn with a single material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Submesh {
    pub material: MaterialId,
    pub indices: Vec<u32>,
}

impl Submesh {
    #[inline]
    pub fn new(material: MaterialId) -> Self {
        Self {
            material,
            indices: Vec::new(),
        }
    }
}

/// Vertex streams plus material-bound submeshes.
///
/// `positions`, `normals` and `uvs` always have one entry per vertex. `tangents`,
/// `colors` and `lightmap_uvs` are either empty (stream absent) or full length.
/// The builders always emit tangents and colors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub tangents: Vec<Vec4>,
    pub colors: Vec<Color>,
    pub lightmap_uvs: Vec<Vec2>,
    pub submeshes: Vec<Submesh>,
}

impl MeshBuffers {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.indices.len()).sum()
    }

    /// Materials in submesh order; always the same length as `submeshes`.
    pub fn materials(&self) -> Vec<MaterialId> {
        self.submeshes.iter().map(|s| s.material).collect()
    }

    /// Pre-reserve capacity for `n` more vertices on the streams every build fills.
    pub fn reserve_vertices(&mut self, n: usize) {
        self.positions.reserve(n);
        self.normals.reserve(n);
        self.uvs.reserve(n);
        self.tangents.reserve(n);
    }

    /// Removes submeshes without triangles, keeping material order for the rest.
    pub fn drop_empty_submeshes(&mut self) {
        self.submeshes.retain(|s| !s.indices.is_empty());
    }

    /// Tight bounds over all positions, or a zero box at the origin when empty.
    pub fn recalculate_bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied()).unwrap_or_default()
    }

    /// Checks stream lengths and index ranges.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertices = self.vertex_count();
        let required = [
            ("normals", self.normals.len()),
            ("uvs", self.uvs.len()),
        ];
        for (stream, len) in required {
            if len != vertices {
                return Err(MeshError::ArrayLengthMismatch {
                    stream,
                    len,
                    vertices,
                });
            }
        }
        let optional = [
            ("tangents", self.tangents.len()),
            ("colors", self.colors.len()),
            ("lightmap_uvs", self.lightmap_uvs.len()),
        ];
        for (stream, len) in optional {
            if len != 0 && len != vertices {
                return Err(MeshError::ArrayLengthMismatch {
                    stream,
                    len,
                    vertices,
                });
            }
        }
        for (submesh, s) in self.submeshes.iter().enumerate() {
            if s.indices.len() % 3 != 0 {
                return Err(MeshError::IndexCountNotTriangles {
                    submesh,
                    count: s.indices.len(),
                });
            }
            if let Some(&index) = s.indices.iter().find(|&&i| i as usize >= vertices) {
                return Err(MeshError::IndexOutOfRange {
                    submesh,
                    index,
                    vertices,
                });
            }
        }
        Ok(())
    }
}
