use supercube_geom::{Mat4, Vec4};
use supercube_mesh::{MaterialId, MeshBuffers};

/// Output meshes never reach this many vertices (16-bit index headroom).
pub const MAX_VERTS: usize = 65_534;

/// Baked lightmap a renderer samples. Sources sharing one can be merged.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LightmapId(pub i32);

impl LightmapId {
    pub const NONE: LightmapId = LightmapId(-1);
}

impl Default for LightmapId {
    fn default() -> Self {
        LightmapId::NONE
    }
}

/// One renderer's worth of input to [`combine`](crate::combine).
#[derive(Clone, Debug)]
pub struct BatchSource<'a> {
    pub mesh: &'a MeshBuffers,
    /// Material per submesh. Missing or `None` entries resolve to
    /// [`BatchConfig::default_material`].
    pub materials: Vec<Option<MaterialId>>,
    /// Object-to-world transform applied to positions, normals and tangents.
    pub transform: Mat4,
    pub lightmap: LightmapId,
    /// `(scale.x, scale.y, offset.x, offset.y)` applied to lightmap UVs.
    pub lightmap_scale_offset: Vec4,
    pub is_static: bool,
    /// Built by the cube/plane builders rather than imported.
    pub procedural: bool,
    pub layer: i32,
}

impl<'a> BatchSource<'a> {
    /// A non-static source taking its materials from `mesh`'s submeshes.
    pub fn new(mesh: &'a MeshBuffers, transform: Mat4) -> Self {
        Self {
            mesh,
            materials: mesh.submeshes.iter().map(|s| Some(s.material)).collect(),
            transform,
            lightmap: LightmapId::NONE,
            lightmap_scale_offset: IDENTITY_SCALE_OFFSET,
            is_static: false,
            procedural: false,
            layer: 0,
        }
    }

    pub fn with_lightmap(mut self, lightmap: LightmapId, scale_offset: Vec4) -> Self {
        self.lightmap = lightmap;
        self.lightmap_scale_offset = scale_offset;
        self
    }

    #[inline]
    pub(crate) fn material(&self, submesh: usize) -> Option<MaterialId> {
        self.materials.get(submesh).copied().flatten()
    }
}

const IDENTITY_SCALE_OFFSET: Vec4 = Vec4::new(1.0, 1.0, 0.0, 0.0);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BatchConfig {
    pub max_verts: usize,
    /// Stands in for unresolved submesh materials.
    pub default_material: MaterialId,
    /// Log the pass summary at info instead of debug.
    pub log_time_cost: bool,
    pub only_static: bool,
    pub only_procedural: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_verts: MAX_VERTS,
            default_material: MaterialId::default(),
            log_time_cost: false,
            only_static: false,
            only_procedural: false,
        }
    }
}

impl BatchConfig {
    /// Whether the source filters let `source` through.
    pub fn accepts(&self, source: &BatchSource<'_>) -> bool {
        !(self.only_static && !source.is_static) && !(self.only_procedural && !source.procedural)
    }
}
