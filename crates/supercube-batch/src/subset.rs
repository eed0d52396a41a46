use hashbrown::HashMap;
use supercube_geom::{Color, Vec2, Vec3, Vec4};
use supercube_mesh::{MaterialId, MeshBuffers, Submesh};

use crate::source::{BatchSource, LightmapId};

pub(crate) const FILL_COLOR: Color = Color::WHITE;
pub(crate) const FILL_LIGHTMAP_UV: Vec2 = Vec2::ZERO;
pub(crate) const FILL_TANGENT: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Vertices and triangles sharing one `(material, lightmap)` key, in world space.
/// Optional streams are empty until some contributor has them.
#[derive(Clone, Debug, Default)]
pub(crate) struct Subset {
    pub material: MaterialId,
    pub lightmap: LightmapId,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub tangents: Vec<Vec4>,
    pub colors: Vec<Color>,
    pub lightmap_uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Subset {
    #[inline]
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// Extracts the vertices `submesh` references, deduplicated by their source
    /// index, transformed into world space and re-indexed from zero.
    pub fn gather(source: &BatchSource<'_>, submesh: &Submesh, material: MaterialId) -> Subset {
        let mesh: &MeshBuffers = source.mesh;
        let m = &source.transform;
        let so = source.lightmap_scale_offset;
        let has_tangents = !mesh.tangents.is_empty();
        let has_colors = !mesh.colors.is_empty();
        let has_lightmap = !mesh.lightmap_uvs.is_empty();

        let mut out = Subset {
            material,
            lightmap: source.lightmap,
            indices: Vec::with_capacity(submesh.indices.len()),
            ..Subset::default()
        };
        let mut remap: HashMap<u32, u32> = HashMap::with_capacity(submesh.indices.len());

        for &id in &submesh.indices {
            let next = out.positions.len() as u32;
            let local = *remap.entry(id).or_insert(next);
            if local == next {
                let i = id as usize;
                out.positions.push(m.transform_point(mesh.positions[i]));
                out.normals.push(m.transform_vector(mesh.normals[i]));
                out.uvs.push(mesh.uvs[i]);
                if has_tangents {
                    let t = mesh.tangents[i];
                    let dir = m.transform_vector(t.xyz()).normalized();
                    out.tangents.push(Vec4::new(dir.x, dir.y, dir.z, t.w));
                }
                if has_colors {
                    out.colors.push(mesh.colors[i]);
                }
                if has_lightmap {
                    let uv = mesh.lightmap_uvs[i];
                    out.lightmap_uvs
                        .push(Vec2::new(so.z + so.x * uv.x, so.w + so.y * uv.y));
                }
            }
            out.indices.push(local);
        }
        out
    }

    /// Appends `other`, shifting its indices past the current vertices.
    pub fn append(&mut self, other: &Subset) {
        let base = self.count();
        append_stream(&mut self.tangents, base, &other.tangents, FILL_TANGENT);
        append_stream(&mut self.colors, base, &other.colors, FILL_COLOR);
        append_stream(&mut self.lightmap_uvs, base, &other.lightmap_uvs, FILL_LIGHTMAP_UV);
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        let shift = base as u32;
        self.indices.extend(other.indices.iter().map(|&i| i + shift));
        self.cap_streams();
    }

    /// Pads every optional stream already in use up to the vertex count.
    pub fn cap_streams(&mut self) {
        let n = self.count();
        cap_stream(&mut self.tangents, n, FILL_TANGENT);
        cap_stream(&mut self.colors, n, FILL_COLOR);
        cap_stream(&mut self.lightmap_uvs, n, FILL_LIGHTMAP_UV);
    }
}

/// Appends `src` to an optional stream that logically holds `base` entries,
/// padding it with `fill` first when earlier contributors lacked the stream.
pub(crate) fn append_stream<T: Copy>(dst: &mut Vec<T>, base: usize, src: &[T], fill: T) {
    if src.is_empty() {
        return;
    }
    dst.resize(base, fill);
    dst.extend_from_slice(src);
}

pub(crate) fn cap_stream<T: Copy>(dst: &mut Vec<T>, len: usize, fill: T) {
    if !dst.is_empty() {
        dst.resize(len, fill);
    }
}

/// Adds `incoming` to the first bucket with its key and room to spare, or opens
/// a new bucket. Returns the bucket index.
pub(crate) fn merge_into(buckets: &mut Vec<Subset>, incoming: Subset, max_verts: usize) -> usize {
    let slot = buckets.iter().position(|b| {
        b.material == incoming.material
            && b.lightmap == incoming.lightmap
            && b.count() + incoming.count() < max_verts
    });
    match slot {
        Some(i) => {
            buckets[i].append(&incoming);
            i
        }
        None => {
            buckets.push(incoming);
            buckets.len() - 1
        }
    }
}
