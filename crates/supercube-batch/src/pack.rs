use supercube_geom::Aabb;
use supercube_mesh::{MaterialId, MeshBuffers, Submesh};

use crate::source::LightmapId;
use crate::subset::{
    FILL_COLOR, FILL_LIGHTMAP_UV, FILL_TANGENT, Subset, append_stream, cap_stream,
};

/// One merged output mesh. Every submesh samples the same lightmap.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchedMesh {
    pub lightmap: LightmapId,
    /// World-space vertices, one submesh per packed subset.
    pub mesh: MeshBuffers,
    pub bounds: Aabb,
}

impl BatchedMesh {
    #[inline]
    pub fn materials(&self) -> Vec<MaterialId> {
        self.mesh.materials()
    }
}

/// Lightmaps in order of first appearance among `subsets`.
fn lightmap_order(subsets: &[Subset]) -> Vec<LightmapId> {
    let mut order = Vec::new();
    for s in subsets {
        if !order.contains(&s.lightmap) {
            order.push(s.lightmap);
        }
    }
    order
}

/// For each lightmap, sorts its subsets by material and places each into the
/// first output bin whose total stays under `max_verts`.
pub(crate) fn pack(subsets: Vec<Subset>, max_verts: usize) -> Vec<BatchedMesh> {
    let order = lightmap_order(&subsets);
    let mut out = Vec::new();
    let mut rest = subsets;

    for lightmap in order {
        let (mut group, others): (Vec<Subset>, Vec<Subset>) =
            rest.into_iter().partition(|s| s.lightmap == lightmap);
        rest = others;
        // stable, so equal materials keep gathering order
        group.sort_by_key(|s| s.material);

        let mut bins: Vec<(usize, Vec<Subset>)> = Vec::new();
        for subset in group {
            let n = subset.count();
            match bins.iter_mut().find(|(total, _)| *total + n < max_verts) {
                Some((total, members)) => {
                    *total += n;
                    members.push(subset);
                }
                None => bins.push((n, vec![subset])),
            }
        }
        out.extend(bins.into_iter().map(|(_, members)| merge_bin(lightmap, members)));
    }
    out
}

fn merge_bin(lightmap: LightmapId, members: Vec<Subset>) -> BatchedMesh {
    let total: usize = members.iter().map(Subset::count).sum();
    let mut mesh = MeshBuffers::default();
    mesh.reserve_vertices(total);

    for s in members {
        let base = mesh.vertex_count();
        append_stream(&mut mesh.tangents, base, &s.tangents, FILL_TANGENT);
        append_stream(&mut mesh.colors, base, &s.colors, FILL_COLOR);
        append_stream(&mut mesh.lightmap_uvs, base, &s.lightmap_uvs, FILL_LIGHTMAP_UV);
        mesh.positions.extend_from_slice(&s.positions);
        mesh.normals.extend_from_slice(&s.normals);
        mesh.uvs.extend_from_slice(&s.uvs);
        let shift = base as u32;
        mesh.submeshes.push(Submesh {
            material: s.material,
            indices: s.indices.iter().map(|&i| i + shift).collect(),
        });
    }
    cap_stream(&mut mesh.tangents, total, FILL_TANGENT);
    cap_stream(&mut mesh.colors, total, FILL_COLOR);
    cap_stream(&mut mesh.lightmap_uvs, total, FILL_LIGHTMAP_UV);

    BatchedMesh {
        lightmap,
        bounds: mesh.recalculate_bounds(),
        mesh,
    }
}
