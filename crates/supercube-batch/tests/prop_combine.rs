use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use supercube_batch::{BatchConfig, BatchSource, LightmapId, combine};
use supercube_geom::{Mat4, Vec3, Vec4};
use supercube_mesh::{BuiltMesh, CubeSpec, Face, Material, MaterialId, Slicing, build_cube};

#[derive(Clone, Debug)]
struct Piece {
    extents: Vec3,
    slicing: Option<f32>,
    material: u32,
    top: Option<u32>,
    lightmap: i32,
    offset: Vec3,
}

fn arb_piece() -> impl Strategy<Value = Piece> {
    (
        (0.2f32..4.0, 0.2f32..4.0, 0.2f32..4.0),
        prop::option::of(0.4f32..1.5),
        0u32..4,
        prop::option::of(0u32..4),
        -1i32..2,
        (-20.0f32..20.0, -20.0f32..20.0),
    )
        .prop_map(|((x, y, z), slicing, material, top, lightmap, (ox, oz))| Piece {
            extents: Vec3::new(x, y, z),
            slicing,
            material,
            top,
            lightmap,
            offset: Vec3::new(ox, 0.0, oz),
        })
}

fn build(piece: &Piece) -> BuiltMesh {
    let mut spec = CubeSpec::new(piece.extents, Material::new(MaterialId(piece.material)));
    if let Some(d) = piece.slicing {
        spec.slicing = Slicing::every(d);
    }
    spec.face_mut(Face::PosY).material = piece.top.map(MaterialId);
    build_cube(&spec, &Mat4::IDENTITY, None).unwrap()
}

fn sources<'a>(pieces: &[Piece], built: &'a [BuiltMesh]) -> Vec<BatchSource<'a>> {
    pieces
        .iter()
        .zip(built)
        .map(|(p, b)| {
            BatchSource::new(&b.mesh, Mat4::from_translation(p.offset))
                .with_lightmap(LightmapId(p.lightmap), Vec4::new(1.0, 1.0, 0.0, 0.0))
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn vertices_and_triangles_are_conserved(
        pieces in prop::collection::vec(arb_piece(), 0..8),
        max_verts in 60usize..3000,
    ) {
        let built: Vec<BuiltMesh> = pieces.iter().map(build).collect();
        let srcs = sources(&pieces, &built);
        let config = BatchConfig { max_verts, ..BatchConfig::default() };
        let report = combine(&srcs, &config).unwrap();

        // expected unique vertices and indices per (lightmap, material) over accepted submeshes
        let mut expected_verts = 0usize;
        let mut expected: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for (p, b) in pieces.iter().zip(&built) {
            for sub in &b.mesh.submeshes {
                let unique: HashSet<u32> = sub.indices.iter().copied().collect();
                if unique.len() >= max_verts {
                    continue;
                }
                expected_verts += unique.len();
                *expected.entry((p.lightmap, sub.material.0)).or_default() += sub.indices.len();
            }
        }

        let mut got: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for out in &report.meshes {
            prop_assert_eq!(out.mesh.validate(), Ok(()));
            prop_assert!(out.mesh.vertex_count() < max_verts);
            for sub in &out.mesh.submeshes {
                *got.entry((out.lightmap.0, sub.material.0)).or_default() += sub.indices.len();
            }
        }
        prop_assert_eq!(report.vertex_count(), expected_verts);
        prop_assert_eq!(got, expected);
        prop_assert_eq!(report.consumed.len() + report.rejected.iter().map(|r| r.source).collect::<HashSet<_>>().len(), pieces.len());
    }

    #[test]
    fn submeshes_within_a_mesh_are_material_sorted(
        pieces in prop::collection::vec(arb_piece(), 1..8),
    ) {
        let built: Vec<BuiltMesh> = pieces.iter().map(build).collect();
        let srcs = sources(&pieces, &built);
        let report = combine(&srcs, &BatchConfig::default()).unwrap();
        for out in &report.meshes {
            let mats = out.materials();
            prop_assert!(mats.windows(2).all(|w| w[0] <= w[1]));
        }
        let again = combine(&srcs, &BatchConfig::default()).unwrap();
        prop_assert_eq!(report.meshes, again.meshes);
    }
}
