use std::io;
use std::path::PathBuf;

use supercube_batch::{BatchConfig, BatchError, BatchReport, BatchSource, LightmapId, combine};
use supercube_geom::{Mat4, Vec3, Vec4};
use supercube_mesh::{
    BuiltMesh, CubeSpec, Material, Pivot, PlaneSpec, Rect, Slicing, build_cube, build_plane,
    cube_center_from_pivot, plane_center_from_pivot,
};
use thiserror::Error;

use crate::config::{CubeEntry, Placement, PlaneEntry, SceneConfig};
use crate::materials::MaterialCatalog;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid scene file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{object}: unknown material '{key}'")]
    UnknownMaterial { object: String, key: String },
    #[error("{object}: a plane needs `extents` or `rect`")]
    MissingPlaneSize { object: String },
    #[error(transparent)]
    Batch(#[from] BatchError),
}

#[derive(Clone, Debug)]
pub enum Shape {
    Cube(CubeSpec),
    Plane(PlaneSpec),
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub shape: Shape,
    /// Object to world, pivot offset included.
    pub transform: Mat4,
    pub lightmap: LightmapId,
    pub is_static: bool,
    pub layer: i32,
}

impl SceneObject {
    pub fn build(&self) -> Result<BuiltMesh, supercube_mesh::BuildError> {
        match &self.shape {
            Shape::Cube(spec) => build_cube(spec, &self.transform, None),
            Shape::Plane(spec) => build_plane(spec, &self.transform, None),
        }
    }
}

#[derive(Debug)]
pub struct Scene {
    pub catalog: MaterialCatalog,
    pub objects: Vec<SceneObject>,
    pub batch: BatchConfig,
    pub batch_enabled: bool,
}

const LIGHTMAP_IDENTITY: Vec4 = Vec4::new(1.0, 1.0, 0.0, 0.0);

impl Scene {
    pub fn from_config(cfg: &SceneConfig) -> Result<Scene, SceneError> {
        let catalog = MaterialCatalog::from_entries(&cfg.materials);
        let mut objects = Vec::with_capacity(cfg.cubes.len() + cfg.planes.len());
        for (i, entry) in cfg.cubes.iter().enumerate() {
            objects.push(cube_object(&catalog, i, entry)?);
        }
        for (i, entry) in cfg.planes.iter().enumerate() {
            objects.push(plane_object(&catalog, i, entry)?);
        }

        let default_material = match &cfg.batch.default_material {
            Some(key) => lookup(&catalog, "[batch]", key)?.id,
            None => Default::default(),
        };
        let batch = BatchConfig {
            max_verts: cfg.batch.max_verts,
            default_material,
            log_time_cost: cfg.batch.log_time_cost,
            only_static: cfg.batch.only_static,
            only_procedural: cfg.batch.only_procedural,
        };
        Ok(Scene {
            catalog,
            objects,
            batch,
            batch_enabled: cfg.batch.enabled,
        })
    }

    /// Builds every object, skipping (and logging) the ones that fail. Each result
    /// carries the index of its object.
    pub fn build_all(&self) -> Vec<(usize, BuiltMesh)> {
        let mut out = Vec::with_capacity(self.objects.len());
        for (i, obj) in self.objects.iter().enumerate() {
            match obj.build() {
                Ok(built) => {
                    for w in &built.warnings {
                        log::warn!("{}: {:?}", obj.name, w);
                    }
                    out.push((i, built));
                }
                Err(err) => log::warn!("{}: build skipped: {err}", obj.name),
            }
        }
        out
    }

    /// Batches `built` (as returned by [`Scene::build_all`]). Report source indices
    /// index into `built`.
    pub fn combine(
        &self,
        built: &[(usize, BuiltMesh)],
        config: &BatchConfig,
    ) -> Result<BatchReport, SceneError> {
        let sources: Vec<BatchSource<'_>> = built
            .iter()
            .map(|(i, b)| {
                let obj = &self.objects[*i];
                let mut src = BatchSource::new(&b.mesh, obj.transform)
                    .with_lightmap(obj.lightmap, LIGHTMAP_IDENTITY);
                src.is_static = obj.is_static;
                src.procedural = true;
                src.layer = obj.layer;
                src
            })
            .collect();
        Ok(combine(&sources, config)?)
    }
}

fn lookup<'a>(catalog: &'a MaterialCatalog, object: &str, key: &str) -> Result<&'a Material, SceneError> {
    catalog.get(key).ok_or_else(|| SceneError::UnknownMaterial {
        object: object.to_string(),
        key: key.to_string(),
    })
}

fn slicing(distance: Option<f32>) -> Slicing {
    distance.map(Slicing::every).unwrap_or_default()
}

fn placement_transform(p: &Placement, position: Vec3, local_center: Vec3) -> Mat4 {
    Mat4::from_trs(position, p.rotation.into(), p.scale.into()) * Mat4::from_translation(local_center)
}

fn cube_object(catalog: &MaterialCatalog, i: usize, entry: &CubeEntry) -> Result<SceneObject, SceneError> {
    let name = entry.name.clone().unwrap_or_else(|| format!("cube_{i}"));
    let material = *lookup(catalog, &name, &entry.material)?;
    let mut spec = CubeSpec::new(entry.extents.into(), material);
    spec.wall_uv = entry.wall_uv;
    spec.top_bottom_uv = entry.top_bottom_uv;
    spec.slicing = slicing(entry.slice_distance);
    spec.hide(Pivot::from(entry.hide.clone()));
    for (&face, key) in &entry.overrides {
        spec.face_mut(face).material = Some(lookup(catalog, &name, key)?.id);
    }

    let p = &entry.placement;
    let local_center = cube_center_from_pivot(Vec3::ZERO, p.pivot, spec.extents);
    Ok(SceneObject {
        transform: placement_transform(p, p.position.into(), local_center),
        shape: Shape::Cube(spec),
        lightmap: p.lightmap.map(LightmapId).unwrap_or_default(),
        is_static: p.is_static,
        layer: p.layer,
        name,
    })
}

fn plane_object(catalog: &MaterialCatalog, i: usize, entry: &PlaneEntry) -> Result<SceneObject, SceneError> {
    let name = entry.name.clone().unwrap_or_else(|| format!("plane_{i}"));
    let material = *lookup(catalog, &name, &entry.material)?;
    let p = &entry.placement;
    let position: Vec3 = p.position.into();

    let (mut spec, position) = match (entry.rect, entry.extents) {
        (Some(r), _) => {
            let rect = Rect {
                x_min: r.x_min,
                y_min: r.y_min,
                width: r.width,
                height: r.height,
            };
            let (spec, center) = PlaneSpec::from_rect_xz(rect, material);
            (spec, position + center)
        }
        (None, Some([x, z])) => (PlaneSpec::new(Vec3::new(x, 0.0, z), material), position),
        (None, None) => return Err(SceneError::MissingPlaneSize { object: name }),
    };
    spec.uv = entry.uv;
    spec.slicing = slicing(entry.slice_distance);

    let local_center = plane_center_from_pivot(Vec3::ZERO, p.pivot, spec.size());
    Ok(SceneObject {
        transform: placement_transform(p, position, local_center),
        shape: Shape::Plane(spec),
        lightmap: p.lightmap.map(LightmapId).unwrap_or_default(),
        is_static: p.is_static,
        layer: p.layer,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = include_str!("../assets/demo_scene.toml");

    fn scene(s: &str) -> Result<Scene, SceneError> {
        Scene::from_config(&SceneConfig::from_toml_str(s)?)
    }

    #[test]
    fn demo_scene_builds_and_batches() {
        let scene = scene(DEMO).unwrap();
        assert!(!scene.objects.is_empty());
        let built = scene.build_all();
        assert_eq!(built.len(), scene.objects.len());
        let report = scene.combine(&built, &scene.batch).unwrap();
        let input: usize = built.iter().map(|(_, b)| b.mesh.vertex_count()).sum();
        assert_eq!(report.vertex_count(), input);
        assert_eq!(report.consumed.len(), built.len());
        for m in &report.meshes {
            assert!(m.mesh.vertex_count() < scene.batch.max_verts);
        }
    }

    #[test]
    fn unknown_material_is_reported() {
        let err = scene(
            r#"
            [[cube]]
            name = "crate"
            extents = [1.0, 1.0, 1.0]
            material = "wood"
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SceneError::UnknownMaterial { ref object, ref key } if object == "crate" && key == "wood"
        ));
    }

    #[test]
    fn pivot_shifts_the_object_origin() {
        let s = scene(
            r#"
            [materials.m]
            [[cube]]
            extents = [2.0, 4.0, 2.0]
            material = "m"
            position = [10.0, 0.0, 0.0]
            pivot = ["bottom"]
            "#,
        )
        .unwrap();
        let origin = s.objects[0].transform.transform_point(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(10.0, 2.0, 0.0));
        assert_eq!(s.objects[0].name, "cube_0");
    }

    #[test]
    fn plane_needs_a_size() {
        let err = scene(
            r#"
            [materials.m]
            [[plane]]
            material = "m"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::MissingPlaneSize { .. }));
    }

    #[test]
    fn oversized_cube_is_skipped_not_fatal() {
        let s = scene(
            r#"
            [materials.m]
            [[cube]]
            extents = [200.0, 200.0, 200.0]
            material = "m"
            slice_distance = 1.0

            [[cube]]
            extents = [1.0, 1.0, 1.0]
            material = "m"
            "#,
        )
        .unwrap();
        let built = s.build_all();
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].0, 1);
    }
}
