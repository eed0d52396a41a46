//! supercube: builds the boxes and planes of a TOML scene and batches them.

mod config;
mod materials;
mod scene;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use config::SceneConfig;
use scene::Scene;

#[derive(Parser, Debug)]
#[command(name = "supercube")]
#[command(about = "Procedural box/plane mesh builder and batcher")]
#[command(version)]
struct Cli {
    /// Path to the scene file
    #[arg(default_value = "assets/demo_scene.toml")]
    scene: PathBuf,

    /// Batch the built meshes even if the scene does not ask for it
    #[arg(long)]
    batch: bool,

    /// Override the per-mesh vertex cap used when batching
    #[arg(long)]
    max_verts: Option<usize>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = SceneConfig::from_path(&cli.scene)?;
    let scene = Scene::from_config(&config)?;
    log::info!(
        "Loaded {} ({} materials, {} objects)",
        cli.scene.display(),
        scene.catalog.materials.len(),
        scene.objects.len()
    );

    let built = scene.build_all();
    for (i, b) in &built {
        let obj = &scene.objects[*i];
        let materials: Vec<&str> = b
            .mesh
            .materials()
            .into_iter()
            .map(|id| scene.catalog.key_of(id).unwrap_or("?"))
            .collect();
        log::info!(
            "{}: {} vertices, {} triangles, materials {:?}",
            obj.name,
            b.mesh.vertex_count(),
            b.mesh.index_count() / 3,
            materials
        );
    }

    if !(cli.batch || scene.batch_enabled) {
        return Ok(());
    }
    let mut batch = scene.batch;
    if let Some(max) = cli.max_verts {
        batch.max_verts = max;
    }
    let report = scene.combine(&built, &batch)?;
    for (n, m) in report.meshes.iter().enumerate() {
        log::info!(
            "Lightmap_{}_mesh_{}: {} vertices, {} submeshes",
            m.lightmap.0,
            n,
            m.mesh.vertex_count(),
            m.mesh.submeshes.len()
        );
    }
    for r in &report.rejected {
        let name = &scene.objects[built[r.source].0].name;
        log::warn!(
            "{name}: submesh {} ({} vertices) left unbatched",
            r.submesh,
            r.vertices
        );
    }
    if let Some(layer) = report.layer {
        log::info!(
            "{} of {} objects batched onto layer {layer}",
            report.consumed.len(),
            built.len()
        );
    }
    Ok(())
}
