use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::Deserialize;
use supercube_mesh::{Face, Pivot, UvSettings};

use crate::scene::SceneError;

/// Top-level scene file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub materials: HashMap<String, MaterialEntry>,
    pub batch: BatchSection,
    #[serde(rename = "cube")]
    pub cubes: Vec<CubeEntry>,
    #[serde(rename = "plane")]
    pub planes: Vec<PlaneEntry>,
}

impl SceneConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct MaterialEntry {
    pub texture: Option<TextureEntry>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum TextureEntry {
    // texture = [512, 256]
    Size([u32; 2]),
    // texture = { width = 512, height = 256 }
    Detail { width: u32, height: u32 },
}

impl TextureEntry {
    pub fn dims(self) -> (u32, u32) {
        match self {
            TextureEntry::Size([w, h]) => (w, h),
            TextureEntry::Detail { width, height } => (width, height),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct BatchSection {
    pub enabled: bool,
    pub max_verts: usize,
    pub default_material: Option<String>,
    pub log_time_cost: bool,
    pub only_static: bool,
    pub only_procedural: bool,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            enabled: false,
            max_verts: supercube_batch::MAX_VERTS,
            default_material: None,
            log_time_cost: false,
            only_static: false,
            only_procedural: false,
        }
    }
}

/// Placement and batching fields shared by cubes and planes.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Placement {
    pub position: [f32; 3],
    /// Euler degrees.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    /// Sides of the shape that sit at `position`.
    pub pivot: Pivot,
    pub lightmap: Option<i32>,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub layer: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            pivot: Pivot::NONE,
            lightmap: None,
            is_static: false,
            layer: 0,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CubeEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub placement: Placement,
    pub extents: [f32; 3],
    pub material: String,
    #[serde(default)]
    pub wall_uv: UvSettings,
    #[serde(default)]
    pub top_bottom_uv: UvSettings,
    /// Presence enables slicing.
    #[serde(default)]
    pub slice_distance: Option<f32>,
    #[serde(default)]
    pub hide: Vec<Face>,
    #[serde(default)]
    pub overrides: HashMap<Face, String>,
}

#[derive(Deserialize, Debug)]
pub struct PlaneEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub placement: Placement,
    /// X and Z edge lengths. Ignored when `rect` is given.
    #[serde(default)]
    pub extents: Option<[f32; 2]>,
    /// Covers this rectangle of the XZ plane instead of using `extents` and `position`.
    #[serde(default)]
    pub rect: Option<RectEntry>,
    pub material: String,
    #[serde(default = "unit_uv")]
    pub uv: UvSettings,
    #[serde(default)]
    pub slice_distance: Option<f32>,
}

fn unit_uv() -> UvSettings {
    UvSettings::new(supercube_mesh::UvMode::Unit)
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct RectEntry {
    pub x_min: f32,
    pub y_min: f32,
    pub width: f32,
    pub height: f32,
}
