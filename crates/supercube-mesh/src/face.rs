use serde::Deserialize;
use supercube_geom::Vec3;

use crate::material::MaterialId;

/// One of the six box faces. Front is -Z, matching a camera looking down +Z.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
pub enum Face {
    #[serde(rename = "top")]
    PosY = 0,
    #[serde(rename = "bottom")]
    NegY = 1,
    #[serde(rename = "right")]
    PosX = 2,
    #[serde(rename = "left")]
    NegX = 3,
    #[serde(rename = "back")]
    PosZ = 4,
    #[serde(rename = "front")]
    NegZ = 5,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FaceRole {
    /// The four side faces; these share the wall UV settings.
    Wall,
    /// Top and bottom.
    Cap,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Walls in the order their WallSlide U ranges accumulate around the perimeter.
    pub const WALLS: [Face; 4] = [Face::NegZ, Face::NegX, Face::PosZ, Face::PosX];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the outward unit normal for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosY => Vec3::new(0.0, 1.0, 0.0),
            Face::NegY => Vec3::new(0.0, -1.0, 0.0),
            Face::PosX => Vec3::new(1.0, 0.0, 0.0),
            Face::NegX => Vec3::new(-1.0, 0.0, 0.0),
            Face::PosZ => Vec3::new(0.0, 0.0, 1.0),
            Face::NegZ => Vec3::new(0.0, 0.0, -1.0),
        }
    }

    #[inline]
    pub fn role(self) -> FaceRole {
        match self {
            Face::PosY | Face::NegY => FaceRole::Cap,
            _ => FaceRole::Wall,
        }
    }
}

/// Per-face visibility and optional material override.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceSettings {
    pub visible: bool,
    pub material: Option<MaterialId>,
}

impl Default for FaceSettings {
    fn default() -> Self {
        Self {
            visible: true,
            material: None,
        }
    }
}
