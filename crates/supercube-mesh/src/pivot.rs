use core::ops::BitOr;

use serde::Deserialize;
use supercube_geom::{Vec2, Vec3};

use crate::face::Face;

/// Bit mask of box sides. Used both to place a shape by a pivot on its surface
/// and to name faces to hide. Opposite sides together center on that axis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(from = "Vec<Face>")]
pub struct Pivot(pub u8);

impl Pivot {
    pub const NONE: Pivot = Pivot(0);
    pub const FRONT: Pivot = Pivot(1);
    pub const BACK: Pivot = Pivot(2);
    pub const LEFT: Pivot = Pivot(4);
    pub const RIGHT: Pivot = Pivot(8);
    pub const TOP: Pivot = Pivot(16);
    pub const BOTTOM: Pivot = Pivot(32);
    pub const X_CENTER: Pivot = Pivot(4 | 8);
    pub const Y_CENTER: Pivot = Pivot(16 | 32);
    pub const Z_CENTER: Pivot = Pivot(1 | 2);
    pub const CENTER: Pivot = Pivot(63);

    #[inline]
    pub fn contains(self, other: Pivot) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// The side bit for a cube face.
    #[inline]
    pub fn of_face(face: Face) -> Pivot {
        match face {
            Face::NegZ => Pivot::FRONT,
            Face::PosZ => Pivot::BACK,
            Face::NegX => Pivot::LEFT,
            Face::PosX => Pivot::RIGHT,
            Face::PosY => Pivot::TOP,
            Face::NegY => Pivot::BOTTOM,
        }
    }
}

impl BitOr for Pivot {
    type Output = Pivot;
    #[inline]
    fn bitor(self, rhs: Pivot) -> Pivot {
        Pivot(self.0 | rhs.0)
    }
}

impl From<Vec<Face>> for Pivot {
    fn from(faces: Vec<Face>) -> Self {
        faces
            .into_iter()
            .fold(Pivot::NONE, |acc, f| acc | Pivot::of_face(f))
    }
}

/// Center of a box of `size` whose pivot, on the sides named by `pivot`, sits at `point`.
pub fn cube_center_from_pivot(point: Vec3, pivot: Pivot, size: Vec3) -> Vec3 {
    let half = size * 0.5;
    let mut c = point;
    if pivot.contains(Pivot::TOP) {
        c.y -= half.y;
    }
    if pivot.contains(Pivot::BOTTOM) {
        c.y += half.y;
    }
    if pivot.contains(Pivot::LEFT) {
        c.x += half.x;
    }
    if pivot.contains(Pivot::RIGHT) {
        c.x -= half.x;
    }
    if pivot.contains(Pivot::FRONT) {
        c.z += half.z;
    }
    if pivot.contains(Pivot::BACK) {
        c.z -= half.z;
    }
    c
}

/// Plane variant: only TOP (+Z), BOTTOM (-Z), LEFT and RIGHT are honoured.
pub fn plane_center_from_pivot(point: Vec3, pivot: Pivot, size: Vec2) -> Vec3 {
    let half = size * 0.5;
    let mut c = point;
    if pivot.contains(Pivot::TOP) {
        c.z -= half.y;
    }
    if pivot.contains(Pivot::BOTTOM) {
        c.z += half.y;
    }
    if pivot.contains(Pivot::LEFT) {
        c.x += half.x;
    }
    if pivot.contains(Pivot::RIGHT) {
        c.x -= half.x;
    }
    c
}
