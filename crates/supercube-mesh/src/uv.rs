use serde::Deserialize;
use supercube_geom::{Mat4, Vec2, Vec3};

/// How a face derives its primary UVs.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvMode {
    /// Planar projection of the world-space position.
    #[default]
    WorldCoordinates,
    /// Planar projection of the object-space position.
    LocalCoordinates,
    /// 0..1 on V, U running across `[u_start, u_end)` so walls tile around a perimeter.
    WallSlide,
    /// 0..1 on both axes.
    Unit,
}

/// UV mode plus the tile/offset applied after it: `offset + tile * raw`.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct UvSettings {
    pub mode: UvMode,
    pub tile: Vec2,
    pub offset: Vec2,
}

impl Default for UvSettings {
    fn default() -> Self {
        Self::new(UvMode::default())
    }
}

impl UvSettings {
    #[inline]
    pub const fn new(mode: UvMode) -> Self {
        Self {
            mode,
            tile: Vec2::ONE,
            offset: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn apply(&self, raw: Vec2) -> Vec2 {
        self.offset + self.tile.scale(raw)
    }
}

/// Projects `pos` onto the plane orthogonal to the dominant axis of `normal`.
#[inline]
pub fn planar_uv(pos: Vec3, normal: Vec3) -> Vec2 {
    match normal.dominant_axis() {
        0 => Vec2::new(pos.z, pos.y),
        1 => Vec2::new(pos.x, pos.z),
        _ => Vec2::new(pos.x, pos.y),
    }
}

/// Untiled UV for a grid vertex. `percent` is the grid parameter in `[-0.5, 0.5]`,
/// `pos`/`normal` are object-space, `object` maps object to world space.
pub(crate) fn raw_uv(
    mode: UvMode,
    object: &Mat4,
    pos: Vec3,
    normal: Vec3,
    u_range: (f32, f32),
    percent: Vec2,
) -> Vec2 {
    let (u_start, u_end) = u_range;
    let t = Vec2::new(percent.x + 0.5, percent.y + 0.5);
    match mode {
        UvMode::Unit => t,
        // U runs from u_end at the -X edge down to u_start at +X
        UvMode::WallSlide => Vec2::new(u_end + (u_start - u_end) * t.x, t.y),
        UvMode::WorldCoordinates => planar_uv(
            object.transform_point(pos),
            object.transform_vector(normal),
        ),
        UvMode::LocalCoordinates => planar_uv(pos, normal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_slide_runs_backwards() {
        let m = Mat4::IDENTITY;
        let n = Vec3::new(0.0, 0.0, -1.0);
        let left = raw_uv(UvMode::WallSlide, &m, Vec3::ZERO, n, (2.0, 3.0), Vec2::new(-0.5, -0.5));
        let right = raw_uv(UvMode::WallSlide, &m, Vec3::ZERO, n, (2.0, 3.0), Vec2::new(0.5, 0.5));
        assert_eq!(left, Vec2::new(3.0, 0.0));
        assert_eq!(right, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn world_mode_uses_object_transform() {
        let m = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let p = Vec3::new(1.0, 2.0, 0.0);
        let n = Vec3::new(0.0, 0.0, -1.0);
        let world = raw_uv(UvMode::WorldCoordinates, &m, p, n, (0.0, 1.0), Vec2::ZERO);
        let local = raw_uv(UvMode::LocalCoordinates, &m, p, n, (0.0, 1.0), Vec2::ZERO);
        assert_eq!(world, Vec2::new(11.0, 2.0));
        assert_eq!(local, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn planar_projection_per_axis() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(planar_uv(p, Vec3::new(-1.0, 0.0, 0.0)), Vec2::new(3.0, 2.0));
        assert_eq!(planar_uv(p, Vec3::new(0.0, 1.0, 0.0)), Vec2::new(1.0, 3.0));
        assert_eq!(planar_uv(p, Vec3::new(0.0, 0.2, 0.9)), Vec2::new(1.0, 2.0));
    }
}
