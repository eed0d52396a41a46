use supercube_geom::{Mat4, Vec2, Vec3, Vec4};
use supercube_mesh::constants::DEFAULT_TANGENT;
use supercube_mesh::{FaceSpec, MaterialId, MeshBuffers, Submesh, UvMode, UvSettings, add_face, solve_tangent};

fn spec(transform: Mat4, mode: UvMode, sx: usize, sy: usize) -> FaceSpec {
    FaceSpec {
        transform,
        offset: 0.5,
        uv: UvSettings::new(mode),
        u_start: 0.0,
        u_end: 1.0,
        slices_x: sx,
        slices_y: sy,
    }
}

fn empty_mesh() -> MeshBuffers {
    MeshBuffers {
        submeshes: vec![Submesh::new(MaterialId(0))],
        ..MeshBuffers::default()
    }
}

fn triangle_normal(mesh: &MeshBuffers, tri: &[u32]) -> Vec3 {
    let a = mesh.positions[tri[0] as usize];
    let b = mesh.positions[tri[1] as usize];
    let c = mesh.positions[tri[2] as usize];
    (b - a).cross(c - a)
}

#[test]
fn single_quad_faces_along_normal() {
    let mut mesh = empty_mesh();
    let span = add_face(&spec(Mat4::IDENTITY, UvMode::Unit, 2, 2), &Mat4::IDENTITY, &mut mesh, 0);
    assert_eq!(span.vertex_count(), 4);
    assert_eq!(mesh.submeshes[0].indices.len(), 6);
    let normal = Vec3::new(0.0, 0.0, -1.0);
    for tri in mesh.submeshes[0].indices.chunks(3) {
        let n = triangle_normal(&mesh, tri);
        assert!(n.dot(normal) > 0.0, "{n:?}");
        assert!(n.cross(normal).length() < 1e-6);
    }
}

#[test]
fn every_cell_winding_matches_normal_under_rotation() {
    for euler in [
        Vec3::new(0.0, 90.0, 0.0),
        Vec3::new(0.0, 180.0, 0.0),
        Vec3::new(90.0, 0.0, 0.0),
        Vec3::new(270.0, 0.0, 0.0),
        Vec3::new(15.0, 40.0, -20.0),
    ] {
        let transform = Mat4::from_trs(Vec3::ZERO, euler, Vec3::new(2.0, 3.0, 1.0));
        let mut mesh = empty_mesh();
        add_face(&spec(transform, UvMode::Unit, 4, 3), &Mat4::IDENTITY, &mut mesh, 0);
        let normal = mesh.normals[0];
        assert_eq!(mesh.submeshes[0].indices.len(), 3 * 2 * 6);
        for tri in mesh.submeshes[0].indices.chunks(3) {
            assert!(triangle_normal(&mesh, tri).dot(normal) > 0.0, "{euler:?}");
        }
    }
}

#[test]
fn diagonals_alternate_in_a_checkerboard() {
    let mut mesh = empty_mesh();
    add_face(&spec(Mat4::IDENTITY, UvMode::Unit, 3, 2), &Mat4::IDENTITY, &mut mesh, 0);
    let idx = &mesh.submeshes[0].indices;
    let diagonal = |cell: &[u32]| -> (u32, u32) {
        // the two vertices shared by both triangles of a cell
        let shared: Vec<u32> = cell[..3].iter().copied().filter(|v| cell[3..].contains(v)).collect();
        (shared[0].min(shared[1]), shared[0].max(shared[1]))
    };
    // cell (1,1) splits 0-4, cell (2,1) splits 2-4
    assert_eq!(diagonal(&idx[0..6]), (0, 4));
    assert_eq!(diagonal(&idx[6..12]), (2, 4));
}

#[test]
fn slices_below_two_are_raised() {
    let mut mesh = empty_mesh();
    let span = add_face(&spec(Mat4::IDENTITY, UvMode::Unit, 0, 1), &Mat4::IDENTITY, &mut mesh, 0);
    assert_eq!((span.slices_x, span.slices_y), (2, 2));
    assert_eq!(mesh.vertex_count(), 4);
}

#[test]
fn second_face_indices_continue_after_first() {
    let mut mesh = MeshBuffers {
        submeshes: vec![Submesh::new(MaterialId(0)), Submesh::new(MaterialId(1))],
        ..MeshBuffers::default()
    };
    add_face(&spec(Mat4::IDENTITY, UvMode::Unit, 2, 2), &Mat4::IDENTITY, &mut mesh, 0);
    let span = add_face(&spec(Mat4::IDENTITY, UvMode::Unit, 2, 2), &Mat4::IDENTITY, &mut mesh, 1);
    assert_eq!(span.start, 4);
    assert!(mesh.submeshes[1].indices.iter().all(|&i| (4..8).contains(&i)));
    assert_eq!(mesh.tangents.len(), 8);
}

#[test]
fn unit_front_face_tangent_is_plus_x() {
    let mut mesh = empty_mesh();
    let span = add_face(&spec(Mat4::IDENTITY, UvMode::Unit, 3, 3), &Mat4::IDENTITY, &mut mesh, 0);
    assert!(!span.degenerate_uv);
    assert!(mesh.tangents.iter().all(|&t| t == Vec4::new(1.0, 0.0, 0.0, 1.0)));
}

#[test]
fn unit_uvs_span_zero_to_one() {
    let mut mesh = empty_mesh();
    add_face(&spec(Mat4::IDENTITY, UvMode::Unit, 3, 2), &Mat4::IDENTITY, &mut mesh, 0);
    assert_eq!(mesh.uvs[0], Vec2::new(0.0, 0.0));
    assert_eq!(mesh.uvs[1], Vec2::new(0.5, 0.0));
    assert_eq!(mesh.uvs[5], Vec2::new(1.0, 1.0));
}

#[test]
fn collapsed_uvs_use_default_tangent() {
    let mut face = spec(Mat4::IDENTITY, UvMode::Unit, 2, 2);
    face.uv.tile = Vec2::new(1.0, 0.0);
    let mut mesh = empty_mesh();
    let span = add_face(&face, &Mat4::IDENTITY, &mut mesh, 0);
    assert!(span.degenerate_uv);
    assert_eq!(mesh.tangents[0], DEFAULT_TANGENT);
}

#[test]
fn solve_tangent_rejects_singular_jacobian() {
    let n = Vec3::new(0.0, 0.0, -1.0);
    let dir1 = Vec3::new(1.0, 0.0, 0.0);
    let dir2 = Vec3::new(0.0, -1.0, 0.0);
    assert_eq!(solve_tangent(n, dir1, dir2, Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)), None);
    assert_eq!(solve_tangent(n, dir1, dir2, Vec2::new(f32::NAN, 0.0), Vec2::new(0.0, 1.0)), None);
}

#[test]
fn solve_tangent_flips_handedness_with_mirrored_v() {
    let n = Vec3::new(0.0, 0.0, -1.0);
    let dir1 = Vec3::new(1.0, 0.0, 0.0);
    let dir2 = Vec3::new(0.0, -1.0, 0.0);
    let t = solve_tangent(n, dir1, dir2, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)).unwrap();
    let m = solve_tangent(n, dir1, dir2, Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0)).unwrap();
    assert_eq!(t.xyz(), m.xyz());
    assert_eq!(t.w, -m.w);
}
