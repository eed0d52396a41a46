use supercube_geom::{Aabb, Color, Mat4, Vec2, Vec3, Vec4};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::ONE, Vec3::new(1.0, 1.0, 1.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
}

#[test]
fn vec3_dot_length_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.dot(v), 25.0, 1e-6));
    assert!(approx_eq(v.length(), 5.0, 1e-6));
    assert!(vec3_approx_eq(v.normalized(), Vec3::new(0.6, 0.8, 0.0), 1e-6));

    // Zero vector normalization should be a no-op (not NaN, unchanged)
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-6));
}

#[test]
fn vec3_dominant_axis() {
    assert_eq!(Vec3::new(-3.0, 1.0, 2.0).dominant_axis(), 0);
    assert_eq!(Vec3::new(0.0, -1.0, 0.5).dominant_axis(), 1);
    assert_eq!(Vec3::new(0.1, 0.2, -0.9).dominant_axis(), 2);
    // ties go to the earlier axis
    assert_eq!(Vec3::new(1.0, 1.0, 1.0).dominant_axis(), 0);
}

#[test]
fn vec2_scale_and_offset() {
    let uv = Vec2::new(0.5, 0.25);
    let tiled = Vec2::new(1.0, 2.0) + Vec2::new(4.0, 2.0).scale(uv);
    assert_eq!(tiled, Vec2::new(3.0, 2.5));
}

#[test]
fn color_lerp_clamps() {
    let c = Color::BLACK.lerp(Color::WHITE, 0.5);
    assert!(approx_eq(c.r, 0.5, 1e-6) && approx_eq(c.a, 1.0, 1e-6));
    assert_eq!(Color::BLACK.lerp(Color::WHITE, 3.0), Color::WHITE);
}

#[test]
fn mat4_identity_is_noop() {
    let p = Vec3::new(1.5, -2.0, 7.0);
    assert_eq!(Mat4::IDENTITY.transform_point(p), p);
    assert_eq!(Mat4::IDENTITY.transform_vector(p), p);
}

#[test]
fn mat4_translation_skips_vectors() {
    let m = Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0));
    let p = Vec3::new(1.0, 2.0, 3.0);
    assert!(vec3_approx_eq(m.transform_point(p), Vec3::new(11.0, 2.0, -2.0), 1e-6));
    assert!(vec3_approx_eq(m.transform_vector(p), p, 1e-6));
}

#[test]
fn mat4_quarter_turns() {
    let fwd = Vec3::new(0.0, 0.0, -1.0);
    let y90 = Mat4::from_euler_degrees(Vec3::new(0.0, 90.0, 0.0));
    assert_eq!(y90.transform_vector(fwd), Vec3::new(-1.0, 0.0, 0.0));
    let x90 = Mat4::from_euler_degrees(Vec3::new(90.0, 0.0, 0.0));
    assert_eq!(x90.transform_vector(fwd), Vec3::new(0.0, 1.0, 0.0));
    let x270 = Mat4::from_euler_degrees(Vec3::new(270.0, 0.0, 0.0));
    assert_eq!(x270.transform_vector(fwd), Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn mat4_trs_applies_scale_first() {
    let m = Mat4::from_trs(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 180.0, 0.0),
        Vec3::new(2.0, 1.0, 1.0),
    );
    let p = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
    assert!(vec3_approx_eq(p, Vec3::new(-2.0, 1.0, 0.0), 1e-6));
}

#[test]
fn vec4_xyz() {
    assert_eq!(Vec4::new(1.0, 2.0, 3.0, -1.0).xyz(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn aabb_from_points() {
    let pts = [
        Vec3::new(-1.0, 0.0, 2.0),
        Vec3::new(3.0, -2.0, 0.5),
        Vec3::new(0.0, 4.0, 1.0),
    ];
    let b = Aabb::from_points(pts).unwrap();
    assert_eq!(b.min, Vec3::new(-1.0, -2.0, 0.5));
    assert_eq!(b.max, Vec3::new(3.0, 4.0, 2.0));
    assert!(vec3_approx_eq(b.center(), Vec3::new(1.0, 1.0, 1.25), 1e-6));
    assert!(vec3_approx_eq(b.size(), Vec3::new(4.0, 6.0, 1.5), 1e-6));
    assert!(Aabb::from_points(std::iter::empty()).is_none());
}

#[test]
fn aabb_from_center_size() {
    let b = Aabb::from_center_size(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
}
