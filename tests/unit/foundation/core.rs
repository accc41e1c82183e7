use super::*;

#[test]
fn millis_arithmetic_saturates() {
    assert_eq!(Millis(5).after(Millis(10)), Millis(15));
    assert_eq!(Millis(u64::MAX).after(Millis(1)), Millis(u64::MAX));
    assert_eq!(Millis(3).since(Millis(10)), Millis::ZERO);
    assert_eq!(Millis(2500).as_secs_f64(), 2.5);
    assert_eq!(Millis(42).to_string(), "42ms");
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 100.0).is_err());
    assert!(Viewport::new(100.0, -1.0).is_err());
    assert!(Viewport::new(f64::NAN, 100.0).is_err());
    assert!(Viewport::new(1440.0, 900.0).is_ok());
}

#[test]
fn scene_viewport_matches_perspective_extent() {
    let vp = Viewport::new(1600.0, 800.0).unwrap();
    let scene = SceneViewport::from_camera(vp, 4.0, 90.0);
    assert!((scene.height - 8.0).abs() < 1e-9);
    assert!((scene.width - 16.0).abs() < 1e-9);
}

#[test]
fn default_pose_is_unit_scale() {
    let pose = Pose::default();
    assert_eq!(pose.position, Vec3::ZERO);
    assert_eq!(pose.rotation, Vec3::ZERO);
    assert_eq!(pose.scale, Vec3::splat(1.0));
    assert_eq!(Vec3::new(1.0, 2.0, 3.0) + Vec3::splat(1.0), Vec3::new(2.0, 3.0, 4.0));
}
