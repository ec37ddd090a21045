// Piecewise linear camera path and the perspective camera it drives.

use glam::{Vec3, Vec4Swizzles};
use skyline_core::*;

fn three_point_path() -> CameraPath {
    CameraPath::new(vec![
        Waypoint::new([0.0, 0.0, 0.0], [0.0, 0.0, -10.0]),
        Waypoint::new([10.0, 0.0, 0.0], [10.0, 0.0, -10.0]),
        Waypoint::new([10.0, 10.0, 0.0], [0.0, 0.0, 0.0]),
    ])
    .unwrap()
}

#[test]
fn three_waypoint_scenario() {
    let path = three_point_path();

    assert_eq!(path.segment_at(0.25), (0, 0.5));
    let quarter = path.sample(0.25);
    assert!(quarter.eye.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-5));
    assert!(quarter.target.abs_diff_eq(Vec3::new(5.0, 0.0, -10.0), 1e-5));

    assert_eq!(path.segment_at(0.75), (1, 0.5));
    let three_quarters = path.sample(0.75);
    assert!(three_quarters.eye.abs_diff_eq(Vec3::new(10.0, 5.0, 0.0), 1e-5));
    assert!(three_quarters
        .target
        .abs_diff_eq(Vec3::new(5.0, 0.0, -5.0), 1e-5));
}

#[test]
fn end_of_path_is_exactly_last_waypoint() {
    let path = three_point_path();
    assert_eq!(path.segment_at(1.0), (1, 1.0));
    let end = path.sample(1.0);
    assert_eq!(end.eye, Vec3::new(10.0, 10.0, 0.0));
    assert_eq!(end.target, Vec3::ZERO);

    let start = path.sample(0.0);
    assert_eq!(start.eye, Vec3::ZERO);
    assert_eq!(start.target, Vec3::new(0.0, 0.0, -10.0));
}

#[test]
fn segment_boundary_hits_the_shared_waypoint() {
    let path = three_point_path();
    let at = path.sample(0.5);
    assert_eq!(at.eye, Vec3::new(10.0, 0.0, 0.0));
    let below = path.sample(0.5 - 1e-4);
    let above = path.sample(0.5 + 1e-4);
    assert!(below.eye.distance(at.eye) < 1e-2);
    assert!(above.eye.distance(at.eye) < 1e-2);
}

#[test]
fn sampling_is_continuous_over_the_whole_range() {
    let path = SceneConfig::default().camera_path().unwrap();
    let steps = 20_000;
    let step = 1.0 / steps as f32;
    let longest = path
        .waypoints()
        .windows(2)
        .map(|w| {
            w[0].position
                .distance(w[1].position)
                .max(w[0].target.distance(w[1].target))
        })
        .fold(0.0_f32, f32::max);
    // Along one segment the pose moves at most `longest * (M-1)` per unit of progress.
    let bound = longest * (path.len() - 1) as f32 * step * 1.01 + 1e-3;

    let mut prev = path.sample(0.0);
    for i in 1..=steps {
        let pose = path.sample(i as f32 * step);
        assert!(
            pose.eye.distance(prev.eye) <= bound,
            "eye jumped at step {i}"
        );
        assert!(
            pose.target.distance(prev.target) <= bound,
            "target jumped at step {i}"
        );
        prev = pose;
    }
}

#[test]
fn progress_outside_unit_range_clamps_to_ends() {
    let path = three_point_path();
    assert_eq!(path.sample(-1.0), path.sample(0.0));
    assert_eq!(path.sample(2.0), path.sample(1.0));
    assert_eq!(path.sample(f32::NAN), path.sample(0.0));
}

#[test]
fn two_waypoints_are_the_minimum() {
    assert!(matches!(
        CameraPath::new(vec![]),
        Err(ConfigError::TooFewWaypoints(0))
    ));
    assert!(matches!(
        CameraPath::new(vec![Waypoint::new([0.0; 3], [1.0; 3])]),
        Err(ConfigError::TooFewWaypoints(1))
    ));
    let path = CameraPath::new(vec![
        Waypoint::new([0.0; 3], [1.0; 3]),
        Waypoint::new([2.0; 3], [1.0; 3]),
    ])
    .unwrap();
    assert_eq!(path.len(), 2);
    assert!(path
        .sample(0.5)
        .eye
        .abs_diff_eq(Vec3::splat(1.0), 1e-6));
}

#[test]
fn non_finite_waypoints_are_rejected() {
    let err = CameraPath::new(vec![
        Waypoint::new([0.0; 3], [0.0; 3]),
        Waypoint::new([0.0; 3], [f32::NAN, 0.0, 0.0]),
    ]);
    assert!(matches!(err, Err(ConfigError::NonFiniteWaypoint(1))));
}

#[test]
fn lerp_exact_returns_endpoints() {
    let a = Vec3::new(0.1, 0.2, 0.3);
    let b = Vec3::new(7.7, -3.3, 1e6);
    assert_eq!(lerp_exact(a, b, 0.0), a);
    assert_eq!(lerp_exact(a, b, 1.0), b);
}

#[test]
fn field_of_view_narrows_on_wide_screens() {
    assert_eq!(fov_for_aspect(16.0 / 9.0), 75.0);
    assert_eq!(fov_for_aspect(2.0), 70.0);
    assert_eq!(fov_for_aspect(0.5), 75.0);

    let mut camera = Camera::new(three_point_path().sample(0.0), 2.4);
    assert!((camera.fovy_radians - 70f32.to_radians()).abs() < 1e-6);
    camera.set_aspect(1.2);
    assert!((camera.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    // degenerate sizes are ignored
    camera.set_aspect(0.0);
    camera.set_aspect(f32::NAN);
    assert_eq!(camera.aspect, 1.2);
}

#[test]
fn look_at_target_lands_in_the_middle_of_the_screen() {
    let pose = CameraPose {
        eye: Vec3::new(0.0, 80.0, 100.0),
        target: Vec3::new(0.0, 20.0, 0.0),
    };
    let camera = Camera::new(pose, 1.5);
    let clip = camera.view_projection() * pose.target.extend(1.0);
    let ndc = clip.xyz() / clip.w;
    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}
