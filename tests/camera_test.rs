use approx::assert_relative_eq;
use cgmath::{Deg, InnerSpace, Point3};
use instant::Duration;
use lit_ngin::camera::{Camera, CameraController, MAX_FOV, MIN_FOV, PITCH_LIMIT, Projection};
use winit::{
    event::{ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

fn controller() -> CameraController {
    CameraController::new(5.0, 0.1, 3.0)
}

fn projection() -> Projection {
    Projection::new(800, 600, Deg(60.0), 0.1, 100.0)
}

#[test]
fn home_camera_looks_down_negative_z() {
    let camera = Camera::home();
    let forward = camera.forward();
    assert_relative_eq!(forward.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(forward.z, -1.0, epsilon = 1e-6);
    assert_eq!(camera.position, Point3::new(0.0, 0.0, 5.0));
}

#[test]
fn held_keys_move_the_camera() {
    let mut camera = Camera::home();
    let mut projection = projection();
    let mut controller = controller();

    assert!(controller.handle_key(KeyCode::KeyW, ElementState::Pressed));
    assert!(controller.handle_key(KeyCode::KeyQ, ElementState::Pressed));
    controller.update(&mut camera, &mut projection, Duration::from_secs(1));

    assert_relative_eq!(camera.position.z, 0.0, epsilon = 1e-5);
    // Q sinks along the camera's own up axis
    assert_relative_eq!(camera.position.y, -5.0, epsilon = 1e-5);

    controller.handle_key(KeyCode::KeyW, ElementState::Released);
    controller.handle_key(KeyCode::KeyQ, ElementState::Released);
    let before = camera.position;
    controller.update(&mut camera, &mut projection, Duration::from_secs(1));
    assert_eq!(camera.position, before);

    assert!(!controller.handle_key(KeyCode::KeyZ, ElementState::Pressed));
}

#[test]
fn vertical_keys_follow_the_camera_pitch() {
    let mut camera = Camera::home();
    camera.pitch = Deg(45.0);
    let mut projection = projection();
    let mut controller = controller();

    let up = camera.up();
    assert_relative_eq!(up.dot(camera.forward()), 0.0, epsilon = 1e-6);
    assert_relative_eq!(up.dot(camera.right()), 0.0, epsilon = 1e-6);
    // looking up tilts the up axis back towards +Z
    assert!(up.y > 0.0 && up.z > 0.0);

    let start = camera.position;
    controller.handle_key(KeyCode::KeyE, ElementState::Pressed);
    controller.update(&mut camera, &mut projection, Duration::from_secs(1));
    let moved = camera.position - start;
    assert_relative_eq!(moved.y, moved.z.abs(), epsilon = 1e-4);
    assert_relative_eq!(moved.magnitude(), 5.0, epsilon = 1e-4);
}

#[test]
fn pitch_stays_inside_the_limit() {
    let mut camera = Camera::home();
    let mut projection = projection();
    let mut controller = controller();

    controller.handle_mouse(0.0, -100_000.0);
    controller.update(&mut camera, &mut projection, Duration::from_millis(16));
    assert_eq!(camera.pitch, PITCH_LIMIT);

    controller.handle_mouse(0.0, 100_000.0);
    controller.update(&mut camera, &mut projection, Duration::from_millis(16));
    assert_eq!(camera.pitch, -PITCH_LIMIT);
}

#[test]
fn mouse_motion_turns_the_camera() {
    let mut camera = Camera::home();
    let mut projection = projection();
    let mut controller = controller();

    controller.handle_mouse(100.0, 0.0);
    controller.update(&mut camera, &mut projection, Duration::from_millis(16));
    assert_relative_eq!(camera.yaw.0, -80.0, epsilon = 1e-4);

    // consumed by the previous update
    controller.update(&mut camera, &mut projection, Duration::from_millis(16));
    assert_relative_eq!(camera.yaw.0, -80.0, epsilon = 1e-4);
}

#[test]
fn scrolling_zooms_within_bounds() {
    let mut camera = Camera::home();
    let mut projection = projection();
    let mut controller = controller();

    controller.handle_scroll(&MouseScrollDelta::LineDelta(0.0, 2.0));
    controller.update(&mut camera, &mut projection, Duration::from_millis(16));
    assert_relative_eq!(projection.fovy.0, 54.0, epsilon = 1e-4);

    projection.zoom(1_000.0);
    assert_eq!(projection.fovy, MIN_FOV);
    projection.zoom(-1_000.0);
    assert_eq!(projection.fovy, MAX_FOV);
}

#[test]
fn reset_returns_to_the_home_pose() {
    let mut camera = Camera::new((3.0, 1.0, -2.0), Deg(45.0), Deg(30.0));
    let mut projection = projection();
    let mut controller = controller();

    controller.handle_key(KeyCode::KeyR, ElementState::Pressed);
    controller.handle_key(KeyCode::KeyR, ElementState::Released);
    controller.update(&mut camera, &mut projection, Duration::from_millis(16));

    assert_eq!(camera, Camera::home());
}

#[test]
fn resize_keeps_aspect_positive() {
    let mut projection = projection();
    projection.resize(1920, 1080);
    assert_relative_eq!(projection.aspect(), 1920.0 / 1080.0);
    projection.resize(0, 0);
    assert_relative_eq!(projection.aspect(), 1.0);
}
