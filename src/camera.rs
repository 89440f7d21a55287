//! Fly camera, perspective projection and the input controller driving them.

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use instant::Duration;
use winit::{
    event::{ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

/// wgpu clips depth to `0..1`, cgmath produces OpenGL style `-1..1`.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const PITCH_LIMIT: Deg<f32> = Deg(89.9);
pub const MIN_FOV: Deg<f32> = Deg(1.0);
pub const MAX_FOV: Deg<f32> = Deg(120.0);

/// Position plus yaw/pitch in degrees. Yaw -90 looks down -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
}

impl Camera {
    pub const HOME_POSITION: Point3<f32> = Point3 { x: 0.0, y: 0.0, z: 5.0 };
    pub const HOME_YAW: Deg<f32> = Deg(-90.0);
    pub const HOME_PITCH: Deg<f32> = Deg(0.0);

    pub fn new<V: Into<Point3<f32>>, Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    pub fn home() -> Self {
        Self::new(Self::HOME_POSITION, Self::HOME_YAW, Self::HOME_PITCH)
    }

    pub fn forward(&self) -> Vector3<f32> {
        let (sin_pitch, cos_pitch) = Rad::from(self.pitch).0.sin_cos();
        let (sin_yaw, cos_yaw) = Rad::from(self.yaw).0.sin_cos();
        Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.forward().cross(Vector3::unit_y()).normalize()
    }

    /// Camera relative up; tilts with the pitch.
    pub fn up(&self) -> Vector3<f32> {
        self.right().cross(self.forward()).normalize()
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::home()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    aspect: f32,
    pub fovy: Deg<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Deg<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Narrow the field of view by `degrees` (negative widens), clamped.
    pub fn zoom(&mut self, degrees: f32) {
        self.fovy = Deg((self.fovy.0 - degrees).clamp(MIN_FOV.0, MAX_FOV.0));
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Keyboard/mouse state accumulated between frames.
///
/// Movement axes are held keys, mouse deltas and scroll are consumed by
/// [`CameraController::update`].
#[derive(Debug)]
pub struct CameraController {
    forward: f32,
    backward: f32,
    right: f32,
    left: f32,
    sink: f32,
    rise: f32,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    scroll: f32,
    /// Units per second.
    speed: f32,
    /// Degrees per pixel.
    sensitivity: f32,
    /// Degrees of fov per scroll notch.
    zoom_speed: f32,
    reset: bool,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32, zoom_speed: f32) -> Self {
        Self {
            forward: 0.0,
            backward: 0.0,
            right: 0.0,
            left: 0.0,
            sink: 0.0,
            rise: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            scroll: 0.0,
            speed,
            sensitivity,
            zoom_speed,
            reset: false,
        }
    }

    /// Returns `true` when the key is one of the camera bindings.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) -> bool {
        let amount = if state == ElementState::Pressed { 1.0 } else { 0.0 };
        match key {
            KeyCode::KeyW => self.forward = amount,
            KeyCode::KeyS => self.backward = amount,
            KeyCode::KeyD => self.right = amount,
            KeyCode::KeyA => self.left = amount,
            KeyCode::KeyQ => self.sink = amount,
            KeyCode::KeyE => self.rise = amount,
            KeyCode::KeyR => {
                if state == ElementState::Pressed {
                    self.reset = true;
                }
            }
            _ => return false,
        }
        true
    }

    /// Raw mouse motion in pixels; only fed while the cursor is locked.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.rotate_horizontal += dx as f32;
        self.rotate_vertical += dy as f32;
    }

    pub fn handle_scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, lines) => *lines,
            // roughly one notch per 50 pixels on touchpads
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
        };
    }

    /// Drop pending mouse motion, e.g. when the cursor gets locked again.
    pub fn clear_mouse(&mut self) {
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
    }

    pub fn update(&mut self, camera: &mut Camera, projection: &mut Projection, dt: Duration) {
        if std::mem::take(&mut self.reset) {
            *camera = Camera::home();
            self.clear_mouse();
        }

        let dt = dt.as_secs_f32();
        let forward = camera.forward();
        let right = camera.right();
        let amount = self.speed * dt;
        camera.position += forward * (self.forward - self.backward) * amount;
        camera.position += right * (self.right - self.left) * amount;
        camera.position += camera.up() * (self.rise - self.sink) * amount;

        camera.yaw += Deg(self.rotate_horizontal * self.sensitivity);
        camera.pitch = Deg(
            (camera.pitch.0 - self.rotate_vertical * self.sensitivity)
                .clamp(-PITCH_LIMIT.0, PITCH_LIMIT.0),
        );
        self.clear_mouse();

        if self.scroll != 0.0 {
            projection.zoom(self.scroll * self.zoom_speed);
            self.scroll = 0.0;
        }
    }
}
