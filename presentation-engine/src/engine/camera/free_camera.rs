use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    FREE_CAMERA_LERP_RATE, INITIAL_CAMERA_POSITION, PITCH_LIMIT, PITCH_SENSITIVITY,
    YAW_SENSITIVITY,
};

use crate::engine::camera::tween::CameraTween;
use crate::engine::scroll::driver::ScrollTimeline;

/// Whether the viewer may drive the camera. Disabled during loading and
/// while the scroll choreography owns the camera.
#[derive(Resource, Default)]
pub struct CameraControls {
    pub enabled: bool,
}

/// Free camera state: a focus point plus yaw/pitch look angles. The
/// rendered transform chases this state with a smoothing lerp.
#[derive(Resource)]
pub struct FreeCamera {
    pub focus_point: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self {
            focus_point: INITIAL_CAMERA_POSITION,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl FreeCamera {
    /// Adopt the camera's current pose, so taking over from a tween or
    /// the scroll driver causes no jump.
    fn sync_from(&mut self, transform: &Transform) {
        self.focus_point = transform.translation;
        let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        self.yaw = yaw;
        self.pitch = pitch;
    }
}

pub fn free_camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut free_camera: ResMut<FreeCamera>,
    controls: Res<CameraControls>,
    tween: Option<Res<CameraTween>>,
    timeline: Option<Res<ScrollTimeline>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    // While another driver owns the camera, shadow its pose so the
    // hand-over is seamless, and drop this frame's input.
    if !controls.enabled || tween.is_some() {
        free_camera.sync_from(&camera_transform);
        mouse_motion.clear();
        scroll_events.clear();
        return;
    }

    // The wheel belongs to the scroll choreography once it is armed;
    // a downward tick must enter the region, not dolly the camera.
    if timeline.is_some() {
        scroll_events.clear();
    }

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    // Right-drag to look around.
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        free_camera.yaw -= mouse_delta.x * YAW_SENSITIVITY;
        free_camera.pitch -= mouse_delta.y * PITCH_SENSITIVITY;
        free_camera.pitch = free_camera.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    // Wheel dolly along the view direction.
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    let view_rot = Quat::from_euler(EulerRot::YXZ, free_camera.yaw, free_camera.pitch, 0.0);
    let forward = (view_rot * Vec3::Z).normalize();

    if scroll_accum.abs() > f32::EPSILON {
        let dolly_speed = (free_camera.focus_point.length() * 0.2).clamp(0.5, 50.0);
        free_camera.focus_point -= forward * (scroll_accum * dolly_speed);
    }

    // Keyboard movement.
    let mut move_input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        move_input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        move_input.y -= 1.0;
    }

    if move_input != Vec3::ZERO {
        let right = (view_rot * Vec3::X).normalize();
        let up = Vec3::Y;

        // Shift = faster, ctrl = slower.
        let mut speed = (free_camera.focus_point.length() * 1.0).clamp(2.0, 50.0);
        if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
            speed *= 3.5;
        }
        if keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
            speed *= 0.25;
        }

        let world_delta = right * move_input.x + up * move_input.y + forward * move_input.z;
        free_camera.focus_point += world_delta.normalize() * speed * time.delta_secs();
    }

    let target_rot = Quat::from_euler(EulerRot::YXZ, free_camera.yaw, free_camera.pitch, 0.0);
    let target_pos = free_camera.focus_point;

    let lerp_speed = (FREE_CAMERA_LERP_RATE * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target_pos, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}
