use bevy::prelude::*;

/// Duration of the camera tween played on a scene switch, in seconds.
pub const SWITCH_TWEEN_DURATION: f32 = 1.5;

/// Camera pose before any scene has been selected.
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Free-camera transform smoothing rate, per second.
pub const FREE_CAMERA_LERP_RATE: f32 = 12.0;

/// Free-camera yaw sensitivity, radians per pixel of mouse motion.
pub const YAW_SENSITIVITY: f32 = 0.0035;

/// Free-camera pitch sensitivity, radians per pixel of mouse motion.
pub const PITCH_SENSITIVITY: f32 = 0.0030;

/// Pitch is clamped short of straight up/down to keep the look basis
/// well defined.
pub const PITCH_LIMIT: f32 = 1.55;
