use bevy::prelude::*;

use crate::engine::animation::easing::ease_in_out;

/// Explicit interpolation task for the camera position.
///
/// Exists as a resource only while a tween is in flight; inserting a
/// new one replaces (cancels) the previous tween, so the last caller
/// wins and two tweens never fight over the camera.
#[derive(Resource, Debug, Clone)]
pub struct CameraTween {
    start: Vec3,
    end: Vec3,
    /// Re-applied with `look_at` on every intermediate frame, so the
    /// look direction tracks smoothly instead of being interpolated.
    pub look_at: Vec3,
    duration: f32,
    elapsed: f32,
}

impl CameraTween {
    pub fn new(start: Vec3, end: Vec3, look_at: Vec3, duration: f32) -> Self {
        Self {
            start,
            end,
            look_at,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the current position.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed += dt;
        self.start.lerp(self.end, ease_in_out(self.progress()))
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Drives the active tween, if any, and removes it once finished.
pub fn advance_camera_tween(
    tween: Option<ResMut<CameraTween>>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    time: Res<Time>,
    mut commands: Commands,
) {
    let Some(mut tween) = tween else {
        return;
    };
    if let Ok(mut camera_transform) = camera_query.single_mut() {
        camera_transform.translation = tween.advance(time.delta_secs());
        let look_at = tween.look_at;
        camera_transform.look_at(look_at, Vec3::Y);
    }
    if tween.finished() {
        commands.remove_resource::<CameraTween>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_spans_start_to_end() {
        let mut tween = CameraTween::new(Vec3::ZERO, Vec3::new(10.0, 3.0, 8.0), Vec3::ZERO, 1.5);
        assert_eq!(tween.advance(0.0), Vec3::ZERO);
        let pos = tween.advance(1.5);
        assert!((pos - Vec3::new(10.0, 3.0, 8.0)).length() < 1e-5);
        assert!(tween.finished());
    }

    #[test]
    fn overshoot_clamps_to_end() {
        let mut tween = CameraTween::new(Vec3::ZERO, Vec3::X, Vec3::ZERO, 1.0);
        let pos = tween.advance(100.0);
        assert_eq!(pos, Vec3::X);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut tween = CameraTween::new(Vec3::ZERO, Vec3::X, Vec3::ZERO, 0.0);
        assert_eq!(tween.advance(1.0 / 60.0), Vec3::X);
        assert!(tween.finished());
    }

    #[test]
    fn midpoint_is_between_endpoints() {
        let mut tween = CameraTween::new(Vec3::ZERO, Vec3::splat(2.0), Vec3::ZERO, 2.0);
        let pos = tween.advance(1.0);
        assert!(pos.x > 0.0 && pos.x < 2.0);
    }
}
