use bevy::prelude::*;
use constants::scroll::{DESCENT_TARGET, NATIVE_SCROLL_LENGTH, OVERHEAD_POINT, TOP_EPSILON};

use crate::engine::animation::binding::{AnimationBinding, seek_binding};
use crate::engine::camera::free_camera::CameraControls;

/// Marker inserted when loading finishes; the driver arms once the
/// switch-driven intro tween has released the camera.
#[derive(Resource)]
pub struct ScrollArmPending;

/// Current normalized scroll position and whether the viewer is inside
/// the scroll-driven region.
#[derive(Resource, Default)]
pub struct ScrollState {
    pub normalized: f32,
    pub inside: bool,
}

/// The armed choreography. The camera pose at arming time is the fixed
/// origin of the mapping, which makes the whole thing a pure function
/// of the scroll position.
#[derive(Resource)]
pub struct ScrollTimeline {
    pub start_position: Vec3,
    pub start_rotation: Quat,
    pub clip_duration: f32,
}

/// Orientation looking straight down.
fn look_down() -> Quat {
    Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}

/// Pose and playhead for a normalized scroll position.
///
/// First half: ascend from the armed pose to the overhead point while
/// turning to look straight down. Second half: scrub the bound clips
/// from 0 to their full duration while descending into the subject.
/// Linear throughout; the same position always yields the same result
/// regardless of scrub direction.
pub fn sample_timeline(
    t: f32,
    start_position: Vec3,
    start_rotation: Quat,
    clip_duration: f32,
) -> (Vec3, Quat, f32) {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        let u = t * 2.0;
        (
            start_position.lerp(OVERHEAD_POINT, u),
            start_rotation.slerp(look_down(), u),
            0.0,
        )
    } else {
        let u = (t - 0.5) * 2.0;
        (
            OVERHEAD_POINT.lerp(DESCENT_TARGET, u),
            look_down(),
            u * clip_duration,
        )
    }
}

/// Normalized position of a scrolling document, 0 at the top and 1
/// with the bottom of the content reached.
pub fn normalized_scroll(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f32 {
    let range = scroll_height - viewport_height;
    if range <= 0.0 {
        return 0.0;
    }
    (scroll_y / range).clamp(0.0, 1.0) as f32
}

/// Arms the choreography once the intro tween has finished, and only
/// when there is a scrubbable animation binding. A no-op session
/// (no binding, zero duration) simply never arms.
pub fn arm_scroll_driver(
    pending: Option<Res<ScrollArmPending>>,
    timeline: Option<Res<ScrollTimeline>>,
    tween: Option<Res<crate::engine::camera::tween::CameraTween>>,
    binding: Option<Res<AnimationBinding>>,
    camera_query: Query<&Transform, With<Camera3d>>,
    mut commands: Commands,
) {
    if pending.is_none() || timeline.is_some() || tween.is_some() {
        return;
    }
    let Some(binding) = binding else {
        return;
    };
    if !binding.is_scrubbable() {
        return;
    }
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };

    info!("Scroll choreography armed");
    commands.remove_resource::<ScrollArmPending>();
    commands.insert_resource(ScrollTimeline {
        start_position: camera_transform.translation,
        start_rotation: camera_transform.rotation,
        clip_duration: binding.total_duration,
    });
}

/// Reads the hosting page's scroll position.
#[cfg(target_arch = "wasm32")]
pub fn read_scroll_position(timeline: Option<Res<ScrollTimeline>>, mut scroll: ResMut<ScrollState>) {
    if timeline.is_none() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(scroll_y) = window.scroll_y() else {
        return;
    };
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let Some(content) = window.document().and_then(|d| d.document_element()) else {
        return;
    };
    scroll.normalized = normalized_scroll(scroll_y, content.scroll_height() as f64, viewport_height);
}

/// Accumulates wheel input into a virtual scroll position on native
/// builds, where there is no document to scroll.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_scroll_position(
    timeline: Option<Res<ScrollTimeline>>,
    mut scroll: ResMut<ScrollState>,
    mut wheel_events: EventReader<bevy::input::mouse::MouseWheel>,
) {
    if timeline.is_none() {
        wheel_events.clear();
        return;
    }
    for ev in wheel_events.read() {
        scroll.normalized = (scroll.normalized - ev.y / NATIVE_SCROLL_LENGTH).clamp(0.0, 1.0);
    }
}

/// Applies the armed choreography: camera pose plus a forced seek of
/// the bound animations at the exact playhead time, in both scrub
/// directions.
pub fn apply_scroll_timeline(
    timeline: Option<Res<ScrollTimeline>>,
    mut scroll: ResMut<ScrollState>,
    mut controls: ResMut<CameraControls>,
    binding: Option<Res<AnimationBinding>>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut players: Query<&mut AnimationPlayer>,
) {
    let Some(timeline) = timeline else {
        return;
    };

    // Entering the region takes the camera away from the viewer;
    // scrolling back above the top hands it back.
    let inside = scroll.normalized > TOP_EPSILON;
    if inside != scroll.inside {
        scroll.inside = inside;
        controls.enabled = !inside;
    }
    if !inside {
        return;
    }

    let (position, rotation, playhead) = sample_timeline(
        scroll.normalized,
        timeline.start_position,
        timeline.start_rotation,
        timeline.clip_duration,
    );

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        camera_transform.translation = position;
        camera_transform.rotation = rotation;
    }
    if let Some(binding) = binding.as_deref() {
        seek_binding(binding, &mut players, playhead);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_POS: Vec3 = Vec3::new(10.0, 3.0, 8.0);

    fn start_rot() -> Quat {
        Quat::from_rotation_y(0.4)
    }

    #[test]
    fn endpoints_match_the_choreography() {
        let (pos, rot, playhead) = sample_timeline(0.0, START_POS, start_rot(), 4.0);
        assert!((pos - START_POS).length() < 1e-6);
        assert!(rot.angle_between(start_rot()) < 1e-6);
        assert_eq!(playhead, 0.0);

        let (pos, _, playhead) = sample_timeline(0.5, START_POS, start_rot(), 4.0);
        assert!((pos - OVERHEAD_POINT).length() < 1e-6);
        assert_eq!(playhead, 0.0);

        let (pos, rot, playhead) = sample_timeline(1.0, START_POS, start_rot(), 4.0);
        assert!((pos - DESCENT_TARGET).length() < 1e-6);
        assert!(rot.angle_between(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)) < 1e-6);
        assert!((playhead - 4.0).abs() < 1e-6);
    }

    #[test]
    fn scrubbing_has_no_hysteresis() {
        // Visit the same positions ascending and descending; the
        // sampled pose must be identical because the mapping carries
        // no internal state.
        let forward: Vec<_> = (0..=100)
            .map(|i| sample_timeline(i as f32 / 100.0, START_POS, start_rot(), 4.0))
            .collect();
        let backward: Vec<_> = (0..=100)
            .rev()
            .map(|i| sample_timeline(i as f32 / 100.0, START_POS, start_rot(), 4.0))
            .collect();
        for (f, b) in forward.iter().zip(backward.iter().rev()) {
            assert_eq!(f.0, b.0);
            assert_eq!(f.1, b.1);
            assert_eq!(f.2, b.2);
        }
    }

    #[test]
    fn playhead_is_linear_and_monotone() {
        let mut last = 0.0;
        for i in 0..=100 {
            let (_, _, playhead) = sample_timeline(i as f32 / 100.0, START_POS, start_rot(), 4.0);
            assert!(playhead >= last);
            last = playhead;
        }
        assert!((last - 4.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_scroll_clamps() {
        let below = sample_timeline(-0.5, START_POS, start_rot(), 4.0);
        let top = sample_timeline(0.0, START_POS, start_rot(), 4.0);
        assert_eq!(below.0, top.0);

        let above = sample_timeline(1.5, START_POS, start_rot(), 4.0);
        assert_eq!(above.0, DESCENT_TARGET);
        assert!((above.2 - 4.0).abs() < 1e-6);
    }

    #[test]
    fn document_normalization_handles_degenerate_pages() {
        assert_eq!(normalized_scroll(0.0, 2000.0, 800.0), 0.0);
        assert_eq!(normalized_scroll(1200.0, 2000.0, 800.0), 1.0);
        assert_eq!(normalized_scroll(600.0, 2000.0, 800.0), 0.5);
        // Content shorter than the viewport: nothing to scroll.
        assert_eq!(normalized_scroll(100.0, 500.0, 800.0), 0.0);
    }
}
