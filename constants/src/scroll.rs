use bevy::prelude::*;

/// Camera position at the midpoint of the scroll choreography, looking
/// down over the subject. The small z offset keeps the view basis away
/// from the exact vertical.
pub const OVERHEAD_POINT: Vec3 = Vec3::new(0.0, 5.0, 0.1);

/// Camera position at the end of the scroll choreography, descended
/// into the subject.
pub const DESCENT_TARGET: Vec3 = Vec3::ZERO;

/// Virtual scroll length in wheel units used on native builds, where
/// there is no document to scroll.
pub const NATIVE_SCROLL_LENGTH: f32 = 40.0;

/// Normalized scroll positions below this count as "at the top", which
/// re-enables free camera control.
pub const TOP_EPSILON: f32 = 1.0e-4;
