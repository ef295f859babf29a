/// Fraction the scripted initial ramp animates toward before real
/// progress takes over.
pub const RAMP_TARGET: f32 = 0.15;

/// Duration of the scripted initial ramp in seconds.
pub const RAMP_DURATION: f32 = 1.5;

/// Smoothing factor applied when the target progress chases the real
/// byte-weighted progress.
pub const TARGET_SMOOTHING: f32 = 0.05;

/// Smoothing factor applied when the displayed progress chases the
/// target progress.
pub const VISUAL_SMOOTHING: f32 = 0.1;

/// Additive nudge applied when no new bytes arrived in a tick, so the
/// indicator never looks stuck.
pub const STALL_NUDGE: f32 = 0.0002;

/// Displayed progress never exceeds this value until every asset has
/// actually completed.
pub const VISUAL_CAP: f32 = 0.999;

/// Displayed progress above this value (with all assets loaded) starts
/// the completion sequence.
pub const COMPLETION_THRESHOLD: f32 = 0.99;

/// Duration of the final fill from the trigger value to exactly 1.0.
pub const FILL_DURATION: f32 = 0.5;

/// Duration of the overlay opacity fade.
pub const FADE_DURATION: f32 = 1.5;

/// The fade starts this long before the fill ends, so the two overlap
/// near the end of the fill.
pub const FADE_OVERLAP: f32 = 0.4;
