//! Time-based interpolation support.
//!
//! Easing curves shared by the progress smoother and the camera tween,
//! plus the scroll-scrubbed binding over the loaded model animations.

/// Merged animation binding with an externally driven playhead.
pub mod binding;

/// Easing curves mapping normalized time to normalized progress.
pub mod easing;
