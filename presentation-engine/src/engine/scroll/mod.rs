//! Scroll-driven camera and animation choreography.
//!
//! Maps the normalized scroll position of the hosting page (or an
//! accumulated wheel position on native) straight onto camera pose and
//! animation playhead, with no easing, so scrubbing is reversible.

/// Scroll position sources and the scroll-to-pose mapping.
pub mod driver;
