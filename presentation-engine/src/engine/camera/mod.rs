//! Camera control: the free orbit-style controller and the scripted
//! switch tween.
//!
//! The two drivers are mutually exclusive in time: the tween owns the
//! camera while a scene switch is in flight, the free controller when
//! controls are enabled, and the scroll driver between them.

/// Free camera controller with mouse look, wheel dolly and WASD.
pub mod free_camera;

/// Scripted position tween with per-frame look-at re-orientation.
pub mod tween;
