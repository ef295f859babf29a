//! Cross-cutting runtime systems.

/// FPS overlay (native) and periodic FPS notifications to the host.
pub mod fps_tracking;
