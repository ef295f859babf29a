//! Scene groups and switching.
//!
//! Scenes are fixed at startup: one root entity per manifest entry,
//! exactly one visible at a time, each carrying its own camera framing
//! and optional environment lighting.

/// Scene root registry built from the presentation manifest.
pub mod registry;

/// Generated star backdrop behind every scene.
pub mod starfield;

/// Scene switching: visibility, environment hand-over and the camera
/// tween, reachable from digit keys and the RPC bridge.
pub mod switcher;
