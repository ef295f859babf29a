//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state
//! transitions, and plugin initialisation for both native and WASM
//! targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset loading systems, scene switching,
/// scroll choreography and platform-specific configuration.
pub mod app_setup;

/// Application state machine driven by the loading smoother.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
