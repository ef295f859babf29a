//! Asset loading pipeline: download tracking, progress smoothing and
//! the loading overlay.
//!
//! Manages the sequence from manifest parsing through per-asset byte
//! tracking to the animated completion hand-off into the running state.

/// Per-frame polling of asset server load state and host byte reports.
pub mod asset_poller;

/// Loading overlay UI: percentage readout, bar fill and opacity fade.
pub mod loading_screen;

/// Presentation manifest loading and scene construction.
///
/// Registers assets with the tracker and starts every download once the
/// manifest has parsed.
pub mod manifest_loader;

/// Progress smoothing state machine driving the displayed percentage.
pub mod smoother;

/// Byte-weighted download progress aggregation across all assets.
pub mod tracker;
