//! Shared tuning constants for the presentation engine.

pub mod camera;
pub mod loading;
pub mod scroll;
