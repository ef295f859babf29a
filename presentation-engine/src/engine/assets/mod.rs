//! Asset declarations for the presentation.
//!
//! The presentation manifest is the single JSON configuration file:
//! it names every downloadable asset with its declared size and lays
//! out the scene table with camera framings.

/// Presentation manifest JSON asset with asset and scene tables.
pub mod presentation_manifest;
