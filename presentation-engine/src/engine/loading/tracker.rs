use bevy::prelude::*;

/// Download state of one registered asset.
#[derive(Debug, Clone)]
struct AssetRecord {
    id: String,
    loaded: u64,
    total: u64,
    complete: bool,
}

/// Accumulates byte-level download progress across the fixed set of
/// assets declared in the manifest.
///
/// There is one writer per asset (the loader reporting for it), so
/// last-write-wins per field is sufficient; reads between writes only
/// ever see a slightly stale aggregate.
#[derive(Resource, Default)]
pub struct AssetProgress {
    assets: Vec<AssetRecord>,
    completed: usize,
    all_loaded: bool,
}

impl AssetProgress {
    /// Seed a descriptor with zero loaded bytes and a fixed declared
    /// total. Re-registering an id is ignored.
    pub fn register(&mut self, id: &str, total_bytes: u64) {
        if self.assets.iter().any(|a| a.id == id) {
            return;
        }
        self.assets.push(AssetRecord {
            id: id.to_string(),
            loaded: 0,
            total: total_bytes,
            complete: false,
        });
    }

    /// Record a progress report. Reports are clamped to the declared
    /// total and never move a descriptor backwards, so out-of-order
    /// callbacks cannot decrease the aggregate.
    pub fn report(&mut self, id: &str, loaded_bytes: u64) {
        if let Some(record) = self.assets.iter_mut().find(|a| a.id == id) {
            record.loaded = record.loaded.max(loaded_bytes.min(record.total));
        }
    }

    /// Finalize an asset: force its loaded bytes to the declared total.
    /// Returns true on the single transition where the last asset
    /// completes; the all-loaded flag latches from then on.
    pub fn mark_complete(&mut self, id: &str) -> bool {
        let Some(record) = self.assets.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if record.complete {
            return false;
        }
        record.loaded = record.total;
        record.complete = true;
        self.completed += 1;

        if self.completed == self.assets.len() && !self.all_loaded {
            self.all_loaded = true;
            return true;
        }
        false
    }

    /// A manifest may declare no assets at all; there is nothing to
    /// wait for, so the all-loaded flag latches right away. Returns
    /// true on the transition, like `mark_complete`.
    pub fn complete_if_empty(&mut self) -> bool {
        if self.assets.is_empty() && !self.all_loaded {
            self.all_loaded = true;
            return true;
        }
        false
    }

    /// Byte-weighted average progress in [0, 1], recomputed on demand.
    pub fn real_progress(&self) -> f32 {
        let total: u64 = self.assets.iter().map(|a| a.total).sum();
        if total == 0 {
            return 0.0;
        }
        let loaded: u64 = self.assets.iter().map(|a| a.loaded).sum();
        (loaded as f64 / total as f64) as f32
    }

    /// Whether every registered asset has been marked complete.
    pub fn all_loaded(&self) -> bool {
        self.all_loaded
    }

    pub fn is_complete(&self, id: &str) -> bool {
        self.assets
            .iter()
            .any(|a| a.id == id && a.complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_asset_tracker() -> AssetProgress {
        let mut tracker = AssetProgress::default();
        tracker.register("environment", 97_517_568);
        tracker.register("liquid_and_pill", 3_145_728);
        tracker.register("modular_parts", 582_656);
        tracker
    }

    #[test]
    fn progress_is_byte_weighted() {
        let mut tracker = three_asset_tracker();
        tracker.report("modular_parts", 582_656);
        let expected = 582_656.0 / (97_517_568.0 + 3_145_728.0 + 582_656.0);
        assert!((tracker.real_progress() - expected as f32).abs() < 1e-6);
    }

    #[test]
    fn progress_never_decreases_for_monotone_reports() {
        let mut tracker = three_asset_tracker();
        let mut last = 0.0;
        for bytes in [0, 1_000_000, 40_000_000, 40_000_000, 97_517_568] {
            tracker.report("environment", bytes);
            let p = tracker.real_progress();
            assert!(p >= last);
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
    }

    #[test]
    fn out_of_order_reports_are_clamped_not_applied() {
        let mut tracker = three_asset_tracker();
        tracker.report("liquid_and_pill", 2_000_000);
        tracker.report("liquid_and_pill", 500_000);
        let expected = 2_000_000.0 / (97_517_568.0 + 3_145_728.0 + 582_656.0);
        assert!((tracker.real_progress() - expected as f32).abs() < 1e-6);
    }

    #[test]
    fn over_reported_bytes_clamp_to_declared_total() {
        let mut tracker = three_asset_tracker();
        tracker.report("environment", u64::MAX);
        tracker.report("liquid_and_pill", u64::MAX);
        tracker.report("modular_parts", u64::MAX);
        assert!(tracker.real_progress() <= 1.0);
    }

    #[test]
    fn full_progress_iff_all_marked_complete() {
        let mut tracker = three_asset_tracker();
        tracker.report("environment", 97_517_568);
        tracker.report("liquid_and_pill", 3_145_728);
        tracker.report("modular_parts", 582_656);
        assert!((tracker.real_progress() - 1.0).abs() < 1e-6);
        assert!(!tracker.all_loaded());

        assert!(!tracker.mark_complete("environment"));
        assert!(!tracker.mark_complete("liquid_and_pill"));
        assert!(tracker.mark_complete("modular_parts"));
        assert!(tracker.all_loaded());
        assert_eq!(tracker.real_progress(), 1.0);
    }

    #[test]
    fn all_loaded_transition_observed_at_most_once() {
        let mut tracker = AssetProgress::default();
        tracker.register("only", 10);
        assert!(tracker.mark_complete("only"));
        assert!(!tracker.mark_complete("only"));
        assert!(tracker.all_loaded());
    }

    #[test]
    fn empty_manifest_latches_all_loaded_immediately() {
        let mut tracker = AssetProgress::default();
        assert!(tracker.complete_if_empty());
        assert!(tracker.all_loaded());
        // Latched: the transition is observed only once.
        assert!(!tracker.complete_if_empty());
    }

    #[test]
    fn empty_latch_is_a_no_op_once_assets_are_registered() {
        let mut tracker = three_asset_tracker();
        assert!(!tracker.complete_if_empty());
        assert!(!tracker.all_loaded());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut tracker = three_asset_tracker();
        tracker.report("nope", 1_000);
        assert!(!tracker.mark_complete("nope"));
        assert_eq!(tracker.real_progress(), 0.0);
    }
}
