use bevy::prelude::*;
use constants::loading::{
    COMPLETION_THRESHOLD, FADE_DURATION, FADE_OVERLAP, FILL_DURATION, RAMP_DURATION, RAMP_TARGET,
    STALL_NUDGE, TARGET_SMOOTHING, VISUAL_CAP, VISUAL_SMOOTHING,
};

use crate::engine::animation::easing::{ease_in_out, ease_out, ease_out_cubic};

/// Phase of the smoother. Transitions are one-way; a session walks
/// `Ramp → Tracking → Finalizing → Ready` exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmootherPhase {
    /// Scripted initial ramp toward a fixed small fraction, ignoring
    /// real progress. Guarantees a smooth start on any network.
    Ramp { elapsed: f32 },
    /// Target chases real progress, with a stall nudge while assets
    /// are still outstanding.
    Tracking,
    /// Completion sequence: fill to exactly 1.0 while the overlay
    /// fades out, the fade starting slightly before the fill ends.
    Finalizing { elapsed: f32, fill_from: f32 },
    /// Fade complete. The overlay can be torn down.
    Ready,
}

/// Converts the raw, bursty download progress into the animated value
/// the loading screen renders.
///
/// Only `visual()` is ever displayed; it never decreases during the
/// loading phase and is capped below 1.0 until every asset completes.
#[derive(Resource)]
pub struct LoadingSmoother {
    phase: SmootherPhase,
    target: f32,
    visual: f32,
}

impl Default for LoadingSmoother {
    fn default() -> Self {
        Self {
            phase: SmootherPhase::Ramp { elapsed: 0.0 },
            target: 0.0,
            visual: 0.0,
        }
    }
}

impl LoadingSmoother {
    /// Advance one render tick.
    pub fn tick(&mut self, dt: f32, real_progress: f32, all_loaded: bool) {
        match self.phase {
            SmootherPhase::Ramp { elapsed } => {
                let elapsed = elapsed + dt;
                let t = (elapsed / RAMP_DURATION).clamp(0.0, 1.0);
                self.target = RAMP_TARGET * ease_in_out(t);
                self.phase = if t >= 1.0 {
                    SmootherPhase::Tracking
                } else {
                    SmootherPhase::Ramp { elapsed }
                };
                self.follow_target(all_loaded);
            }
            SmootherPhase::Tracking => {
                let old_target = self.target;
                self.target = lerp(old_target, real_progress, TARGET_SMOOTHING);
                // If the target is not moving, give it a small nudge.
                if !all_loaded && self.target <= old_target {
                    self.target = old_target + STALL_NUDGE;
                }
                self.follow_target(all_loaded);

                if all_loaded && self.visual > COMPLETION_THRESHOLD {
                    self.phase = SmootherPhase::Finalizing {
                        elapsed: 0.0,
                        fill_from: self.visual,
                    };
                }
            }
            SmootherPhase::Finalizing { elapsed, fill_from } => {
                let elapsed = elapsed + dt;
                let t = (elapsed / FILL_DURATION).clamp(0.0, 1.0);
                self.visual = fill_from + (1.0 - fill_from) * ease_out(t);
                if elapsed >= Self::fade_start() + FADE_DURATION {
                    self.visual = 1.0;
                    self.phase = SmootherPhase::Ready;
                } else {
                    self.phase = SmootherPhase::Finalizing { elapsed, fill_from };
                }
            }
            SmootherPhase::Ready => {}
        }
    }

    fn follow_target(&mut self, all_loaded: bool) {
        self.visual = lerp(self.visual, self.target, VISUAL_SMOOTHING);
        if !all_loaded {
            self.visual = self.visual.min(VISUAL_CAP);
        }
    }

    fn fade_start() -> f32 {
        FILL_DURATION - FADE_OVERLAP
    }

    /// The only value that is ever rendered.
    pub fn visual(&self) -> f32 {
        self.visual
    }

    /// Displayed percentage, integer 0..=100.
    pub fn percent(&self) -> u32 {
        (self.visual * 100.0).round() as u32
    }

    /// Opacity of the loading overlay, 1.0 until the fade begins.
    pub fn overlay_opacity(&self) -> f32 {
        match self.phase {
            SmootherPhase::Ramp { .. } | SmootherPhase::Tracking => 1.0,
            SmootherPhase::Finalizing { elapsed, .. } => {
                let into_fade = elapsed - Self::fade_start();
                if into_fade <= 0.0 {
                    1.0
                } else {
                    1.0 - ease_out_cubic((into_fade / FADE_DURATION).clamp(0.0, 1.0))
                }
            }
            SmootherPhase::Ready => 0.0,
        }
    }

    /// Whether the completion sequence has started (latched).
    pub fn finalizing(&self) -> bool {
        matches!(
            self.phase,
            SmootherPhase::Finalizing { .. } | SmootherPhase::Ready
        )
    }

    /// Whether the fade has completed and the overlay can go away.
    pub fn finished(&self) -> bool {
        self.phase == SmootherPhase::Ready
    }
}

fn lerp(from: f32, to: f32, factor: f32) -> f32 {
    from + (to - from) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn tick_n(smoother: &mut LoadingSmoother, n: usize, real: f32, all_loaded: bool) {
        for _ in 0..n {
            smoother.tick(DT, real, all_loaded);
        }
    }

    #[test]
    fn ramp_ignores_real_progress() {
        let mut fast = LoadingSmoother::default();
        let mut slow = LoadingSmoother::default();
        // Half the ramp duration, wildly different real progress.
        tick_n(&mut fast, 45, 0.95, false);
        tick_n(&mut slow, 45, 0.0, false);
        assert_eq!(fast.visual(), slow.visual());
        assert!(fast.visual() < RAMP_TARGET);
    }

    #[test]
    fn tracking_follows_real_progress_after_ramp() {
        let mut fast = LoadingSmoother::default();
        let mut slow = LoadingSmoother::default();
        tick_n(&mut fast, 120, 0.9, false);
        tick_n(&mut slow, 120, 0.0, false);
        assert!(fast.visual() > slow.visual());
    }

    #[test]
    fn stalled_downloads_still_move_forward() {
        let mut smoother = LoadingSmoother::default();
        // Finish the ramp, then stall at a fixed real progress.
        tick_n(&mut smoother, 120, 0.2, false);
        let before = smoother.visual();
        tick_n(&mut smoother, 60, 0.2, false);
        assert!(smoother.visual() > before);
    }

    #[test]
    fn visual_caps_below_one_while_loading() {
        let mut smoother = LoadingSmoother::default();
        tick_n(&mut smoother, 20_000, 1.0, false);
        assert!(smoother.visual() <= VISUAL_CAP);
        assert!(!smoother.finalizing());
    }

    #[test]
    fn visual_never_decreases_while_loading() {
        let mut smoother = LoadingSmoother::default();
        let mut last = 0.0;
        for real in [0.0, 0.1, 0.1, 0.4, 0.4, 0.4, 0.8, 1.0] {
            for _ in 0..30 {
                smoother.tick(DT, real, false);
                assert!(smoother.visual() >= last);
                last = smoother.visual();
            }
        }
    }

    #[test]
    fn completion_sequence_runs_exactly_once() {
        let mut smoother = LoadingSmoother::default();
        tick_n(&mut smoother, 20_000, 1.0, true);
        assert!(smoother.finished());
        assert_eq!(smoother.visual(), 1.0);
        assert_eq!(smoother.overlay_opacity(), 0.0);
        // The trigger condition stays true; the phase must not rewind.
        let phase = smoother.phase;
        tick_n(&mut smoother, 120, 1.0, true);
        assert_eq!(smoother.phase, phase);
    }

    #[test]
    fn fade_overlaps_end_of_fill() {
        let mut smoother = LoadingSmoother::default();
        tick_n(&mut smoother, 20_000, 1.0, false);
        // All assets complete; drive until the sequence triggers.
        while !smoother.finalizing() {
            smoother.tick(DT, 1.0, true);
        }
        assert_eq!(smoother.overlay_opacity(), 1.0);
        // Just past the fade start, fill is still in flight.
        while smoother.visual() < 1.0 {
            smoother.tick(DT, 1.0, true);
        }
        assert!(smoother.overlay_opacity() < 1.0);
    }
}
