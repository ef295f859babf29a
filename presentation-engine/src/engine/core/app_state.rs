use bevy::prelude::*;

use crate::engine::loading::smoother::LoadingSmoother;

/// Session lifecycle. Transitions are one-way: a session loads once,
/// finalizes once and stays ready; the latched one-shot flags of the
/// loading flow are states here, so illegal combinations cannot be
/// represented.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Downloads in flight, loading overlay visible.
    #[default]
    Loading,
    /// All assets loaded; the fill-and-fade completion sequence runs.
    Finalizing,
    /// Overlay gone, controls live, scroll choreography armed.
    Ready,
}

#[derive(Component)]
pub struct FpsText;

/// The smoother reports the completion trigger (all assets loaded,
/// displayed progress past the threshold) at most once.
pub fn transition_to_finalizing(
    smoother: Res<LoadingSmoother>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if smoother.finalizing() {
        println!("→ Transitioning to Finalizing state");
        next_state.set(AppState::Finalizing);
    }
}

/// The overlay fade has completed; hand the session to the viewer.
pub fn transition_to_ready(
    smoother: Res<LoadingSmoother>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if smoother.finished() {
        println!("→ Transitioning to Ready state");
        next_state.set(AppState::Ready);
    }
}
