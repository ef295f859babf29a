use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::loading::manifest_loader::AssetHandles;
use crate::engine::loading::tracker::AssetProgress;

/// Byte-level progress report for one asset. On the web the hosting
/// page observes fetch progress and forwards it over the RPC bridge;
/// reports may arrive in any interleaving relative to the render tick.
#[derive(Event, Debug, Clone)]
pub struct AssetProgressEvent {
    pub id: String,
    pub loaded_bytes: u64,
}

pub fn apply_host_progress(
    mut events: EventReader<AssetProgressEvent>,
    mut tracker: ResMut<AssetProgress>,
) {
    for event in events.read() {
        tracker.report(&event.id, event.loaded_bytes);
    }
}

/// Check whether declared assets finished downloading. A failed fetch
/// is logged once and otherwise left alone: the asset never completes,
/// the tracker never latches, and the progress indicator stalls.
pub fn poll_asset_loading(
    asset_server: Res<AssetServer>,
    handles: Res<AssetHandles>,
    mut tracker: ResMut<AssetProgress>,
) {
    let mut pending: Vec<(&str, UntypedHandle)> = Vec::new();
    for (id, handle) in &handles.models {
        pending.push((id, handle.clone().untyped()));
    }
    for (id, handle) in &handles.environments {
        pending.push((id, handle.clone().untyped()));
    }

    for (id, handle) in pending {
        if tracker.is_complete(id) {
            continue;
        }
        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                println!("✓ Asset loaded: {id}");
                if tracker.mark_complete(id) {
                    println!("✓ All assets loaded");
                }
            }
            Some(LoadState::Failed(error)) => {
                warn_once!("Asset '{id}' failed to load: {error}");
            }
            _ => {}
        }
    }
}
