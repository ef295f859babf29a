use bevy::animation::graph::{AnimationGraph, AnimationGraphHandle, AnimationNodeIndex};
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::loading::manifest_loader::AssetHandles;

/// All animation clips of the loaded models, bound into one graph whose
/// nodes play simultaneously and start paused. The playhead is driven
/// externally by the scroll choreography; total duration is the longest
/// source clip, matching a track-merged clip.
#[derive(Resource)]
pub struct AnimationBinding {
    pub player: Entity,
    pub nodes: Vec<AnimationNodeIndex>,
    pub total_duration: f32,
}

impl AnimationBinding {
    /// The scroll driver only arms when there is something to scrub.
    pub fn is_scrubbable(&self) -> bool {
        !self.nodes.is_empty() && self.total_duration > 0.0
    }
}

/// Binds animations once the gltf scene instance has spawned its
/// `AnimationPlayer`. Runs until a binding exists; a model without
/// animations simply never produces one.
pub fn bind_model_animations(
    binding: Option<Res<AnimationBinding>>,
    handles: Res<AssetHandles>,
    gltf_assets: Res<Assets<Gltf>>,
    clip_assets: Res<Assets<AnimationClip>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut players: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
    mut commands: Commands,
) {
    if binding.is_some() {
        return;
    }
    let Some((entity, mut player)) = players.iter_mut().next() else {
        return;
    };

    let clips: Vec<Handle<AnimationClip>> = handles
        .models
        .iter()
        .filter_map(|(_, handle)| gltf_assets.get(handle))
        .flat_map(|gltf| gltf.animations.iter().cloned())
        .collect();
    if clips.is_empty() {
        return;
    }

    let total_duration = clips
        .iter()
        .filter_map(|handle| clip_assets.get(handle))
        .map(|clip| clip.duration())
        .fold(0.0_f32, f32::max);

    let (graph, nodes) = AnimationGraph::from_clips(clips);
    commands
        .entity(entity)
        .insert(AnimationGraphHandle(graphs.add(graph)));

    // Activate every node, then park the playhead at zero.
    for node in &nodes {
        player.play(*node).pause();
    }

    info!(
        "Bound {} animation clip(s), total duration {total_duration:.2}s",
        nodes.len()
    );
    commands.insert_resource(AnimationBinding {
        player: entity,
        nodes,
        total_duration,
    });
}

/// Evaluate the bound animations at an exact playhead time. Called on
/// every scroll update, in both directions; seeking to an absolute time
/// keeps scrubbing deterministic.
pub fn seek_binding(
    binding: &AnimationBinding,
    players: &mut Query<&mut AnimationPlayer>,
    playhead: f32,
) {
    let Ok(mut player) = players.get_mut(binding.player) else {
        return;
    };
    for node in &binding.nodes {
        if let Some(active) = player.animation_mut(*node) {
            active.seek_to(playhead);
        }
    }
}
