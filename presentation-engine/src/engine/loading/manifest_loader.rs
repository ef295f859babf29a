use bevy::gltf::{Gltf, GltfAssetLabel};
use bevy::prelude::*;

use crate::engine::assets::presentation_manifest::{AssetKind, PresentationManifest};
use crate::engine::loading::tracker::AssetProgress;
use crate::engine::scene::registry::{
    RegisteredScene, SceneEnvironment, ScenePose, SceneRegistry,
};

const MANIFEST_PATH: &str = "presentation.json";

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<PresentationManifest>>,
    processed: bool,
}

/// Primary handles of every declared asset, polled for completion and
/// consulted when binding animations.
#[derive(Resource, Default)]
pub struct AssetHandles {
    pub models: Vec<(String, Handle<Gltf>)>,
    pub environments: Vec<(String, Handle<Image>)>,
}

impl AssetHandles {
    pub fn environment(&self, id: &str) -> Option<&Handle<Image>> {
        self.environments
            .iter()
            .find(|(env_id, _)| env_id == id)
            .map(|(_, handle)| handle)
    }
}

/// Start the loading process.
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Once the manifest has parsed: register every asset with the
/// tracker, start all downloads, and build the scene roots.
pub fn process_manifest(
    mut manifest_loader: ResMut<ManifestLoader>,
    manifests: Res<Assets<PresentationManifest>>,
    mut tracker: ResMut<AssetProgress>,
    mut handles: ResMut<AssetHandles>,
    mut registry: ResMut<SceneRegistry>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if manifest_loader.processed {
        return;
    }
    let Some(manifest) = manifest_loader
        .handle
        .as_ref()
        .and_then(|handle| manifests.get(handle))
    else {
        return;
    };
    manifest_loader.processed = true;
    println!(
        "✓ Manifest loaded: {} asset(s), {} scene(s), {} declared bytes",
        manifest.assets.len(),
        manifest.scenes.len(),
        manifest.declared_bytes()
    );

    for entry in &manifest.assets {
        tracker.register(&entry.id, entry.size_bytes);
        match entry.kind {
            AssetKind::Model => {
                handles
                    .models
                    .push((entry.id.clone(), asset_server.load(&entry.path)));
            }
            AssetKind::Environment => {
                handles
                    .environments
                    .push((entry.id.clone(), asset_server.load(&entry.path)));
            }
        }
    }

    if tracker.complete_if_empty() {
        println!("✓ No assets declared; nothing to download");
    }

    spawn_scene_roots(manifest, &handles, &asset_server, &mut registry, &mut commands);
    commands.insert_resource(manifest.clone());
}

/// One root entity per scene, all hidden until the switcher shows the
/// default scene after loading. Content gltf scenes attach as children
/// so visibility propagates.
fn spawn_scene_roots(
    manifest: &PresentationManifest,
    handles: &AssetHandles,
    asset_server: &AssetServer,
    registry: &mut SceneRegistry,
    commands: &mut Commands,
) {
    for scene in &manifest.scenes {
        let environment = scene.environment.as_deref().and_then(|id| {
            let map = handles.environment(id);
            if map.is_none() {
                warn!("Scene '{}' references unknown environment '{id}'", scene.name);
            }
            Some(SceneEnvironment {
                map: map?.clone(),
                rotation: scene.environment_rotation(),
            })
        });

        let root = commands
            .spawn((
                Name::new(scene.name.clone()),
                Transform::default(),
                Visibility::Hidden,
                ScenePose {
                    camera_position: scene.camera_position(),
                    look_at: scene.look_at(),
                    environment,
                },
            ))
            .with_children(|parent| {
                for content_id in &scene.contents {
                    let Some(entry) = manifest.asset_by_id(content_id) else {
                        warn!("Scene '{}' references unknown asset '{content_id}'", scene.name);
                        continue;
                    };
                    if entry.kind != AssetKind::Model {
                        continue;
                    }
                    parent.spawn((
                        SceneRoot(
                            asset_server.load(GltfAssetLabel::Scene(0).from_asset(entry.path.clone())),
                        ),
                        Transform::default(),
                    ));
                }
            })
            .id();

        registry.scenes.push(RegisteredScene {
            name: scene.name.clone(),
            root,
        });
    }
}
