use bevy::prelude::*;
use constants::camera::SWITCH_TWEEN_DURATION;

use crate::engine::assets::presentation_manifest::PresentationManifest;
use crate::engine::camera::tween::CameraTween;
use crate::engine::scene::registry::{ScenePose, SceneRegistry};

/// How a scene is addressed: digit keys use positions, the RPC bridge
/// uses names.
#[derive(Debug, Clone)]
pub enum SceneSelector {
    Index(usize),
    Name(String),
}

/// Scene control commands, fired from keyboard input or the RPC bridge.
#[derive(Event, Debug, Clone)]
pub enum SceneCommand {
    Switch(SceneSelector),
    /// Force every scene visible, bypassing the camera tween. Debug
    /// surface, not part of the primary flow.
    ShowAll,
    /// Force every scene hidden, bypassing the camera tween.
    HideAll,
}

/// Digit keys 1..N select and switch to the Nth registered scene.
pub fn handle_scene_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands_out: EventWriter<SceneCommand>,
) {
    const DIGITS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];
    for (i, key) in DIGITS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            commands_out.write(SceneCommand::Switch(SceneSelector::Index(i)));
        }
    }
}

/// Switch to the manifest's default scene. Dispatched when the
/// completion sequence begins, so the overlay fade reveals the scene
/// already in place instead of an empty backdrop.
pub fn show_default_scene(
    manifest: Res<PresentationManifest>,
    registry: Res<SceneRegistry>,
    mut commands_out: EventWriter<SceneCommand>,
) {
    if registry.is_empty() {
        warn!("No scenes registered; nothing to show");
        return;
    }
    commands_out.write(SceneCommand::Switch(SceneSelector::Index(
        manifest.default_scene_index(),
    )));
}

pub fn handle_scene_commands(
    mut events: EventReader<SceneCommand>,
    mut registry: ResMut<SceneRegistry>,
    poses: Query<&ScenePose>,
    mut visibilities: Query<&mut Visibility>,
    camera_query: Query<(Entity, &Transform), With<Camera3d>>,
    mut commands: Commands,
) {
    for event in events.read() {
        match event {
            SceneCommand::Switch(selector) => {
                let target = resolve(&registry, selector);
                switch_to(
                    target,
                    &mut registry,
                    &poses,
                    &mut visibilities,
                    &camera_query,
                    &mut commands,
                );
            }
            SceneCommand::ShowAll => {
                set_all_visibility(&registry, &mut visibilities, Visibility::Visible);
            }
            SceneCommand::HideAll => {
                set_all_visibility(&registry, &mut visibilities, Visibility::Hidden);
                registry.active = None;
            }
        }
    }
}

/// Hide every scene, show the target (if any), hand over its
/// environment and start the camera tween. Inserting the tween
/// resource replaces any tween still in flight, so the last switch
/// always wins.
pub fn switch_to(
    target: Option<usize>,
    registry: &mut SceneRegistry,
    poses: &Query<&ScenePose>,
    visibilities: &mut Query<&mut Visibility>,
    camera_query: &Query<(Entity, &Transform), With<Camera3d>>,
    commands: &mut Commands,
) {
    set_all_visibility(registry, visibilities, Visibility::Hidden);
    registry.active = None;

    // Absent target means "hide everything": no camera motion.
    let Some(index) = target else {
        return;
    };
    let Some(scene) = registry.scenes.get(index) else {
        warn!("Scene switch requested for unknown index {index}");
        return;
    };
    let root = scene.root;

    if let Ok(mut visibility) = visibilities.get_mut(root) {
        *visibility = Visibility::Visible;
    }
    info!("Switched to scene: {}", scene.name);
    registry.active = Some(index);

    let Ok(pose) = poses.get(root) else {
        return;
    };
    let Ok((camera_entity, camera_transform)) = camera_query.single() else {
        return;
    };

    match &pose.environment {
        Some(env) => {
            commands.entity(camera_entity).insert(EnvironmentMapLight {
                diffuse_map: env.map.clone(),
                specular_map: env.map.clone(),
                intensity: 900.0,
                rotation: env.rotation,
                affects_lightmapped_mesh_diffuse: false,
            });
        }
        None => {
            commands.entity(camera_entity).remove::<EnvironmentMapLight>();
        }
    }

    commands.insert_resource(CameraTween::new(
        camera_transform.translation,
        pose.camera_position,
        pose.look_at,
        SWITCH_TWEEN_DURATION,
    ));
}

fn resolve(registry: &SceneRegistry, selector: &SceneSelector) -> Option<usize> {
    match selector {
        SceneSelector::Index(i) if *i < registry.len() => Some(*i),
        SceneSelector::Index(_) => None,
        SceneSelector::Name(name) => registry.index_of(name),
    }
}

fn set_all_visibility(
    registry: &SceneRegistry,
    visibilities: &mut Query<&mut Visibility>,
    value: Visibility,
) {
    for scene in &registry.scenes {
        if let Ok(mut visibility) = visibilities.get_mut(scene.root) {
            *visibility = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::registry::RegisteredScene;
    use bevy::ecs::system::SystemState;

    fn spawn_scenes(world: &mut World, initial: &[Visibility]) -> SceneRegistry {
        let scenes = initial
            .iter()
            .enumerate()
            .map(|(i, vis)| RegisteredScene {
                name: format!("scene-{i}"),
                root: world
                    .spawn((
                        *vis,
                        ScenePose {
                            camera_position: Vec3::new(10.0, 3.0, 8.0),
                            look_at: Vec3::ZERO,
                            environment: None,
                        },
                    ))
                    .id(),
            })
            .collect();
        SceneRegistry {
            scenes,
            active: None,
        }
    }

    fn visibilities(world: &mut World, registry: &SceneRegistry) -> Vec<Visibility> {
        registry
            .scenes
            .iter()
            .map(|s| *world.entity(s.root).get::<Visibility>().unwrap())
            .collect()
    }

    fn run_switch(world: &mut World, registry: &mut SceneRegistry, target: Option<usize>) {
        let mut state: SystemState<(
            Query<&ScenePose>,
            Query<&mut Visibility>,
            Query<(Entity, &Transform), With<Camera3d>>,
            Commands,
        )> = SystemState::new(world);
        {
            let (poses, mut vis, cameras, mut commands) = state.get_mut(world);
            switch_to(target, registry, &poses, &mut vis, &cameras, &mut commands);
        }
        state.apply(world);
    }

    #[test]
    fn switch_yields_exactly_one_visible_scene() {
        let mut world = World::new();
        // Start from a messy prior state: several scenes visible.
        let mut registry = spawn_scenes(
            &mut world,
            &[Visibility::Visible, Visibility::Visible, Visibility::Hidden],
        );
        run_switch(&mut world, &mut registry, Some(2));
        assert_eq!(
            visibilities(&mut world, &registry),
            vec![Visibility::Hidden, Visibility::Hidden, Visibility::Visible]
        );
        assert_eq!(registry.active, Some(2));
    }

    #[test]
    fn switch_to_none_hides_everything_and_schedules_no_tween() {
        let mut world = World::new();
        let mut registry =
            spawn_scenes(&mut world, &[Visibility::Visible, Visibility::Visible]);
        run_switch(&mut world, &mut registry, None);
        assert_eq!(
            visibilities(&mut world, &registry),
            vec![Visibility::Hidden, Visibility::Hidden]
        );
        assert_eq!(registry.active, None);
        assert!(world.get_resource::<CameraTween>().is_none());
    }

    #[test]
    fn switch_starts_camera_tween_toward_scene_framing() {
        let mut world = World::new();
        let mut registry = spawn_scenes(&mut world, &[Visibility::Hidden]);
        world.spawn((Camera3d::default(), Transform::from_xyz(0.0, 0.0, 10.0)));
        run_switch(&mut world, &mut registry, Some(0));
        assert!(world.get_resource::<CameraTween>().is_some());
    }

    #[test]
    fn default_scene_becomes_visible_without_viewer_input() {
        use crate::engine::assets::presentation_manifest::SceneEntry;

        let mut world = World::new();
        let registry =
            spawn_scenes(&mut world, &[Visibility::Hidden, Visibility::Hidden]);
        world.insert_resource(registry);
        world.init_resource::<Events<SceneCommand>>();
        world.insert_resource(PresentationManifest {
            assets: vec![],
            scenes: (0..2)
                .map(|i| SceneEntry {
                    name: format!("scene-{i}"),
                    camera_position: [10.0, 3.0, 8.0],
                    look_at: [0.0, 0.0, 0.0],
                    contents: vec![],
                    environment: None,
                    environment_rotation: [0.0, 0.0, 0.0],
                })
                .collect(),
            default_scene: Some("scene-1".to_string()),
        });

        let mut dispatch: SystemState<(
            Res<PresentationManifest>,
            Res<SceneRegistry>,
            EventWriter<SceneCommand>,
        )> = SystemState::new(&mut world);
        {
            let (manifest, registry, writer) = dispatch.get_mut(&mut world);
            show_default_scene(manifest, registry, writer);
        }

        let mut handle: SystemState<(
            EventReader<SceneCommand>,
            ResMut<SceneRegistry>,
            Query<&ScenePose>,
            Query<&mut Visibility>,
            Query<(Entity, &Transform), With<Camera3d>>,
            Commands,
        )> = SystemState::new(&mut world);
        {
            let (events, registry, poses, vis, cameras, commands) = handle.get_mut(&mut world);
            handle_scene_commands(events, registry, poses, vis, cameras, commands);
        }
        handle.apply(&mut world);

        let registry = world.remove_resource::<SceneRegistry>().unwrap();
        assert_eq!(registry.active, Some(1));
        assert_eq!(
            visibilities(&mut world, &registry),
            vec![Visibility::Hidden, Visibility::Visible]
        );
    }

    #[test]
    fn out_of_range_index_behaves_like_none() {
        let mut world = World::new();
        let mut registry = spawn_scenes(&mut world, &[Visibility::Visible]);
        run_switch(&mut world, &mut registry, Some(5));
        assert_eq!(
            visibilities(&mut world, &registry),
            vec![Visibility::Hidden]
        );
        assert_eq!(registry.active, None);
    }
}
