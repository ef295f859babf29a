use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::camera::INITIAL_CAMERA_POSITION;
// Crate engine modules
use crate::engine::animation::binding::bind_model_animations;
use crate::engine::assets::presentation_manifest::PresentationManifest;
use crate::engine::camera::free_camera::{CameraControls, FreeCamera, free_camera_controller};
use crate::engine::camera::tween::advance_camera_tween;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::asset_poller::{
    AssetProgressEvent, apply_host_progress, poll_asset_loading,
};
use crate::engine::loading::loading_screen::{
    LoadingOverlay, spawn_loading_screen, update_loading_screen,
};
use crate::engine::loading::manifest_loader::{
    AssetHandles, ManifestLoader, process_manifest, start_loading,
};
use crate::engine::loading::smoother::LoadingSmoother;
use crate::engine::loading::tracker::AssetProgress;
use crate::engine::scene::registry::SceneRegistry;
use crate::engine::scene::starfield::{rotate_starfield, spawn_starfield};
use crate::engine::scene::switcher::{
    SceneCommand, handle_scene_commands, handle_scene_keys, show_default_scene,
};
use crate::engine::scroll::driver::{
    ScrollArmPending, ScrollState, apply_scroll_timeline, arm_scroll_driver, read_scroll_position,
};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::rpc::web_rpc::{WebRpcInterface, WebRpcPlugin};
// Transitions
use crate::engine::core::app_state::{AppState, transition_to_finalizing, transition_to_ready};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::loading::loading_screen::{NativeProgressBar, update_native_progress_bar};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers PresentationManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<PresentationManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<AssetProgress>()
        .init_resource::<LoadingSmoother>()
        .init_resource::<ManifestLoader>()
        .init_resource::<AssetHandles>()
        .init_resource::<SceneRegistry>()
        .init_resource::<CameraControls>()
        .init_resource::<FreeCamera>()
        .init_resource::<ScrollState>()
        .add_event::<SceneCommand>()
        .add_event::<AssetProgressEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                process_manifest,
                poll_asset_loading,
                apply_host_progress,
                update_loading_screen,
                transition_to_finalizing,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        // The default scene is shown as soon as the completion sequence
        // starts, so the overlay fade reveals it already in place.
        .add_systems(OnEnter(AppState::Finalizing), show_default_scene)
        .add_systems(
            Update,
            (
                update_loading_screen,
                handle_scene_commands,
                advance_camera_tween,
                transition_to_ready,
            )
                .chain()
                .run_if(in_state(AppState::Finalizing)),
        )
        .add_systems(OnEnter(AppState::Ready), finish_loading);

    // Base runtime systems - only run once everything is ready.
    let runtime_systems = (
        handle_scene_keys,
        handle_scene_commands,
        advance_camera_tween,
        arm_scroll_driver,
        read_scroll_position,
        apply_scroll_timeline,
        free_camera_controller,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Ready)));

    // Systems that run in every state.
    app.add_systems(
        Update,
        (bind_model_animations, rotate_starfield, fps_notification_system),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, (fps_text_update_system, update_native_progress_bar));
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

/// Startup: camera, lighting, star layers and the loading overlay.
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(INITIAL_CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    spawn_lighting(&mut commands);
    spawn_starfield(&mut commands, &mut meshes, &mut materials);
    spawn_loading_screen(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);

        let bar = indicatif::ProgressBar::new(100);
        bar.set_style(
            indicatif::ProgressStyle::with_template("Loading {bar:32} {pos}%")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar()),
        );
        commands.insert_resource(NativeProgressBar(bar));
    }
}

/// One-shot on entering Ready: tear down the loading overlay, release
/// the camera to the viewer, announce completion over the bridge and
/// arm the scroll driver. The default scene is already visible by now.
fn finish_loading(
    mut commands: Commands,
    overlays: Query<Entity, With<LoadingOverlay>>,
    mut controls: ResMut<CameraControls>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for entity in overlays.iter() {
        commands.entity(entity).despawn();
    }

    controls.enabled = true;
    rpc_interface.send_notification("loading_finished", serde_json::json!({}));
    commands.insert_resource(ScrollArmPending);

    println!("→ Presentation ready");
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
