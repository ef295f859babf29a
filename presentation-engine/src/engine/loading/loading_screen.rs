use bevy::prelude::*;

use crate::engine::loading::smoother::LoadingSmoother;
use crate::engine::loading::tracker::AssetProgress;
use crate::rpc::web_rpc::WebRpcInterface;

/// Root node of the loading overlay; despawned once loading finishes.
#[derive(Component)]
pub struct LoadingOverlay;

#[derive(Component)]
pub struct LoadingPercentText;

#[derive(Component)]
pub struct LoadingBarFill;

const BAR_COLOR: Color = Color::srgb(0.0, 0.8, 1.0);

/// Terminal progress bar mirroring the loading percentage on native
/// runs, where there is no web page to show one.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Resource)]
pub struct NativeProgressBar(pub indicatif::ProgressBar);

/// Full-screen overlay: percentage readout over a thin progress bar.
pub fn spawn_loading_screen(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::BLACK),
            GlobalZIndex(10),
            LoadingOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("0%"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(BAR_COLOR),
                LoadingPercentText,
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(240.0),
                        height: Val::Px(4.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.12)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(BAR_COLOR),
                        LoadingBarFill,
                    ));
                });
        });
}

/// Per-tick loading screen update: advances the smoother from the
/// tracker's real progress and renders the result. The percentage is
/// also pushed over the RPC bridge whenever it changes.
pub fn update_loading_screen(
    time: Res<Time>,
    tracker: Res<AssetProgress>,
    mut smoother: ResMut<LoadingSmoother>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_percent: Local<Option<u32>>,
    mut percent_text: Query<&mut Text, With<LoadingPercentText>>,
    mut bar_fill: Query<&mut Node, With<LoadingBarFill>>,
    mut overlay: Query<&mut BackgroundColor, With<LoadingOverlay>>,
) {
    smoother.tick(
        time.delta_secs(),
        tracker.real_progress(),
        tracker.all_loaded(),
    );

    let percent = smoother.percent();
    if let Ok(mut text) = percent_text.single_mut() {
        text.0 = format!("{percent}%");
    }
    if let Ok(mut node) = bar_fill.single_mut() {
        node.width = Val::Percent(smoother.visual() * 100.0);
    }
    if let Ok(mut background) = overlay.single_mut() {
        background.0 = Color::BLACK.with_alpha(smoother.overlay_opacity());
    }

    if *last_percent != Some(percent) {
        *last_percent = Some(percent);
        rpc_interface.send_notification(
            "loading_progress",
            serde_json::json!({ "percent": percent }),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn update_native_progress_bar(
    smoother: Res<LoadingSmoother>,
    bar: Option<Res<NativeProgressBar>>,
) {
    let Some(bar) = bar else {
        return;
    };
    bar.0.set_position(smoother.percent() as u64);
    if smoother.finished() && !bar.0.is_finished() {
        bar.0.finish_and_clear();
    }
}
