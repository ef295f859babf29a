use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

/// Backdrop star layer, rotating slowly around Y for depth parallax.
#[derive(Component)]
pub struct StarLayer {
    pub rotation_rate: f32,
}

struct LayerConfig {
    count: usize,
    spread: f32,
    min_brightness: f32,
    brightness_range: f32,
    rotation_rate: f32,
}

/// Spawn the two star layers behind every scene. Decorative content,
/// built once at startup and never touched by the switcher.
pub fn spawn_starfield(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let layers = [
        LayerConfig {
            count: 20_000,
            spread: 2000.0,
            min_brightness: 0.5,
            brightness_range: 0.5,
            rotation_rate: 0.01,
        },
        // Dimmer, sparser second layer for depth.
        LayerConfig {
            count: 5_000,
            spread: 2000.0,
            min_brightness: 0.2,
            brightness_range: 0.4,
            rotation_rate: 0.005,
        },
    ];

    let mut rng = StarRng::new(0x5eed);
    for layer in layers {
        let mesh = star_mesh(&layer, &mut rng);
        commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::default(),
            StarLayer {
                rotation_rate: layer.rotation_rate,
            },
        ));
    }
}

fn star_mesh(layer: &LayerConfig, rng: &mut StarRng) -> Mesh {
    let mut positions = Vec::with_capacity(layer.count);
    let mut colors = Vec::with_capacity(layer.count);

    for _ in 0..layer.count {
        positions.push([
            (rng.unit() - 0.5) * layer.spread,
            (rng.unit() - 0.5) * layer.spread,
            (rng.unit() - 0.5) * layer.spread,
        ]);
        let brightness = layer.min_brightness + rng.unit() * layer.brightness_range;
        colors.push([brightness, brightness, brightness, 1.0]);
    }

    Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
}

pub fn rotate_starfield(mut layers: Query<(&mut Transform, &StarLayer)>, time: Res<Time>) {
    for (mut transform, layer) in &mut layers {
        transform.rotate_y(layer.rotation_rate * time.delta_secs());
    }
}

/// Small xorshift generator; the backdrop only needs stable scatter,
/// not statistical quality.
struct StarRng {
    state: u64,
}

impl StarRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn unit(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x >> 40) as f32 / (1u64 << 24) as f32
    }
}
