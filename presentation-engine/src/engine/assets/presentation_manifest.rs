use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of downloadable asset. Models become scene content, the
/// environment becomes the active reflection/lighting map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Model,
    Environment,
}

/// One downloadable asset with its declared total size. Sizes are fixed
/// at authoring time; progress reports are measured against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    pub id: String,
    pub path: String,
    pub size_bytes: u64,
    pub kind: AssetKind,
}

/// One named scene: camera framing, content references into the asset
/// table, and an optional environment map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntry {
    pub name: String,
    pub camera_position: [f32; 3],
    pub look_at: [f32; 3],
    #[serde(default)]
    pub contents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Euler XYZ rotation of the environment map, radians. Identity
    /// when omitted.
    #[serde(default)]
    pub environment_rotation: [f32; 3],
}

/// Complete presentation manifest as a Bevy asset. Mirrors the JSON
/// structure exactly. Also inserted as a resource once parsed so the
/// switcher and scroll driver can consult it after loading.
#[derive(Asset, Resource, Debug, Clone, Serialize, Deserialize, TypePath)]
pub struct PresentationManifest {
    pub assets: Vec<AssetEntry>,
    pub scenes: Vec<SceneEntry>,
    /// Scene shown once loading finishes. Falls back to the first
    /// scene in the table when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scene: Option<String>,
}

impl SceneEntry {
    /// Camera position this scene frames, for the switch tween target.
    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }

    /// Point the camera looks at while framing this scene.
    pub fn look_at(&self) -> Vec3 {
        Vec3::from_array(self.look_at)
    }

    /// Environment map orientation as a quaternion.
    pub fn environment_rotation(&self) -> Quat {
        let [x, y, z] = self.environment_rotation;
        Quat::from_euler(EulerRot::XYZ, x, y, z)
    }
}

impl PresentationManifest {
    /// Find an asset entry by its identifier.
    pub fn asset_by_id(&self, id: &str) -> Option<&AssetEntry> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Index of the scene shown after loading completes.
    pub fn default_scene_index(&self) -> usize {
        self.default_scene
            .as_deref()
            .and_then(|name| self.scenes.iter().position(|s| s.name == name))
            .unwrap_or(0)
    }

    /// Sum of declared asset sizes, for logging at load start.
    pub fn declared_bytes(&self) -> u64 {
        self.assets.iter().map(|a| a.size_bytes).sum()
    }
}
