use bevy::prelude::*;

/// Environment lighting a scene brings along when it becomes active.
#[derive(Clone)]
pub struct SceneEnvironment {
    pub map: Handle<Image>,
    pub rotation: Quat,
}

/// Camera framing and lighting attached to each scene root. Populated
/// once from the manifest and never mutated afterwards.
#[derive(Component)]
pub struct ScenePose {
    pub camera_position: Vec3,
    pub look_at: Vec3,
    pub environment: Option<SceneEnvironment>,
}

pub struct RegisteredScene {
    pub name: String,
    pub root: Entity,
}

/// Ordered registry of all scene roots. Constructed at session start;
/// scene roots live for the whole session.
#[derive(Resource, Default)]
pub struct SceneRegistry {
    pub scenes: Vec<RegisteredScene>,
    /// Index of the currently shown scene, if any.
    pub active: Option<usize>,
}

impl SceneRegistry {
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
