use bevy::prelude::*;

/// The zoom arm of a rig: a pivot that follows the rig (optionally with lag)
/// and holds the camera at `length` along its local +Z.
#[derive(Component, Debug, Clone)]
pub struct ZoomArm {
    pub rig: Entity,
    pub length: f32,
}

/// Links a camera entity back to the rig driving it.
#[derive(Component, Debug, Clone, Copy)]
pub struct RigCamera {
    pub rig: Entity,
}

/// Free-form string tags, used to find scene volumes by name.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(pub Vec<String>);

impl Tags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    pub fn has(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }
}
