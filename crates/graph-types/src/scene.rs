//! The assembled scene: an ordered list of panels inside a named world.

use serde::{Deserialize, Serialize};

use crate::panel::WallPanel;

/// A static scene ready for serialization.
///
/// Panel order carries no meaning beyond making output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Name of the simulator world
    pub world_name: String,
    /// Every static obstacle in the world
    pub panels: Vec<WallPanel>,
}

impl Scene {
    pub fn new(world_name: impl Into<String>) -> Self {
        Self {
            world_name: world_name.into(),
            panels: Vec::new(),
        }
    }

    pub fn push(&mut self, panel: WallPanel) {
        self.panels.push(panel);
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panels whose names start with `prefix`.
    pub fn panels_named<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a WallPanel> + 'a {
        self.panels.iter().filter(move |p| p.name.starts_with(prefix))
    }
}

impl Extend<WallPanel> for Scene {
    fn extend<I: IntoIterator<Item = WallPanel>>(&mut self, iter: I) {
        self.panels.extend(iter);
    }
}
