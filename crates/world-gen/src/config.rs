//! Configuration for world generation.
//!
//! All tunables live in one immutable [`WorldConfig`] that is passed
//! explicitly to every generator. It can be loaded from a TOML file and then
//! overridden field by field from the command line.

use graph_types::PanelStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::scatter::ScatterConfig;

/// Complete generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Name of the simulator world element
    pub world_name: String,
    /// Clear width of a corridor between its two walls
    pub lane_width: f64,
    /// Radius of every node shell
    pub node_radius: f64,
    /// Clearance between a corridor wall's end and the node shell
    pub node_gap: f64,
    /// Height of every generated wall
    pub wall_height: f64,
    /// Node shell settings
    pub shell: ShellConfig,
    /// Corridor wall settings
    pub corridor: CorridorConfig,
    /// Random obstacle settings
    pub scatter: ScatterConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_name: "graph_routes".to_string(),
            lane_width: 0.5,
            node_radius: 1.0,
            node_gap: 0.05,
            wall_height: 1.0,
            shell: ShellConfig::default(),
            corridor: CorridorConfig::default(),
            scatter: ScatterConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that every tunable is usable for generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("lane_width", self.lane_width)?;
        non_negative("node_gap", self.node_gap)?;
        non_negative("wall_height", self.wall_height)?;
        non_negative("shell.thickness", self.shell.thickness)?;
        non_negative("shell.open_margin", self.shell.open_margin)?;
        non_negative("corridor.thickness", self.corridor.thickness)?;
        unit_interval("shell.opacity", self.shell.opacity)?;
        unit_interval("corridor.opacity", self.corridor.opacity)?;

        // A zero radius is a geometric degeneracy handled by the generators.
        non_negative("node_radius", self.node_radius)?;
        if self.shell.segments == 0 {
            return Err(ConfigError::Invalid(
                "shell.segments must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Width of the opening cut into a shell for each corridor.
    pub fn opening_width(&self) -> f64 {
        self.lane_width
    }

    pub fn shell_style(&self) -> PanelStyle {
        PanelStyle::new(self.shell.material.clone(), self.shell.tint, self.shell.opacity)
    }

    pub fn corridor_style(&self) -> PanelStyle {
        PanelStyle::new(
            self.corridor.material.clone(),
            self.corridor.tint,
            self.corridor.opacity,
        )
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )))
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be within [0, 1], got {}",
            field, value
        )))
    }
}

/// Node shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Generate shells at all
    pub enabled: bool,
    /// Number of equal wedges around each node
    pub segments: u32,
    /// Radial thickness of each shell panel
    pub thickness: f64,
    /// Extra half-width added to each opening beyond half the lane width
    pub open_margin: f64,
    /// Shell opacity; below 1 renders as a tinted translucent material
    pub opacity: f64,
    /// Preset material when fully opaque
    pub material: String,
    /// Tint when translucent
    pub tint: [f64; 3],
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            segments: 48,
            thickness: 0.10,
            open_margin: 0.10,
            opacity: 0.05,
            material: "Gazebo/Blue".to_string(),
            tint: [0.0, 0.0, 1.0],
        }
    }
}

/// Corridor wall configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Wall thickness
    pub thickness: f64,
    /// Wall opacity
    pub opacity: f64,
    /// Preset material when fully opaque
    pub material: String,
    /// Tint when translucent
    pub tint: [f64; 3],
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            thickness: 0.1,
            opacity: 1.0,
            material: "Gazebo/DarkGrey".to_string(),
            tint: [0.3, 0.3, 0.3],
        }
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Graph world configuration

world_name = "graph_routes"
lane_width = 0.5
node_radius = 1.0
node_gap = 0.05
wall_height = 1.0

[shell]
enabled = true
segments = 48
thickness = 0.1
open_margin = 0.1
opacity = 0.05
material = "Gazebo/Blue"
tint = [0.0, 0.0, 1.0]

[corridor]
thickness = 0.1
opacity = 1.0
material = "Gazebo/DarkGrey"
tint = [0.3, 0.3, 0.3]

[scatter]
count = 12
seed = 42
min_xy = -8.5
max_xy = 8.5
keepout = 2.0
keepout_center = { x = 0.0, y = 0.0 }
min_size = 0.3
max_size = 2.0
min_height = 0.5
max_height = 1.5
material = "Gazebo/Grey"
"#
    .to_string()
}
