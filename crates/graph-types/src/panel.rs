//! Wall panels: the only geometry primitive in a generated scene.
//!
//! Corridor walls, shell segments, and scattered obstacles are all
//! rectangular boxes standing on the ground plane.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Smallest footprint extent a panel may have.
///
/// Zero or negative lengths and thicknesses are raised to this value so a
/// panel never degenerates into an invisible box.
pub const MIN_EXTENT: f64 = 0.001;

/// A color with alpha, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Surface material of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PanelMaterial {
    /// Named opaque material preset provided by the simulator
    Preset { name: String },
    /// Explicit color with opacity below 1
    Translucent { color: Rgba },
}

impl PanelMaterial {
    pub fn is_translucent(&self) -> bool {
        matches!(self, PanelMaterial::Translucent { .. })
    }

    /// Opacity of the material; presets are fully opaque.
    pub fn opacity(&self) -> f64 {
        match self {
            PanelMaterial::Preset { .. } => 1.0,
            PanelMaterial::Translucent { color } => color.a,
        }
    }
}

/// How a family of panels should look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    /// Preset name used when the panel is opaque
    pub material: String,
    /// RGB tint used when the panel is translucent
    pub tint: [f64; 3],
    /// Opacity in [0, 1]
    pub opacity: f64,
}

impl PanelStyle {
    pub fn new(material: impl Into<String>, tint: [f64; 3], opacity: f64) -> Self {
        Self {
            material: material.into(),
            tint,
            opacity,
        }
    }

    /// Resolves the style to a concrete material.
    ///
    /// Opacity below 1 selects an explicit RGBA material, otherwise the named preset.
    pub fn resolve(&self) -> PanelMaterial {
        if self.opacity < 1.0 {
            let [r, g, b] = self.tint;
            PanelMaterial::Translucent {
                color: Rgba::new(r, g, b, self.opacity.max(0.0)),
            }
        } else {
            PanelMaterial::Preset {
                name: self.material.clone(),
            }
        }
    }
}

/// One static rectangular obstacle.
///
/// The footprint's long axis (`length`) runs along `yaw`; `thickness` is
/// perpendicular to it. The box stands on the ground with its base at z = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallPanel {
    /// Unique model name in the scene
    pub name: String,
    /// Footprint center
    pub center: Point,
    /// Heading of the long axis, radians
    pub yaw: f64,
    pub length: f64,
    pub thickness: f64,
    pub height: f64,
    pub material: PanelMaterial,
}

impl WallPanel {
    /// Builds a panel, flooring the footprint to [`MIN_EXTENT`].
    pub fn new(
        name: impl Into<String>,
        center: Point,
        yaw: f64,
        length: f64,
        thickness: f64,
        height: f64,
        style: &PanelStyle,
    ) -> Self {
        Self {
            name: name.into(),
            center,
            yaw,
            length: floor_extent(length),
            thickness: floor_extent(thickness),
            height,
            material: style.resolve(),
        }
    }

    /// Height of the box center above the ground.
    pub fn elevation(&self) -> f64 {
        self.height / 2.0
    }
}

// f64::max drops NaN in favor of the other operand, so NaN also floors.
fn floor_extent(value: f64) -> f64 {
    value.max(MIN_EXTENT)
}
