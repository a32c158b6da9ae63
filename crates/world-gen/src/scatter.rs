//! Random box obstacles.
//!
//! Boxes are placed uniformly inside a square, outside a keep-out circle
//! (typically around the robot's start pose). Sampling uses a seeded
//! [`SmallRng`], so a given configuration always yields the same layout.

use std::f64::consts::PI;

use graph_types::{PanelStyle, Point, Scene, WallPanel};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScatterError;

/// Position draws allowed per obstacle before giving up on the keep-out.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Obstacle scatter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Number of boxes
    pub count: usize,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Lower bound of both x and y
    pub min_xy: f64,
    /// Upper bound of both x and y
    pub max_xy: f64,
    /// Radius around `keepout_center` left free
    pub keepout: f64,
    pub keepout_center: Point,
    /// Footprint side bounds
    pub min_size: f64,
    pub max_size: f64,
    /// Box height bounds
    pub min_height: f64,
    pub max_height: f64,
    /// Preset material of every box
    pub material: String,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 12,
            seed: 42,
            min_xy: -8.5,
            max_xy: 8.5,
            keepout: 2.0,
            keepout_center: Point::ORIGIN,
            min_size: 0.3,
            max_size: 2.0,
            min_height: 0.5,
            max_height: 1.5,
            material: "Gazebo/Grey".to_string(),
        }
    }
}

impl ScatterConfig {
    /// Checks that every sampling range is non-empty and finite.
    pub fn validate(&self) -> Result<(), ScatterError> {
        ordered("min_xy", self.min_xy, "max_xy", self.max_xy)?;
        ordered("min_size", self.min_size, "max_size", self.max_size)?;
        ordered("min_height", self.min_height, "max_height", self.max_height)?;
        if self.min_size < 0.0 || self.min_height < 0.0 {
            return Err(ScatterError::InvalidBounds(
                "sizes and heights must be non-negative".to_string(),
            ));
        }
        if !(self.keepout.is_finite() && self.keepout >= 0.0) {
            return Err(ScatterError::InvalidBounds(format!(
                "keepout must be a non-negative number, got {}",
                self.keepout
            )));
        }
        Ok(())
    }
}

fn ordered(low_name: &str, low: f64, high_name: &str, high: f64) -> Result<(), ScatterError> {
    if low.is_finite() && high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(ScatterError::InvalidBounds(format!(
            "{} ({}) must not exceed {} ({})",
            low_name, low, high_name, high
        )))
    }
}

/// Samples `config.count` box obstacles.
pub fn scatter_obstacles(config: &ScatterConfig) -> Result<Vec<WallPanel>, ScatterError> {
    config.validate()?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let style = PanelStyle::new(config.material.clone(), [0.5, 0.5, 0.5], 1.0);

    let mut boxes = Vec::with_capacity(config.count);
    for i in 0..config.count {
        let sx = rng.gen_range(config.min_size..=config.max_size);
        let sy = rng.gen_range(config.min_size..=config.max_size);
        let height = rng.gen_range(config.min_height..=config.max_height);
        let center = sample_position(&mut rng, config)?;
        let yaw = rng.gen_range(-PI..=PI);

        debug!(index = i, x = center.x, y = center.y, "placed obstacle");
        boxes.push(WallPanel::new(
            format!("box_{}", i),
            center,
            yaw,
            sx,
            sy,
            height,
            &style,
        ));
    }
    Ok(boxes)
}

/// Wraps scattered obstacles in a scene named `world_name`.
pub fn scatter_scene(config: &ScatterConfig, world_name: &str) -> Result<Scene, ScatterError> {
    let mut scene = Scene::new(world_name);
    scene.extend(scatter_obstacles(config)?);
    Ok(scene)
}

fn sample_position(rng: &mut SmallRng, config: &ScatterConfig) -> Result<Point, ScatterError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Point::new(
            rng.gen_range(config.min_xy..=config.max_xy),
            rng.gen_range(config.min_xy..=config.max_xy),
        );
        if candidate.distance_to(config.keepout_center) >= config.keepout {
            return Ok(candidate);
        }
    }
    Err(ScatterError::KeepoutUnreachable {
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}
