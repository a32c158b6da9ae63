//! Node shells: a ring of short wall panels approximating a circle, with
//! openings wherever a corridor meets the node.
//!
//! The circle is split into equal wedges. A wedge is dropped when its
//! midpoint lies within the suppression window of any incident bearing.
//! Overlapping windows simply merge into one wider opening.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use graph_types::{Node, PanelStyle, Point, WallPanel};
use tracing::{debug, warn};

use crate::bearing::wrap_angle;
use crate::config::WorldConfig;
use crate::error::GeometryWarning;

/// Fraction of a wedge that every opening's half-window covers at minimum.
///
/// Guarantees at least one wedge is removed per bearing even when the
/// computed half-angle is narrower than a wedge.
pub const MIN_WINDOW_WEDGES: f64 = 0.6;

/// Half-angle, seen from the node center, that an opening must subtend so a
/// corridor of `opening_width` plus `margin` on each side passes unobstructed.
pub fn opening_half_angle(opening_width: f64, margin: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    let half_width = opening_width / 2.0 + margin;
    (half_width / radius).clamp(0.0, 1.0).asin()
}

/// Which wedges of one node's shell survive.
#[derive(Debug, Clone)]
pub struct ShellLayout {
    /// Angular width of each wedge
    pub dtheta: f64,
    /// Opening half-angle from the corridor geometry
    pub half_angle: f64,
    /// Effective half-width of each suppression window
    pub window: f64,
    open: Vec<bool>,
}

impl ShellLayout {
    /// Lays out `segments` wedges and marks those inside any opening.
    pub fn new(
        segments: u32,
        radius: f64,
        opening_width: f64,
        margin: f64,
        bearings: &[f64],
    ) -> Self {
        let segments = segments.max(1);
        let dtheta = TAU / f64::from(segments);
        let half_angle = opening_half_angle(opening_width, margin, radius);
        let window = half_angle.max(MIN_WINDOW_WEDGES * dtheta);
        let bearings: Vec<f64> = bearings.iter().map(|&b| wrap_angle(b)).collect();

        let open = (0..segments)
            .map(|i| {
                let theta = wedge_midpoint(i, dtheta);
                bearings
                    .iter()
                    .any(|&b| wrap_angle(theta - b).abs() <= window)
            })
            .collect();

        Self {
            dtheta,
            half_angle,
            window,
            open,
        }
    }

    pub fn segments(&self) -> usize {
        self.open.len()
    }

    /// Midpoint angle of wedge `i`; wedge 0 starts at −π.
    pub fn midpoint(&self, i: usize) -> f64 {
        wedge_midpoint(i as u32, self.dtheta)
    }

    /// True when wedge `i` is cut away for an opening.
    pub fn is_open(&self, i: usize) -> bool {
        self.open.get(i).copied().unwrap_or(false)
    }

    /// Number of wedges removed.
    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    /// Indices of wedges that become panels.
    pub fn surviving(&self) -> impl Iterator<Item = usize> + '_ {
        self.open
            .iter()
            .enumerate()
            .filter(|&(_, &o)| !o)
            .map(|(i, _)| i)
    }
}

fn wedge_midpoint(i: u32, dtheta: f64) -> f64 {
    -PI + (f64::from(i) + 0.5) * dtheta
}

/// Builds the shell panels for each node.
#[derive(Debug, Clone)]
pub struct NodeShellGenerator {
    enabled: bool,
    segments: u32,
    radius: f64,
    thickness: f64,
    height: f64,
    opening_width: f64,
    margin: f64,
    style: PanelStyle,
}

impl NodeShellGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            enabled: config.shell.enabled,
            segments: config.shell.segments,
            radius: config.node_radius,
            thickness: config.shell.thickness,
            height: config.wall_height,
            opening_width: config.opening_width(),
            margin: config.shell.open_margin,
            style: config.shell_style(),
        }
    }

    /// Wedge layout for a node with the given incident bearings.
    pub fn layout(&self, bearings: &[f64]) -> ShellLayout {
        ShellLayout::new(
            self.segments,
            self.radius,
            self.opening_width,
            self.margin,
            bearings,
        )
    }

    /// Generates the shell of `node`.
    ///
    /// Returns no panels when shells are disabled or the radius is not
    /// positive; the latter is recorded in `warnings`.
    pub fn generate(
        &self,
        node: &Node,
        bearings: &[f64],
        warnings: &mut Vec<GeometryWarning>,
    ) -> Vec<WallPanel> {
        if !self.enabled {
            return Vec::new();
        }
        if self.radius <= 0.0 {
            warn!(node = %node.name, radius = self.radius, "skipping shell with non-positive radius");
            warnings.push(GeometryWarning::ZeroRadius {
                node: node.name.clone(),
            });
            return Vec::new();
        }

        let layout = self.layout(bearings);
        let arc_length = self.radius * layout.dtheta;
        let panels: Vec<WallPanel> = layout
            .surviving()
            .map(|i| {
                let theta = layout.midpoint(i);
                WallPanel::new(
                    format!("node_{}_seg{}", node.name, i),
                    Point::polar(node.position, self.radius, theta),
                    theta + FRAC_PI_2,
                    arc_length,
                    self.thickness,
                    self.height,
                    &self.style,
                )
            })
            .collect();

        debug!(
            node = %node.name,
            bearings = bearings.len(),
            panels = panels.len(),
            opened = layout.open_count(),
            "generated node shell"
        );
        panels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn generator() -> NodeShellGenerator {
        NodeShellGenerator::new(&WorldConfig::default())
    }

    #[test]
    fn test_opening_half_angle() {
        // half width = 0.25 + 0.10
        assert_relative_eq!(opening_half_angle(0.5, 0.1, 1.0), 0.35f64.asin(), epsilon = 1e-12);
        assert_relative_eq!(opening_half_angle(0.5, 0.1, 1.0), 0.3576, epsilon = 1e-4);
        // Clamped when the opening is wider than the node.
        assert_relative_eq!(opening_half_angle(0.5, 0.1, 0.2), FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(opening_half_angle(0.5, 0.1, 0.0), 0.0);
        assert_eq!(opening_half_angle(0.5, 0.1, -1.0), 0.0);
    }

    #[test]
    fn test_default_window() {
        let layout = ShellLayout::new(48, 1.0, 0.5, 0.1, &[]);

        assert_relative_eq!(layout.dtheta, 0.1309, epsilon = 1e-4);
        assert_relative_eq!(layout.window, 0.3576, epsilon = 1e-4);
    }

    #[test]
    fn test_no_bearings_full_ring() {
        let layout = ShellLayout::new(48, 1.0, 0.5, 0.1, &[]);

        assert_eq!(layout.segments(), 48);
        assert_eq!(layout.open_count(), 0);
        assert_eq!(layout.surviving().count(), 48);
    }

    #[test]
    fn test_opening_on_wedge_boundary() {
        // Bearing 0 sits on the boundary between wedges 23 and 24, so three
        // midpoints on each side fall within the window.
        let layout = ShellLayout::new(48, 1.0, 0.5, 0.1, &[0.0]);

        assert_eq!(layout.open_count(), 6);
        for i in 21..=26 {
            assert!(layout.is_open(i), "wedge {} should be open", i);
        }
        assert!(!layout.is_open(20));
        assert!(!layout.is_open(27));
    }

    #[test]
    fn test_opening_off_boundary() {
        let bearing = 4f64.atan2(5.0);
        let layout = ShellLayout::new(48, 1.0, 0.5, 0.1, &[bearing]);

        assert_eq!(layout.open_count(), 6);
        assert!((26..=31).all(|i| layout.is_open(i)));
    }

    #[test]
    fn test_opening_wraps_across_pi() {
        let layout = ShellLayout::new(48, 1.0, 0.5, 0.1, &[PI]);

        // Wedges at both ends of the index range straddle ±π.
        assert!(layout.is_open(0));
        assert!(layout.is_open(47));
        assert_eq!(layout.open_count(), 6);
    }

    #[test]
    fn test_minimum_window_for_narrow_opening() {
        // A tiny lane on a big node still removes at least one wedge.
        let layout = ShellLayout::new(8, 100.0, 0.01, 0.0, &[0.3]);

        assert_relative_eq!(layout.window, MIN_WINDOW_WEDGES * TAU / 8.0, epsilon = 1e-12);
        assert!(layout.open_count() >= 1);
    }

    #[test]
    fn test_close_bearings_merge() {
        let apart = ShellLayout::new(48, 1.0, 0.5, 0.1, &[0.0, PI / 2.0]);
        let close = ShellLayout::new(48, 1.0, 0.5, 0.1, &[0.0, 0.2]);

        assert_eq!(apart.open_count(), 12);
        assert!(close.open_count() < 12);
        assert!(close.open_count() >= 6);
    }

    #[test]
    fn test_panels_sit_on_circle() {
        let node = Node::new("A", 2.0, -1.0);
        let mut warnings = Vec::new();
        let panels = generator().generate(&node, &[], &mut warnings);

        assert_eq!(panels.len(), 48);
        assert!(warnings.is_empty());
        for panel in &panels {
            assert_relative_eq!(panel.center.distance_to(node.position), 1.0, epsilon = 1e-9);
            assert_relative_eq!(panel.length, TAU / 48.0, epsilon = 1e-12);
            assert_eq!(panel.thickness, 0.1);
            assert!(panel.material.is_translucent());
        }
        assert_eq!(panels[0].name, "node_A_seg0");
    }

    #[test]
    fn test_panel_heading_is_tangential() {
        let node = Node::new("A", 0.0, 0.0);
        let panels = generator().generate(&node, &[], &mut Vec::new());

        let first = &panels[0];
        let theta = -PI + 0.5 * TAU / 48.0;
        assert_relative_eq!(first.yaw, theta + FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(first.center.x, theta.cos(), epsilon = 1e-12);
        assert_relative_eq!(first.center.y, theta.sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_suppressed_wedges_keep_their_index() {
        let node = Node::new("B", 0.0, 0.0);
        let panels = generator().generate(&node, &[0.0], &mut Vec::new());

        assert_eq!(panels.len(), 42);
        assert!(panels.iter().all(|p| p.name != "node_B_seg23"));
        assert!(panels.iter().any(|p| p.name == "node_B_seg27"));
    }

    #[test]
    fn test_disabled_shell_is_empty() {
        let mut config = WorldConfig::default();
        config.shell.enabled = false;
        let node = Node::new("A", 0.0, 0.0);

        assert!(NodeShellGenerator::new(&config)
            .generate(&node, &[], &mut Vec::new())
            .is_empty());
    }

    #[test]
    fn test_zero_radius_warns() {
        let config = WorldConfig {
            node_radius: 0.0,
            ..WorldConfig::default()
        };
        let node = Node::new("Z", 0.0, 0.0);
        let mut warnings = Vec::new();

        let panels = NodeShellGenerator::new(&config).generate(&node, &[1.0], &mut warnings);

        assert!(panels.is_empty());
        assert_eq!(
            warnings,
            vec![GeometryWarning::ZeroRadius {
                node: "Z".to_string()
            }]
        );
    }
}
