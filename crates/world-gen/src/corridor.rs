//! Edge corridors: two parallel walls bounding a lane between node shells.

use graph_types::{Edge, PanelStyle, Point, WallPanel};
use tracing::{debug, warn};

use crate::config::WorldConfig;
use crate::error::GeometryWarning;

/// Placement of one corridor's walls, before styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorGeometry {
    /// Direction from the start node to the end node
    pub heading: f64,
    /// Unit vector perpendicular to the heading, pointing left
    pub normal: (f64, f64),
    /// Distance between node centers
    pub distance: f64,
    /// Wall length after trimming at both shells, never negative
    pub length: f64,
    pub midpoint: Point,
    /// Center of the left wall
    pub left: Point,
    /// Center of the right wall
    pub right: Point,
}

impl CorridorGeometry {
    /// Computes wall placement for a corridor from `p` to `q`.
    ///
    /// Coincident endpoints give heading 0 and a zero-length corridor.
    pub fn between(p: Point, q: Point, radius: f64, lane_width: f64, gap: f64) -> Self {
        let heading = p.heading_to(q);
        let normal = (-heading.sin(), heading.cos());
        let distance = p.distance_to(q);
        let length = (distance - 2.0 * radius - gap).max(0.0);
        let midpoint = p.midpoint(q);
        let half = lane_width / 2.0;

        Self {
            heading,
            normal,
            distance,
            length,
            midpoint,
            left: midpoint.offset(normal.0, normal.1, half),
            right: midpoint.offset(normal.0, normal.1, -half),
        }
    }

    /// True when the node shells leave no room for a visible corridor.
    pub fn is_collapsed(&self) -> bool {
        self.length <= 0.0
    }
}

/// Builds the wall pair for each edge.
#[derive(Debug, Clone)]
pub struct EdgeCorridorGenerator {
    radius: f64,
    lane_width: f64,
    gap: f64,
    thickness: f64,
    height: f64,
    style: PanelStyle,
}

impl EdgeCorridorGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            radius: config.node_radius,
            lane_width: config.lane_width,
            gap: config.node_gap,
            thickness: config.corridor.thickness,
            height: config.wall_height,
            style: config.corridor_style(),
        }
    }

    pub fn geometry(&self, p: Point, q: Point) -> CorridorGeometry {
        CorridorGeometry::between(p, q, self.radius, self.lane_width, self.gap)
    }

    /// Generates the left and right walls of edge `index` from `p` to `q`.
    ///
    /// Always yields two panels. A collapsed corridor keeps its panels at the
    /// minimum extent and is recorded in `warnings`.
    pub fn generate(
        &self,
        index: usize,
        edge: &Edge,
        p: Point,
        q: Point,
        warnings: &mut Vec<GeometryWarning>,
    ) -> [WallPanel; 2] {
        let geometry = self.geometry(p, q);

        if geometry.distance == 0.0 {
            warn!(edge = index, from = %edge.from, to = %edge.to, "corridor endpoints coincide");
            warnings.push(GeometryWarning::CoincidentEndpoints {
                edge: index,
                from: edge.from.clone(),
                to: edge.to.clone(),
            });
        } else if geometry.is_collapsed() {
            warn!(
                edge = index,
                from = %edge.from,
                to = %edge.to,
                distance = geometry.distance,
                "corridor collapsed between overlapping shells"
            );
            warnings.push(GeometryWarning::CollapsedCorridor {
                edge: index,
                from: edge.from.clone(),
                to: edge.to.clone(),
                distance: geometry.distance,
            });
        }

        debug!(
            edge = index,
            heading = geometry.heading,
            length = geometry.length,
            "generated corridor"
        );

        [
            self.wall(format!("edge{}_L", index), geometry.left, &geometry),
            self.wall(format!("edge{}_R", index), geometry.right, &geometry),
        ]
    }

    fn wall(&self, name: String, center: Point, geometry: &CorridorGeometry) -> WallPanel {
        WallPanel::new(
            name,
            center,
            geometry.heading,
            geometry.length,
            self.thickness,
            self.height,
            &self.style,
        )
    }
}
