//! Nodes, edges, and the route graph they form.
//!
//! The graph is loaded once and never mutated during generation. Referential
//! integrity is checked by the generator before any geometry is computed.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A named location rendered as a perforated circular shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node name
    pub name: String,
    /// Position on the ground plane
    pub position: Point,
}

impl Node {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            position: Point::new(x, y),
        }
    }
}

/// A corridor between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Name of the start node
    pub from: String,
    /// Name of the end node
    pub to: String,
    /// Traversal cost in seconds. Carried for route planners, unused by geometry.
    pub seconds: f64,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, seconds: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            seconds,
        }
    }
}

/// The abstract graph a world is generated from.
///
/// Node order is preserved and drives output order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl RouteGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Looks up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Returns the position of the named node, if present.
    pub fn position(&self, name: &str) -> Option<Point> {
        self.node(name).map(|n| n.position)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edge endpoints touching the named node.
    pub fn degree(&self, name: &str) -> usize {
        self.edges
            .iter()
            .map(|e| usize::from(e.from == name) + usize::from(e.to == name))
            .sum()
    }
}
