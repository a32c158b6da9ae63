//! Sample graphs for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // graph-types = { path = "../graph-types", features = ["test-fixtures"] }
//!
//! use graph_types::fixtures;
//!
//! let graph = fixtures::demo_graph();
//! ```

use crate::{Edge, Node, RouteGraph};

/// The five-node demo graph.
///
/// Nodes A(0,-8), B(5,-4), C(-5,0), D(5,1), G(0,8) joined by seven edges.
pub fn demo_graph() -> RouteGraph {
    RouteGraph::new(
        vec![
            Node::new("A", 0.0, -8.0),
            Node::new("B", 5.0, -4.0),
            Node::new("C", -5.0, 0.0),
            Node::new("D", 5.0, 1.0),
            Node::new("G", 0.0, 8.0),
        ],
        vec![
            Edge::new("A", "C", 7.0),
            Edge::new("C", "G", 7.0),
            Edge::new("A", "G", 10.0),
            Edge::new("A", "B", 8.0),
            Edge::new("B", "D", 4.0),
            Edge::new("D", "G", 6.0),
            Edge::new("B", "G", 9.0),
        ],
    )
}

/// A hub at the origin with `spokes` leaves evenly spaced at distance `arm`.
///
/// The first spoke points along +x.
pub fn star_graph(spokes: usize, arm: f64) -> RouteGraph {
    let mut nodes = vec![Node::new("hub", 0.0, 0.0)];
    let mut edges = Vec::with_capacity(spokes);
    for i in 0..spokes {
        let angle = std::f64::consts::TAU * i as f64 / spokes as f64;
        let name = format!("leaf{}", i);
        nodes.push(Node::new(name.clone(), arm * angle.cos(), arm * angle.sin()));
        edges.push(Edge::new("hub", name, 1.0));
    }
    RouteGraph::new(nodes, edges)
}

/// A single node with no edges.
pub fn lone_node() -> RouteGraph {
    RouteGraph::new(vec![Node::new("solo", 3.0, -2.0)], Vec::new())
}
