//! Graph validation.
//!
//! Runs before any geometry is computed so a bad graph never yields a
//! partial scene.

use std::collections::HashSet;

use graph_types::RouteGraph;
use tracing::debug;

use crate::error::{Endpoint, GraphError};

/// Checks node uniqueness, edge endpoint references, and self-loops.
///
/// Reports the first problem found, scanning nodes before edges in input order.
pub fn validate(graph: &RouteGraph) -> Result<(), GraphError> {
    let mut names = HashSet::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        if !names.insert(node.name.as_str()) {
            return Err(GraphError::DuplicateNode {
                name: node.name.clone(),
            });
        }
    }

    for (index, edge) in graph.edges.iter().enumerate() {
        for (endpoint, name) in [(Endpoint::From, &edge.from), (Endpoint::To, &edge.to)] {
            if !names.contains(name.as_str()) {
                return Err(GraphError::UnknownNode {
                    edge: index,
                    endpoint,
                    name: name.clone(),
                });
            }
        }
        if edge.from == edge.to {
            return Err(GraphError::SelfLoop {
                edge: index,
                name: edge.from.clone(),
            });
        }
    }

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "graph validated"
    );
    Ok(())
}
