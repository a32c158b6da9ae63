//! Incident corridor bearings for every node.
//!
//! An edge from A to B contributes the direction A→B to A and the reverse
//! direction B→A to B. Shell openings are cut around these bearings.

use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use graph_types::RouteGraph;

use crate::error::{Endpoint, GraphError};

/// Normalizes an angle into (−π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// One corridor direction leaving a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bearing {
    /// Index of the edge that produced this bearing
    pub edge: usize,
    /// Direction in radians, within (−π, π]
    pub angle: f64,
}

/// Bearings of all incident edges, grouped by node.
#[derive(Debug, Clone, Default)]
pub struct BearingIndex {
    slots: HashMap<String, usize>,
    bearings: Vec<Vec<Bearing>>,
}

impl BearingIndex {
    /// Computes the bearing lists for every node of `graph`.
    ///
    /// Each node's list follows edge order. Fails if an edge names a node
    /// that is not in the graph.
    pub fn build(graph: &RouteGraph) -> Result<Self, GraphError> {
        let slots: HashMap<String, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.name.clone(), i))
            .collect();
        let mut bearings = vec![Vec::new(); graph.nodes.len()];

        for (index, edge) in graph.edges.iter().enumerate() {
            let from = lookup(&slots, index, Endpoint::From, &edge.from)?;
            let to = lookup(&slots, index, Endpoint::To, &edge.to)?;
            let p = graph.nodes[from].position;
            let q = graph.nodes[to].position;

            bearings[from].push(Bearing {
                edge: index,
                angle: wrap_angle(p.heading_to(q)),
            });
            bearings[to].push(Bearing {
                edge: index,
                angle: wrap_angle(q.heading_to(p)),
            });
        }

        Ok(Self { slots, bearings })
    }

    /// Bearings at the named node; empty for unknown or isolated nodes.
    pub fn bearings(&self, node: &str) -> &[Bearing] {
        self.slots
            .get(node)
            .map(|&slot| self.bearings[slot].as_slice())
            .unwrap_or(&[])
    }

    /// Just the angles at the named node.
    pub fn angles(&self, node: &str) -> Vec<f64> {
        self.bearings(node).iter().map(|b| b.angle).collect()
    }

    /// Total number of bearings across all nodes.
    pub fn total(&self) -> usize {
        self.bearings.iter().map(Vec::len).sum()
    }
}

fn lookup(
    slots: &HashMap<String, usize>,
    edge: usize,
    endpoint: Endpoint,
    name: &str,
) -> Result<usize, GraphError> {
    slots
        .get(name)
        .copied()
        .ok_or_else(|| GraphError::UnknownNode {
            edge,
            endpoint,
            name: name.to_string(),
        })
}
