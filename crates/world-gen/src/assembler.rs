//! Scene assembly: validates the graph, runs both generators, and collects
//! their panels into one scene.
//!
//! Shells come first in node order, then corridors in edge order, so the
//! same graph and configuration always produce the same document.

use graph_types::{Point, RouteGraph, Scene};
use tracing::{info, warn};

use crate::bearing::BearingIndex;
use crate::config::WorldConfig;
use crate::corridor::EdgeCorridorGenerator;
use crate::error::{Endpoint, GeometryWarning, GraphError, WorldGenError};
use crate::format::{OutputFormat, SceneFormat, SdfFormat};
use crate::graph;
use crate::shell::NodeShellGenerator;

/// A generated scene plus any non-fatal degeneracies met on the way.
#[derive(Debug, Clone, Default)]
pub struct GeneratedWorld {
    pub scene: Scene,
    pub warnings: Vec<GeometryWarning>,
}

impl GeneratedWorld {
    pub fn panel_count(&self) -> usize {
        self.scene.len()
    }
}

/// Orchestrates shell and corridor generation for a whole graph.
#[derive(Debug, Clone)]
pub struct SceneAssembler {
    config: WorldConfig,
    shells: NodeShellGenerator,
    corridors: EdgeCorridorGenerator,
}

impl SceneAssembler {
    /// Creates an assembler, rejecting unusable configurations.
    pub fn new(config: WorldConfig) -> Result<Self, WorldGenError> {
        config.validate()?;
        Ok(Self {
            shells: NodeShellGenerator::new(&config),
            corridors: EdgeCorridorGenerator::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Generates every panel for `graph`.
    ///
    /// The graph is validated up front; any referential error aborts the run
    /// before geometry is computed.
    pub fn assemble(&self, graph: &RouteGraph) -> Result<GeneratedWorld, GraphError> {
        graph::validate(graph)?;
        let bearings = BearingIndex::build(graph)?;

        let mut scene = Scene::new(self.config.world_name.clone());
        let mut warnings = Vec::new();

        if self.config.shell.enabled {
            for node in &graph.nodes {
                let angles = bearings.angles(&node.name);
                scene.extend(self.shells.generate(node, &angles, &mut warnings));
            }
        }

        for (index, edge) in graph.edges.iter().enumerate() {
            let p = position_of(graph, index, Endpoint::From, &edge.from)?;
            let q = position_of(graph, index, Endpoint::To, &edge.to)?;
            scene.extend(self.corridors.generate(index, edge, p, q, &mut warnings));
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            panels = scene.len(),
            warnings = warnings.len(),
            "assembled scene"
        );
        if !warnings.is_empty() {
            warn!("{} geometric degeneracies clamped", warnings.len());
        }

        Ok(GeneratedWorld { scene, warnings })
    }

    /// Generates and serializes the scene for `graph`.
    pub fn render(
        &self,
        graph: &RouteGraph,
        format: OutputFormat,
    ) -> Result<String, WorldGenError> {
        let world = self.assemble(graph)?;
        Ok(format.render(&world.scene)?)
    }
}

fn position_of(
    graph: &RouteGraph,
    edge: usize,
    endpoint: Endpoint,
    name: &str,
) -> Result<Point, GraphError> {
    graph.position(name).ok_or_else(|| GraphError::UnknownNode {
        edge,
        endpoint,
        name: name.to_string(),
    })
}

/// Builds the SDF world document for `graph` with `config`.
pub fn build_world(graph: &RouteGraph, config: &WorldConfig) -> Result<String, WorldGenError> {
    let assembler = SceneAssembler::new(config.clone())?;
    let world = assembler.assemble(graph)?;
    Ok(SdfFormat::default().render(&world.scene)?)
}
