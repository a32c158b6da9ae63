//! End-to-end generation tests.
//!
//! These tests load the CSV fixtures, assemble a world, and check the
//! properties every generated scene must hold.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use graph_types::fixtures;
use tempfile::tempdir;
use world_gen::{
    build_world, tables, wrap_angle, BearingIndex, GraphError, OutputFormat, SceneAssembler,
    TableError, WorldConfig, WorldGenError,
};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture_graph() -> graph_types::RouteGraph {
    tables::load_graph(&fixture("nodes.csv"), &fixture("edges.csv"))
        .expect("Failed to load fixture graph")
}

/// Test that the fixture tables load into the demo graph.
#[test]
fn test_fixtures_load() {
    let graph = load_fixture_graph();

    assert_eq!(graph, fixtures::demo_graph());
}

/// Test the panel count invariant: surviving wedges plus two walls per edge.
#[test]
fn test_panel_count_invariant() {
    let graph = load_fixture_graph();
    let assembler = SceneAssembler::new(WorldConfig::default()).unwrap();
    let world = assembler.assemble(&graph).unwrap();

    let shell_panels = world.scene.panels_named("node_").count();
    let corridor_panels = world.scene.panels_named("edge").count();
    assert_eq!(corridor_panels, 2 * graph.edge_count());
    assert_eq!(world.panel_count(), shell_panels + corridor_panels);
}

/// Test that every corridor direction has an opening in its node's shell.
#[test]
fn test_opening_at_every_bearing() {
    let graph = load_fixture_graph();
    let config = WorldConfig::default();
    let world = SceneAssembler::new(config.clone())
        .unwrap()
        .assemble(&graph)
        .unwrap();
    let bearings = BearingIndex::build(&graph).unwrap();
    let dtheta = 2.0 * PI / f64::from(config.shell.segments);

    for node in &graph.nodes {
        let prefix = format!("node_{}_seg", node.name);
        let present: Vec<usize> = world
            .scene
            .panels_named(&prefix)
            .map(|p| p.name[prefix.len()..].parse().unwrap())
            .collect();

        for bearing in bearings.bearings(&node.name) {
            // The wedge whose span contains the bearing must be gone.
            let wedge = (((bearing.angle + PI) / dtheta).floor() as usize).min(47);
            assert!(
                !present.contains(&wedge),
                "node {} has no opening for edge {}",
                node.name,
                bearing.edge
            );
        }
    }
}

/// Test that corridor walls are lane width apart regardless of radius.
#[test]
fn test_corridor_walls_lane_width_apart() {
    let graph = load_fixture_graph();

    for radius in [0.5, 1.0, 2.0] {
        let config = WorldConfig {
            node_radius: radius,
            lane_width: 0.7,
            ..WorldConfig::default()
        };
        let world = SceneAssembler::new(config).unwrap().assemble(&graph).unwrap();

        for index in 0..graph.edge_count() {
            let left = world
                .scene
                .panels
                .iter()
                .find(|p| p.name == format!("edge{}_L", index))
                .unwrap();
            let right = world
                .scene
                .panels
                .iter()
                .find(|p| p.name == format!("edge{}_R", index))
                .unwrap();

            assert_relative_eq!(left.center.distance_to(right.center), 0.7, epsilon = 1e-9);
            assert_eq!(left.yaw, right.yaw);
        }
    }
}

/// Test the A-B corridor against hand-computed values.
#[test]
fn test_a_to_b_corridor_values() {
    let world = SceneAssembler::new(WorldConfig::default())
        .unwrap()
        .assemble(&load_fixture_graph())
        .unwrap();

    // A-B is the fourth edge in the table.
    let left = world
        .scene
        .panels
        .iter()
        .find(|p| p.name == "edge3_L")
        .unwrap();
    assert_relative_eq!(left.yaw, 0.6747, epsilon = 1e-4);
    assert_relative_eq!(left.length, 4.3531, epsilon = 1e-4);
    assert_relative_eq!(left.center.x, 2.5 - 0.25 * 0.6247, epsilon = 1e-4);
    assert_relative_eq!(left.center.y, -6.0 + 0.25 * 0.7809, epsilon = 1e-4);
}

/// Test that bearings at both ends of an edge are reversed.
#[test]
fn test_reverse_bearings() {
    let graph = load_fixture_graph();
    let index = BearingIndex::build(&graph).unwrap();

    for (i, edge) in graph.edges.iter().enumerate() {
        let at_from = index
            .bearings(&edge.from)
            .iter()
            .find(|b| b.edge == i)
            .unwrap();
        let at_to = index
            .bearings(&edge.to)
            .iter()
            .find(|b| b.edge == i)
            .unwrap();

        assert_relative_eq!(wrap_angle(at_from.angle + PI), at_to.angle, epsilon = 1e-9);
    }
}

/// Test that identical inputs produce byte-identical documents.
#[test]
fn test_generation_is_deterministic() {
    let graph = load_fixture_graph();
    let config = WorldConfig::default();

    let first = build_world(&graph, &config).unwrap();
    let second = build_world(&load_fixture_graph(), &config).unwrap();

    assert_eq!(first, second);
}

/// Test that an unknown node aborts generation.
#[test]
fn test_unknown_node_fails_run() {
    let graph = tables::load_graph(&fixture("nodes.csv"), &fixture("edges_unknown_node.csv"))
        .unwrap();

    let err = build_world(&graph, &WorldConfig::default()).unwrap_err();

    match err {
        WorldGenError::Graph(GraphError::UnknownNode { edge, name, .. }) => {
            assert_eq!(edge, 1);
            assert_eq!(name, "H");
        }
        other => panic!("unexpected error: {}", other),
    }
}

/// Test that malformed numbers are reported with their line.
#[test]
fn test_malformed_table_fails_load() {
    let err = tables::load_graph(&fixture("nodes_malformed.csv"), &fixture("edges.csv"))
        .unwrap_err();

    assert!(matches!(err, TableError::InvalidNumber { line: 3, .. }));
    assert!(err.to_string().contains("five"));
}

/// Test writing the rendered document to disk.
#[test]
fn test_render_to_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("worlds/graph_routes.world");
    let graph = load_fixture_graph();
    let assembler = SceneAssembler::new(WorldConfig::default()).unwrap();

    let document = assembler.render(&graph, OutputFormat::Sdf).unwrap();
    fs::create_dir_all(out.parent().unwrap()).unwrap();
    fs::write(&out, &document).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("<world name=\"graph_routes\">"));
    assert!(written.contains("<model name=\"edge6_R\">"));
    assert!(written.contains("<model name=\"node_G_seg0\">"));
}

/// Test JSON output lists every panel.
#[test]
fn test_json_output() {
    let graph = load_fixture_graph();
    let assembler = SceneAssembler::new(WorldConfig::default()).unwrap();
    let world = assembler.assemble(&graph).unwrap();

    let json = assembler.render(&graph, OutputFormat::Json).unwrap();
    let scene: graph_types::Scene = serde_json::from_str(&json).unwrap();

    assert_eq!(scene.len(), world.panel_count());
}

/// Test that a config file drives generation.
#[test]
fn test_config_file_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("world.toml");
    fs::write(
        &path,
        r#"
            world_name = "custom"

            [shell]
            enabled = false
        "#,
    )
    .unwrap();

    let config = WorldConfig::from_file(&path).unwrap();
    let world = SceneAssembler::new(config)
        .unwrap()
        .assemble(&load_fixture_graph())
        .unwrap();

    assert_eq!(world.scene.world_name, "custom");
    assert_eq!(world.panel_count(), 14);
}
