//! Shared graph and scene types for the graph world generator.
//!
//! This crate contains pure data structures with no generation logic.
//! It is a dependency for the generator crate and anything that wants to
//! read its output.

pub mod geometry;
pub mod graph;
pub mod panel;
pub mod scene;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use geometry::Point;
pub use graph::{Edge, Node, RouteGraph};
pub use panel::{PanelMaterial, PanelStyle, Rgba, WallPanel, MIN_EXTENT};
pub use scene::Scene;
