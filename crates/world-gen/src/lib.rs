//! Graph world generator: turns a route graph into a static simulator scene.
//!
//! Every node becomes a ring of short wall panels (a shell) with openings cut
//! at the bearing of each incident corridor. Every edge becomes a pair of
//! parallel walls trimmed to stop at the shells.
//!
//! # Architecture
//!
//! ```text
//! nodes.csv ┐                ┌─▶ NodeShellGenerator ─┐
//!           ├─▶ RouteGraph ──┤   (BearingIndex)      ├─▶ Scene ─▶ SDF / JSON
//! edges.csv ┘                └─▶ EdgeCorridorGenerator┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Tunable dimensions, loaded from TOML
//! - [`graph`]: Referential validation before any geometry
//! - [`bearing`]: Incident corridor directions per node
//! - [`shell`]: Perforated node shells
//! - [`corridor`]: Trimmed corridor wall pairs
//! - [`assembler`]: Whole-graph orchestration
//! - [`format`]: SDF and JSON serialization
//! - [`tables`]: Node and edge table I/O
//! - [`scatter`]: Seeded random box obstacles

pub mod assembler;
pub mod bearing;
pub mod config;
pub mod corridor;
pub mod error;
pub mod format;
pub mod graph;
pub mod scatter;
pub mod shell;
pub mod tables;

pub use assembler::{build_world, GeneratedWorld, SceneAssembler};
pub use bearing::{wrap_angle, Bearing, BearingIndex};
pub use config::{default_config_toml, CorridorConfig, ShellConfig, WorldConfig};
pub use corridor::{CorridorGeometry, EdgeCorridorGenerator};
pub use error::{
    ConfigError, Endpoint, FormatError, GeometryWarning, GraphError, ScatterError, TableError,
    WorldGenError,
};
pub use format::{JsonFormat, OutputFormat, SceneFormat, SdfFormat};
pub use scatter::{scatter_obstacles, scatter_scene, ScatterConfig};
pub use shell::{opening_half_angle, NodeShellGenerator, ShellLayout};
