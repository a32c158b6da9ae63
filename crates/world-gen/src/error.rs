//! Error and warning types for world generation.
//!
//! Validation failures abort a run before any geometry is computed.
//! Geometric degeneracies are reported as [`GeometryWarning`]s and never abort.

use std::path::PathBuf;

use thiserror::Error;

/// Referential and structural problems in the input graph.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// An edge endpoint names a node that does not exist
    #[error("edge {edge} references unknown {endpoint} node '{name}'")]
    UnknownNode {
        edge: usize,
        endpoint: Endpoint,
        name: String,
    },
    /// Two nodes share a name
    #[error("node '{name}' is defined more than once")]
    DuplicateNode { name: String },
    /// An edge starts and ends at the same node
    #[error("edge {edge} is a self-loop on node '{name}'")]
    SelfLoop { edge: usize, name: String },
}

/// Which end of an edge an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::From => write!(f, "'from'"),
            Endpoint::To => write!(f, "'to'"),
        }
    }
}

/// Malformed node or edge tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {table} table {path:?}: {source}")]
    Io {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to seed {table} table {path:?}: {source}")]
    Seed {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{table} table has no header row")]
    MissingHeader { table: &'static str },
    #[error("{table} table is missing column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("{table} table line {line}: missing value for '{column}'")]
    MissingField {
        table: &'static str,
        line: usize,
        column: &'static str,
    },
    #[error("{table} table line {line}: '{value}' is not a number in column '{column}'")]
    InvalidNumber {
        table: &'static str,
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("{table} table line {line}: empty name in column '{column}'")]
    EmptyName {
        table: &'static str,
        line: usize,
        column: &'static str,
    },
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Scene serialization errors.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("XML error: {0}")]
    Xml(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Obstacle scatter errors.
#[derive(Debug, Error, PartialEq)]
pub enum ScatterError {
    #[error("invalid scatter bounds: {0}")]
    InvalidBounds(String),
    #[error("no position found outside the keep-out radius after {attempts} attempts")]
    KeepoutUnreachable { attempts: usize },
}

/// Top-level error for a generator run.
#[derive(Debug, Error)]
pub enum WorldGenError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("input error: {0}")]
    Table(#[from] TableError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("scatter error: {0}")]
    Scatter(#[from] ScatterError),
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal geometric degeneracies found while generating.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryWarning {
    /// Node shells overlap, so the corridor between them has no visible length
    CollapsedCorridor {
        edge: usize,
        from: String,
        to: String,
        distance: f64,
    },
    /// Both corridor endpoints sit at the same position
    CoincidentEndpoints {
        edge: usize,
        from: String,
        to: String,
    },
    /// Node radius is not positive, so no shell is generated
    ZeroRadius { node: String },
}

impl std::fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryWarning::CollapsedCorridor {
                edge,
                from,
                to,
                distance,
            } => write!(
                f,
                "edge {} ({} -> {}) collapsed: node centers only {:.3} apart",
                edge, from, to, distance
            ),
            GeometryWarning::CoincidentEndpoints { edge, from, to } => write!(
                f,
                "edge {} ({} -> {}) joins coincident positions",
                edge, from, to
            ),
            GeometryWarning::ZeroRadius { node } => {
                write!(f, "node '{}' has non-positive radius, shell skipped", node)
            }
        }
    }
}
