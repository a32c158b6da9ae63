//! Node and edge tables.
//!
//! Both tables are comma-separated text with a header row. The node table
//! needs `name`, `x`, `y`; the edge table needs `from`, `to`, `seconds`.
//! Columns may come in any order and extra columns are ignored. Any row
//! that cannot be read fails the whole load, naming the table and line.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use graph_types::{Edge, Node, RouteGraph};
use tracing::{debug, info};

use crate::error::TableError;

const NODE_TABLE: &str = "node";
const EDGE_TABLE: &str = "edge";

/// Node table written when none exists yet.
pub const DEMO_NODES_CSV: &str = "\
name,x,y
A,0.0,-8.0
B,5.0,-4.0
C,-5.0,0.0
D,5.0,1.0
G,0.0,8.0
";

/// Edge table written when none exists yet.
pub const DEMO_EDGES_CSV: &str = "\
from,to,seconds
A,C,7
C,G,7
A,G,10
A,B,8
B,D,4
D,G,6
B,G,9
";

/// Parses a node table.
pub fn parse_nodes(text: &str) -> Result<Vec<Node>, TableError> {
    let mut rows = Rows::new(NODE_TABLE, text)?;
    let name = rows.column("name")?;
    let x = rows.column("x")?;
    let y = rows.column("y")?;

    let mut nodes = Vec::new();
    while let Some(row) = rows.next_row() {
        nodes.push(Node::new(
            row.name(name, "name")?,
            row.number(x, "x")?,
            row.number(y, "y")?,
        ));
    }
    debug!(count = nodes.len(), "parsed node table");
    Ok(nodes)
}

/// Parses an edge table.
pub fn parse_edges(text: &str) -> Result<Vec<Edge>, TableError> {
    let mut rows = Rows::new(EDGE_TABLE, text)?;
    let from = rows.column("from")?;
    let to = rows.column("to")?;
    let seconds = rows.column("seconds")?;

    let mut edges = Vec::new();
    while let Some(row) = rows.next_row() {
        edges.push(Edge::new(
            row.name(from, "from")?,
            row.name(to, "to")?,
            row.number(seconds, "seconds")?,
        ));
    }
    debug!(count = edges.len(), "parsed edge table");
    Ok(edges)
}

pub fn read_nodes(path: &Path) -> Result<Vec<Node>, TableError> {
    parse_nodes(&read_table(NODE_TABLE, path)?)
}

pub fn read_edges(path: &Path) -> Result<Vec<Edge>, TableError> {
    parse_edges(&read_table(EDGE_TABLE, path)?)
}

/// Reads both tables into a graph. Referential checks happen later, at assembly.
pub fn load_graph(nodes: &Path, edges: &Path) -> Result<RouteGraph, TableError> {
    let graph = RouteGraph::new(read_nodes(nodes)?, read_edges(edges)?);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph tables"
    );
    Ok(graph)
}

/// Writes the demo tables where they are missing.
///
/// Existing files are left untouched. Returns how many files were written.
pub fn ensure_templates(nodes: &Path, edges: &Path) -> Result<usize, TableError> {
    let mut written = 0;
    for (table, path, content) in [
        (NODE_TABLE, nodes, DEMO_NODES_CSV),
        (EDGE_TABLE, edges, DEMO_EDGES_CSV),
    ] {
        if path.exists() {
            continue;
        }
        seed_table(path, content).map_err(|source| TableError::Seed {
            table,
            path: path.to_path_buf(),
            source,
        })?;
        info!("seeded template table {:?}", path);
        written += 1;
    }
    Ok(written)
}

fn seed_table(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Renders nodes as a table that [`parse_nodes`] accepts.
pub fn nodes_to_csv(nodes: &[Node]) -> String {
    let mut out = String::from("name,x,y\n");
    for node in nodes {
        out.push_str(&format!(
            "{},{},{}\n",
            node.name, node.position.x, node.position.y
        ));
    }
    out
}

/// Renders edges as a table that [`parse_edges`] accepts.
pub fn edges_to_csv(edges: &[Edge]) -> String {
    let mut out = String::from("from,to,seconds\n");
    for edge in edges {
        out.push_str(&format!("{},{},{}\n", edge.from, edge.to, edge.seconds));
    }
    out
}

fn read_table(table: &'static str, path: &Path) -> Result<String, TableError> {
    fs::read_to_string(path).map_err(|source| TableError::Io {
        table,
        path: path.to_path_buf(),
        source,
    })
}

/// Line-oriented reader over one table.
struct Rows<'a> {
    table: &'static str,
    header: HashMap<String, usize>,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Rows<'a> {
    fn new(table: &'static str, text: &'a str) -> Result<Self, TableError> {
        let mut lines = text.lines().enumerate();
        let header_line = lines
            .by_ref()
            .map(|(_, line)| line)
            .find(|line| !line.trim().is_empty())
            .ok_or(TableError::MissingHeader { table })?;
        let header = split_fields(header_line)
            .into_iter()
            .enumerate()
            .map(|(i, field)| (field, i))
            .collect();

        Ok(Self {
            table,
            header,
            lines,
        })
    }

    fn column(&self, column: &'static str) -> Result<usize, TableError> {
        self.header
            .get(column)
            .copied()
            .ok_or(TableError::MissingColumn {
                table: self.table,
                column,
            })
    }

    fn next_row(&mut self) -> Option<Row> {
        let table = self.table;
        self.lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Row {
                table,
                line: i + 1,
                fields: split_fields(line),
            })
    }
}

/// One data row, with its 1-based line number.
struct Row {
    table: &'static str,
    line: usize,
    fields: Vec<String>,
}

impl Row {
    fn field(&self, index: usize, column: &'static str) -> Result<&str, TableError> {
        match self.fields.get(index) {
            Some(value) if !value.is_empty() => Ok(value.as_str()),
            _ => Err(self.missing(column)),
        }
    }

    fn name(&self, index: usize, column: &'static str) -> Result<String, TableError> {
        match self.fields.get(index) {
            Some(value) if !value.is_empty() => Ok(value.clone()),
            Some(_) => Err(TableError::EmptyName {
                table: self.table,
                line: self.line,
                column,
            }),
            None => Err(self.missing(column)),
        }
    }

    fn missing(&self, column: &'static str) -> TableError {
        TableError::MissingField {
            table: self.table,
            line: self.line,
            column,
        }
    }

    fn number(&self, index: usize, column: &'static str) -> Result<f64, TableError> {
        let value = self.field(index, column)?;
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(TableError::InvalidNumber {
                table: self.table,
                line: self.line,
                column,
                value: value.to_string(),
            }),
        }
    }
}

/// Splits one line into trimmed fields.
///
/// A field wrapped in double quotes may contain commas, and `""` inside it
/// stands for a literal quote. An unterminated quote runs to the end of the line.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| *c != ',' && c.is_whitespace()).is_some() {}

        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(c) = chars.next() {
                match c {
                    '"' if chars.next_if_eq(&'"').is_some() => field.push('"'),
                    '"' => break,
                    _ => field.push(c),
                }
            }
            // Anything between the closing quote and the next comma is dropped.
            while chars.next_if(|c| *c != ',').is_some() {}
        } else {
            while let Some(c) = chars.next_if(|c| *c != ',') {
                field.push(c);
            }
        }
        fields.push(field.trim().to_string());

        if chars.next().is_none() {
            return fields;
        }
    }
}
