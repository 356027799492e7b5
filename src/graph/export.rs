//! Graph export
//!
//! Writes the accumulated graph as a Graphviz DOT description, and
//! optionally shells out to a Graphviz layout program to rasterize it.

use std::path::Path;
use std::process::{Command, ExitStatus};

use clap::ValueEnum;
use thiserror::Error;

use crate::graph::accumulator::WalkGraph;

/// Errors from writing or rendering graph output
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        source: std::io::Error,
    },

    #[error("{program} failed: {status}")]
    Render {
        program: &'static str,
        status: ExitStatus,
    },
}

/// Graphviz layout programs the exporter may invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
    /// Hierarchical layout
    #[default]
    Dot,
    /// Spring model layout
    Neato,
    /// Radial layout
    Twopi,
    /// Force-directed layout
    Fdp,
}

impl Layout {
    /// Name of the executable to invoke
    pub fn program(self) -> &'static str {
        match self {
            Layout::Dot => "dot",
            Layout::Neato => "neato",
            Layout::Twopi => "twopi",
            Layout::Fdp => "fdp",
        }
    }
}

/// Renders the graph as a DOT digraph description
///
/// One quoted node statement per page, one quoted edge statement per
/// followed link, both in first-seen order.
pub fn dot_description(graph: &WalkGraph) -> String {
    let mut out = String::from("digraph wikiwalk {\n");

    for page in graph.pages() {
        out.push_str(&format!("    {};\n", quote(page.as_str())));
    }

    for (from, to) in graph.edges() {
        out.push_str(&format!(
            "    {} -> {};\n",
            quote(from.as_str()),
            quote(to.as_str())
        ));
    }

    out.push_str("}\n");
    out
}

/// Writes the DOT description of `graph` to `path`
pub fn write_dot(graph: &WalkGraph, path: &Path) -> Result<(), ExportError> {
    let description = dot_description(graph);
    std::fs::write(path, description).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Wrote graph description to {}", path.display());
    Ok(())
}

/// Rasterizes a DOT file to a PNG with the chosen layout program
///
/// Runs `PROGRAM -Tpng DOT -o IMAGE`. A missing program or a non-zero exit
/// is an error.
///
/// # Arguments
///
/// * `dot_path` - The DOT description to render
/// * `image_path` - Where the PNG goes
/// * `layout` - Which layout program to run
pub fn render(dot_path: &Path, image_path: &Path, layout: Layout) -> Result<(), ExportError> {
    let program = layout.program();
    tracing::info!("Rendering {} with {}", image_path.display(), program);

    let status = Command::new(program)
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(image_path)
        .status()
        .map_err(|source| ExportError::Spawn { program, source })?;

    if !status.success() {
        return Err(ExportError::Render { program, status });
    }

    Ok(())
}

/// Quotes a DOT identifier, escaping embedded quotes and backslashes
fn quote(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for ch in name.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
