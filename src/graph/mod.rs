//! Link graph accumulation and export
//!
//! This module collects completed walks into one directed graph and writes
//! it out, including:
//! - Node and edge deduplication across walks
//! - Graphviz DOT serialization
//! - Optional rasterization via the Graphviz layout programs

mod accumulator;
mod export;

pub use accumulator::WalkGraph;
pub use export::{dot_description, render, write_dot, ExportError, Layout};
