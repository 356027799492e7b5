//! Cumulative walk graph
//!
//! Every completed walk contributes its consecutive page pairs as directed
//! edges. Nodes and edges are deduplicated: a page is one node no matter
//! how many walks cross it, and a link followed twice is one edge.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::page::ArticlePath;
use crate::walker::Walk;

/// Directed graph of followed links, accumulated across walks
#[derive(Debug, Default)]
pub struct WalkGraph {
    graph: DiGraph<ArticlePath, ()>,
    nodes: HashMap<ArticlePath, NodeIndex>,
}

impl WalkGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every consecutive page pair of `walk` as a directed edge
    pub fn add_walk(&mut self, walk: &Walk) {
        for (from, to) in walk.edges() {
            let from = self.node(from);
            let to = self.node(to);
            self.graph.update_edge(from, to, ());
        }
    }

    /// Returns the node for `page`, inserting it on first sight
    fn node(&mut self, page: &ArticlePath) -> NodeIndex {
        if let Some(&index) = self.nodes.get(page) {
            return index;
        }

        let index = self.graph.add_node(page.clone());
        self.nodes.insert(page.clone(), index);
        index
    }

    /// Number of distinct pages seen
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct links followed
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when a `from` to `to` link has been recorded
    pub fn contains_edge(&self, from: &ArticlePath, to: &ArticlePath) -> bool {
        match (self.nodes.get(from), self.nodes.get(to)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Pages in first-seen order
    pub fn pages(&self) -> impl Iterator<Item = &ArticlePath> + '_ {
        self.graph.node_weights()
    }

    /// Directed edges as page pairs, in first-seen order
    pub fn edges(&self) -> impl Iterator<Item = (&ArticlePath, &ArticlePath)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }
}
