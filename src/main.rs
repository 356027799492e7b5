//! Wikiwalk entry point
//!
//! Command-line driver: runs N first-link walks, accumulates the link
//! graph, writes it out as DOT, and optionally renders a PNG.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wikiwalk::config::{WalkConfig, DEFAULT_BASE_URL, DEFAULT_MAX_DEPTH};
use wikiwalk::graph::{render, write_dot, Layout, WalkGraph};
use wikiwalk::page::ArticlePath;
use wikiwalk::walker::WalkEngine;

/// Wikiwalk: first-link walks over Wikipedia
///
/// Repeatedly follows the first link in each article's body text until an
/// article repeats, and accumulates every walk into one directed graph.
#[derive(Parser, Debug)]
#[command(name = "wikiwalk")]
#[command(version = "0.1.0")]
#[command(about = "First-link walks over Wikipedia", long_about = None)]
struct Cli {
    /// Number of walks to perform
    #[arg(short, long, default_value_t = 10)]
    iterations: u32,

    /// Output name stem; the run writes STEM.log, STEM.dot and STEM.png
    #[arg(short, long, default_value = "wiki")]
    out: String,

    /// Render the graph to a PNG after the run
    #[arg(short, long)]
    png: bool,

    /// Graphviz layout program used for rendering
    #[arg(short, long, value_enum, default_value = "dot")]
    layout: Layout,

    /// Article to start the first walk from, e.g. /wiki/Philosophy
    #[arg(short, long)]
    start: Option<ArticlePath>,

    /// Base URL of the wiki host
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Most links to follow in one walk before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = PathBuf::from(format!("{}.log", cli.out));
    setup_logging(&log_path, cli.verbose)?;

    let config = WalkConfig {
        base_url: cli.base_url,
        max_depth: cli.max_depth,
        ..WalkConfig::default()
    };

    let engine = WalkEngine::new(config);
    let mut graph = WalkGraph::new();

    // The requested start page seeds the first walk only
    let mut start = cli.start;

    for iteration in 1..=cli.iterations {
        tracing::info!("Walk {}/{}", iteration, cli.iterations);

        match engine.walk(start.take()).await {
            Ok(walk) => {
                println!("Walk {}:", iteration);
                for page in &walk.pages {
                    println!("  {}", page);
                }
                graph.add_walk(&walk);
            }
            Err(e) => {
                tracing::warn!("Walk {} failed: {}", iteration, e);
            }
        }
    }

    tracing::info!(
        "Accumulated {} pages and {} links",
        graph.node_count(),
        graph.edge_count()
    );

    let dot_path = PathBuf::from(format!("{}.dot", cli.out));
    write_dot(&graph, &dot_path).context("failed to write graph description")?;
    println!("Graph written to {}", dot_path.display());

    if cli.png {
        let image_path = PathBuf::from(format!("{}.png", cli.out));
        render(&dot_path, &image_path, cli.layout).context("failed to render graph image")?;
        println!("Image written to {}", image_path.display());
    }

    Ok(())
}

/// Routes log output to the run's log file
fn setup_logging(path: &Path, verbose: u8) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let filter = match verbose {
        0 => EnvFilter::new("wikiwalk=info,warn"),
        1 => EnvFilter::new("wikiwalk=debug,info"),
        2 => EnvFilter::new("wikiwalk=trace,debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}
