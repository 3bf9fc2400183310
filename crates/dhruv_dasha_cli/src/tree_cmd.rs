//! Tree command: generate and print the period tree of each system.

use anyhow::{Context, Result};
use dhruv_dasha::dasha::render_tree;
use tracing::{info, info_span};

use crate::cli::TreeArgs;
use crate::config;

/// Generate every selected tree and print them as one JSON array.
pub fn run(args: TreeArgs) -> Result<()> {
    let _cmd = info_span!("tree").entered();
    let config = config::resolve(&args.chart)?;
    let snapshot = config::snapshot(&args.chart)?;
    let engine = config::build_engine(&config)?;
    let precision = args.chart.precision.into();

    let mut records = Vec::with_capacity(config.systems.len());
    for &system in &config.systems {
        let tree = engine
            .tree(&snapshot, system)
            .with_context(|| format!("failed to generate {system} tree"))?;
        info!(
            system = %system,
            mahadashas = tree.top_level.len(),
            nodes = tree.node_count(),
            "tree generated"
        );
        records.push(
            render_tree(&tree, precision)
                .with_context(|| format!("failed to render {system} tree"))?,
        );
    }

    let json = serde_json::to_string_pretty(&records).context("failed to serialize trees")?;
    println!("{json}");
    Ok(())
}
