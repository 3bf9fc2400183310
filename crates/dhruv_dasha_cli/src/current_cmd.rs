//! Current command: active periods at one instant.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use dhruv_dasha::dasha::render_snapshot;
use dhruv_dasha::jd_from_datetime;
use tracing::{debug, info_span};

use crate::cli::CurrentArgs;
use crate::config;

/// Locate the active chain for every selected system and print it as JSON.
pub fn run(args: CurrentArgs) -> Result<()> {
    let _cmd = info_span!("current").entered();
    let config = config::resolve(&args.chart)?;
    let snapshot = config::snapshot(&args.chart)?;
    let engine = config::build_engine(&config)?;
    let precision = args.chart.precision.into();

    let at_jd = match &args.at {
        Some(at) => {
            let dt = DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("invalid --at instant: {at}"))?;
            jd_from_datetime(&dt)
        }
        None => jd_from_datetime(&Utc::now()),
    };
    let levels = args.levels.unwrap_or(config.depth);
    debug!(at_jd, levels, "querying active periods");

    let mut records = Vec::with_capacity(config.systems.len());
    for &system in &config.systems {
        let active = engine
            .current(&snapshot, system, at_jd, levels)
            .with_context(|| format!("no {system} period at the requested instant"))?;
        records.push(
            render_snapshot(&active, snapshot.utc_offset(), precision)
                .with_context(|| format!("failed to render {system} periods"))?,
        );
    }

    let json = serde_json::to_string_pretty(&records).context("failed to serialize periods")?;
    println!("{json}");
    Ok(())
}
