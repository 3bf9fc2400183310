//! Configuration loading and flag overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dhruv_dasha::dasha::{DashaEngine, NakshatraPathTable};
use dhruv_dasha::{DashaConfig, NatalSnapshot};
use tracing::info;

use crate::cli::ChartArgs;

/// Read a TOML config, or the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<DashaConfig> {
    let Some(path) = path else {
        return Ok(DashaConfig::default());
    };
    let toml_str = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))
}

/// Apply command-line overrides on top of the file values.
pub fn apply_overrides(config: &mut DashaConfig, args: &ChartArgs) {
    if !args.systems.is_empty() {
        config.systems = args.systems.clone();
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if let Some(years) = args.horizon_years {
        config.horizon_years = Some(years);
    }
    if let Some(method) = args.chara_sub_periods {
        config.chara_sub_periods = method.into();
    }
    if args.strict {
        config.strict_dual_lordship = true;
    }
}

/// Final configuration for a subcommand.
pub fn resolve(args: &ChartArgs) -> Result<DashaConfig> {
    let mut config = load(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    config.validate().context("invalid dasha configuration")?;
    Ok(config)
}

/// Engine for `config`, with its external path table if one is configured.
pub fn build_engine(config: &DashaConfig) -> Result<DashaEngine> {
    let engine = DashaEngine::from_config(config).context("invalid dasha configuration")?;
    let Some(path) = &config.kaal_chakra_table else {
        return Ok(engine);
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read path table: {}", path.display()))?;
    let table = NakshatraPathTable::from_json(&json)
        .with_context(|| format!("invalid path table: {}", path.display()))?;
    info!(path = %path.display(), version = %table.version, "loaded kaal chakra path table");
    engine
        .with_path_table(table)
        .context("path table rejected by engine")
}

/// Snapshot from the chart flags.
pub fn snapshot(args: &ChartArgs) -> Result<NatalSnapshot> {
    let birth = chrono::DateTime::parse_from_rfc3339(&args.birth)
        .with_context(|| format!("invalid --birth instant: {}", args.birth))?;
    let grahas: [f64; 9] = args.grahas.as_slice().try_into().map_err(|_| {
        anyhow::anyhow!(
            "--grahas needs 9 longitudes (Surya to Ketu), got {}",
            args.grahas.len()
        )
    })?;
    NatalSnapshot::from_longitudes(birth, args.asc, grahas).context("invalid chart positions")
}
