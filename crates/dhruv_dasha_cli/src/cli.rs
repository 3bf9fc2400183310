use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dhruv_dasha::DashaSystem;
use dhruv_dasha::dasha::{DatePrecision, RashiSubPeriodMethod};

/// Vedic dasha periods from sidereal chart positions.
#[derive(Parser)]
#[command(
    name = "dhruv-dasha",
    version,
    about = "Vedic dasha periods from sidereal chart positions"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the period tree of each selected system as JSON.
    Tree(TreeArgs),
    /// Print the active periods at one instant as JSON.
    Current(CurrentArgs),
}

/// Chart inputs and generation overrides shared by every subcommand.
#[derive(clap::Args)]
pub struct ChartArgs {
    /// Birth instant with its UTC offset (RFC 3339, e.g. 1990-05-17T04:30:00+05:30).
    #[arg(long)]
    pub birth: String,

    /// Sidereal ascendant longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub asc: f64,

    /// Nine sidereal graha longitudes, Surya to Ketu, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    pub grahas: Vec<f64>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dasha system to compute; repeat for several. Overrides the config list.
    #[arg(short, long = "system")]
    pub systems: Vec<DashaSystem>,

    /// Override materialized depth (1-5).
    #[arg(short, long)]
    pub depth: Option<u8>,

    /// Override horizon in years (default: one full cycle).
    #[arg(long)]
    pub horizon_years: Option<f64>,

    /// Override Chara sub-period weighting.
    #[arg(long, value_enum)]
    pub chara_sub_periods: Option<SubPeriodArg>,

    /// Fail on an ambiguous dual lordship instead of falling back.
    #[arg(long)]
    pub strict: bool,

    /// Date granularity of the output.
    #[arg(long, value_enum, default_value_t = PrecisionArg::Day)]
    pub precision: PrecisionArg,
}

/// Arguments for the `tree` subcommand.
#[derive(clap::Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub chart: ChartArgs,
}

/// Arguments for the `current` subcommand.
#[derive(clap::Args)]
pub struct CurrentArgs {
    #[command(flatten)]
    pub chart: ChartArgs,

    /// Query instant (RFC 3339). Defaults to now.
    #[arg(long)]
    pub at: Option<String>,

    /// Deepest level to report (1-5). Defaults to the generation depth.
    #[arg(long)]
    pub levels: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrecisionArg {
    Day,
    Full,
}

impl From<PrecisionArg> for DatePrecision {
    fn from(arg: PrecisionArg) -> Self {
        match arg {
            PrecisionArg::Day => DatePrecision::Day,
            PrecisionArg::Full => DatePrecision::Full,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SubPeriodArg {
    Equal,
    Proportional,
}

impl From<SubPeriodArg> for RashiSubPeriodMethod {
    fn from(arg: SubPeriodArg) -> Self {
        match arg {
            SubPeriodArg::Equal => RashiSubPeriodMethod::Equal,
            SubPeriodArg::Proportional => RashiSubPeriodMethod::Proportional,
        }
    }
}
