use clap::{Args, Parser, Subcommand};
use pepscreen::core::models::docking::SortOrientation;
use pepscreen::engine::config::{Normalization, RankAssignment, RankingModeKind, WildTypePolicy};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pepscreen - Generate peptide variant libraries and rank docked variants for synthesis.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for descriptor computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate, describe and filter variants of a parent peptide.
    Generate(GenerateArgs),
    /// Collect best binding scores from per-variant docking logs into a CSV.
    Collect(CollectArgs),
    /// Rank docked variants and select candidates for synthesis.
    Rank(RankArgs),
}

/// Where the parent sequence comes from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ParentSource {
    /// FASTA file whose first record is the parent peptide.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Parent peptide given inline as one-letter codes.
    #[arg(long, value_name = "RESIDUES")]
    pub sequence: Option<String>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    // --- Core Arguments ---
    #[command(flatten)]
    pub parent: ParentSource,

    /// Path for the accepted variant library (FASTA).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path for the audit CSV of rejected variants.
    #[arg(long, value_name = "PATH")]
    pub rejected: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Generation Overrides ---
    /// Mutation rule as POSITION=CODES, e.g. `2=A,G,S` or `12=S,-`.
    /// Can be used multiple times; replaces the rules from the config file.
    #[arg(short = 'm', long = "mutate", value_name = "POS=CODES")]
    pub mutations: Vec<String>,

    /// Override the maximum number of combinations to enumerate.
    #[arg(long, value_name = "INT")]
    pub max_enumeration_size: Option<u64>,

    /// Override how the wild-type residue is treated at ruled positions.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub wild_type: Option<WildTypeArg>,

    /// Override the prefix used for variant identifiers.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S generation.filters.length-tolerance=1
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `collect` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    /// Docking root holding one directory per variant with a `log.txt` inside.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub root: PathBuf,

    /// Path for the collected `variant_id,docking_score` CSV.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `rank` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    // --- Core Arguments ---
    /// Variant library produced by `generate` (FASTA).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub library: PathBuf,

    /// Docking metrics CSV keyed by `variant_id`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub docking: PathBuf,

    /// Path for the full ranked table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path for the selected candidates (CSV).
    #[arg(long, value_name = "PATH")]
    pub selected_csv: Option<PathBuf>,

    /// Path for the selected candidates (FASTA).
    #[arg(long, value_name = "PATH")]
    pub selected_fasta: Option<PathBuf>,

    // --- Ranking Overrides ---
    /// Override the ranking mode.
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Override the metric ranked in single mode.
    #[arg(long, value_name = "METRIC")]
    pub metric: Option<String>,

    /// Override the composite score orientation.
    #[arg(long, value_enum, value_name = "ORIENTATION")]
    pub sort_orientation: Option<OrientationArg>,

    /// Override the normalization used in weighted mode.
    #[arg(long, value_enum, value_name = "METHOD")]
    pub normalization: Option<NormalizationArg>,

    /// Tie-break metrics in priority order; replaces the config file chain.
    #[arg(long, value_name = "METRIC", value_delimiter = ',')]
    pub tie_break: Vec<String>,

    /// Override how ranks are assigned to tied candidates.
    #[arg(long, value_enum, value_name = "ASSIGNMENT")]
    pub rank_assignment: Option<RankAssignmentArg>,

    /// Select the N best candidates.
    #[arg(short = 'n', long, value_name = "INT", conflicts_with = "threshold")]
    pub top_n: Option<usize>,

    /// Select every candidate whose composite score is at least this good.
    #[arg(short = 't', long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub threshold: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S ranking.weights.rmsd=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum WildTypeArg {
    AsDeclared,
    Include,
    Exclude,
}

impl From<WildTypeArg> for WildTypePolicy {
    fn from(arg: WildTypeArg) -> Self {
        match arg {
            WildTypeArg::AsDeclared => Self::AsDeclared,
            WildTypeArg::Include => Self::Include,
            WildTypeArg::Exclude => Self::Exclude,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Single,
    Weighted,
}

impl From<ModeArg> for RankingModeKind {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Single => Self::Single,
            ModeArg::Weighted => Self::Weighted,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum OrientationArg {
    LowerIsBetter,
    HigherIsBetter,
}

impl From<OrientationArg> for SortOrientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::LowerIsBetter => Self::LowerIsBetter,
            OrientationArg::HigherIsBetter => Self::HigherIsBetter,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum NormalizationArg {
    MinMax,
    ZScore,
}

impl From<NormalizationArg> for Normalization {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::MinMax => Self::MinMax,
            NormalizationArg::ZScore => Self::ZScore,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum RankAssignmentArg {
    Strict,
    Shared,
}

impl From<RankAssignmentArg> for RankAssignment {
    fn from(arg: RankAssignmentArg) -> Self {
        match arg {
            RankAssignmentArg::Strict => Self::Strict,
            RankAssignmentArg::Shared => Self::Shared,
        }
    }
}
