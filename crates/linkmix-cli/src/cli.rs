use crate::utils::parser::{self, IndexList};
use clap::{Args, Parser, Subcommand};
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
    about = "linkmix - build mixed TP/TPB linker COF structures by converting donor nodes and retyping the bridging PA units.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to convert scenarios in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert selected donor units of a framework checkpoint and retype its linkers.
    Convert(ConvertArgs),
    /// Stack a monolayer, plan seeded scenarios and write one converted framework per scenario.
    Generate(GenerateArgs),
    /// Extract selected bonded layers from a stacked framework.
    Layers(LayersArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input framework checkpoint (.chk).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the converted checkpoint.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Donor unit indices to convert, e.g. '3,17,40' or '0-9,20'.
    /// Without targets only the linkers are retyped.
    #[arg(short, long, value_name = "LIST", value_parser = parser::parse_index_list)]
    pub targets: Option<IndexList>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the generation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the single-layer framework checkpoint from the config file.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Override the output directory.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Override the random seed used to draw conversion targets.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the file name prefix of generated structures.
    #[arg(long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Override the numbers of donor units converted per random scenario, e.g. '10,48,86'.
    #[arg(long, value_name = "LIST", value_parser = parser::parse_index_list)]
    pub counts: Option<IndexList>,
}

/// Arguments for the `layers` subcommand.
#[derive(Args, Debug)]
pub struct LayersArgs {
    /// Path to the stacked framework checkpoint.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the extracted checkpoint.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Layers to keep, counted from the lowest, e.g. '1,2'.
    #[arg(short, long, required = true, value_name = "LIST", value_parser = parser::parse_index_list)]
    pub select: IndexList,

    /// Factor by which the stacking vector's z component is reduced.
    #[arg(long, value_name = "FLOAT", default_value_t = 6.0)]
    pub c_divisor: f64,
}
