//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;

use jnilibs::core::Abi;
use jnilibs::util::shell::ColorChoice;

const OUTPUT_HELP: &str = "\
Output:
  Status lines, warnings and errors are written to stderr.
  Reports from `locate` and `status`, completion scripts and
  --message-format json events are written to stdout.";

/// jnilibs - stage the NDK C++ runtime into an Android project's jniLibs
#[derive(Parser)]
#[command(name = "jnilibs")]
#[command(author, version, about, long_about = None)]
#[command(after_help = OUTPUT_HELP)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for messages
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// Android project root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Staging root, relative to the project root
    #[arg(long, global = true, value_name = "DIR")]
    pub jni_libs_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy libc++_shared.so from the NDK into jniLibs/<abi>/
    Stage(StageArgs),

    /// Remove previously staged libraries
    Clean(CleanArgs),

    /// Show the resolved NDK and per-ABI runtime paths
    Locate(LocateArgs),

    /// Compare staged libraries against the NDK
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct StageArgs {
    /// Only stage these ABIs (repeatable, comma separated)
    #[arg(long = "abi", value_name = "ABI", value_delimiter = ',')]
    pub abis: Vec<Abi>,
}

#[derive(Args)]
pub struct CleanArgs {}

#[derive(Args)]
pub struct LocateArgs {}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
