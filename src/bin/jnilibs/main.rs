//! jnilibs CLI - stage the NDK C++ runtime into an Android project's jniLibs

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jnilibs::util::Shell;

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "JNILIBS_LOG";

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub project_dir: Option<PathBuf>,
    pub jni_libs_dir: Option<PathBuf>,
}

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let global_opts = GlobalOptions {
        shell: Shell::from_flags(
            cli.quiet,
            cli.verbose,
            cli.color,
            cli.message_format == MessageFormat::Json,
        ),
        project_dir: cli.project_dir,
        jni_libs_dir: cli.jni_libs_dir,
    };

    if let Err(e) = run(cli.command, &global_opts) {
        global_opts.shell.error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ if verbose => EnvFilter::new("jnilibs=debug"),
        _ => EnvFilter::new("jnilibs=info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, global_opts: &GlobalOptions) -> Result<()> {
    match command {
        Commands::Stage(args) => commands::stage::execute(args, global_opts),
        Commands::Clean(args) => commands::clean::execute(args, global_opts),
        Commands::Locate(args) => commands::locate::execute(args, global_opts),
        Commands::Status(args) => commands::status::execute(args, global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
