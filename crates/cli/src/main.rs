use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::{cmd_add, cmd_get};
use output::{OutputFormat, print_error};

/// gitswitch: quick and easy Git project switching
#[derive(Parser)]
#[command(name = "gs")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Config file to use instead of ./config.yaml
  #[arg(short, long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Add a Git project with an alias
  #[command(long_about = "Add a Git project so you can quickly switch to it later using 'gs get <alias>'.

Usage scenarios:
  1. gs add                -> adds the current directory using its folder name as alias
  2. gs add <alias>        -> adds the current directory with a custom alias
  3. gs add <alias> <path> -> adds the specified path with the given alias

An existing alias is overwritten.")]
  Add {
    /// [alias] [path]
    #[arg(value_name = "ARGS")]
    args: Vec<String>,
  },

  /// Print the path registered for an alias
  Get {
    alias: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let config = cli.config.as_deref();
  match cli.command {
    Commands::Add { args } => cmd_add(&args, config),
    Commands::Get { alias, output } => cmd_get(&alias, output, config),
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
