mod commands;
mod core;
mod manifest;
mod release;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, print_error};
use std::path::PathBuf;

/// Package an extension, bump its manifest version and keep child manifests in step
#[derive(Parser)]
#[command(name = "vsix-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Directory the configured paths are relative to (default: current directory)
  #[arg(short = 'C', long, global = true)]
  root: Option<PathBuf>,

  /// Config file to use instead of searching for release.toml
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// More log output (-v debug, -vv trace)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  /// Only log warnings and errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  quiet: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the manifest version
  Show {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Package the current version
  Package {
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
    /// Output the release report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Copy the manifest version into every child manifest, then package
  Propagate {
    /// Do not run the packager
    #[arg(long)]
    skip_package: bool,
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
    /// Output the release report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Package the current version, then write the next patch version to the manifest
  Bump {
    /// Also copy the packaged version into every child manifest first
    #[arg(long)]
    propagate: bool,
    /// Do not run the packager
    #[arg(long)]
    skip_package: bool,
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
    /// Output the release report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Write a release.toml with default settings
  Init {
    /// Overwrite an existing config file
    #[arg(long)]
    force: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_logging(verbose: u8, quiet: bool) {
  let level = match (quiet, verbose) {
    (true, _) => "warn",
    (false, 0) => "info",
    (false, 1) => "debug",
    (false, _) => "trace",
  };

  // RUST_LOG wins over the flags
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
    .format_timestamp(None)
    .format_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose, cli.quiet);

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(ReleaseError::Io(e).context("Failed to get current directory")),
    },
  };

  // init must work before (or despite) a release.toml
  if let Commands::Init { force } = cli.command {
    if let Err(err) = commands::run_init(&root, force) {
      handle_error(err);
    }
    return;
  }

  let ctx = match ReleaseContext::build(&root, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Show { json } => commands::run_show(&ctx, json),
    Commands::Package { dry_run, json } => commands::run_package(&ctx, dry_run, json),
    Commands::Propagate {
      skip_package,
      dry_run,
      json,
    } => commands::run_propagate(&ctx, skip_package, dry_run, json),
    Commands::Bump {
      propagate,
      skip_package,
      dry_run,
      json,
    } => commands::run_bump(&ctx, propagate, skip_package, dry_run, json),
    Commands::Init { .. } => Ok(()),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
