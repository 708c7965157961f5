use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for markdoc
#[derive(Parser, Debug)]
#[command(author, version, about = "markdoc: wiki Markdown renderer")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the markdoc CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render a single document.
  Render {
    /// Markdown file to render.
    file: PathBuf,

    /// Site path of the document (e.g. `/guide/install`). Derived from the
    /// file path when omitted.
    #[arg(short, long)]
    path: Option<String>,

    /// Wiki root the site path is derived against.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Write output here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Print hrefs as they would be rewritten inside a document.
  Relativize {
    /// Site path of the linking document.
    #[arg(short, long = "from")]
    from: String,

    /// Hrefs to rewrite.
    #[arg(required = true)]
    hrefs: Vec<String>,
  },

  /// List the documents found under a directory.
  List {
    /// Directory to search.
    #[arg(default_value = ".")]
    dir: PathBuf,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
