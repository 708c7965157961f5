use std::{env, io};

use color_eyre::eyre::{Context, Result};
use log::LevelFilter;
use markdoc::{
  cli::{Cli, Commands},
  commands,
};
use markdoc_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log while loading configuration
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  let root = env::current_dir().wrap_err("Failed to read current directory")?;
  let config = Config::load(&cli.config_files, &cli.config_overrides, &root)
    .wrap_err("Failed to load configuration")?;
  log::debug!("Configuration: {config:?}");

  let mut stdout = io::stdout().lock();

  match &cli.command {
    Commands::Render {
      file,
      path,
      input_dir,
      output,
    } => {
      let result = commands::render_file(
        &config,
        file,
        path.as_deref(),
        input_dir.as_deref(),
      )?;
      match output {
        Some(output) => commands::write_output(output, &result.html)?,
        None => commands::emit(&mut stdout, &result.html)?,
      }
    },

    Commands::Relativize { from, hrefs } => {
      commands::relativize_hrefs(&config, from, hrefs, &mut stdout)?;
    },

    Commands::List { dir } => {
      commands::list_documents(&config, dir, &mut stdout)?;
    },
  }

  Ok(())
}
