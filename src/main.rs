//! Command line entry point rendering resource group tags to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bundle_tags::{FsDirectoryLister, GroupModel, TagProperties, TagRenderer, TagSet};

const DEFAULT_MODEL_FILE: &str = "wro.yaml";

/// Render script and stylesheet tags for resource groups.
#[derive(Debug, Parser)]
#[command(name = "bundle-tags", version, about)]
struct Cli {
  /// Web root that resource paths are resolved against.
  #[arg(long, default_value = ".")]
  root: PathBuf,

  /// Configuration file; defaults to bundle-tags.config.json in the web root.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Group model file (YAML or JSON); defaults to wro.yaml in the web root.
  #[arg(long)]
  model: Option<PathBuf>,

  /// Context path prefixed to every emitted URI.
  #[arg(long, default_value = "")]
  context_path: String,

  /// Force debug mode (individual uncompressed sources).
  #[arg(long, conflicts_with = "release")]
  debug: bool,

  /// Force production mode (compressed bundles).
  #[arg(long)]
  release: bool,

  /// Comma separated tag kinds to emit.
  #[arg(long, default_value = "script,stylesheet")]
  tags: TagSet,

  /// Groups to render, in order.
  #[arg(required = true)]
  groups: Vec<String>,
}

fn main() -> Result<()> {
  env_logger::init();
  let cli = Cli::parse();

  let mut properties = match &cli.config {
    Some(path) => TagProperties::from_path(path)?,
    None => TagProperties::discover(&cli.root),
  }
  .with_env_overrides();
  if cli.debug {
    properties.debug = true;
  } else if cli.release {
    properties.debug = false;
  }

  let model_path = cli
    .model
    .clone()
    .unwrap_or_else(|| cli.root.join(DEFAULT_MODEL_FILE));
  let groups = GroupModel::load(&model_path)
    .with_context(|| format!("failed to load group model {}", model_path.display()))?;

  let renderer = TagRenderer::with_fresh_cache(
    groups,
    properties,
    cli.tags.clone(),
    FsDirectoryLister::new(&cli.root),
  );

  let stdout = io::stdout();
  let mut out = stdout.lock();
  for group in &cli.groups {
    renderer
      .render(&mut out, group, &cli.context_path)
      .with_context(|| format!("failed to render group '{group}'"))?;
  }
  out.flush()?;
  Ok(())
}
