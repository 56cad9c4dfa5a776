//! Layered runtime settings: optional TOML file, then `BUMPWISE_*`
//! environment variables. CLI flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bumpwise_core::request::Ecosystem;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
  /// TOML knowledge file replacing the built-in tables.
  #[serde(default)]
  pub knowledge_path:    Option<PathBuf>,
  /// Ecosystem preselected in the form.
  #[serde(default)]
  pub default_ecosystem: Ecosystem,
  /// Where the interactive UI writes its logs. Unset means no logging.
  #[serde(default)]
  pub log_file:          Option<PathBuf>,
}

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("BUMPWISE"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}
