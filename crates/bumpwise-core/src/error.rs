//! Error types for `bumpwise-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more required request fields were empty.
  #[error("please fill in {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("reading knowledge file {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("parsing knowledge tables: {0}")]
  Parse(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
