//! The read-only knowledge store consulted during reasoning.
//!
//! Four tables make up the store: release metadata, known security issues,
//! internal incident reports, and a compatibility matrix of which services
//! run which package versions. A store is built once at startup (from the
//! embedded defaults or a TOML file) and then shared behind an `Arc`; nothing
//! mutates it afterwards.
//!
//! Every lookup on an unknown package or version degrades to an empty value.
//! An empty issue list means "no known issues", not "unchecked".

use std::{collections::BTreeMap, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, version::BumpType};

/// The built-in tables, compiled into the binary.
const BUILTIN: &str = include_str!("../data/knowledge.toml");

/// `package -> version -> entries`.
pub type VersionTable<T> = BTreeMap<String, BTreeMap<String, T>>;

// ─── Records ─────────────────────────────────────────────────────────────────

/// Published metadata for one release of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
  pub notes:    String,
  /// The bump type the publisher declared. Informational only.
  pub bump:     BumpType,
  pub released: NaiveDate,
}

/// A service and the package versions it currently runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
  pub name:         String,
  #[serde(default)]
  pub dependencies: BTreeMap<String, String>,
}

impl ServiceRecord {
  /// The version of `package` this service runs, if it depends on it.
  pub fn version_of(&self, package: &str) -> Option<&str> {
    self.dependencies.get(package).map(String::as_str)
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeStore {
  #[serde(default)]
  releases:  VersionTable<ReleaseRecord>,
  #[serde(default)]
  issues:    VersionTable<Vec<String>>,
  #[serde(default)]
  incidents: VersionTable<Vec<String>>,
  /// Kept as a sequence: context narrowing depends on declaration order.
  #[serde(default)]
  services:  Vec<ServiceRecord>,
}

impl KnowledgeStore {
  /// The store shipped with the binary.
  pub fn builtin() -> Result<Self> { Self::from_toml_str(BUILTIN) }

  pub fn from_toml_str(raw: &str) -> Result<Self> {
    let store: Self = toml::from_str(raw)?;
    tracing::debug!(
      packages = store.releases.len(),
      services = store.services.len(),
      "knowledge store parsed"
    );
    Ok(store)
  }

  /// Read and parse a knowledge file with the same shape as the built-in one.
  pub fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&raw)
  }

  // ── Lookups ───────────────────────────────────────────────────────────

  pub fn release(&self, package: &str, version: &str) -> Option<&ReleaseRecord> {
    self.releases.get(package)?.get(version)
  }

  /// Known security issues for `package` at exactly `version`.
  pub fn known_issues(&self, package: &str, version: &str) -> &[String] {
    lookup(&self.issues, package, version)
  }

  /// Internal incident reports for `package` at exactly `version`.
  pub fn known_incidents(&self, package: &str, version: &str) -> &[String] {
    lookup(&self.incidents, package, version)
  }

  /// Services in declaration order.
  pub fn services(&self) -> &[ServiceRecord] { &self.services }

  /// Every package with release metadata, sorted by name.
  pub fn packages(&self) -> impl Iterator<Item = &str> {
    self.releases.keys().map(String::as_str)
  }

  /// Every `(package, version, record)` in the release table, sorted by
  /// package name then by parsed version.
  pub fn releases(&self) -> Vec<(&str, &str, &ReleaseRecord)> {
    let mut out: Vec<_> = self
      .releases
      .iter()
      .flat_map(|(package, versions)| {
        versions
          .iter()
          .map(move |(version, record)| (package.as_str(), version.as_str(), record))
      })
      .collect();
    out.sort_by_key(|(package, version, _)| {
      (*package, crate::version::Version::parse(version))
    });
    out
  }
}

fn lookup<'a>(table: &'a VersionTable<Vec<String>>, package: &str, version: &str) -> &'a [String] {
  table
    .get(package)
    .and_then(|versions| versions.get(version))
    .map(Vec::as_slice)
    .unwrap_or_default()
}
