//! A validated "explain this upgrade" request.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{Error, Result};

// ─── Ecosystem ───────────────────────────────────────────────────────────────

/// The package ecosystem the user says they are working in.
///
/// Recorded on the request and echoed in the result; it does not change the
/// reasoning.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Ecosystem {
  #[default]
  Pip,
  Npm,
  Maven,
  Gradle,
  Cargo,
  Composer,
}

impl Ecosystem {
  /// The next ecosystem in declaration order, wrapping around.
  pub fn next(self) -> Self {
    let all: Vec<_> = Self::iter().collect();
    let idx = all.iter().position(|e| *e == self).unwrap_or(0);
    all[(idx + 1) % all.len()]
  }

  /// The previous ecosystem in declaration order, wrapping around.
  pub fn prev(self) -> Self {
    let all: Vec<_> = Self::iter().collect();
    let idx = all.iter().position(|e| *e == self).unwrap_or(0);
    all[(idx + all.len() - 1) % all.len()]
  }
}

// ─── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeRequest {
  pub package:     String,
  pub old_version: String,
  pub new_version: String,
  pub ecosystem:   Ecosystem,
  /// Free text used only to narrow compatibility attention to a service.
  pub context:     Option<String>,
}

impl UpgradeRequest {
  /// Validate raw form input.
  ///
  /// Package, old version and new version are required; whitespace-only
  /// input counts as missing. Every missing field is reported at once. A
  /// blank context becomes `None`.
  pub fn new(
    package: &str,
    old_version: &str,
    new_version: &str,
    ecosystem: Ecosystem,
    context: Option<&str>,
  ) -> Result<Self> {
    let package = package.trim();
    let old_version = old_version.trim();
    let new_version = new_version.trim();

    let missing: Vec<&'static str> = [
      ("package name", package),
      ("old version", old_version),
      ("new version", new_version),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
      return Err(Error::MissingFields(missing));
    }

    let context = context
      .map(str::trim)
      .filter(|c| !c.is_empty())
      .map(str::to_string);

    Ok(Self {
      package: package.to_string(),
      old_version: old_version.to_string(),
      new_version: new_version.to_string(),
      ecosystem,
      context,
    })
  }

  /// The user-turn text recorded in the conversation log.
  pub fn query_text(&self) -> String {
    let mut text = format!(
      "Explain upgrading {} from {} to {}",
      self.package, self.old_version, self.new_version
    );
    if let Some(context) = &self.context {
      text.push_str(&format!(" (Context: {context})"));
    }
    text
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn valid_request_trims_fields() {
    let req =
      UpgradeRequest::new(" auth-lib ", "2.1.0", "2.2.0 ", Ecosystem::Npm, Some("  "))
        .unwrap();
    assert_eq!(req.package, "auth-lib");
    assert_eq!(req.new_version, "2.2.0");
    assert_eq!(req.context, None);
  }

  #[test]
  fn missing_fields_are_all_reported() {
    let err = UpgradeRequest::new("", "1.0.0", "   ", Ecosystem::Pip, None).unwrap_err();
    match err {
      Error::MissingFields(fields) => assert_eq!(fields, ["package name", "new version"]),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn missing_fields_message() {
    let err = UpgradeRequest::new("", "", "", Ecosystem::Pip, None).unwrap_err();
    assert_eq!(
      err.to_string(),
      "please fill in package name, old version, new version"
    );
  }

  #[test]
  fn query_text_with_and_without_context() {
    let plain = UpgradeRequest::new("a", "1.0.0", "1.1.0", Ecosystem::Pip, None).unwrap();
    assert_eq!(plain.query_text(), "Explain upgrading a from 1.0.0 to 1.1.0");

    let ctx = UpgradeRequest::new("a", "1.0.0", "1.1.0", Ecosystem::Pip, Some("prod rollout"))
      .unwrap();
    assert_eq!(
      ctx.query_text(),
      "Explain upgrading a from 1.0.0 to 1.1.0 (Context: prod rollout)"
    );
  }

  #[test]
  fn ecosystem_cycles_and_wraps() {
    assert_eq!(Ecosystem::Pip.next(), Ecosystem::Npm);
    assert_eq!(Ecosystem::Composer.next(), Ecosystem::Pip);
    assert_eq!(Ecosystem::Pip.prev(), Ecosystem::Composer);
    assert_eq!(Ecosystem::default(), Ecosystem::Pip);
  }

  #[test]
  fn ecosystem_parses_case_insensitively() {
    assert_eq!("Cargo".parse::<Ecosystem>().unwrap(), Ecosystem::Cargo);
    assert_eq!(Ecosystem::Gradle.to_string(), "gradle");
    assert!("apt".parse::<Ecosystem>().is_err());
  }
}
