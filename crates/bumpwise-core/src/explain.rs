//! Explanation composer: joins the four tables into a structured answer.

use std::{convert::Infallible, sync::Arc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  advisor::UpgradeAdvisor,
  compat::check_compatibility,
  knowledge::KnowledgeStore,
  request::{Ecosystem, UpgradeRequest},
  version::{BumpType, classify_bump},
};

/// Release-notes text used when the release table has no entry.
pub const NO_RELEASE_NOTES: &str = "No release notes available.";

// ─── Explanation ─────────────────────────────────────────────────────────────

/// The structured answer for one upgrade request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
  pub summary:                 String,
  pub risk_reasoning:          Vec<String>,
  pub security_reasoning:      Vec<String>,
  pub compatibility_reasoning: Vec<String>,
  pub release_notes:           String,
  /// Computed from the two version strings; drives all wording.
  pub bump_type:               BumpType,
  /// Citation lines in discovery order.
  pub sources:                 Vec<String>,
  pub ecosystem:               Ecosystem,
  /// What the release table declares for the new version, if anything.
  pub declared_bump:           Option<BumpType>,
  pub release_date:            Option<NaiveDate>,
}

// ─── Explainer ───────────────────────────────────────────────────────────────

/// Composes [`Explanation`]s from a shared, read-only [`KnowledgeStore`].
///
/// Cheap to clone.
#[derive(Debug, Clone)]
pub struct Explainer {
  store: Arc<KnowledgeStore>,
}

impl Explainer {
  pub fn new(store: Arc<KnowledgeStore>) -> Self { Self { store } }

  pub fn store(&self) -> &KnowledgeStore { &self.store }

  /// Build the explanation for `req`. Never fails: every missing table
  /// entry degrades to an empty or default value.
  pub fn compose(&self, req: &UpgradeRequest) -> Explanation {
    let store = &*self.store;
    let package = req.package.as_str();
    let old = req.old_version.as_str();
    let new = req.new_version.as_str();

    let bump_type = classify_bump(old, new);

    let release = store.release(package, new);
    let release_notes = release
      .map(|r| r.notes.clone())
      .unwrap_or_else(|| NO_RELEASE_NOTES.to_string());

    let old_issues = store.known_issues(package, old);
    let new_issues = store.known_issues(package, new);
    let old_incidents = store.known_incidents(package, old);
    let new_incidents = store.known_incidents(package, new);

    let compat = check_compatibility(store, package, new, req.context.as_deref());

    tracing::debug!(
      package,
      old,
      new,
      %bump_type,
      old_issues = old_issues.len(),
      new_issues = new_issues.len(),
      old_incidents = old_incidents.len(),
      new_incidents = new_incidents.len(),
      "composing explanation"
    );

    // Sources, in discovery order.
    let mut sources = Vec::new();
    if release_notes != NO_RELEASE_NOTES {
      sources.push(format!("Release notes for {package} {new}"));
    }
    if !old_issues.is_empty() {
      sources.push(format!("Security advisories for {package} {old}"));
    }
    if !old_incidents.is_empty() {
      sources.push(format!("Internal incident reports for {package} {old}"));
    }
    if !compat.is_empty() {
      sources.push("Internal compatibility matrix".to_string());
    }

    // Unknown shares the patch wording.
    let summary = match bump_type {
      BumpType::Major => format!(
        "Major version upgrade from {old} to {new}. This may include breaking changes."
      ),
      BumpType::Minor => format!(
        "Minor version upgrade from {old} to {new}. New features and improvements expected."
      ),
      BumpType::Patch | BumpType::Unknown => {
        format!("Patch upgrade from {old} to {new}. Bug fixes and security patches.")
      }
    };

    let mut risk_reasoning = vec![match bump_type {
      BumpType::Major => "This is a major version upgrade, which typically includes breaking \
                          changes. Review the release notes carefully and plan for migration."
        .to_string(),
      BumpType::Minor => "This is a minor version upgrade, which should be backward compatible \
                          but may introduce new features."
        .to_string(),
      BumpType::Patch | BumpType::Unknown => {
        "This is a patch upgrade, which should be low risk and focused on bug fixes.".to_string()
      }
    }];
    if !old_incidents.is_empty() {
      risk_reasoning.push(format!(
        "The old version ({old}) has known internal incidents that may be resolved in the new \
         version."
      ));
    }
    if !new_incidents.is_empty() {
      risk_reasoning.push(format!(
        "WARNING: The new version ({new}) has known internal incidents. Consider investigating \
         before upgrading."
      ));
    }

    let mut security_reasoning = Vec::new();
    if old_issues.is_empty() {
      security_reasoning.push(format!("No known security issues found for version {old}."));
    } else {
      security_reasoning.push(format!(
        "The old version ({old}) has known security vulnerabilities: {}",
        old_issues.join(", ")
      ));
      if new_issues.is_empty() {
        security_reasoning.push(format!(
          "The new version ({new}) appears to address these security issues."
        ));
      }
    }
    if !new_issues.is_empty() {
      security_reasoning.push(format!(
        "WARNING: The new version ({new}) has known security issues: {}",
        new_issues.join(", ")
      ));
    }

    let mut compatibility_reasoning = Vec::new();
    if !compat.compatible.is_empty() {
      compatibility_reasoning.push(format!(
        "Compatible versions found: {}",
        compat.compatible.join(", ")
      ));
    }
    if !compat.incompatible.is_empty() {
      compatibility_reasoning.push(format!(
        "Potential compatibility concerns: {}",
        compat.incompatible.join(", ")
      ));
    }
    if compat.is_empty() {
      compatibility_reasoning.push(format!(
        "No compatibility data found for other services using {package}."
      ));
    }

    Explanation {
      summary,
      risk_reasoning,
      security_reasoning,
      compatibility_reasoning,
      release_notes,
      bump_type,
      sources,
      ecosystem: req.ecosystem,
      declared_bump: release.map(|r| r.bump),
      release_date: release.map(|r| r.released),
    }
  }
}

impl UpgradeAdvisor for Explainer {
  type Error = Infallible;

  fn explain(&self, request: &UpgradeRequest) -> Result<Explanation, Self::Error> {
    Ok(self.compose(request))
  }
}
