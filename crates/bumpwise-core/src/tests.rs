//! End-to-end reasoning scenarios against the built-in tables.

use std::sync::Arc;

use crate::{
  advisor::UpgradeAdvisor,
  explain::{Explainer, Explanation, NO_RELEASE_NOTES},
  knowledge::KnowledgeStore,
  request::{Ecosystem, UpgradeRequest},
  version::BumpType,
};

fn explainer() -> Explainer {
  Explainer::new(Arc::new(
    KnowledgeStore::builtin().expect("builtin tables parse"),
  ))
}

fn explain(package: &str, old: &str, new: &str, context: Option<&str>) -> Explanation {
  let req = UpgradeRequest::new(package, old, new, Ecosystem::Pip, context)
    .expect("valid request");
  explainer().compose(&req)
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn minor_upgrade_without_known_issues() {
  let e = explain("auth-lib", "2.1.0", "2.2.0", None);

  assert_eq!(e.bump_type, BumpType::Minor);
  assert_eq!(
    e.summary,
    "Minor version upgrade from 2.1.0 to 2.2.0. New features and improvements expected."
  );
  assert_eq!(
    e.security_reasoning,
    ["No known security issues found for version 2.1.0."]
  );
  assert!(e.sources.contains(&"Release notes for auth-lib 2.2.0".to_string()));
  assert_eq!(e.declared_bump, Some(BumpType::Minor));
}

#[test]
fn old_cve_resolved_by_new_version() {
  let e = explain("payments-core", "3.0.0", "3.1.0", None);

  assert_eq!(
    e.security_reasoning,
    [
      "The old version (3.0.0) has known security vulnerabilities: CVE-2024-002: Potential \
       race condition in transaction processing",
      "The new version (3.1.0) appears to address these security issues.",
    ]
  );
  assert_eq!(
    e.sources,
    [
      "Release notes for payments-core 3.1.0",
      "Security advisories for payments-core 3.0.0",
      "Internal compatibility matrix",
    ]
  );
}

#[test]
fn patch_upgrade_has_single_risk_line() {
  let e = explain("logging-lib", "1.5.0", "1.5.1", None);

  assert_eq!(e.bump_type, BumpType::Patch);
  assert_eq!(
    e.risk_reasoning,
    ["This is a patch upgrade, which should be low risk and focused on bug fixes."]
  );
}

#[test]
fn unknown_package_uses_defaults() {
  let e = explain("unknown-pkg", "1.0.0", "2.0.0", None);

  assert_eq!(e.bump_type, BumpType::Major);
  assert_eq!(e.release_notes, NO_RELEASE_NOTES);
  assert_eq!(
    e.compatibility_reasoning,
    ["No compatibility data found for other services using unknown-pkg."]
  );
  assert!(e.sources.is_empty());
  assert_eq!(e.declared_bump, None);
  assert_eq!(e.release_date, None);
}

#[test]
fn context_named_service_is_listed_twice() {
  let e = explain("payments-core", "3.1.0", "3.2.0", Some("Checkout Service"));

  assert_eq!(
    e.compatibility_reasoning,
    ["Compatible versions found: Checkout Service uses 3.2.0, Checkout Service uses 3.2.0"]
  );
}

// ─── Incidents ───────────────────────────────────────────────────────────────

#[test]
fn new_version_incidents_warn() {
  let e = explain("payments-core", "3.1.0", "3.2.0", None);

  assert_eq!(e.risk_reasoning.len(), 2);
  assert_eq!(
    e.risk_reasoning[1],
    "WARNING: The new version (3.2.0) has known internal incidents. Consider investigating \
     before upgrading."
  );
  // New-version incidents are not cited; only old-version ones are.
  assert!(!e.sources.iter().any(|s| s.starts_with("Internal incident")));
}

#[test]
fn old_version_incidents_and_issues_are_cited() {
  let e = explain("auth-lib", "2.0.0", "2.1.0", None);

  assert_eq!(
    e.risk_reasoning[1],
    "The old version (2.0.0) has known internal incidents that may be resolved in the new \
     version."
  );
  assert_eq!(
    e.sources,
    [
      "Release notes for auth-lib 2.1.0",
      "Security advisories for auth-lib 2.0.0",
      "Internal incident reports for auth-lib 2.0.0",
      "Internal compatibility matrix",
    ]
  );
}

#[test]
fn new_version_issues_warn_alongside_old_issues() {
  let e = explain("auth-lib", "2.0.0", "2.0.5", None);

  assert_eq!(e.bump_type, BumpType::Patch);
  assert_eq!(
    e.security_reasoning,
    [
      "The old version (2.0.0) has known security vulnerabilities: CVE-2024-001: Token \
       validation bypass vulnerability",
      "WARNING: The new version (2.0.5) has known security issues: CVE-2024-001: Token \
       validation bypass vulnerability",
    ]
  );
}

// ─── Wording quirks ──────────────────────────────────────────────────────────

#[test]
fn unknown_bump_uses_patch_wording() {
  let e = explain("auth-lib", "2.2.0", "2.2.0", None);

  assert_eq!(e.bump_type, BumpType::Unknown);
  assert_eq!(
    e.summary,
    "Patch upgrade from 2.2.0 to 2.2.0. Bug fixes and security patches."
  );
}

#[test]
fn major_upgrade_flags_services_on_old_major() {
  let e = explain("auth-lib", "2.2.0", "3.0.0", None);

  assert_eq!(e.bump_type, BumpType::Major);
  assert!(e.summary.ends_with("This may include breaking changes."));
  assert_eq!(
    e.compatibility_reasoning,
    [
      "Compatible versions found: User Service uses 3.0.0",
      "Potential compatibility concerns: Checkout Service uses 2.2.0 (major version mismatch), \
       API Gateway uses 2.2.0 (major version mismatch)",
    ]
  );
}

#[test]
fn major_downgrade_gives_no_compatibility_signal() {
  // logging-lib 2.0.0 runs on User Service; moving to 1.x reports the two
  // 1.x services as compatible and says nothing about User Service.
  let e = explain("logging-lib", "2.0.0", "1.5.1", None);

  assert_eq!(e.bump_type, BumpType::Minor);
  assert_eq!(
    e.compatibility_reasoning,
    ["Compatible versions found: Checkout Service uses 1.5.1, API Gateway uses 1.5.1"]
  );
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[test]
fn composing_twice_is_identical() {
  let explainer = explainer();
  let req = UpgradeRequest::new(
    "payments-core",
    "3.0.0",
    "4.0.0",
    Ecosystem::Maven,
    Some("checkout service"),
  )
  .unwrap();

  let first = explainer.compose(&req);
  let second = explainer.compose(&req);
  assert_eq!(first, second);
  assert_eq!(
    serde_json::to_string(&first).unwrap(),
    serde_json::to_string(&second).unwrap()
  );
}

#[test]
fn ecosystem_does_not_change_reasoning() {
  let explainer = explainer();
  let pip = UpgradeRequest::new("auth-lib", "2.1.0", "2.2.0", Ecosystem::Pip, None).unwrap();
  let cargo = UpgradeRequest { ecosystem: Ecosystem::Cargo, ..pip.clone() };

  let a = explainer.compose(&pip);
  let b = explainer.compose(&cargo);
  assert_eq!(a.summary, b.summary);
  assert_eq!(a.sources, b.sources);
  assert_eq!(b.ecosystem, Ecosystem::Cargo);
}

#[test]
fn advisor_trait_never_fails() {
  let explainer = explainer();
  let req = UpgradeRequest::new("nope", "x", "y", Ecosystem::Npm, None).unwrap();
  let result = UpgradeAdvisor::explain(&explainer, &req);
  assert!(result.is_ok());
}
