//! Compatibility checker over the service matrix.

use serde::{Deserialize, Serialize};

use crate::{knowledge::KnowledgeStore, version::Version};

/// Services sorted into compatible and incompatible buckets.
///
/// Entries are rendered strings (`"<service> uses <version>"`). A service can
/// appear twice in `compatible` when it is both named in the context and
/// found by the full scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
  pub compatible:   Vec<String>,
  pub incompatible: Vec<String>,
}

impl Compatibility {
  pub fn is_empty(&self) -> bool { self.compatible.is_empty() && self.incompatible.is_empty() }
}

/// Check `new_version` of `package` against every service that depends on it.
///
/// When `context` is given, the first service (in declaration order) whose
/// name appears in it case-insensitively is recorded as compatible if it
/// depends on `package`, without a version check; narrowing stops at that
/// first name match either way.
///
/// The full scan then runs regardless. Same major version is compatible, a
/// higher candidate major is a mismatch. A lower candidate major is not
/// reported at all.
pub fn check_compatibility(
  store: &KnowledgeStore,
  package: &str,
  new_version: &str,
  context: Option<&str>,
) -> Compatibility {
  let mut out = Compatibility::default();

  if let Some(context) = context {
    let context = context.to_lowercase();
    if let Some(service) = store
      .services()
      .iter()
      .find(|s| context.contains(&s.name.to_lowercase()))
    {
      tracing::debug!(service = %service.name, "context names a service");
      if let Some(in_use) = service.version_of(package) {
        out.compatible.push(format!("{} uses {in_use}", service.name));
      }
    }
  }

  let candidate = Version::parse(new_version);
  for service in store.services() {
    let Some(in_use) = service.version_of(package) else {
      continue;
    };
    let running = Version::parse(in_use);

    if candidate.major == running.major {
      out.compatible.push(format!("{} uses {in_use}", service.name));
    } else if candidate.major > running.major {
      out
        .incompatible
        .push(format!("{} uses {in_use} (major version mismatch)", service.name));
    }
  }

  out
}
