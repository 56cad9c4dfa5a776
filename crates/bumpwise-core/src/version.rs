//! Version comparator: dotted version parsing and bump classification.
//!
//! Parsing is intentionally lenient. Anything that is not a run of numeric,
//! dot-separated components collapses to `0.0.0` rather than erroring, and
//! components past the third are ignored.

use std::{fmt, num::IntErrorKind};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Version ─────────────────────────────────────────────────────────────────

/// A numeric `major.minor.patch` triple.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
  pub major: u64,
  pub minor: u64,
  pub patch: u64,
}

impl Version {
  pub const ZERO: Self = Self { major: 0, minor: 0, patch: 0 };

  pub fn new(major: u64, minor: u64, patch: u64) -> Self {
    Self { major, minor, patch }
  }

  /// Parse a dotted version string.
  ///
  /// Missing trailing components default to 0. Whitespace around a
  /// component is ignored and components too large for `u64` saturate. Any
  /// other component among the first three that fails to parse yields
  /// [`Version::ZERO`] as a whole; partial parses are never kept.
  pub fn parse(input: &str) -> Self {
    let mut triple = [0u64; 3];
    for (slot, part) in triple.iter_mut().zip(input.split('.')) {
      match part.trim().parse::<u64>() {
        Ok(n) => *slot = n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => *slot = u64::MAX,
        Err(_) => return Self::ZERO,
      }
    }
    let [major, minor, patch] = triple;
    Self { major, minor, patch }
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
  }
}

// ─── Bump type ───────────────────────────────────────────────────────────────

/// Magnitude of a version change.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BumpType {
  Major,
  Minor,
  Patch,
  /// No component of the new version exceeds the old one at the point of
  /// comparison (equal versions and most downgrades).
  Unknown,
}

/// Classify the change from `old` to `new`.
///
/// Components are checked in order major, minor, patch, and the first one
/// where `new` is strictly greater wins. Earlier components are not required
/// to be equal, so `3.0.0 -> 2.5.0` reports [`BumpType::Minor`].
pub fn classify_bump(old: &str, new: &str) -> BumpType {
  let old = Version::parse(old);
  let new = Version::parse(new);

  if new.major > old.major {
    BumpType::Major
  } else if new.minor > old.minor {
    BumpType::Minor
  } else if new.patch > old.patch {
    BumpType::Patch
  } else {
    BumpType::Unknown
  }
}
