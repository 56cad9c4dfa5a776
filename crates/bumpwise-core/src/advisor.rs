//! The `UpgradeAdvisor` trait: the seam between presentation and reasoning.

use crate::{explain::Explanation, request::UpgradeRequest};

/// Anything that can turn an [`UpgradeRequest`] into an [`Explanation`].
///
/// The presentation layer is generic over this trait and converts any
/// `Err` into an assistant turn instead of aborting.
pub trait UpgradeAdvisor {
  type Error: std::error::Error + Send + Sync + 'static;

  fn explain(&self, request: &UpgradeRequest) -> Result<Explanation, Self::Error>;
}
