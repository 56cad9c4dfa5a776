//! Plain-text rendering of an [`Explanation`].
//!
//! The output uses `**bold**` markers for section headers; the TUI turns
//! them into styled spans and the one-shot command prints them verbatim.

use bumpwise_core::explain::Explanation;

/// Render `explanation` as the assistant-turn text.
///
/// Fixed order: summary, release notes, then the risk, security,
/// compatibility and sources sections, each only when non-empty.
pub fn format_explanation(explanation: &Explanation) -> String {
  let mut lines: Vec<String> = Vec::new();

  lines.push(format!("**Summary:** {}", explanation.summary));
  lines.push(String::new());

  lines.push(format!("**Release Notes:** {}", explanation.release_notes));
  lines.push(String::new());

  for (header, items) in [
    ("Risk Assessment", &explanation.risk_reasoning),
    ("Security Considerations", &explanation.security_reasoning),
    ("Compatibility", &explanation.compatibility_reasoning),
  ] {
    if items.is_empty() {
      continue;
    }
    lines.push(format!("**{header}:**"));
    lines.extend(items.iter().map(|item| format!("- {item}")));
    lines.push(String::new());
  }

  if !explanation.sources.is_empty() {
    lines.push("**Sources:**".to_string());
    lines.extend(explanation.sources.iter().map(|s| format!("- {s}")));
  }

  lines.join("\n")
}

/// Assistant-turn text for an advisor failure.
pub fn format_failure(error: &dyn std::error::Error) -> String {
  format!("Error generating explanation: {error}")
}
