//! Append-only conversation log for a single session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub role:    Role,
  pub content: String,
}

/// Ordered messages, oldest first.
///
/// Entries are only ever appended; the whole log can be cleared, but no
/// single entry is edited or removed.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
  messages: Vec<Message>,
}

impl Conversation {
  pub fn new() -> Self { Self::default() }

  pub fn push_user(&mut self, content: impl Into<String>) {
    self.push(Role::User, content.into());
  }

  pub fn push_assistant(&mut self, content: impl Into<String>) {
    self.push(Role::Assistant, content.into());
  }

  fn push(&mut self, role: Role, content: String) {
    self.messages.push(Message { role, content });
  }

  pub fn messages(&self) -> &[Message] { &self.messages }

  pub fn len(&self) -> usize { self.messages.len() }

  pub fn is_empty(&self) -> bool { self.messages.is_empty() }

  pub fn clear(&mut self) { self.messages.clear(); }
}
