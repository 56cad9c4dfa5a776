//! Application state machine and event dispatcher.

use std::cell::Cell;

use bumpwise_core::{
  advisor::UpgradeAdvisor,
  conversation::Conversation,
  request::{Ecosystem, UpgradeRequest},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::render::{format_explanation, format_failure};

/// Lines moved per PageUp / PageDown.
const SCROLL_STEP: u16 = 5;

// ─── Form ─────────────────────────────────────────────────────────────────────

/// The form field that currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Ecosystem,
  Package,
  OldVersion,
  NewVersion,
  Context,
}

impl Field {
  pub const ALL: [Field; 5] = [
    Field::Ecosystem,
    Field::Package,
    Field::OldVersion,
    Field::NewVersion,
    Field::Context,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Field::Ecosystem => "Ecosystem",
      Field::Package => "Package Name",
      Field::OldVersion => "Old Version",
      Field::NewVersion => "New Version",
      Field::Context => "Context (Optional)",
    }
  }

  pub fn placeholder(self) -> &'static str {
    match self {
      Field::Ecosystem => "",
      Field::Package => "e.g., auth-lib",
      Field::OldVersion => "e.g., 2.1.0",
      Field::NewVersion => "e.g., 2.2.0",
      Field::Context => "e.g., Checkout Service, prod rollout",
    }
  }

  fn index(self) -> usize {
    Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
  }

  fn next(self) -> Self { Self::ALL[(self.index() + 1) % Self::ALL.len()] }

  fn prev(self) -> Self {
    Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default)]
pub struct Form {
  pub ecosystem:   Ecosystem,
  pub package:     String,
  pub old_version: String,
  pub new_version: String,
  pub context:     String,
}

impl Form {
  /// The text buffer behind `field`, or `None` for the ecosystem selector.
  pub fn text(&self, field: Field) -> Option<&str> {
    match field {
      Field::Ecosystem => None,
      Field::Package => Some(&self.package),
      Field::OldVersion => Some(&self.old_version),
      Field::NewVersion => Some(&self.new_version),
      Field::Context => Some(&self.context),
    }
  }

  fn text_mut(&mut self, field: Field) -> Option<&mut String> {
    match field {
      Field::Ecosystem => None,
      Field::Package => Some(&mut self.package),
      Field::OldVersion => Some(&mut self.old_version),
      Field::NewVersion => Some(&mut self.new_version),
      Field::Context => Some(&mut self.context),
    }
  }

  fn to_request(&self) -> bumpwise_core::Result<UpgradeRequest> {
    UpgradeRequest::new(
      &self.package,
      &self.old_version,
      &self.new_version,
      self.ecosystem,
      Some(&self.context),
    )
  }
}

// ─── Status ───────────────────────────────────────────────────────────────────

/// One-line message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
  /// Show the key hints.
  #[default]
  Hints,
  Info(String),
  Error(String),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state for one session.
pub struct App<A> {
  pub advisor:      A,
  /// Package names offered as suggestions for the package field.
  pub packages:     Vec<String>,
  pub form:         Form,
  pub focus:        Field,
  pub conversation: Conversation,
  /// How many rendered lines the conversation is scrolled up from the
  /// bottom. Zero follows the newest message.
  pub scroll_back:  u16,
  /// Furthest `scroll_back` can go; written by the conversation pane on
  /// every draw from the rendered height of the log.
  pub max_scroll:   Cell<u16>,
  pub status:       Status,
}

impl<A: UpgradeAdvisor> App<A> {
  pub fn new(advisor: A, packages: Vec<String>, ecosystem: Ecosystem) -> Self {
    Self {
      advisor,
      packages,
      form: Form { ecosystem, ..Form::default() },
      focus: Field::Package,
      conversation: Conversation::new(),
      scroll_back: 0,
      max_scroll: Cell::new(0),
      status: Status::Hints,
    }
  }

  // ── Suggestions ───────────────────────────────────────────────────────────

  /// Best fuzzy match for the typed package name, unless it already is an
  /// exact known name.
  pub fn suggestion(&self) -> Option<&str> {
    let typed = self.form.package.trim();
    if typed.is_empty() || self.packages.iter().any(|p| p == typed) {
      return None;
    }
    let matcher = SkimMatcherV2::default();
    self
      .packages
      .iter()
      .filter_map(|p| matcher.fuzzy_match(p, typed).map(|score| (score, p)))
      .max_by_key(|(score, _)| *score)
      .map(|(_, p)| p.as_str())
  }

  fn accept_suggestion(&mut self) {
    if let Some(name) = self.suggestion().map(str::to_string) {
      self.form.package = name;
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  /// Validate the form and, if valid, append a user turn and the advisor's
  /// answer. Returns whether the conversation changed.
  pub fn submit(&mut self) -> bool {
    let request = match self.form.to_request() {
      Ok(request) => request,
      Err(e) => {
        self.status = Status::Error(capitalise(&e.to_string()));
        return false;
      }
    };

    tracing::info!(
      package = %request.package,
      old = %request.old_version,
      new = %request.new_version,
      ecosystem = %request.ecosystem,
      "explaining upgrade"
    );

    self.conversation.push_user(request.query_text());
    let reply = match self.advisor.explain(&request) {
      Ok(explanation) => format_explanation(&explanation),
      Err(e) => {
        tracing::warn!(error = %e, "advisor failed");
        format_failure(&e)
      }
    };
    self.conversation.push_assistant(reply);
    self.scroll_back = 0;
    self.status = Status::Hints;
    true
  }

  /// Empty the conversation. Does nothing when it is already empty.
  pub fn clear_conversation(&mut self) {
    if self.conversation.is_empty() {
      self.status = Status::Info("Conversation is already empty.".into());
      return;
    }
    tracing::info!(messages = self.conversation.len(), "clearing conversation");
    self.conversation.clear();
    self.scroll_back = 0;
    self.status = Status::Info("Conversation cleared.".into());
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      // Quit
      KeyCode::Esc => return false,
      KeyCode::Char('c') if ctrl => return false,

      // Actions
      KeyCode::Char('l') if ctrl => self.clear_conversation(),
      KeyCode::Enter => {
        self.submit();
      }

      // Focus
      KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
      KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

      // Conversation scroll
      KeyCode::PageUp => {
        self.scroll_back = self
          .scroll_back
          .saturating_add(SCROLL_STEP)
          .min(self.max_scroll.get());
      }
      KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP),

      // Ecosystem selector
      KeyCode::Left if self.focus == Field::Ecosystem => {
        self.form.ecosystem = self.form.ecosystem.prev();
      }
      KeyCode::Right if self.focus == Field::Ecosystem => {
        self.form.ecosystem = self.form.ecosystem.next();
      }
      KeyCode::Right if self.focus == Field::Package => self.accept_suggestion(),

      // Text input
      KeyCode::Backspace => {
        if let Some(buf) = self.form.text_mut(self.focus) {
          buf.pop();
          self.status = Status::Hints;
        }
      }
      KeyCode::Char(c) if !ctrl => {
        if let Some(buf) = self.form.text_mut(self.focus) {
          buf.push(c);
          self.status = Status::Hints;
        }
      }

      _ => {}
    }
    true
  }
}

fn capitalise(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
