//! TUI rendering: lays out the header, form, conversation and status bar.

pub mod conversation;
pub mod form;

use bumpwise_core::advisor::UpgradeAdvisor;
use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Field, Status};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<A: UpgradeAdvisor>(f: &mut Frame, app: &App<A>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " bumpwise · dependency upgrade reasoning",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<A: UpgradeAdvisor>(f: &mut Frame, area: Rect, app: &App<A>) {
  // Left form pane (35%), right conversation pane (65%).
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
    .split(area);

  form::draw(f, cols[0], app);
  conversation::draw(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<A: UpgradeAdvisor>(f: &mut Frame, area: Rect, app: &App<A>) {
  let mode_label = if app.focus == Field::Ecosystem { "SELECT" } else { "EDIT" };

  let hints = match app.focus {
    Field::Ecosystem => "←→ ecosystem  Tab next  Enter explain  ^L clear  Esc quit",
    Field::Package => "Type package  → accept suggestion  Tab next  Enter explain  Esc quit",
    _ => "Tab/↑↓ move  Enter explain  PgUp/PgDn scroll  ^L clear  Esc quit",
  };

  let (text, text_style) = match &app.status {
    Status::Hints => (hints.to_string(), Style::default().fg(Color::DarkGray)),
    Status::Info(msg) => (msg.clone(), Style::default().fg(Color::Cyan)),
    Status::Error(msg) => (
      msg.clone(),
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let text_span = Span::styled(format!("  {text}"), text_style);

  let line = Line::from(vec![mode_span, text_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
