//! Upgrade-details form, left panel.

use bumpwise_core::advisor::UpgradeAdvisor;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Field};

/// Examples shown under the form.
const EXAMPLES: [&str; 3] = [
  "auth-lib: 2.1.0 → 2.2.0",
  "payments-core: 3.1.0 → 3.2.0",
  "logging-lib: 1.5.0 → 1.5.1",
];

/// Render the form into `area`.
pub fn draw<A: UpgradeAdvisor>(f: &mut Frame, area: Rect, app: &App<A>) {
  let block = Block::default()
    .title(" Upgrade Details ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();

  for field in Field::ALL {
    let focused = app.focus == field;
    let label_style = if focused {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    let marker = if focused { "▸ " } else { "  " };
    lines.push(Line::from(Span::styled(
      format!("{marker}{}", field.label()),
      label_style,
    )));
    lines.push(value_line(app, field, focused));
    lines.push(Line::from(""));
  }

  if let Some(suggestion) = app.suggestion() {
    lines.push(Line::from(vec![
      Span::styled("  did you mean ", Style::default().fg(Color::DarkGray)),
      Span::styled(suggestion.to_string(), Style::default().fg(Color::Yellow)),
      Span::styled("?  (→ to accept)", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));
  }

  lines.push(Line::from(Span::styled(
    "  Example packages",
    Style::default().add_modifier(Modifier::BOLD),
  )));
  for example in EXAMPLES {
    lines.push(Line::from(Span::styled(
      format!("    {example}"),
      Style::default().fg(Color::DarkGray),
    )));
  }

  f.render_widget(Paragraph::new(lines), inner);
}

fn value_line<A: UpgradeAdvisor>(app: &App<A>, field: Field, focused: bool) -> Line<'static> {
  let cursor = if focused { "_" } else { "" };

  match app.form.text(field) {
    // Ecosystem selector.
    None => {
      let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      Line::from(Span::styled(
        format!("    ‹ {} ›", app.form.ecosystem),
        style,
      ))
    }
    Some("") => Line::from(vec![
      Span::styled(
        format!("    {}", field.placeholder()),
        Style::default().fg(Color::DarkGray),
      ),
      Span::raw(cursor),
    ]),
    Some(text) => Line::from(format!("    {text}{cursor}")),
  }
}
