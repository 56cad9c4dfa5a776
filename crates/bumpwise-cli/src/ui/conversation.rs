//! Conversation pane, right panel.

use bumpwise_core::{advisor::UpgradeAdvisor, conversation::Role};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

/// Render the conversation log into `area`, oldest message first, pinned to
/// the bottom unless the user has scrolled back.
pub fn draw<A: UpgradeAdvisor>(f: &mut Frame, area: Rect, app: &App<A>) {
  let block = Block::default()
    .title(format!(" Conversation ({}) ", app.conversation.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.conversation.is_empty() {
    app.max_scroll.set(0);
    let hint = Paragraph::new("Fill in the upgrade details and press Enter.")
      .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, inner);
    return;
  }

  let mut lines: Vec<Line> = Vec::new();
  for message in app.conversation.messages() {
    let (who, colour) = match message.role {
      Role::User => ("You", Color::Cyan),
      Role::Assistant => ("Assistant", Color::Green),
    };
    lines.push(Line::from(Span::styled(
      who,
      Style::default().fg(colour).add_modifier(Modifier::BOLD),
    )));
    lines.extend(message.content.lines().map(markdown_line));
    lines.push(Line::from(""));
  }

  let para = Paragraph::new(lines).wrap(Wrap { trim: false });

  // Same wrapping as the render below, so the newest line lands on screen.
  let rows = u16::try_from(para.line_count(inner.width)).unwrap_or(u16::MAX);
  let max_scroll = rows.saturating_sub(inner.height);
  app.max_scroll.set(max_scroll);
  let top = max_scroll.saturating_sub(app.scroll_back.min(max_scroll));

  f.render_widget(para.scroll((top, 0)), inner);
}

/// Turn `**bold**` runs into bold spans; everything else is plain.
fn markdown_line(text: &str) -> Line<'static> {
  let spans: Vec<Span> = text
    .split("**")
    .enumerate()
    .filter(|(_, part)| !part.is_empty())
    .map(|(i, part)| {
      if i % 2 == 1 {
        Span::styled(part.to_string(), Style::default().add_modifier(Modifier::BOLD))
      } else {
        Span::raw(part.to_string())
      }
    })
    .collect();
  Line::from(spans)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use bumpwise_core::{explain::Explainer, knowledge::KnowledgeStore, request::Ecosystem};
  use ratatui::{Terminal, backend::TestBackend};

  use super::*;

  #[test]
  fn bold_markers_become_bold_spans() {
    let line = markdown_line("**Summary:** all good");
    assert_eq!(line.spans.len(), 2);
    assert_eq!(line.spans[0].content, "Summary:");
    assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(line.spans[1].content, " all good");
  }

  #[test]
  fn plain_line_is_single_span() {
    let line = markdown_line("- item");
    assert_eq!(line.spans.len(), 1);
  }

  fn rendered_rows(app: &App<Explainer>, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
      .draw(|f| {
        let area = f.area();
        draw(f, area, app);
      })
      .unwrap();
    let buffer = terminal.backend().buffer();
    (0..height)
      .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
      .collect()
  }

  fn app_with_answer() -> App<Explainer> {
    let store = KnowledgeStore::builtin().expect("builtin tables parse");
    let mut app = App::new(Explainer::new(Arc::new(store)), Vec::new(), Ecosystem::Pip);
    app.form.package = "auth-lib".into();
    app.form.old_version = "2.0.0".into();
    app.form.new_version = "2.1.0".into();
    assert!(app.submit());
    app
  }

  #[test]
  fn newest_line_is_visible_at_any_width() {
    let app = app_with_answer();
    for width in [30, 40, 50, 60, 80] {
      let rows = rendered_rows(&app, width, 20);
      assert!(
        rows.iter().any(|r| r.contains("matrix")),
        "last source line missing at width {width}: {rows:#?}"
      );
      assert!(app.max_scroll.get() > 0);
    }
  }

  #[test]
  fn scrolled_to_top_shows_first_turn() {
    let mut app = app_with_answer();
    rendered_rows(&app, 50, 20);
    app.scroll_back = app.max_scroll.get();

    let rows = rendered_rows(&app, 50, 20);
    assert!(rows[1].contains("You"), "top row was {:?}", rows[1]);
    assert!(!rows.iter().any(|r| r.contains("matrix")));
  }

  #[test]
  fn empty_log_has_nothing_to_scroll() {
    let store = KnowledgeStore::builtin().expect("builtin tables parse");
    let app = App::new(Explainer::new(Arc::new(store)), Vec::new(), Ecosystem::Pip);
    app.max_scroll.set(9);
    rendered_rows(&app, 40, 10);
    assert_eq!(app.max_scroll.get(), 0);
  }
}
