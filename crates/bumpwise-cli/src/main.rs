//! `bumpwise`: explain why a dependency upgrade is (or isn't) a good idea.
//!
//! # Usage
//!
//! ```
//! bumpwise                                   # interactive form + conversation
//! bumpwise explain -p auth-lib --old 2.1.0 --new 2.2.0 --context "Checkout Service"
//! bumpwise explain -p payments-core --old 3.0.0 --new 3.1.0 --json
//! bumpwise catalog
//! ```

mod app;
mod render;
mod settings;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::PathBuf,
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use bumpwise_core::{
  explain::Explainer,
  knowledge::KnowledgeStore,
  request::{Ecosystem, UpgradeRequest},
};
use clap::{Args, Parser, Subcommand};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "bumpwise", version, about = "Explain dependency upgrade decisions")]
struct Cli {
  /// Path to a TOML settings file.
  #[arg(short, long, value_name = "FILE", default_value = "bumpwise.toml")]
  config: PathBuf,

  /// TOML knowledge file to use instead of the built-in tables.
  #[arg(short, long, value_name = "FILE")]
  knowledge: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Explain a single upgrade and print the result.
  Explain(ExplainArgs),
  /// List every release in the knowledge tables.
  Catalog,
}

#[derive(Args, Debug)]
struct ExplainArgs {
  /// Package name.
  #[arg(short, long)]
  package: String,

  /// Version currently in use.
  #[arg(long = "old", value_name = "VERSION")]
  old_version: String,

  /// Candidate version.
  #[arg(long = "new", value_name = "VERSION")]
  new_version: String,

  /// Package ecosystem (pip, npm, maven, gradle, cargo, composer).
  #[arg(short, long)]
  ecosystem: Option<Ecosystem>,

  /// Free text naming a service to focus on, e.g. "Checkout Service".
  #[arg(short = 'x', long)]
  context: Option<String>,

  /// Print the structured explanation as JSON.
  #[arg(long)]
  json: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let cli = Cli::parse();

  // CLI flags override the settings file and environment.
  let mut settings = Settings::load(&cli.config)?;
  if let Some(path) = cli.knowledge {
    settings.knowledge_path = Some(path);
  }

  init_tracing(&settings, cli.command.is_none())?;

  let store = match &settings.knowledge_path {
    Some(path) => KnowledgeStore::load(path)
      .with_context(|| format!("loading knowledge tables from {}", path.display()))?,
    None => KnowledgeStore::builtin().context("loading built-in knowledge tables")?,
  };
  let explainer = Explainer::new(Arc::new(store));

  match cli.command {
    None => run_tui(explainer, settings.default_ecosystem),
    Some(Command::Explain(args)) => run_explain(&explainer, args, settings.default_ecosystem),
    Some(Command::Catalog) => {
      run_catalog(explainer.store());
      Ok(())
    }
  }
}

/// Logs go to stderr for one-shot commands. The TUI owns the terminal, so it
/// only logs when a log file is configured.
fn init_tracing(settings: &Settings, interactive: bool) -> Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::WARN.into())
    .from_env_lossy();

  if !interactive {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .init();
    return Ok(());
  }

  if let Some(path) = &settings.log_file {
    let file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(path)
      .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  }
  Ok(())
}

// ─── One-shot commands ────────────────────────────────────────────────────────

fn run_explain(explainer: &Explainer, args: ExplainArgs, default_ecosystem: Ecosystem) -> Result<()> {
  println!("{}", explain_output(explainer, &args, default_ecosystem)?);
  Ok(())
}

/// The text `bumpwise explain` prints: the formatted explanation, or the
/// structured one as pretty JSON with `--json`.
fn explain_output(
  explainer: &Explainer,
  args: &ExplainArgs,
  default_ecosystem: Ecosystem,
) -> Result<String> {
  let request = UpgradeRequest::new(
    &args.package,
    &args.old_version,
    &args.new_version,
    args.ecosystem.unwrap_or(default_ecosystem),
    args.context.as_deref(),
  )?;

  tracing::info!(query = %request.query_text(), "explaining upgrade");
  let explanation = explainer.compose(&request);

  if args.json {
    serde_json::to_string_pretty(&explanation).context("serialising explanation")
  } else {
    Ok(render::format_explanation(&explanation))
  }
}

fn run_catalog(store: &KnowledgeStore) {
  println!("{:<16} {:<10} {:<6} {}", "PACKAGE", "VERSION", "BUMP", "RELEASED");
  for (package, version, record) in store.releases() {
    println!(
      "{package:<16} {version:<10} {:<6} {}",
      record.bump.to_string(),
      record.released.format("%Y-%m-%d")
    );
  }
}

// ─── Interactive UI ───────────────────────────────────────────────────────────

fn run_tui(explainer: Explainer, ecosystem: Ecosystem) -> Result<()> {
  let packages = explainer.store().packages().map(str::to_string).collect();
  let mut app = App::new(explainer, packages, ecosystem);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<Explainer>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250)).context("polling terminal events")? {
      continue;
    }

    match event::read().context("reading terminal event")? {
      // Ignore key releases on platforms that report them.
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}
