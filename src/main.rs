use anyhow::Result;
use tracing::info;

mod app;
mod config;
mod content;
mod form;
mod handler;
mod relay;
mod reveal;
mod theme;
mod tui;
mod typing;
mod ui;

use app::App;
use config::Config;
use tui::EventHandler;

/// The TUI owns the terminal, so logging goes to a file and only when
/// asked for via FOLIO_LOG (an env-filter directive, e.g. "debug").
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let directives = std::env::var("FOLIO_LOG").ok()?;

    let log_dir = dirs::cache_dir()?.join("folio");
    std::fs::create_dir_all(&log_dir).ok()?;
    let appender = tracing_appender::rolling::never(log_dir, "folio.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(directives))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logging();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read config; using defaults");
        Config::default()
    });

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let mut app = App::new(&config);
    let mut events = EventHandler::new();
    info!(theme = app.theme.as_str(), "folio started");

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(&mut app, event).await?;
        }
    }

    tui::restore()?;
    Ok(())
}
