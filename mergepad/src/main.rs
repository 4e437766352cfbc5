//! mergepad: side-by-side text diff and merge TUI.
//!
//! Entry point for the `mergepad` binary. Wires together the command line
//! (`cli`), configuration (`config`), logging, the terminal lifecycle (`tui`),
//! the unified event bus (`event`), the document loader thread (`loader`),
//! the UI (`ui`) and the theme system (`theme`).
//!
//! # Startup sequence
//!
//! 1. Parse the command line and load the config; both are safe before
//!    terminal init, so errors still reach stderr.
//! 2. Install the file logger (the TUI owns the terminal).
//! 3. `install_panic_hook()`, then `register_sigterm()`.
//! 4. `init_tui()` enters the alternate screen and raw mode.
//! 5. Spawn the event task and the loader thread; queue the CLI documents.
//!
//! `restore_tui()` runs after the event loop exits on every path (quit key,
//! SIGTERM, channel close, draw error). The panic hook covers panics.

mod app;
mod cli;
mod config;
mod event;
mod highlight;
mod loader;
mod theme;
mod tui;
mod ui;

use std::fs::OpenOptions;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use clap::Parser;

use crate::config::Config;
use crate::loader::types::Side;
use crate::ui::keybindings::{handle_key, handle_mouse, handle_paste, KeyAction};

/// Loads the config named on the command line, or the default one.
///
/// A broken config is a soft failure: the problem is printed and defaults are
/// used so a typo never prevents startup.
fn load_config(cli: &cli::Cli) -> Config {
    let path = cli.config.clone().unwrap_or_else(config::config_path);
    match Config::load(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("mergepad: {e}; using defaults");
            Config::default()
        }
    }
}

/// Sends `tracing` output to the configured log file.
///
/// Logging is optional: if the file cannot be opened the app runs without it.
fn init_logging(cfg: &Config) {
    let path = cfg.log_path();
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("mergepad: could not open log file {}: {e}", path.display());
            return;
        }
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(cfg.log_level())
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = cli::Cli::parse();
    let cfg = load_config(&cli);
    init_logging(&cfg);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mergepad starting");

    let theme = theme::Theme::from_name(&cfg.theme);
    let mut state = app::AppState {
        algorithm: cli.algorithm.map(Into::into).unwrap_or(cfg.algorithm),
        sync_view: cli.sync || cfg.sync_view,
        syntax_highlight: cfg.syntax_highlight,
        output_path: cli.output.clone(),
        ..app::AppState::default()
    };

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let (loader_tx, loader_rx) = crossbeam_channel::unbounded();
    let loader_events = handler.tx.clone();
    let syntax_highlight = cfg.syntax_highlight;
    std::thread::spawn(move || {
        loader::worker::loader_loop(loader_rx, loader_events, syntax_highlight)
    });
    state.loader_tx = Some(loader_tx);

    state.pending_compare = cli.left.is_some() && cli.right.is_some();
    if let Some(path) = cli.left {
        state.request_load(Side::Left, path);
    }
    if let Some(path) = cli.right {
        state.request_load(Side::Right, path);
    }
    if state.status.is_none() {
        state.set_status(
            "Load two files (o / O) or paste text into a pane, then compare with c. Press ? for help.",
        );
    }

    // Event loop: exits only via `break`, so `restore_tui()` below is always
    // reached. Draw errors are captured and returned after restoring.
    let mut outcome = Ok(());
    'event_loop: loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when no events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            outcome = Err(e);
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Paste(text)) => {
                        handle_paste(&text, &mut state);
                    }
                    Some(event::AppEvent::Loader(result)) => {
                        state.apply_loader_result(*result);
                    }
                    Some(event::AppEvent::Resize(_, _)) | Some(event::AppEvent::Tick) => {
                        // ratatui picks up the new size on the next Render.
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    tracing::info!("mergepad exiting");
    outcome
}
