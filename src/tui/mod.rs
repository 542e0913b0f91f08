//! TUI integration layer (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the core never depends on terminal crates.

pub mod terminal_guard;

use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::Workbench;
use terminal_guard::{TerminalGuard, TerminationSignal};

const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(3);
const SIGNAL_GRACE: Duration = Duration::from_secs(5);

/// Runs the editor until the user quits or a termination signal arrives.
///
/// Pending saves are flushed before the terminal is restored. Returns the
/// signal that ended the session, if any.
pub fn run(workbench: &mut Workbench) -> io::Result<Option<TerminationSignal>> {
    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    let _signals =
        terminal_guard::install_termination_signals(guard.restorer(), signal_tx, SIGNAL_GRACE)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    workbench.start();

    let mut dirty = true;
    let mut signal = None;
    loop {
        if dirty {
            terminal.draw(|frame| workbench.render(frame))?;
            dirty = false;
        }

        let now = Instant::now();
        let timeout = workbench
            .next_deadline()
            .map_or(FRAME_INTERVAL, |deadline| {
                deadline.saturating_duration_since(now).min(FRAME_INTERVAL)
            });
        if event::poll(timeout)? {
            dirty |= handle_event(workbench, event::read()?);
        }
        dirty |= workbench.tick(Instant::now());

        if let Ok(received) = signal_rx.try_recv() {
            signal = Some(received);
            break;
        }
        if workbench.should_quit() {
            break;
        }
    }

    tracing::info!("shutting down");
    if !workbench.shutdown(SHUTDOWN_TIMEOUT) {
        tracing::warn!("some edits may not have been saved");
    }
    drop(terminal);
    drop(guard);
    Ok(signal)
}

fn handle_event(workbench: &mut Workbench, event: Event) -> bool {
    match event {
        Event::Key(key) => workbench.handle_key(key),
        Event::Paste(text) => workbench.handle_paste(text),
        Event::Resize(..) => true,
        _ => false,
    }
}
