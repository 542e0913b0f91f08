use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Puts the terminal into editing mode and back.
pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

/// Raw mode, alternate screen and bracketed paste. The caret is drawn by the
/// renderer, so the hardware cursor stays hidden.
#[derive(Debug, Default)]
pub struct CrosstermTerminalOps;

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{
            cursor,
            event::EnableBracketedPaste,
            execute,
            terminal::{enable_raw_mode, EnterAlternateScreen},
        };

        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::Hide
        )?;
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::{
            cursor,
            event::DisableBracketedPaste,
            execute,
            terminal::{disable_raw_mode, LeaveAlternateScreen},
        };

        // Every step runs even if an earlier one fails; the first error wins.
        let steps = [
            disable_raw_mode(),
            execute!(
                io::stdout(),
                DisableBracketedPaste,
                LeaveAlternateScreen,
                cursor::Show
            ),
        ];
        steps.into_iter().collect()
    }
}

#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    /// Runs the restore once; later calls are no-ops.
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }

    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.setup()?;
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            tracing::error!(error = %e, "failed to restore terminal");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::SigInt => 130,
            TerminationSignal::SigTerm => 143,
        }
    }
}

/// Forwards SIGINT/SIGTERM to the main loop so it can flush pending saves.
/// If the loop has not exited after `grace`, restores the terminal and exits.
#[cfg(unix)]
pub fn install_termination_signals(
    restorer: TerminalRestorer,
    tx: std::sync::mpsc::Sender<TerminationSignal>,
    grace: std::time::Duration,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let signal = match sig {
                SIGINT => TerminationSignal::SigInt,
                _ => TerminationSignal::SigTerm,
            };
            tracing::info!(?signal, "termination signal received");
            let _ = tx.send(signal);

            std::thread::sleep(grace);
            tracing::error!("main loop did not exit in time, forcing exit");
            let _ = restorer.restore();
            std::process::exit(signal.exit_code());
        }
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
