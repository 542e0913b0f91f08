use std::env;
use std::io;
use std::path::PathBuf;

use novelpad::app::Workbench;
use novelpad::kernel::services::adapters::{load_settings, open_store};

mod logging;

fn main() -> io::Result<()> {
    let logging = logging::init();

    // An explicit settings path may be passed as the only argument.
    let settings_path = env::args_os().nth(1).map(PathBuf::from);
    let settings = load_settings(settings_path.as_deref());
    tracing::info!(
        backend = settings.backend.kind(),
        goal = settings.goal,
        "starting novelpad"
    );

    let store = open_store(&settings.backend).map_err(|e| {
        tracing::error!(error = %e, "failed to open document store");
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;
    let mut workbench = Workbench::new(&settings, store)?;

    let signal = novelpad::tui::run(&mut workbench)?;

    if let Some(guard) = &logging {
        eprintln!("logs: {}", guard.log_dir().display());
    }
    if let Some(signal) = signal {
        drop(workbench);
        drop(logging);
        std::process::exit(signal.exit_code());
    }
    Ok(())
}
