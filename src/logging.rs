use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `prompter_tui=debug`.
pub const LOG_ENV: &str = "PROMPTER_LOG";

/// Sends log output to `path`; the terminal belongs to the UI.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init(path: &Path) -> Result<Option<WorkerGuard>> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let file_name = path
        .file_name()
        .context("Log file path has no file name")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // A subscriber is already installed; drop the guard so the writer shuts down.
        Err(_) => Ok(None),
    }
}

pub fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(target: "runtime.panic", %info, "panic");
        default_panic(info);
    }));
}
