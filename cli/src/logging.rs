use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "olla_tui=info,olla_cli=info";
const LOG_FILE_NAME: &str = "olla-tui.log";

pub fn default_log_dir(home: &Path) -> PathBuf {
    crate::config::olla_home(home).join("log")
}

/// Installs the global subscriber writing to `<log_dir>/olla-tui.log`.
///
/// The TUI owns stdout, so nothing is logged to the terminal. The returned guard flushes the
/// background writer when dropped and must be held until the program exits.
pub fn init(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("create log dir {}", log_dir.display()))?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(log_file);
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(layer)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_dir_lives_under_olla_home() {
        let home = Path::new("home");
        assert_eq!(default_log_dir(home), home.join(".olla").join("log"));
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
