//! Tracing setup. The terminal belongs to the UI, so logs go to a file.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// `<state dir>/folio/folio-<pid>.log`, falling back to the temp dir.
pub fn default_log_path() -> PathBuf {
    let dir = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("folio"))
        .unwrap_or_else(|| std::env::temp_dir().join("folio-logs"));
    dir.join(format!("folio-{}.log", std::process::id()))
}

/// `RUST_LOG` wins over the configured level.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `path`.
pub fn init(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let fmt_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(level))
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_log_path_is_per_process() {
        let path = default_log_path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name, format!("folio-{}.log", std::process::id()));
    }

    #[test]
    fn test_events_reach_the_file() {
        let file = NamedTempFile::new().unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Arc::new(file.reopen().unwrap())).with_ansi(false))
            .with(EnvFilter::new("debug"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(path = "/about", "route resolved");
        });

        let written = fs::read_to_string(file.path()).unwrap();
        assert!(written.contains("route resolved"));
        assert!(written.contains("/about"));
    }
}
