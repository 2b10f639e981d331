//! Tracing setup: a daily log file plus optional stderr output.
//!
//! Settings decide the file location and level, so events emitted while
//! they load go through a stderr-only [`bootstrap`] subscriber instead.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use registro_core::settings::LogSettings;

const LOG_FILE_PREFIX: &str = "registro.log";

fn stderr_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    }
}

/// Stderr subscriber for the span before [`init`], to be scoped with
/// `tracing::subscriber::with_default`.
pub fn bootstrap(verbose: bool) -> impl Subscriber + Send + Sync {
    bootstrap_to(verbose, std::io::stderr)
}

fn bootstrap_to<W>(verbose: bool, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_writer(writer)
        .with_target(false)
        .with_max_level(stderr_level(verbose))
        .finish()
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Without `verbose`
/// only warnings and errors reach stderr. The returned guard flushes the file
/// writer on drop and must live until exit.
pub fn init(
    settings: &LogSettings,
    logs_dir: Option<&Path>,
    verbose: bool,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log level '{}'", settings.level))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_level(verbose));

    let (file_layer, guard) = match logs_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    use crate::context::AppContext;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_bootstrap_captures_settings_loading() {
        let temp_dir = TempDir::new().unwrap();
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = bootstrap_to(true, move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            AppContext::persistent(Some(temp_dir.path().to_path_buf())).unwrap()
        });

        assert!(captured.text().contains("[ConfigService] Loading settings"));
    }

    #[test]
    fn test_bootstrap_is_quiet_without_verbose() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = bootstrap_to(false, move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("routine");
            tracing::warn!("attention");
        });

        let text = captured.text();
        assert!(!text.contains("routine"));
        assert!(text.contains("attention"));
    }
}
