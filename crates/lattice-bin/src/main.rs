//! lattice entrypoint.

mod demo;
mod runtime;

use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::Result;
use clap::Parser;
use core_input::{TerminalEvents, spawn_input_thread};
use core_terminal::{CrosstermBackend, TerminalBackend};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::runtime::{Runtime, log_input_telemetry, log_shutdown_stage};

const LOG_FILE: &str = "lattice.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lattice", version, about = "Paged terminal screens")]
struct Args {
    /// Optional UTF-8 text file to open in the editor screen.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `lattice.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Log file path, truncated at startup.
    #[arg(long = "log-file", default_value = LOG_FILE)]
    pub log_file: PathBuf,
}

/// Install the file logger. The returned guard flushes the non-blocking
/// writer when dropped and must outlive the runtime.
fn configure_logging(path: &Path) -> Option<WorkerGuard> {
    let stale = truncate_log(path);
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map_or_else(|| LOG_FILE.into(), |name| name.to_os_string());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    if let Some(err) = stale {
        warn!(target: "runtime.startup", path = %path.display(), error = %err, "log_truncate_failed");
    }
    Some(guard)
}

/// Remove the previous log so each run starts empty. A missing file is fine;
/// any other failure is returned so it can be logged once logging is up.
fn truncate_log(path: &Path) -> Option<std::io::Error> {
    match std::fs::remove_file(path) {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => Some(err),
        _ => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(&args.log_file);
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let screen = demo::root(args.path.as_deref(), &config.file.history);
    let mut runtime = Runtime::new(screen, config);
    info!(
        target: "runtime.startup",
        screen = %runtime.screen_name(),
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        config_override = args.config.is_some(),
        "bootstrap_complete"
    );

    let mut backend = CrosstermBackend::new();
    backend.set_title("lattice")?;
    let reason = {
        let mut guard = backend.enter_guard()?;
        let (tx, rx) = core_events::channel();
        let input = spawn_input_thread(tx, TerminalEvents)?;
        let reason = runtime.run(guard.backend(), &rx)?;
        log_shutdown_stage(reason, "loop_exit");
        // The input thread stops after forwarding Exit or once its reads fail.
        drop(rx);
        if input.join().is_err() {
            warn!(target: "runtime.shutdown", "input thread panicked");
        }
        reason
    };
    log_shutdown_stage(reason, "terminal_restored");
    log_input_telemetry();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_log_is_removed_and_failures_reported() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("lattice.log");
        std::fs::write(&log, "old run").unwrap();
        assert!(truncate_log(&log).is_none());
        assert!(!log.exists());
        assert!(truncate_log(&log).is_none());

        assert!(truncate_log(dir.path()).is_some());
    }

    #[test]
    fn args_defaults_and_overrides() {
        let args = Args::try_parse_from(["lattice"]).unwrap();
        assert_eq!(args.log_file, PathBuf::from(LOG_FILE));
        assert!(args.path.is_none() && args.config.is_none());

        let args = Args::try_parse_from([
            "lattice",
            "--config",
            "alt.toml",
            "--log-file",
            "/tmp/l.log",
            "notes.txt",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
        assert_eq!(args.log_file, PathBuf::from("/tmp/l.log"));
        assert_eq!(args.path, Some(PathBuf::from("notes.txt")));
    }
}
