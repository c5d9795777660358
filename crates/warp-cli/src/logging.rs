//! Logging initialization

use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::args::{Args, LogFormat};

/// Map `-q` / `-v` counts to a default level
fn level(quiet: bool, verbose: u8) -> Level {
    if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Initialize logging based on CLI arguments.
///
/// Logs go to stderr so command output on stdout stays machine readable.
/// Keep the returned guard alive for the program's lifetime when a log file
/// is configured.
pub fn init(args: &Args) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level(args.quiet, args.verbose).into())
        .from_env_lossy();

    let (file_writer, guard) = match args.log_file {
        Some(ref log_file) => {
            let path = Path::new(log_file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {log_file}"))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match args.log_format {
        LogFormat::Text => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(args.verbose >= 2)
                .with_thread_ids(args.verbose >= 3)
                .with_file(args.verbose >= 3)
                .with_line_number(args.verbose >= 3);
            let file_layer = file_writer.map(|w| fmt::layer().with_ansi(false).with_writer(w));
            registry.with(stderr_layer).with(file_layer).init();
        }
        LogFormat::Json => {
            let stderr_layer = fmt::layer().json().with_writer(std::io::stderr);
            let file_layer = file_writer.map(|w| fmt::layer().json().with_writer(w));
            registry.with(stderr_layer).with(file_layer).init();
        }
        LogFormat::Compact => {
            let stderr_layer = fmt::layer().compact().with_writer(std::io::stderr);
            let file_layer = file_writer.map(|w| fmt::layer().compact().with_ansi(false).with_writer(w));
            registry.with(stderr_layer).with(file_layer).init();
        }
    }

    Ok(guard)
}
