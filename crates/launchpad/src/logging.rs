//! Logging setup.
//!
//! Warnings go to stderr by default. With `--debug` the level is raised and
//! a timestamped log file is written to the temp dir as well, with
//! `launchpad.log` pointing at the newest one.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn setup_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "launchpad={default_level},launchpad_core={default_level}"
        ))
    });

    if debug {
        let temp_dir = std::env::temp_dir();
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("launchpad-{timestamp}.log");
        let log_path = temp_dir.join(&log_filename);

        let symlink_path = temp_dir.join("launchpad.log");
        let _ = std::fs::remove_file(&symlink_path);
        let _ = std::os::unix::fs::symlink(&log_path, &symlink_path);

        let file_appender = tracing_appender::rolling::never(&temp_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        std::mem::forget(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .with(filter)
            .init();

        eprintln!("Logging to: {} (and stderr)", log_path.display());
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}
