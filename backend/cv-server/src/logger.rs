use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Record, info};

/// Initialize the global logger.
///
/// Output goes to `log_file` when set (plain text, appended), otherwise to
/// stdout, colored when `colored` is true. Noisy dependency targets are
/// capped at `warn`.
#[track_caller]
pub fn initialize(
    log_level: cv_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = *log_level;
    let dependency_level = level_filter.min(log::LevelFilter::Warn);

    let base_dispatch = Dispatch::new()
        .level(level_filter)
        .level_for("hyper", dependency_level)
        .level_for("hyper_util", dependency_level)
        .level_for("reqwest", dependency_level)
        .level_for("sqlx", dependency_level);

    let dispatch = match (&log_file, colored) {
        (Some(log_path), _) => {
            let file = fern::log_file(log_path).map_err(|e| {
                ServerError::logger(format!(
                    "Failed to open log file {}: {}",
                    log_path.display(),
                    e
                ))
            })?;
            Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, record.level()))
                .chain(file)
        }
        (None, true) => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        // Plain output for non-TTY (systemd, docker logs)
        (None, false) => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(std::io::stdout()),
    };

    base_dispatch
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::logger(format!("Failed to initialize logger: {e}")))?;

    match log_file {
        Some(path) => info!(
            "Logger initialized: level={}, file={}",
            log_level,
            path.display()
        ),
        None => info!("Logger initialized: level={}, stdout", log_level),
    }

    Ok(())
}

fn write_line(
    out: FormatCallback<'_>,
    message: &fmt::Arguments<'_>,
    record: &Record<'_>,
    level: impl fmt::Display,
) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        level = level,
        message = message,
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
