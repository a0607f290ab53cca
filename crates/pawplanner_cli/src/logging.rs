//! Stderr logging for the CLI. Silent unless `PAWPLANNER_LOG` names a level.

use flexi_logger::{Logger, LoggerHandle};
use pawplanner_core::error::AppError;

const LOG_ENV_VAR: &str = "PAWPLANNER_LOG";
const DEFAULT_LEVEL: &str = "off";

/// The returned handle must stay alive for as long as logs should be written.
pub fn init_logging() -> Result<LoggerHandle, AppError> {
    let raw = std::env::var(LOG_ENV_VAR).unwrap_or_default();
    let level = normalize_level(&raw)?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| AppError::invalid_input(format!("invalid log level `{level}`: {err}")))?
        .log_to_stderr()
        .start()
        .map_err(|err| AppError::io(format!("failed to start logger: {err}")))?;

    log::info!(
        "event=app_start module=cli status=ok platform={} version={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, AppError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "" => Ok(DEFAULT_LEVEL),
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(AppError::invalid_input(format!(
            "unsupported log level `{other}`; expected off|trace|debug|info|warn|error"
        ))),
    }
}
