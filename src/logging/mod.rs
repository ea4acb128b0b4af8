//! Logging infrastructure - structured tracing throughout the bridge
//!
//! Design: Uses `tracing` for structured, contextual logging with:
//! - Configurable log levels via environment
//! - Zero-cost when disabled
//! - Console output, optional JSON format, optional file appender

use once_cell::sync::OnceCell;
use std::io;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

pub use tracing::{debug, error, info, trace, warn};

/// Global logging state
static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default log level
    pub level: Level,
    /// Enable file logging
    pub file_output: bool,
    /// Log file path (if file_output enabled)
    pub log_path: Option<String>,
    /// Enable JSON format (vs human-readable)
    pub json_format: bool,
    /// Show span events (enter/exit)
    pub show_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file_output: false,
            log_path: None,
            json_format: false,
            show_spans: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // CALLBRIDGE_LOG_LEVEL: trace, debug, info, warn, error
        if let Ok(level_str) = std::env::var("CALLBRIDGE_LOG_LEVEL") {
            config.level = match level_str.to_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                _ => Level::INFO,
            };
        }

        // CALLBRIDGE_LOG_FILE: path to log file
        if let Ok(path) = std::env::var("CALLBRIDGE_LOG_FILE") {
            config.file_output = true;
            config.log_path = Some(path);
        }

        // CALLBRIDGE_LOG_JSON: enable JSON format
        config.json_format = std::env::var("CALLBRIDGE_LOG_JSON").is_ok();

        // CALLBRIDGE_LOG_SPANS: show span events
        config.show_spans = std::env::var("CALLBRIDGE_LOG_SPANS").is_ok();

        config
    }

    /// Benchmark config (errors only, nothing on the hot path)
    pub fn quiet() -> Self {
        Self {
            level: Level::ERROR,
            ..Self::default()
        }
    }
}

/// Initialize logging with default configuration
pub fn init() {
    init_with_config(LogConfig::from_env());
}

/// Initialize logging with custom configuration
pub fn init_with_config(config: LogConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "callbridge={}",
                config.level.as_str().to_lowercase()
            ))
        });

        let span_events = if config.show_spans {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let file_layer = match (&config.log_path, config.file_output) {
            (Some(path), true) => {
                let appender = tracing_appender::rolling::never(".", path.clone());
                Some(fmt::layer().with_ansi(false).with_writer(appender))
            }
            _ => None,
        };

        let console = fmt::layer()
            .with_writer(io::stdout)
            .with_span_events(span_events)
            .with_target(true);

        let console = if config.json_format {
            console.json().boxed()
        } else {
            console.boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .with(file_layer.map(|l| l.boxed()))
            .init();
    });
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

/// Log a native call crossing the boundary
#[inline]
pub fn log_native_call(function: &str, elements: usize) {
    debug!(
        event = "native_call",
        function = function,
        elements = elements,
        "Native function called"
    );
}

/// Log a marshalling failure before the native call
#[inline]
pub fn log_marshal_error(bridge: &str, error: &str) {
    debug!(
        event = "marshal_error",
        bridge = bridge,
        error = error,
        "Conversion aborted before native call"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.file_output);

        let quiet = LogConfig::quiet();
        assert_eq!(quiet.level, Level::ERROR);
    }

    #[test]
    fn test_init_idempotent() {
        init();
        init(); // Should not panic
        assert!(is_initialized());
    }
}
