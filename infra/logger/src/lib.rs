//! # Logger
//!
//! One place to install the global `tracing` subscriber for the studio tools.
//! Console output goes to stderr so command output on stdout stays machine readable;
//! an optional daily-rotated file layer can be added with [`LoggerBuilder::path`].
//!
//! Filtering starts from [`LoggerBuilder::level`] and is refined by `RUST_LOG` or an
//! explicit [`LoggerBuilder::env_filter`] directive such as `"atria_schema=debug"`.
//!
//! ## Example
//!
//! ```rust
//! # use atria_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("atria-studio")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// Output style of the console layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug)]
struct LoggerConfig {
    console: Option<ConsoleFormat>,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json_files: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: Some(ConsoleFormat::Compact),
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json_files: false,
            env_filter: None,
        }
    }
}

/// Builder state before a name was given.
#[derive(Debug)]
pub struct Unnamed;

/// Builder state after [`LoggerBuilder::name`].
#[derive(Debug)]
pub struct Named(String);

mod private {
    pub trait Sealed {}
    impl Sealed for super::Unnamed {}
    impl Sealed for super::Named {}
}

/// Configures and installs the global subscriber. Only a named builder can be initialised.
#[derive(Debug)]
#[must_use = "The builder must be configured before it can be used to initialize the logger."]
pub struct LoggerBuilder<N: private::Sealed = Unnamed> {
    config: LoggerConfig,
    name: N,
}

impl<N: private::Sealed> LoggerBuilder<N> {
    /// Minimum level emitted when neither `RUST_LOG` nor an env filter says otherwise.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Maps a CLI verbosity count (`-v`, `-vv`, ...) onto a level, starting at `WARN`.
    pub const fn verbosity(self, count: u8) -> Self {
        let level = match count {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        self.level(level)
    }

    /// Programmatic filter directives, e.g. `atria_schema=debug,config=warn`.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Console output format, or `None` to disable the console layer.
    pub const fn console(mut self, format: Option<ConsoleFormat>) -> Self {
        self.config.console = format;
        self
    }

    /// Directory for daily-rotated log files named after the logger.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Writes file logs as JSON lines.
    pub const fn json_files(mut self) -> Self {
        self.config.json_files = true;
        self
    }
}

impl LoggerBuilder<Unnamed> {
    /// Names the logger; the name prefixes rolling log files (`atria-studio.2026-10-14.log`).
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder { config: self.config, name: Named(name.into()) }
    }
}

impl LoggerBuilder<Named> {
    /// Installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the file writer guard and must stay alive until shutdown.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    ///   an unparsable filter or when no layer is enabled.
    /// * [`LoggerError::Appender`] / [`LoggerError::Internal`] when the log directory fails.
    /// * [`LoggerError::Subscriber`] if a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { config, name: Named(name) } = self;
        validate(&config, &name)?;

        let filter = env_filter(&config)?;
        let mut layers = Vec::new();

        if let Some(format) = config.console {
            let console = fmt::layer().with_writer(std::io::stderr).with_target(true);
            layers.push(match format {
                ConsoleFormat::Compact => console.compact().boxed(),
                ConsoleFormat::Pretty => console.pretty().boxed(),
                ConsoleFormat::Json => console.json().boxed(),
            });
        }

        let guard = match &config.path {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Failed to create log directory {}", dir.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(config.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(config.max_files)
                    .build(dir)
                    .context("Building rolling file appender")?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = fmt::layer().with_writer(writer).with_ansi(false);
                layers.push(if config.json_files { file.json().boxed() } else { file.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "no output enabled, configure a console format or a log directory".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, "Logging initialised");

        Ok(Logger { guard })
    }
}

/// Handle to the installed logging system.
#[must_use = "Dropping this handle stops the background file writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a new [`LoggerBuilder`] with console output at `INFO`.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: Unnamed }
    }

    /// The file writer guard, present only when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}

fn validate(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "logger name cannot be empty".into(),
            context: None,
        });
    }
    if config.path.is_some() && config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }
    Ok(())
}

fn env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    match &config.env_filter {
        Some(directives) => builder.parse(directives).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("invalid filter '{directives}': {e}").into(),
                context: None,
            }
        }),
        None => Ok(builder.from_env_lossy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn builder_defaults() {
        let builder = Logger::builder().name("studio-test");
        assert_eq!(builder.config.console, Some(ConsoleFormat::Compact));
        assert_eq!(builder.config.level, LevelFilter::INFO);
        assert!(builder.config.path.is_none());
        assert_eq!(builder.config.max_files, DEFAULT_MAX_FILES);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(Logger::builder().verbosity(0).config.level, LevelFilter::WARN);
        assert_eq!(Logger::builder().verbosity(1).config.level, LevelFilter::INFO);
        assert_eq!(Logger::builder().verbosity(2).config.level, LevelFilter::DEBUG);
        assert_eq!(Logger::builder().verbosity(9).config.level, LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn empty_name_is_rejected() {
        let err = Logger::builder().name("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn no_layers_is_rejected() {
        let err = Logger::builder().name("studio-test").console(None).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn bad_filter_is_rejected() {
        let err = Logger::builder().name("studio-test").env_filter("atria_schema=loud").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
