use std::{
    fmt::{Debug, Display},
    io::{self, Write},
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use service_container::{Container, Provider, SlotError};
use tracing::{dispatcher, Dispatch, Span};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;

use crate::errors::{ParseLogFormatError, ProviderError};

pub const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Text;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Format of log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogFormat {
    /// Human readable, one line per record
    Text,
    /// One JSON object per record
    Json,
}
impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}
impl Default for LogFormat {
    fn default() -> Self {
        DEFAULT_LOG_FORMAT
    }
}
impl Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ParseLogFormatError(other.to_string())),
        }
    }
}

/// Logger configuration
pub struct LoggerOptions {
    format: LogFormat,
    level: LevelFilter,
    env: Option<String>,
    output: Option<Box<dyn Write + Send>>,
}
impl Debug for LoggerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("format", &self.format)
            .field("level", &self.level)
            .field("env", &self.env)
            .field("output", &if self.output.is_some() { "custom" } else { "stdout" })
            .finish()
    }
}
impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT,
            level: DEFAULT_LOG_LEVEL,
            env: None,
            output: None,
        }
    }
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: impl Into<LevelFilter>) -> Self {
        self.level = level.into();
        self
    }

    /// Deployment environment, attached to every record through the root `app` span
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Sets the log output, default is stdout
    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }
}

/// Application logger
///
/// Records are formatted on the calling thread and written by a background worker.
/// Cheap to clone, all clones share the same worker.
#[derive(Clone)]
pub struct Logger(Arc<LoggerInner>);
struct LoggerInner {
    dispatch: Dispatch,
    span: Span,
    format: LogFormat,
    guard: Mutex<Option<WorkerGuard>>,
}
impl Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("format", &self.0.format)
            .field("synced", &self.is_synced())
            .finish()
    }
}

impl Logger {
    pub fn new(options: LoggerOptions) -> Self {
        let LoggerOptions {
            format,
            level,
            env,
            output,
        } = options;

        let output = output.unwrap_or_else(|| Box::new(io::stdout()));
        let (writer, guard) = tracing_appender::non_blocking(output);

        let builder = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(level)
            .with_ansi(false);

        let dispatch = match format {
            LogFormat::Json => Dispatch::new(builder.json().finish()),
            LogFormat::Text => Dispatch::new(builder.finish()),
        };

        // Highest level, so the span passes every enabled filter
        let span = match env {
            Some(env) => {
                dispatcher::with_default(&dispatch, || tracing::error_span!("app", env = %env))
            }
            None => Span::none(),
        };

        Logger(Arc::new(LoggerInner {
            dispatch,
            span,
            format,
            guard: Mutex::new(Some(guard)),
        }))
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.0.dispatch
    }

    /// Root span carrying the logger's fields
    pub fn span(&self) -> &Span {
        &self.0.span
    }

    pub fn format(&self) -> LogFormat {
        self.0.format
    }

    /// Runs `f` with this logger as the current subscriber
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.0.dispatch, || self.0.span.in_scope(f))
    }

    /// Installs this logger as the process wide subscriber
    pub fn install_global(&self) -> Result<(), dispatcher::SetGlobalDefaultError> {
        dispatcher::set_global_default(self.0.dispatch.clone())
    }

    /// Flushes buffered records and stops the background worker
    ///
    /// Records logged afterwards are dropped. Calling it again does nothing.
    pub fn sync(&self) {
        if let Some(guard) = self.lock_guard().take() {
            drop(guard);
        }
    }

    pub fn is_synced(&self) -> bool {
        self.lock_guard().is_none()
    }

    fn lock_guard(&self) -> MutexGuard<'_, Option<WorkerGuard>> {
        self.0.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A container which provides a [Logger]
pub trait LoggerAwareContainer: Container {
    fn set_logger(&self, logger: Logger) -> Result<(), SlotError>;
    fn logger(&self) -> Result<Logger, SlotError>;
}

/// Returns a pre-configured [Logger] provider
///
/// The logger is flushed when the container shuts down.
pub fn logger<C: LoggerAwareContainer>(cnt: Arc<C>, options: LoggerOptions) -> Provider {
    Provider::new(move || async move {
        let logger = Logger::new(options);
        cnt.set_logger(logger.clone())?;

        cnt.register_on_shutdown(move || async move {
            tracing::debug!("Flushing logger");
            logger.sync();
        });
        Ok::<_, ProviderError>(())
    })
}
