//! Structured logging for zing
//!
//! Standard output belongs to the probe report, so every log entry is written
//! to standard error. Entries carry structured fields (serialized with
//! serde_json) and the session id of the run. By default only errors are
//! shown; `-d` turns on debug tracing of resolution, connects and cycles.

use crate::error::AppError;
use crate::models::{PortRecord, ProbeConfig, RunSummary};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Level label padded and colored for a terminal
    fn colored_label(&self) -> String {
        let label = format!("{:>5}", self.as_str());
        match self {
            LogLevel::Trace => label.white().to_string(),
            LogLevel::Debug => label.cyan().to_string(),
            LogLevel::Info => label.green().to_string(),
            LogLevel::Warn => label.yellow().to_string(),
            LogLevel::Error => label.red().to_string(),
            LogLevel::Fatal => label.magenta().bold().to_string(),
        }
    }
}

/// One structured log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Component that produced the entry
    pub logger: String,
    /// Structured fields, sorted by key so output is stable
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Context shared by every logger of a run
#[derive(Debug, Default)]
struct LogContext {
    session_id: Option<String>,
}

/// Logger writing formatted entries to standard error
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    name: String,
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a logger that only shows errors
    pub fn new(name: &str) -> Self {
        Self {
            min_level: LogLevel::Error,
            use_color: false,
            name: name.to_string(),
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Create a logger following the run configuration
    pub fn with_config(name: &str, config: &ProbeConfig) -> Self {
        let mut logger = Self::new(name);
        if config.debug {
            logger.min_level = LogLevel::Debug;
        }
        logger.use_color = config.enable_color;
        logger
    }

    /// Set session correlation ID
    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    async fn write_entry(&self, mut entry: LogEntry) {
        if !self.would_log(entry.level) {
            return;
        }

        if let Some(session_id) = &self.context.read().await.session_id {
            entry.fields.insert(
                "session_id".to_string(),
                serde_json::Value::String(session_id.clone()),
            );
        }

        let line = self.render(&entry);
        // A closed stderr is not worth failing the probe run over
        let _ = writeln!(io::stderr(), "{}", line);
    }

    /// Lay out an entry as one console line
    pub fn render(&self, entry: &LogEntry) -> String {
        let level = if self.use_color {
            entry.level.colored_label()
        } else {
            format!("{:>5}", entry.level.as_str())
        };

        let mut output = format!(
            "{} {} [{}] {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            entry.logger,
            entry.message
        );

        if !entry.fields.is_empty() {
            let fields: Vec<String> = entry
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        output
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                fields: BTreeMap::new(),
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error", error.message())
            .field("error_category", error.category())
            .field("error_recoverable", error.is_recoverable())
    }

    /// The entry as built so far
    pub fn entry(&self) -> &LogEntry {
        &self.entry
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Logger for the events of a probe run
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    /// Create a probe logger from the run configuration
    pub fn new(config: &ProbeConfig) -> Self {
        Self {
            logger: Logger::with_config("PROBE", config),
        }
    }

    /// Wrap an existing logger
    pub fn from_logger(logger: Logger) -> Self {
        Self { logger }
    }

    /// Run parameters, logged once before the first port
    pub async fn log_run_start(&self, config: &ProbeConfig) {
        self.logger
            .debug(&format!("Starting zing run against {}", config.host_name))
            .field("host", &config.host_name)
            .field("ports", &config.ports)
            .field("cycles", config.cycles)
            .field("ops_per_cycle", config.ops_per_cycle)
            .field("timeout_ms", config.timeout_ms)
            .field("family", config.address_family.label())
            .log()
            .await;
    }

    /// Outcome of resolving one `host:port`
    pub async fn log_resolution(&self, host: &str, port: &str, outcome: std::result::Result<&str, &AppError>) {
        match outcome {
            Ok(address) => {
                self.logger
                    .debug(&format!("Resolved {}:{} to {}", host, port, address))
                    .field("host", host)
                    .field("port", port)
                    .field("address", address)
                    .log()
                    .await;
            }
            Err(error) => {
                self.logger
                    .warn(&format!("Resolution of {}:{} failed, dialing anyway", host, port))
                    .field("host", host)
                    .field("port", port)
                    .error_info(error)
                    .log()
                    .await;
            }
        }
    }

    /// One connect attempt
    pub async fn log_connection(&self, target: &str, cycle: u32, op: u32, elapsed_ms: f64, error: Option<&AppError>) {
        let mut builder = match error {
            None => self.logger.debug(&format!("Connected to {} in {:.3} ms", target, elapsed_ms)),
            Some(_) => self.logger.debug(&format!("Connect to {} failed", target)),
        }
        .field("target", target)
        .field("cycle", cycle)
        .field("op", op)
        .field("elapsed_ms", elapsed_ms);

        if let Some(error) = error {
            builder = builder.error_info(error);
        }

        builder.log().await;
    }

    /// A completed cycle and its normalized mean
    pub async fn log_cycle(&self, port: &str, cycle: u32, total_ms: f64, mean_ms: f64) {
        self.logger
            .debug(&format!("Cycle {} on port {} complete", cycle, port))
            .field("port", port)
            .field("cycle", cycle)
            .field("total_ms", total_ms)
            .field("cycle_mean_ms", mean_ms)
            .log()
            .await;
    }

    /// End of one port pass
    pub async fn log_port_finished(&self, record: &PortRecord) {
        let message = if record.aborted {
            format!("Port {} aborted after {} cycles", record.port, record.completed_cycles)
        } else {
            format!("Port {} finished {} cycles", record.port, record.completed_cycles)
        };

        self.logger
            .debug(&message)
            .field("port", &record.port)
            .field("completed_cycles", record.completed_cycles)
            .field("aborted", record.aborted)
            .field("elapsed_ms", record.elapsed_ms)
            .field("cycle_means", &record.cycle_means)
            .log()
            .await;
    }

    /// Final statistics
    pub async fn log_summary(&self, summary: &RunSummary) {
        self.logger
            .debug("Run summary computed")
            .field("summary", summary)
            .log()
            .await;
    }

    /// An error that ends the run
    pub async fn log_error(&self, error: &AppError, context: &str) {
        self.logger
            .error(&format!("{}: {}", context, error))
            .error_info(error)
            .log()
            .await;
    }
}

/// Creates loggers sharing one session id
pub struct LoggerFactory {
    config: ProbeConfig,
    session_id: String,
}

impl LoggerFactory {
    /// Create a new logger factory
    pub fn new(config: &ProbeConfig) -> Self {
        Self {
            config: config.clone(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with a specific name
    pub async fn create_logger(&self, name: &str) -> Logger {
        let logger = Logger::with_config(name, &self.config);
        logger.set_session_id(self.session_id.clone()).await;
        logger
    }

    /// Create the probe event logger
    pub async fn create_probe_logger(&self) -> ProbeLogger {
        ProbeLogger::from_logger(self.create_logger("PROBE").await)
    }

    /// Get session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_default_level_follows_debug_flag() {
        let quiet = Logger::with_config("TEST", &ProbeConfig::default());
        assert!(quiet.would_log(LogLevel::Error));
        assert!(!quiet.would_log(LogLevel::Warn));
        assert!(!quiet.would_log(LogLevel::Debug));

        let config = ProbeConfig { debug: true, ..Default::default() };
        let verbose = Logger::with_config("TEST", &config);
        assert!(verbose.would_log(LogLevel::Debug));
        assert!(!verbose.would_log(LogLevel::Trace));
    }

    #[test]
    fn test_console_rendering() {
        let logger = Logger::new("PROBE");
        let builder = logger
            .warn("Connected")
            .field("port", "443")
            .field("elapsed_ms", 1.5);

        let line = logger.render(builder.entry());
        assert!(line.contains(" WARN [PROBE] Connected"));
        assert!(line.ends_with("{elapsed_ms=1.5, port=\"443\"}"));
    }

    #[test]
    fn test_error_entry_fields() {
        let logger = Logger::new("PROBE");
        let builder = logger.error("Run failed").error_info(&AppError::io("stdout closed"));

        let fields = &builder.entry().fields;
        assert_eq!(fields["error_category"], "IO");
        assert_eq!(fields["error"], "stdout closed");
        assert_eq!(fields["error_recoverable"], true);
        assert!(logger.render(builder.entry()).contains("ERROR [PROBE] Run failed"));
    }

    #[tokio::test]
    async fn test_factory_shares_session_id() {
        let factory = LoggerFactory::new(&ProbeConfig::default());
        assert_eq!(factory.session_id().len(), 36);

        let logger = factory.create_logger("TEST").await;
        let context = logger.context.read().await;
        assert_eq!(context.session_id.as_deref(), Some(factory.session_id()));
    }

    #[tokio::test]
    async fn test_filtered_entries_are_dropped() {
        let logger = ProbeLogger::new(&ProbeConfig::default());
        // Below the minimum level: nothing is written, nothing fails
        logger.log_cycle("80", 1, 4.0, 1.0).await;
        logger.log_resolution("localhost", "80", Ok("127.0.0.1")).await;
    }
}
