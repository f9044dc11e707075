//! Error handling for zing

use thiserror::Error;

/// Custom error types for zing
#[derive(Error, Debug)]
pub enum AppError {
    /// Command-line usage errors (unknown flags, missing values)
    #[error("Usage error: {0}")]
    Usage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// DNS resolution errors
    #[error("DNS resolution error: {0}")]
    DnsResolution(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// I/O errors (writing output, closing sockets)
    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    /// Create a new usage error
    pub fn usage<S: Into<String>>(message: S) -> Self {
        Self::Usage(message.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new DNS resolution error
    pub fn dns_resolution<S: Into<String>>(message: S) -> Self {
        Self::DnsResolution(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Usage(_) => "USAGE",
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::DnsResolution(_) => "DNS",
            Self::Timeout(_) => "TIMEOUT",
            Self::Io(_) => "IO",
        }
    }

    /// The bare message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Usage(msg)
            | Self::Config(msg)
            | Self::Network(msg)
            | Self::DnsResolution(msg)
            | Self::Timeout(msg)
            | Self::Io(msg) => msg,
        }
    }

    /// Check if error only affects the current port (the run carries on)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::DnsResolution(_) | Self::Io(_) => true,
            Self::Usage(_) | Self::Config(_) => false,
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Config(_) => 1,
            Self::Network(_) | Self::DnsResolution(_) => 2,
            Self::Timeout(_) => 3,
            Self::Io(_) => 5,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Usage(_) | Self::Config(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) | Self::DnsResolution(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::TimedOut => Self::timeout(error.to_string()),
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::AddrNotAvailable => Self::network(error.to_string()),
            _ => Self::io(error.to_string()),
        }
    }
}

impl From<clap::Error> for AppError {
    fn from(error: clap::Error) -> Self {
        use clap::error::{ContextKind, ContextValue, ErrorKind};

        if error.kind() == ErrorKind::UnknownArgument {
            if let Some(ContextValue::String(arg)) = error.get(ContextKind::InvalidArg) {
                return Self::usage(format!("Error '{}' is invalid command-line parameter!", arg));
            }
        }

        let rendered = error.to_string();
        let first_line = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();

        Self::usage(format!("Error: {}", first_line))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;
