//! Error types for txmon-monitor.

use thiserror::Error;

/// Errors raised while loading configuration or assembling a report section.
///
/// None of these ever escape [`TransactionMonitor::report`](crate::TransactionMonitor::report);
/// section errors are rendered as a one-line diagnostic instead.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A report section could not be assembled.
    #[error("{section} section failed: {reason}")]
    SectionFailed {
        section: &'static str,
        reason: String,
    },
}

/// Result type for monitor operations.
pub type MonitorResult<T> = Result<T, MonitorError>;
