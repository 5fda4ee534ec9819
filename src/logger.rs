use log::{debug, error, info, warn};

/// Severity filter for the default logger, ordered `Error < Warn < Info <
/// Debug`: a logger at `Info` emits everything up to and including info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

/// Pluggable logging sink for the server core. Messages arrive pre-formatted;
/// implementations decide where they go. The core tolerates running without
/// one (every logger slot is an `Option`).
pub trait FtpLogger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink: forwards to the `log` crate macros, filtered by level.
pub struct StdFtpLogger {
    level: LogLevel,
}

impl StdFtpLogger {
    pub fn new() -> Self {
        Self::with_level(LogLevel::Info)
    }

    pub fn with_level(level: LogLevel) -> Self {
        StdFtpLogger { level }
    }
}

impl Default for StdFtpLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl FtpLogger for StdFtpLogger {
    fn debug(&self, message: &str) {
        if self.level >= LogLevel::Debug {
            debug!("{}", message);
        }
    }

    fn info(&self, message: &str) {
        if self.level >= LogLevel::Info {
            info!("{}", message);
        }
    }

    fn warn(&self, message: &str) {
        if self.level >= LogLevel::Warn {
            warn!("{}", message);
        }
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_from_error_to_debug() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }
}
