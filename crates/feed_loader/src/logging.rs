use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Tags every line with a chain of prefixes such as `[loader] [api]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: Vec<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect()
    }

    pub fn format(&self, message: &str) -> String {
        format!("{}{}", self.prefix(), message)
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.format(message));
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", self.format(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.format(message));
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", self.format(message));
    }
}

/// Installs the fmt subscriber once, writing to stderr so stdout stays
/// free for rendered output.
pub fn init_logging(level: Level) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        });
    }
    Logger::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_stack() {
        let logger = Logger::new().with_prefix("[loader]").with_prefix("[api]");
        assert_eq!(logger.format("timed out"), "[loader] [api] timed out");
        assert_eq!(Logger::new().format("plain"), "plain");
    }
}
