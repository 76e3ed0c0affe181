use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub namespace: Option<String>,
    pub message: String,
}

/// Keeps every line in memory so tests can assert on what was logged.
/// Loggers derived through `with_namespace` share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.level == LogLevel::Error)
            .map(|line| line.message)
            .collect()
    }

    fn push(
        &self,
        level: LogLevel,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| "fake logger buffer poisoned")?;
        lines.push(LogLine {
            level,
            namespace: self.namespace.clone(),
            message: message.to_string(),
        });
        Ok(())
    }
}

impl Logger for LoggerFake {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push(LogLevel::Info, message)
    }

    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push(LogLevel::Error, message)
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerFake {
            namespace: Some(new_namespace),
            lines: Arc::clone(&self.lines),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_loggers_share_buffer() {
        let logger = LoggerFake::new();
        let child = logger.with_namespace("engine").with_namespace("fake");

        child.info("hello").unwrap();
        child.error("boom").unwrap();

        let lines = logger.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].namespace.as_deref(), Some("engine:fake"));
        assert_eq!(logger.errors(), vec!["boom".to_string()]);
    }
}
