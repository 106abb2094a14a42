//! Battle logger
//!
//! Log lines are either printed or captured in memory. Capturing lets tests
//! compare two runs line by line without scraping stdout.

use crate::game::VerbosityLevel;
use serde::{Deserialize, Serialize};

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct BattleLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    log_buffer: Vec<LogEntry>,
}

impl BattleLogger {
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        BattleLogger {
            verbosity,
            ..Self::default()
        }
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
    }

    /// Would a message at `level` go anywhere?
    ///
    /// Callers check this before formatting to keep silent runs allocation-free.
    #[inline]
    pub fn is_enabled(&self, level: VerbosityLevel) -> bool {
        level != VerbosityLevel::Silent && (self.is_capturing() || level <= self.verbosity)
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.log_buffer
    }

    /// Captured messages only, for line-by-line comparisons
    pub fn messages(&self) -> Vec<String> {
        self.log_buffer.iter().map(|e| e.message.clone()).collect()
    }

    pub fn log(&mut self, level: VerbosityLevel, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        match self.output_mode {
            OutputMode::Memory => self.log_buffer.push(LogEntry {
                level,
                message: message.to_string(),
            }),
            OutputMode::Stdout => Self::log_to_stdout(level, message),
        }
    }

    #[inline]
    fn log_to_stdout(level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{message}");
        } else {
            println!("  {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_all_levels() {
        let mut logger = BattleLogger::with_verbosity(VerbosityLevel::Minimal);
        logger.enable_capture();

        logger.log(VerbosityLevel::Minimal, "battle over");
        logger.log(VerbosityLevel::Normal, "turn 1");
        logger.log(VerbosityLevel::Verbose, "drew 5 cards");

        assert_eq!(logger.logs().len(), 3);
        assert_eq!(logger.logs()[1].level, VerbosityLevel::Normal);
        assert_eq!(logger.messages()[2], "drew 5 cards");
    }

    #[test]
    fn test_silent_stdout_logger_is_disabled() {
        let mut logger = BattleLogger::with_verbosity(VerbosityLevel::Silent);
        assert!(!logger.is_enabled(VerbosityLevel::Minimal));
        assert!(!logger.is_enabled(VerbosityLevel::Verbose));

        logger.log(VerbosityLevel::Normal, "nobody hears this");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_capture_ignores_verbosity_gate() {
        let mut logger = BattleLogger::with_verbosity(VerbosityLevel::Minimal);
        assert!(!logger.is_enabled(VerbosityLevel::Verbose));

        logger.enable_capture();
        assert!(logger.is_capturing());
        assert!(logger.is_enabled(VerbosityLevel::Verbose));
        assert!(!logger.is_enabled(VerbosityLevel::Silent));
    }

    #[test]
    fn test_verbosity_gates_stdout() {
        let logger = BattleLogger::with_verbosity(VerbosityLevel::Normal);
        assert!(logger.is_enabled(VerbosityLevel::Minimal));
        assert!(logger.is_enabled(VerbosityLevel::Normal));
        assert!(!logger.is_enabled(VerbosityLevel::Verbose));
        assert!(!logger.is_capturing());
    }
}
