//! Compile log format module
//!
//! Supports multiple log formats:
//! - `text` (one human-readable line per compilation)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;
use serde_json::json;

/// Outcome of one compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStatus {
    Ok,
    Failed,
}

impl CompileStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Failed => "FAILED",
        }
    }
}

/// Compile log entry describing one input file
#[derive(Debug, Clone)]
pub struct CompileLogEntry {
    /// Entry timestamp
    pub time: chrono::DateTime<Local>,
    /// Input file path
    pub input: String,
    /// Output file path, when one was written
    pub output: Option<String>,
    pub status: CompileStatus,
    /// Source size in bytes
    pub input_bytes: usize,
    /// Compiled size in bytes
    pub output_bytes: usize,
    /// Compilation time in microseconds
    pub duration_us: u64,
    /// Failure message
    pub error: Option<String>,
}

impl CompileLogEntry {
    /// Create a new successful entry with current timestamp
    pub fn new(input: String) -> Self {
        Self {
            time: Local::now(),
            input,
            output: None,
            status: CompileStatus::Ok,
            input_bytes: 0,
            output_bytes: 0,
            duration_us: 0,
            error: None,
        }
    }

    /// Mark the entry as failed with `message`
    #[must_use]
    pub fn failed(mut self, message: impl Into<String>) -> Self {
        self.status = CompileStatus::Failed;
        self.error = Some(message.into());
        self
    }

    /// Format log entry according to specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "text" => self.format_text(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// `[$time_local] $status $input -> $output ($bytes_in -> $bytes_out bytes, $duration)`
    fn format_text(&self) -> String {
        let time = self.time.format("%d/%b/%Y:%H:%M:%S %z");
        match self.status {
            CompileStatus::Ok => format!(
                "[{time}] {} {} -> {} ({} -> {} bytes, {})",
                self.status.as_str(),
                self.input,
                self.output.as_deref().unwrap_or("-"),
                self.input_bytes,
                self.output_bytes,
                self.duration_text(),
            ),
            CompileStatus::Failed => format!(
                "[{time}] {} {} ({}): {}",
                self.status.as_str(),
                self.input,
                self.duration_text(),
                self.error.as_deref().unwrap_or("unknown error"),
            ),
        }
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        json!({
            "time": self.time.to_rfc3339(),
            "input": self.input,
            "output": self.output,
            "status": self.status.as_str(),
            "input_bytes": self.input_bytes,
            "output_bytes": self.output_bytes,
            "duration_us": self.duration_us,
            "error": self.error,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$time_local` - Local time
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$input` / `$output` - File paths (`-` when missing)
    /// - `$status` - `OK` or `FAILED`
    /// - `$bytes_in` / `$bytes_out` - Sizes in bytes
    /// - `$duration` - Compilation time in milliseconds (3 decimal places)
    /// - `$error` - Failure message (`-` when none)
    fn format_custom(&self, pattern: &str) -> String {
        let mut result = pattern.to_string();
        result = result.replace(
            "$time_local",
            &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
        );
        result = result.replace("$time_iso8601", &self.time.to_rfc3339());
        result = result.replace("$input", &self.input);
        result = result.replace("$output", self.output.as_deref().unwrap_or("-"));
        result = result.replace("$status", self.status.as_str());
        result = result.replace("$bytes_in", &self.input_bytes.to_string());
        result = result.replace("$bytes_out", &self.output_bytes.to_string());
        result = result.replace("$duration", &self.duration_text());
        result = result.replace("$error", self.error.as_deref().unwrap_or("-"));
        result
    }

    fn duration_text(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let millis = self.duration_us as f64 / 1000.0;
        format!("{millis:.3}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> CompileLogEntry {
        let mut entry = CompileLogEntry::new("styles/main.scss".to_string());
        entry.output = Some("dist/main.css".to_string());
        entry.input_bytes = 512;
        entry.output_bytes = 1234;
        entry.duration_us = 1500;
        entry
    }

    #[test]
    fn test_format_text() {
        let log = create_test_entry().format("text");
        assert!(log.contains("OK styles/main.scss -> dist/main.css"));
        assert!(log.contains("(512 -> 1234 bytes, 1.500ms)"));
    }

    #[test]
    fn test_format_text_failed() {
        let log = create_test_entry()
            .failed("Undefined variable: \"$x\".")
            .format("text");
        assert!(log.contains("FAILED styles/main.scss (1.500ms): Undefined variable: \"$x\"."));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["input"], "styles/main.scss");
        assert_eq!(value["output"], "dist/main.css");
        assert_eq!(value["status"], "OK");
        assert_eq!(value["output_bytes"], 1234);
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_format_json_escapes_messages() {
        let log = create_test_entry().failed("line 1\n\"quoted\"").format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["error"], "line 1\n\"quoted\"");
        assert_eq!(value["status"], "FAILED");
    }

    #[test]
    fn test_format_custom() {
        let log = create_test_entry().format("$status $input $bytes_out $duration $error");
        assert_eq!(log, "OK styles/main.scss 1234 1.500ms -");
    }
}
