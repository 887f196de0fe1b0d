// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub sass: SassConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Sass engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SassConfig {
    /// Interpreter the generated Ruby script is piped into
    pub interpreter: String,
    /// Extra interpreter arguments (e.g. `["-E", "UTF-8"]`)
    #[serde(default)]
    pub interpreter_args: Vec<String>,
    /// Requires loaded after the built-in ones (e.g. `bourbon`)
    #[serde(default)]
    pub requires: Vec<String>,
    /// Directories searched by `@import`
    #[serde(default)]
    pub load_paths: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level: debug, info, warn or error
    pub level: String,
    /// Compile log format (text, json, or custom pattern)
    pub format: String,
    /// Info log file path (optional, stdout if not set)
    #[serde(default)]
    pub log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Extension of compiled files, without the dot
    pub extension: String,
    /// Directory for compiled files (next to the input if not set)
    #[serde(default)]
    pub directory: Option<String>,
    /// Drop blank lines from compiled output
    pub strip_empty_lines: bool,
}

impl OutputConfig {
    /// Where the compiled form of `input` is written
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let file_name = input.with_extension(&self.extension);
        match &self.directory {
            Some(dir) => match file_name.file_name() {
                Some(name) => Path::new(dir).join(name),
                None => file_name,
            },
            None => file_name,
        }
    }

    /// Output path for each input, in input order
    ///
    /// A target is refused when it is an input itself, or when an earlier
    /// input already writes to it.
    pub fn plan_outputs(&self, inputs: &[PathBuf]) -> Vec<Result<PathBuf, OutputConflict>> {
        let sources: HashSet<&Path> = inputs.iter().map(PathBuf::as_path).collect();
        let mut claimed: HashSet<PathBuf> = HashSet::new();
        inputs
            .iter()
            .map(|input| {
                let target = self.output_path_for(input);
                if target == *input {
                    Err(OutputConflict::SameAsInput(target))
                } else if sources.contains(target.as_path()) {
                    Err(OutputConflict::OverwritesInput(target))
                } else if !claimed.insert(target.clone()) {
                    Err(OutputConflict::AlreadyClaimed(target))
                } else {
                    Ok(target)
                }
            })
            .collect()
    }
}

/// Why an input was given no output path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputConflict {
    #[error("Output {} would overwrite its own input", .0.display())]
    SameAsInput(PathBuf),
    #[error("Output {} would overwrite another input", .0.display())]
    OverwritesInput(PathBuf),
    #[error("Output {} is already written by another input", .0.display())]
    AlreadyClaimed(PathBuf),
}

/// Runtime configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RuntimeConfig {
    /// Worker threads for the Tokio runtime (CPU cores if not set)
    #[serde(default)]
    pub workers: Option<usize>,
}
