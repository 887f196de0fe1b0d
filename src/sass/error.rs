// Error types for script evaluation and SCSS processing

use std::io;
use thiserror::Error;

/// Failure reported by an [`Evaluator`](super::Evaluator)
#[derive(Debug, Error)]
pub enum EvalError {
    /// The script ran but the runtime rejected it (syntax error, missing
    /// gem, Sass error, ...)
    #[error("{0}")]
    Script(String),

    /// The runtime could not be reached at all
    #[error("failed to run `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Compilation failure surfaced to callers of
/// [`ScriptBridge::transform`](super::ScriptBridge::transform)
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProcessingError {
    message: String,
    #[source]
    source: EvalError,
}

impl ProcessingError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn cause(&self) -> &EvalError {
        &self.source
    }

    pub fn into_cause(self) -> EvalError {
        self.source
    }
}

impl From<EvalError> for ProcessingError {
    fn from(source: EvalError) -> Self {
        Self {
            message: source.to_string(),
            source,
        }
    }
}
