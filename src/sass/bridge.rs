//! SCSS compilation bridge
//!
//! [`ScriptBridge`] owns the require list and load paths, builds the Ruby
//! program for each input and runs it through its [`Evaluator`]. The
//! evaluator is not reentrant, so compilations are serialized per bridge.

use std::sync::{Mutex, PoisonError, RwLock};

use super::error::ProcessingError;
use super::evaluator::{CommandEvaluator, Evaluator};
use super::ordered_set::OrderedSet;
use super::script;
use crate::logger;

/// Requires loaded ahead of any user-supplied ones, in this order
pub const DEFAULT_REQUIRES: [&str; 3] = ["rubygems", "sass/plugin", "sass/engine"];

/// Compiles SCSS into CSS through a Ruby Sass engine
///
/// Configuration (`add_require`, `add_load_path`) and `transform` all take
/// `&self`, so one bridge can be shared behind an `Arc`.
pub struct ScriptBridge<E = CommandEvaluator> {
    /// Held for the whole build-and-evaluate sequence
    evaluator: Mutex<E>,
    requires: RwLock<OrderedSet>,
    load_paths: RwLock<OrderedSet>,
}

impl<E: Evaluator> ScriptBridge<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator: Mutex::new(evaluator),
            requires: RwLock::new(DEFAULT_REQUIRES.into_iter().collect()),
            load_paths: RwLock::new(OrderedSet::new()),
        }
    }

    /// Add a Ruby require, e.g. `bourbon`
    ///
    /// Blank or missing names are ignored; adding the same name twice is a no-op.
    pub fn add_require<'a>(&self, name: impl Into<Option<&'a str>>) {
        if let Some(name) = name.into() {
            if self.requires.write().unwrap_or_else(PoisonError::into_inner).insert(name) {
                logger::log_debug(&format!("[Sass] Added require: {}", name.trim()));
            }
        }
    }

    /// Add a filesystem location for resolving `@import`
    ///
    /// Same rules as [`add_require`](Self::add_require).
    pub fn add_load_path<'a>(&self, path: impl Into<Option<&'a str>>) {
        if let Some(path) = path.into() {
            if self.load_paths.write().unwrap_or_else(PoisonError::into_inner).insert(path) {
                logger::log_debug(&format!("[Sass] Added load path: {}", path.trim()));
            }
        }
    }

    /// Current requires, defaults first
    pub fn requires(&self) -> Vec<String> {
        self.requires.read().unwrap_or_else(PoisonError::into_inner).to_vec()
    }

    pub fn load_paths(&self) -> Vec<String> {
        self.load_paths.read().unwrap_or_else(PoisonError::into_inner).to_vec()
    }

    /// Generate the Ruby program for `content` from the current configuration
    pub fn build_script(&self, content: &str) -> String {
        let requires = self.requires.read().unwrap_or_else(PoisonError::into_inner);
        let load_paths = self.load_paths.read().unwrap_or_else(PoisonError::into_inner);
        script::build_script(content, &requires, &load_paths)
    }

    /// Compile SCSS into CSS
    ///
    /// Missing or empty input returns an empty string without touching the
    /// evaluator. Otherwise exactly one evaluation is attempted; its failure
    /// is returned as [`ProcessingError`]. Concurrent callers block until the
    /// running compilation finishes.
    pub fn transform<'a>(
        &self,
        content: impl Into<Option<&'a str>>,
    ) -> Result<String, ProcessingError> {
        let content = match content.into() {
            Some(content) if !content.is_empty() => content,
            _ => return Ok(String::new()),
        };

        let mut evaluator = self.evaluator.lock().unwrap_or_else(|poisoned| {
            logger::log_warning("[Sass] Evaluator lock poisoned by a panicked compilation, reusing it");
            poisoned.into_inner()
        });
        let script = self.build_script(content);
        if logger::debug_enabled() {
            logger::log_debug(&format!("[Sass] Generated script:\n{script}"));
        }

        match evaluator.eval(&script) {
            Ok(css) => Ok(css),
            Err(e) => {
                let err = ProcessingError::from(e);
                logger::log_error(&format!("[Sass] Compilation failed: {}", err.message()));
                Err(err)
            }
        }
    }

    /// Consume the bridge and return its evaluator
    pub fn into_evaluator(self) -> E {
        self.evaluator.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ScriptBridge<CommandEvaluator> {
    fn default() -> Self {
        Self::new(CommandEvaluator::default())
    }
}
