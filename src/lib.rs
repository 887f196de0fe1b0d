//! Sass bridge library
//!
//! - [`sass`]: compiles SCSS into CSS by generating a Ruby Sass script and
//!   handing it to an [`Evaluator`]
//! - [`http`]: stateless helpers for cache headers, request paths and
//!   content negotiation
//! - [`config`] and [`logger`]: ambient configuration and logging used by
//!   the `sass_bridge` binary

pub mod config;
pub mod http;
pub mod logger;
pub mod sass;

pub use sass::{CommandEvaluator, EvalError, Evaluator, FnEvaluator, ProcessingError, ScriptBridge};
