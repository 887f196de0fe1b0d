//! Sass processing module
//!
//! Compiles SCSS into CSS by generating a Ruby script for the Sass gem and
//! running it through an [`Evaluator`]:
//! - `script`: literal escaping and program layout
//! - `bridge`: configuration state and serialized evaluation
//! - `evaluator`: the evaluator trait and the interpreter-process backend

mod bridge;
mod error;
mod evaluator;
mod ordered_set;
pub mod script;

pub use bridge::{ScriptBridge, DEFAULT_REQUIRES};
pub use error::{EvalError, ProcessingError};
pub use evaluator::{CommandEvaluator, Evaluator, FnEvaluator, DEFAULT_INTERPRETER};
pub use ordered_set::OrderedSet;
