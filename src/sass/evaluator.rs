//! Script evaluators
//!
//! An [`Evaluator`] takes a complete Ruby program and returns the value the
//! program leaves in its result variable. The bridge never touches the runtime
//! directly; hosts plug in whatever they have.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use super::error::EvalError;
use super::script::RESULT_VARIABLE;

/// Interpreter used when none is configured
pub const DEFAULT_INTERPRETER: &str = "ruby";

/// Runs a generated script and returns its result as text
///
/// Implementations need not be reentrant; [`ScriptBridge`](super::ScriptBridge)
/// never calls the same evaluator from two threads at once.
pub trait Evaluator {
    fn eval(&mut self, script: &str) -> Result<String, EvalError>;
}

impl<E: Evaluator + ?Sized> Evaluator for &mut E {
    fn eval(&mut self, script: &str) -> Result<String, EvalError> {
        (**self).eval(script)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn eval(&mut self, script: &str) -> Result<String, EvalError> {
        (**self).eval(script)
    }
}

/// Evaluator backed by a closure
pub struct FnEvaluator<F>(pub F);

impl<F> Evaluator for FnEvaluator<F>
where
    F: FnMut(&str) -> Result<String, EvalError>,
{
    fn eval(&mut self, script: &str) -> Result<String, EvalError> {
        (self.0)(script)
    }
}

/// Evaluator that pipes the script into an interpreter process
///
/// Each call spawns a fresh process, so no state leaks between compilations.
/// A trailer printing the result variable is appended to the script, and
/// whatever the process writes to stdout is the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvaluator {
    program: String,
    args: Vec<String>,
}

impl CommandEvaluator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra interpreter arguments, placed before the script (read from stdin)
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn io_error(&self, source: io::Error) -> EvalError {
        EvalError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

impl Default for CommandEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl Evaluator for CommandEvaluator {
    fn eval(&mut self, script: &str) -> Result<String, EvalError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.io_error(e))?;

        // Fed from its own thread so output is drained while the program is written
        let program = format!("{script}$stdout.write({RESULT_VARIABLE}.to_s)\n");
        let stdin = child.stdin.take();
        let feeder = thread::spawn(move || match stdin {
            Some(mut stdin) => stdin.write_all(program.as_bytes()),
            None => Ok(()),
        });

        let output = child.wait_with_output().map_err(|e| self.io_error(e))?;
        match feeder.join() {
            Ok(Ok(())) => {}
            // The exit status and stderr below explain an early exit better
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(self.io_error(e)),
            Err(_) => return Err(self.io_error(io::Error::other("stdin writer panicked"))),
        }
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = stderr.trim();
        if message.is_empty() {
            Err(EvalError::Script(format!(
                "`{}` exited with {}",
                self.program, output.status
            )))
        } else {
            Err(EvalError::Script(message.to_string()))
        }
    }
}
