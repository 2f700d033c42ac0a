//! Validated command construction.
//!
//! [`ArenaCommand`] collects the program, its arguments and an optional
//! timeout. Every argument is checked as it is added; rejections are kept and
//! surfaced by the executor before anything is spawned.
//!
//! Arguments are passed to the OS directly (no shell), so quoting is never
//! needed: a trailing entrypoint such as `python main.py` travels as one
//! argument.

use crate::error::ExecError;
use std::fmt;
use std::time::Duration;

/// Characters that are never allowed in a program path.
const FORBIDDEN_PATH_CHARS: &[char] = &[
    '\0', // Null byte
    '\n', // Newline
    '\r', // Carriage return
];

/// Validate a command argument.
///
/// Only a NUL byte is rejected: the OS cannot carry it inside argv. Line
/// breaks are kept, so multi-line entrypoints and env values pass through.
///
/// # Errors
///
/// Returns an error if the argument contains a NUL byte.
pub fn validate_argument(arg: &str) -> Result<(), ExecError> {
    if arg.contains('\0') {
        return Err(ExecError::invalid_argument(
            arg,
            "contains forbidden character '\\0'",
        ));
    }
    Ok(())
}

/// Validate a program path.
///
/// # Errors
///
/// Returns an error if the path is empty or contains control or shell
/// metacharacters. Relative paths, `..` segments included, are accepted.
pub fn validate_program_path(path: &str) -> Result<(), ExecError> {
    if path.is_empty() {
        return Err(ExecError::invalid_program(path, "path is empty"));
    }

    for c in path.chars() {
        if FORBIDDEN_PATH_CHARS.contains(&c) || matches!(c, ';' | '&' | '|' | '$' | '`') {
            return Err(ExecError::invalid_program(
                path,
                format!("shell metacharacter {c:?} not allowed"),
            ));
        }
    }

    Ok(())
}

/// A command line for the external tool, validated as it is built.
///
/// # Example
///
/// ```
/// use arena_exec::ArenaCommand;
/// use std::time::Duration;
///
/// let cmd = ArenaCommand::new("arena")
///     .arg("list")
///     .args(["-o", "json"])
///     .timeout(Duration::from_secs(30));
///
/// assert!(!cmd.has_errors());
/// assert_eq!(cmd.command_line(), "arena list -o json");
/// ```
#[derive(Debug)]
pub struct ArenaCommand {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
    validation_errors: Vec<ExecError>,
}

impl ArenaCommand {
    /// Create a new command for the given program (name on `PATH` or a path).
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        let mut validation_errors = Vec::new();
        if let Err(e) = validate_program_path(&program) {
            validation_errors.push(e);
        }
        Self {
            program,
            args: Vec::new(),
            timeout: None,
            validation_errors,
        }
    }

    /// Add a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        let arg = arg.into();
        match validate_argument(&arg) {
            Ok(()) => self.args.push(arg),
            Err(e) => self.validation_errors.push(e),
        }
        self
    }

    /// Add multiple arguments, in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Bound the run time of the command.
    ///
    /// A zero duration means "no timeout".
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Set or clear the timeout.
    #[must_use]
    pub fn maybe_timeout(self, timeout: Option<Duration>) -> Self {
        match timeout {
            Some(limit) => self.timeout(limit),
            None => Self {
                timeout: None,
                ..self
            },
        }
    }

    /// The program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The validated arguments.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The configured timeout, if any.
    #[must_use]
    pub fn timeout_limit(&self) -> Option<Duration> {
        self.timeout
    }

    /// Check if there are any validation errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    /// Get any validation errors that occurred.
    #[must_use]
    pub fn errors(&self) -> &[ExecError] {
        &self.validation_errors
    }

    /// Remove and return the first validation error, if any.
    pub fn take_error(&mut self) -> Option<ExecError> {
        if self.validation_errors.is_empty() {
            None
        } else {
            Some(self.validation_errors.swap_remove(0))
        }
    }

    /// Space-joined command line, for logging and diagnostics.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for ArenaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}
