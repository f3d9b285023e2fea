//! jq expression evaluation for the mona GitHub CLI.
//!
//! A thin wrapper over the jaq engine: one JSON document is read from the
//! input, the expression is compiled and run against it, and every output
//! value is written on its own line. Top-level strings are written raw so
//! that `.name` yields `Mona`, not `"Mona"`; everything else is JSON,
//! optionally indented and colorized.
//!
//! With [`Options::time_functions`] two helpers from
//! [`mona_core::text`] are injected into the language:
//!
//! - `timeago`: RFC 3339 string to relative time, e.g. "5 minutes ago"
//! - `timefmt($f)`: RFC 3339 string rendered through a strftime layout
//!
//! Expressions can consult process environment variables via `$ENV`.

use std::io::{Read, Write};

use jaq_core::load::{Arena, File, Loader};
use jaq_core::{Compiler, Ctx, RcIter};
use jaq_json::Val;
use thiserror::Error;
use tracing::debug;

mod format;
mod functions;

/// jq evaluation error
#[derive(Debug, Error)]
pub enum EvalError {
    /// Input is not a JSON document
    #[error("failed to read JSON input: {0}")]
    Input(#[from] serde_json::Error),

    /// The expression is not valid jq
    #[error("failed to parse jq expression: {0}")]
    Parse(String),

    /// The expression parsed but did not compile (e.g. undefined filter)
    #[error("failed to compile jq expression: {0}")]
    Compile(String),

    /// The engine reported an error while running the filter
    #[error("jq: {0}")]
    Eval(String),

    /// Writing output failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Evaluation options
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    time_functions: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `timeago` and `timefmt` available to the expression.
    pub fn time_functions(mut self) -> Self {
        self.time_functions = true;
        self
    }
}

/// Evaluate `expr` against the JSON document in `input`, writing compact,
/// uncolored output.
///
/// # Errors
///
/// See [`EvalError`]; evaluation stops at the first engine error, after any
/// earlier output values have been written.
pub fn evaluate(
    input: impl Read,
    output: impl Write,
    expr: &str,
    options: &Options,
) -> Result<(), EvalError> {
    evaluate_formatted(input, output, expr, "", false, options)
}

/// Evaluate `expr` against the JSON document in `input`.
///
/// `indent` is the per-level indent unit; empty means compact output.
/// `colorize` applies ANSI styling to non-string output values.
///
/// # Errors
///
/// See [`EvalError`].
pub fn evaluate_formatted(
    input: impl Read,
    mut output: impl Write,
    expr: &str,
    indent: &str,
    colorize: bool,
    options: &Options,
) -> Result<(), EvalError> {
    let value: serde_json::Value = serde_json::from_reader(input)?;

    // The helper names only exist when asked for; the natives behind them
    // are always registered but use reserved names.
    let code = if options.time_functions {
        format!("{}{expr}", functions::PRELUDE)
    } else {
        expr.to_string()
    };
    debug!(expr, "evaluating jq expression");

    let program = File { code: code.as_str(), path: () };
    let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = Arena::default();
    let modules = loader
        .load(&arena, program)
        .map_err(|errors| EvalError::Parse(format!("{errors:?}")))?;

    let filter = Compiler::default()
        .with_funs(
            jaq_std::funs()
                .chain(jaq_json::funs())
                .chain(functions::time_funs()),
        )
        .with_global_vars(["$ENV"])
        .compile(modules)
        .map_err(|errors| EvalError::Compile(format!("{errors:?}")))?;

    let env = Val::from(serde_json::Value::Object(
        std::env::vars()
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect(),
    ));

    let inputs = RcIter::new(core::iter::empty());
    for result in filter.run((Ctx::new([env], &inputs), Val::from(value))) {
        let val = result.map_err(|e| EvalError::Eval(e.to_string()))?;
        match val {
            Val::Str(s) => writeln!(output, "{s}")?,
            other => {
                format::write_json(&mut output, &other.into(), indent, colorize)?;
                writeln!(output)?;
            }
        }
    }
    Ok(())
}
