//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod config;
pub mod dedup;
pub mod expand;
pub mod search;
pub mod split;

use crate::error::Result;
use crate::report::{ProgressReporter, Reporter, TracingReporter};
use std::io::{self, IsTerminal};

/// Whether a spinner should be drawn on stderr
pub(crate) fn show_progress(verbose: bool) -> bool {
    !verbose && io::stderr().is_terminal()
}

/// Run a transform with a row counter when interactive, plain tracing otherwise
pub(crate) fn with_reporter<T>(
    verbose: bool,
    message: &str,
    f: impl FnOnce(&dyn Reporter) -> Result<T>,
) -> Result<T> {
    if show_progress(verbose) {
        let reporter = ProgressReporter::new(message);
        let result = f(&reporter);
        reporter.finish();
        result
    } else {
        f(&TracingReporter)
    }
}
