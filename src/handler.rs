//! Pluggable reporting of buffer-growth and open failures.
//!
//! Failures are always returned to the caller as
//! [`Error`](crate::Error) values; in addition, they are reported
//! synchronously at the point of failure through an [`ErrorHandler`].
//! The handler decides whether the report is dropped, logged, or fatal.
//! Handlers are passed explicitly to the components that need them
//! ([`ZFile::open_with`](crate::ZFile::open_with),
//! [`LineReader::set_handler`](crate::LineReader::set_handler)); there is
//! no process-wide handler state.

use std::process;

/// Handler invoked when a buffer cannot grow or a file cannot be opened.
///
/// `location` is the `file:line` of the failing call within this crate.
///
/// # Example
///
/// A handler that counts how often it was invoked:
///
/// ```
/// use std::cell::Cell;
/// use seqline::ErrorHandler;
///
/// #[derive(Default)]
/// struct Counting(Cell<usize>);
///
/// impl ErrorHandler for Counting {
///     fn report(&self, _msg: &str, _location: &'static str) {
///         self.0.set(self.0.get() + 1);
///     }
/// }
/// ```
pub trait ErrorHandler {
    /// Called synchronously at the point of failure, never asynchronously.
    fn report(&self, msg: &str, location: &'static str);
}

/// Drops all reports. Callers only see the returned `Result`.
pub struct Silent;

impl ErrorHandler for Silent {
    fn report(&self, _msg: &str, _location: &'static str) {}
}

/// Logs reports through `log::error!`. This is the default handler.
pub struct Report;

impl ErrorHandler for Report {
    fn report(&self, msg: &str, location: &'static str) {
        log::error!("[{}]: {}", location, msg);
    }
}

/// Logs the report, then terminates the process with a failure exit code.
/// With this handler installed, the caller never observes the error return.
pub struct Fatal;

impl ErrorHandler for Fatal {
    fn report(&self, msg: &str, location: &'static str) {
        log::error!("[{}]: {}", location, msg);
        process::exit(1);
    }
}
