//! Diagnostic counters and fatal-error handling: accumulate errors/warnings
//! within a pass, check between passes, and exit the process on fatal
//! configuration errors.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Zero-sized proof that an error has already been recorded and reported.
///
/// Returned by [`DiagCtxt::err`] so that callers can propagate failure with
/// `?` without needing to carry a message around a second time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorGuaranteed(());

/// The result type used across the driver: `Ok` or "a diagnostic was already
/// emitted".
pub type Result<T = ()> = std::result::Result<T, ErrorGuaranteed>;

/// Fatal, pre-diagnostic configuration errors: invalid source name, no
/// input files, scratch overflow, etc.
#[derive(thiserror::Error, Debug)]
pub enum FatalError {
    #[error("no files to compile")]
    NoFiles,
    #[error("file names must end with '.c3' or they cannot be compiled: '{0}' is invalid")]
    InvalidSourceName(String),
    #[error("scratch buffer size ({0} chars) exceeded")]
    ScratchOverflow(usize),
    #[error("no output files found")]
    NoOutputFiles,
    #[error("failed to spawn compiler thread")]
    ThreadSpawn,
    #[error("{0}")]
    Other(String),
}

/// Accumulates diagnostic counters for one compile: `errors_found`,
/// `warnings_found`, `in_panic_mode`, reset at the start of each compile.
#[derive(Debug, Default)]
pub struct DiagCtxt {
    errors_found: AtomicUsize,
    warnings_found: AtomicUsize,
    in_panic_mode: std::sync::atomic::AtomicBool,
}

impl DiagCtxt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all counters. Called at the start of each compile.
    pub fn clear(&self) {
        self.errors_found.store(0, Ordering::SeqCst);
        self.warnings_found.store(0, Ordering::SeqCst);
        self.in_panic_mode.store(false, Ordering::SeqCst);
    }

    /// Records a diagnostic error and logs it.
    ///
    /// Returns an [`ErrorGuaranteed`] token so the caller can propagate it.
    #[track_caller]
    pub fn err(&self, msg: impl std::fmt::Display) -> ErrorGuaranteed {
        tracing::error!("{msg}");
        self.errors_found.fetch_add(1, Ordering::SeqCst);
        ErrorGuaranteed(())
    }

    #[track_caller]
    pub fn warn(&self, msg: impl std::fmt::Display) {
        tracing::warn!("{msg}");
        self.warnings_found.fetch_add(1, Ordering::SeqCst);
    }

    /// Prints a fatal configuration error and terminates the process
    /// non-zero.
    #[track_caller]
    pub fn fatal(&self, err: FatalError) -> ! {
        eprintln!("error: {err}");
        std::process::exit(1)
    }

    pub fn errors_found(&self) -> usize {
        self.errors_found.load(Ordering::SeqCst)
    }

    pub fn warnings_found(&self) -> usize {
        self.warnings_found.load(Ordering::SeqCst)
    }

    pub fn has_errors(&self) -> Result<()> {
        if self.errors_found() > 0 { Err(ErrorGuaranteed(())) } else { Ok(()) }
    }

    pub fn enter_panic_mode(&self) {
        self.in_panic_mode.store(true, Ordering::SeqCst);
    }

    pub fn in_panic_mode(&self) -> bool {
        self.in_panic_mode.load(Ordering::SeqCst)
    }

    pub fn exit_panic_mode(&self) {
        self.in_panic_mode.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_counters() {
        let dcx = DiagCtxt::new();
        dcx.err("boom");
        dcx.warn("careful");
        dcx.enter_panic_mode();
        assert_eq!(dcx.errors_found(), 1);
        dcx.clear();
        assert_eq!(dcx.errors_found(), 0);
        assert_eq!(dcx.warnings_found(), 0);
        assert!(!dcx.in_panic_mode());
    }

    #[test]
    fn has_errors_reflects_count() {
        let dcx = DiagCtxt::new();
        assert!(dcx.has_errors().is_ok());
        dcx.err("oops");
        assert!(dcx.has_errors().is_err());
    }
}
