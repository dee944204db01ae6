//! The driver's own error type: fatal configuration errors plus the two
//! outcomes specific to a full compile.

use c3c_interface::FatalError;

#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error(transparent)]
    Fatal(#[from] FatalError),

    /// A stage boundary was reached with `errors_found > 0`; the specific
    /// diagnostics were already printed by `DiagCtxt::err`, so this carries
    /// no message of its own. Compilation does not attempt to recover past
    /// the first erroring stage.
    #[error("compilation failed; see diagnostics above")]
    DiagnosedErrors,

    #[error("program exited with non-zero status {0}")]
    RunFailed(i32),

    #[error("failed to load `{path}`: {source}")]
    Io { path: std::path::PathBuf, #[source] source: std::io::Error },
}
