//! The compiler session: the ambient services every stage needs, bundled
//! into one value instead of process-wide statics.

use crate::{diagnostics::DiagCtxt, scratch::ScratchBuffer, source_map::SourceLoader};
use parking_lot::Mutex;

/// Bundles the diagnostics context, source loader, and scratch buffer that
/// every pass needs access to.
///
/// A `Session` is created once per compile invocation; there's no
/// expectation of repeated invocation within one process.
pub struct Session {
    pub dcx: DiagCtxt,
    pub source_loader: SourceLoader,
    scratch: Mutex<ScratchBuffer>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            dcx: DiagCtxt::new(),
            source_loader: SourceLoader::new(),
            scratch: Mutex::new(ScratchBuffer::new()),
        }
    }

    /// Runs `f` with exclusive access to the process-wide scratch buffer.
    ///
    /// The scratch buffer is explicitly not re-entrant; callers must not
    /// attempt to use it again from within `f`.
    pub fn with_scratch<R>(&self, f: impl FnOnce(&mut ScratchBuffer) -> R) -> R {
        let mut scratch = self.scratch.lock();
        f(&mut scratch)
    }
}
