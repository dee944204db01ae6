//! Backend dispatch and linking: the parallel fork-join code generation
//! step and the link driver.

pub mod backend;
pub mod dispatcher;
pub mod link;

pub use backend::ObjectFile;
pub use dispatcher::{dispatch_headers, dispatch_objects};
pub use link::{link, run_after_compile, LinkOutcome};
