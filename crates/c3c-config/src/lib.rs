//! Build configuration: CLI options and resolved build targets.

pub mod opts;
pub mod target;

pub use opts::{ObjFormat, Opts, TargetType};
pub use target::{ArchOsTarget, BuildTarget};
