//! The link driver: invokes a system linker over the object files gathered
//! by [`crate::dispatcher`], then optionally runs the produced binary.
//!
//! Per spec §4.7/§7: a link failure (or an unsupported object format) is
//! non-fatal to the compile — it disables `--run`, but the build is still
//! considered to have produced object files. Only "no object files at all
//! for an executable/test target" is the fatal, assertion-failure case.

use crate::backend::ObjectFile;
use c3c_config::{ArchOsTarget, BuildTarget, ObjFormat};
use c3c_interface::FatalError;
use std::{path::PathBuf, process::Command};

/// The outcome of attempting to link `objects` into an executable.
#[derive(Debug, Clone)]
pub struct LinkOutcome {
    /// Path to the produced binary, present only when linking actually ran
    /// and the linker exited successfully.
    pub binary: Option<PathBuf>,
    /// Whether `--run` should still be honored. Always `false` when
    /// `binary` is `None`; also `false` when the target didn't request
    /// `--run` in the first place.
    pub should_run: bool,
}

/// Which object formats the generic linker (`ld`) is known to link,
/// mirroring `compiler.c`'s `obj_format_linking_supported`: native object
/// formats link through the system linker as-is; WASM needs a dedicated
/// linker this driver doesn't drive.
fn obj_format_linking_supported(fmt: ObjFormat) -> bool {
    !matches!(fmt, ObjFormat::Wasm)
}

/// Links `objects` into `target.name`, choosing a linker command based on
/// `target.arch_os_target` — the host's default linker (`cc`) for
/// [`ArchOsTarget::Default`], a generic one (`ld`) otherwise, provided the
/// requested object format is linkable at all.
///
/// Returns `Err` only for the fatal case (no object files for a target that
/// must produce one); an unsupported format or a failing linker is reported
/// as a [`LinkOutcome`] with `binary: None`, not an error.
pub fn link(objects: &[ObjectFile], target: &BuildTarget) -> Result<LinkOutcome, FatalError> {
    if objects.is_empty() {
        return Err(FatalError::NoOutputFiles);
    }

    let linker = match target.arch_os_target {
        ArchOsTarget::Default => "cc",
        ArchOsTarget::Other(fmt) if obj_format_linking_supported(fmt) => "ld",
        ArchOsTarget::Other(fmt) => {
            tracing::warn!(?fmt, "no linker support for this object format; build produced objects but will not be linked or run");
            return Ok(LinkOutcome { binary: None, should_run: false });
        }
    };

    let output_path = PathBuf::from(&target.name);
    tracing::debug!(linker, output = %output_path.display(), objects = objects.len(), "linking");

    let spawn_result = Command::new(linker)
        .args(objects.iter().map(|o| &o.path))
        .arg("-o")
        .arg(&output_path)
        .status();

    let linked = match spawn_result {
        Ok(status) if status.success() => true,
        Ok(status) => {
            tracing::warn!(linker, %status, "linker exited with a failure status; build still produced objects");
            false
        }
        Err(e) => {
            tracing::warn!(linker, error = %e, "failed to spawn linker; build still produced objects");
            false
        }
    };

    Ok(LinkOutcome {
        binary: linked.then_some(output_path),
        should_run: linked && target.run_after_compile,
    })
}

/// Runs the produced binary after a successful link (`--run`).
pub fn run_after_compile(output_path: &PathBuf) -> Result<i32, FatalError> {
    tracing::debug!(bin = %output_path.display(), "running compiled binary");
    let status = Command::new(output_path)
        .status()
        .map_err(|e| FatalError::Other(format!("failed to run `{}`: {e}", output_path.display())))?;
    Ok(status.code().unwrap_or(-1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use c3c_config::{Opts, TargetType};
    use c3c_interface::Symbol;
    use clap::Parser;

    #[test]
    fn unsupported_obj_format_skips_linking_and_running() {
        assert!(!obj_format_linking_supported(ObjFormat::Wasm));
        assert!(obj_format_linking_supported(ObjFormat::Elf));
        assert!(obj_format_linking_supported(ObjFormat::MachO));
        assert!(obj_format_linking_supported(ObjFormat::Coff));
    }

    #[test]
    fn an_unsupported_format_is_non_fatal_and_disables_run() {
        let opts = Opts::parse_from(["c3c", "hello.c3", "--obj-format", "wasm", "--run"]);
        let mut target = c3c_config::BuildTarget::from_opts(&opts).unwrap();
        target.target_type = TargetType::Executable;

        let (name, _) = Symbol::intern("hello");
        let objects = vec![ObjectFile { module_name: name, path: PathBuf::from("hello.o") }];

        let outcome = link(&objects, &target).expect("unsupported format must not be a fatal error");
        assert!(outcome.binary.is_none());
        assert!(!outcome.should_run);
    }

    #[test]
    fn no_objects_for_an_executable_target_is_fatal() {
        let opts = Opts::parse_from(["c3c", "hello.c3"]);
        let target = c3c_config::BuildTarget::from_opts(&opts).unwrap();
        assert!(matches!(link(&[], &target), Err(FatalError::NoOutputFiles)));
    }
}
