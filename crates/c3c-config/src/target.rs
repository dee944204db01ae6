//! `BuildTarget`: the resolved, expanded compile target.

use crate::opts::{ObjFormat, Opts, TargetType};
use c3c_interface::{source_map::expand_source_name, FatalError};
use std::path::PathBuf;

/// Which linking strategy is used for the host platform vs. a cross target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchOsTarget {
    /// Compile for (and link with) the host's default platform linker.
    Default,
    /// Compile for another object format, using the generic linker —
    /// carries the format so the link step can consult
    /// `obj_format_linking_supported` before invoking it.
    Other(ObjFormat),
}

/// A fully resolved build target: expanded source list plus output options.
#[derive(Debug, Clone)]
pub struct BuildTarget {
    pub name: String,
    pub sources: Vec<PathBuf>,
    pub target_type: TargetType,
    pub lex_only: bool,
    pub parse_only: bool,
    pub output_headers: bool,
    pub run_after_compile: bool,
    pub arch_os_target: ArchOsTarget,
    pub lib_dir: Option<PathBuf>,
    pub symtab_size: Option<usize>,
    pub threads: usize,
}

/// Base names (without extension) of the six standard-library sources
/// prepended to every compile when `--lib-dir` is configured (spec §4.4,
/// §6): `<lib_dir>/std/{runtime,builtin,io,mem,array,math}.c3`.
const STD_PRELUDE: &[&str] = &["runtime", "builtin", "io", "mem", "array", "math"];

/// Builds the six standard-library source paths under `lib_dir/std/`, in
/// the fixed prelude order, so they participate in the pipeline exactly
/// like user sources but are loaded first.
fn std_prelude_sources(lib_dir: &PathBuf) -> Vec<PathBuf> {
    let std_dir = lib_dir.join("std");
    STD_PRELUDE.iter().map(|name| std_dir.join(format!("{name}.c3"))).collect()
}

impl BuildTarget {
    /// Builds a target from parsed CLI options, performing wildcard
    /// expansion and rejecting invalid source names.
    ///
    /// When `--lib-dir` is set, the six standard-library sources are
    /// prepended to the expanded user source list.
    pub fn from_opts(opts: &Opts) -> Result<Self, FatalError> {
        let mut sources = Vec::new();
        if let Some(lib_dir) = &opts.lib_dir {
            sources.extend(std_prelude_sources(lib_dir));
        }
        for entry in &opts.input {
            match expand_source_name(entry) {
                Some(expanded) => sources.extend(expanded),
                None => return Err(FatalError::InvalidSourceName(entry.clone())),
            }
        }
        Ok(Self {
            name: opts.output.clone(),
            sources,
            target_type: opts.target_type,
            lex_only: opts.lex_only,
            parse_only: opts.parse_only,
            output_headers: opts.emit_headers,
            run_after_compile: opts.run,
            arch_os_target: match opts.obj_format {
                Some(fmt) => ArchOsTarget::Other(fmt),
                None => ArchOsTarget::Default,
            },
            lib_dir: opts.lib_dir.clone(),
            symtab_size: opts.symtab_size,
            threads: opts.threads,
        })
    }

    /// Whether this target produces an executable that can be linked and
    /// (optionally) run. Library targets stop at object files.
    pub fn produces_executable(&self) -> bool {
        matches!(self.target_type, TargetType::Executable | TargetType::Test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn opts(args: &[&str]) -> Opts {
        let mut full = vec!["c3c"];
        full.extend_from_slice(args);
        Opts::parse_from(full)
    }

    #[test]
    fn invalid_source_name_is_rejected() {
        let opts = opts(&["not_a_source_file"]);
        assert!(matches!(BuildTarget::from_opts(&opts), Err(FatalError::InvalidSourceName(_))));
    }

    #[test]
    fn lib_dir_prepends_the_six_std_sources_before_user_sources() {
        let opts = opts(&["hello.c3", "--lib-dir", "/opt/c3"]);
        let target = BuildTarget::from_opts(&opts).unwrap();

        assert_eq!(
            target.sources,
            vec![
                PathBuf::from("/opt/c3/std/runtime.c3"),
                PathBuf::from("/opt/c3/std/builtin.c3"),
                PathBuf::from("/opt/c3/std/io.c3"),
                PathBuf::from("/opt/c3/std/mem.c3"),
                PathBuf::from("/opt/c3/std/array.c3"),
                PathBuf::from("/opt/c3/std/math.c3"),
                PathBuf::from("hello.c3"),
            ]
        );
    }

    #[test]
    fn no_lib_dir_means_no_prelude() {
        let opts = opts(&["hello.c3"]);
        let target = BuildTarget::from_opts(&opts).unwrap();
        assert_eq!(target.sources, vec![PathBuf::from("hello.c3")]);
    }

    #[test]
    fn dotc3_source_passes_through() {
        let opts = opts(&["hello.c3"]);
        let target = BuildTarget::from_opts(&opts).unwrap();
        assert_eq!(target.sources, vec![PathBuf::from("hello.c3")]);
    }

    #[test]
    fn no_obj_format_means_the_host_default_linker() {
        let opts = opts(&["hello.c3"]);
        let target = BuildTarget::from_opts(&opts).unwrap();
        assert_eq!(target.arch_os_target, ArchOsTarget::Default);
    }

    #[test]
    fn explicit_obj_format_selects_the_generic_linker_path() {
        let opts = opts(&["hello.c3", "--obj-format", "wasm"]);
        let target = BuildTarget::from_opts(&opts).unwrap();
        assert_eq!(target.arch_os_target, ArchOsTarget::Other(ObjFormat::Wasm));
    }
}
