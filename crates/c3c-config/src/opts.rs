//! Command-line arguments, parsed with `clap`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// `c3c` command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "c3c", version, about = "The c3 compiler")]
pub struct Opts {
    /// Source files or wildcard patterns (`dir/*`, `dir/**`) to compile.
    pub input: Vec<String>,

    /// Directory containing the standard library (`<lib_dir>/std/*.c3`).
    #[arg(long)]
    pub lib_dir: Option<PathBuf>,

    /// Name of the output binary or object file set.
    #[arg(short, long, default_value = "foo.out")]
    pub output: String,

    /// What kind of build target to produce.
    #[arg(long, value_enum, default_value_t = TargetType::Executable)]
    pub target_type: TargetType,

    /// Only lex each input file and print its token stream.
    #[arg(long)]
    pub lex_only: bool,

    /// Only parse each input file and print its AST.
    #[arg(long)]
    pub parse_only: bool,

    /// Emit headers instead of object code.
    #[arg(long)]
    pub emit_headers: bool,

    /// Run the produced executable after a successful link.
    #[arg(long)]
    pub run: bool,

    /// Number of backend worker threads. Zero uses the number of logical
    /// cores.
    #[arg(short = 'j', long, default_value_t = 0)]
    pub threads: usize,

    /// Initial capacity hint for the global symbol table.
    #[arg(long)]
    pub symtab_size: Option<usize>,

    /// Link for a specific object-file format via the generic linker
    /// instead of the host's default platform linker. Omit to use the
    /// host default.
    #[arg(long, value_enum)]
    pub obj_format: Option<ObjFormat>,
}

/// The kind of artifact a [`super::target::BuildTarget`] produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetType {
    Executable,
    Library,
    Test,
}

/// An object-file format the generic linker may or may not know how to
/// link, selecting [`super::target::ArchOsTarget::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ObjFormat {
    Elf,
    MachO,
    Coff,
    Wasm,
}
