//! The backend stub: fabricates a placeholder object file per module.
//!
//! Real machine-code generation is out of scope; this crate's job is the
//! dispatch and linking *around* codegen, not codegen itself. Each
//! "lowering" writes a small marker file so the rest of the driver
//! (in particular the link step) has a real path to work with.

use c3c_interface::Symbol;
use c3c_sema::{GlobalContext, ModuleId};
use std::{io, path::PathBuf};

/// One module's generated object file.
#[derive(Debug, Clone)]
pub struct ObjectFile {
    pub module_name: Symbol,
    pub path: PathBuf,
}

/// Lowers `id` to a placeholder `.o` file under `out_dir`.
///
/// One self-contained, independently-produced object per module, safe to
/// run off the main thread.
pub fn lower_module(gcx: &GlobalContext, id: ModuleId, out_dir: &std::path::Path) -> io::Result<ObjectFile> {
    let module = gcx.module(id);
    let module_name = module.module_name();
    let path = out_dir.join(format!("{module_name}.o"));

    tracing::trace!(module = %module_name, path = %path.display(), "lowering module");
    std::fs::write(&path, format!("c3c stub object for module `{module_name}`\n"))?;

    Ok(ObjectFile { module_name, path })
}
