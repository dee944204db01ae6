//! Source file loading and caching.

use c3c_data_structures::FxHashMap;
use parking_lot::Mutex;
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

/// A stable identifier for a loaded [`File`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

/// A loaded source file. Identity is `full_path`.
pub struct File {
    pub id: FileId,
    pub full_path: PathBuf,
    pub contents: String,
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("id", &self.id)
            .field("full_path", &self.full_path)
            .field("len", &self.contents.len())
            .finish()
    }
}

/// Caches loaded files by their canonicalized absolute path, so that
/// transitively re-importing the same file (e.g. the standard library) never
/// re-reads or re-parses it.
#[derive(Default)]
pub struct SourceLoader {
    by_path: Mutex<FxHashMap<PathBuf, Arc<File>>>,
    next_id: std::sync::atomic::AtomicU32,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, deduplicating by canonicalized absolute path.
    ///
    /// Returns the cached or freshly-read [`File`] along with whether it was
    /// already cached (`was_cached = true` means the caller must skip
    /// further processing).
    pub fn load(&self, path: &Path) -> std::io::Result<(Arc<File>, bool)> {
        let canonical = std::fs::canonicalize(path)?;
        let mut by_path = self.by_path.lock();
        if let Some(existing) = by_path.get(&canonical) {
            return Ok((existing.clone(), true));
        }
        let contents = std::fs::read_to_string(&canonical)?;
        let id = FileId(self.next_id.fetch_add(1, std::sync::atomic::Ordering::SeqCst));
        let file = Arc::new(File { id, full_path: canonical.clone(), contents });
        by_path.insert(canonical, file.clone());
        Ok((file, false))
    }

    pub fn len(&self) -> usize {
        self.by_path.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Expands a single source-list entry:
/// - `path/to/file.c3` — itself.
/// - `dir/*` — every `.c3` file directly in `dir`.
/// - `dir/**` — every `.c3` file in `dir`, recursively.
///
/// Any other shape is rejected with `None`.
pub fn expand_source_name(name: &str) -> Option<Vec<PathBuf>> {
    if let Some(dir) = name.strip_suffix("/**") {
        return Some(walk_c3_files(Path::new(dir), true));
    }
    if let Some(dir) = name.strip_suffix("/*") {
        return Some(walk_c3_files(Path::new(dir), false));
    }
    if name.ends_with(".c3") {
        return Some(vec![PathBuf::from(name)]);
    }
    None
}

fn walk_c3_files(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else { return out };
    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|e| e.path());
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            if recursive {
                out.extend(walk_c3_files(&path, true));
            }
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some("c3") {
            out.push(path);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loading_same_path_twice_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.c3");
        fs::write(&path, "module a;").unwrap();

        let loader = SourceLoader::new();
        let (first, cached1) = loader.load(&path).unwrap();
        let (second, cached2) = loader.load(&path).unwrap();

        assert!(!cached1);
        assert!(cached2);
        assert_eq!(first.id, second.id);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn wildcard_expansion_is_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.c3"), "").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("c.c3"), "").unwrap();

        let pattern = format!("{}/*", dir.path().display());
        let files = expand_source_name(&pattern).unwrap();
        assert_eq!(files, vec![dir.path().join("a.c3")]);
    }

    #[test]
    fn wildcard_expansion_recursive_includes_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.c3"), "").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("c.c3"), "").unwrap();

        let pattern = format!("{}/**", dir.path().display());
        let mut files = expand_source_name(&pattern).unwrap();
        files.sort();
        let mut expected = vec![dir.path().join("a.c3"), sub.join("c.c3")];
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn invalid_name_is_rejected() {
        assert!(expand_source_name("not_a_source_file").is_none());
        assert!(expand_source_name("weird.txt").is_none());
    }
}
