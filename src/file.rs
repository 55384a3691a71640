// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::error::{Result, SyncError};

/// Whole-file UTF-8 text access. The sync pipeline only ever reads a document
/// in full and writes it back in full.
pub trait DocumentStore {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, text: &str) -> Result<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn read(&self, path: &Path) -> Result<String> { (**self).read(path) }
    fn write(&self, path: &Path, text: &str) -> Result<()> { (**self).write(path, text) }
}

/// Plain filesystem; parent directories are created on write.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| SyncError::io(path, e))
    }

    fn write(&self, path: &Path, text: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        fs::write(path, text).map_err(|e| SyncError::io(path, e))
    }
}

/// In-memory documents, for previews and tests. Paths listed in `fail_writes`
/// refuse writes with `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, String>>,
    fail_writes: Vec<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_file<P: Into<PathBuf>, S: Into<String>>(self, path: P, text: S) -> Self {
        self.lock().insert(path.into(), text.into());
        self
    }

    pub fn failing_writes_to<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.fail_writes.push(path.into());
        self
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.lock().get(path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<String> {
        self.get(path).ok_or_else(|| {
            SyncError::io(path, std::io::Error::new(std::io::ErrorKind::NotFound, "no such document"))
        })
    }

    fn write(&self, path: &Path, text: &str) -> Result<()> {
        if self.fail_writes.iter().any(|p| p == path) {
            return Err(SyncError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "write refused"),
            ));
        }
        self.lock().insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(SyncError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| SyncError::io(dir, e))?;
    }
    Ok(())
}

/// Display form used inside the page: `images\foo.webp` → `images/foo.webp`.
pub fn to_forward_slashes(p: &Path) -> String {
    p.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_store_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site").join("index.html");
        FsStore.write(&path, "hi").unwrap();
        assert_eq!(FsStore.read(&path).unwrap(), "hi");
    }

    #[test]
    fn fs_store_read_missing_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsStore.read(&dir.path().join("nope.html")).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join("file");
        fs::write(&f, "x").unwrap();
        assert!(ensure_directory(&f).is_err());
        assert!(ensure_directory(&dir.path().join("a").join("b")).is_ok());
    }

    #[test]
    fn memory_store_can_refuse_writes() {
        let store = MemoryStore::new().with_file("a.html", "x").failing_writes_to("b.html");
        assert!(store.write(Path::new("a.html"), "y").is_ok());
        assert!(store.write(Path::new("b.html"), "y").is_err());
        assert_eq!(store.get(Path::new("a.html")).as_deref(), Some("y"));
    }

    #[test]
    fn backslashes_become_forward() {
        assert_eq!(to_forward_slashes(Path::new("images\\a.webp")), "images/a.webp");
    }
}
