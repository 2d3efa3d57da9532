//! Persistence collaborator for the batch coordinator.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Where file content is loaded from and written back to.
pub trait ContentStore {
    fn load(&self, path: &Path) -> io::Result<String>;

    /// Replace the whole content of `path`. Must write everything or nothing.
    fn persist(&mut self, path: &Path, content: &str) -> io::Result<()>;
}

/// The local file system, with atomic replacement on write.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl ContentStore for FileStore {
    fn load(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn persist(&mut self, path: &Path, content: &str) -> io::Result<()> {
        atomic_write(path, content.as_bytes())
    }
}

impl<S: ContentStore + ?Sized> ContentStore for &mut S {
    fn load(&self, path: &Path) -> io::Result<String> {
        (**self).load(path)
    }

    fn persist(&mut self, path: &Path, content: &str) -> io::Result<()> {
        (**self).persist(path, content)
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the original file is left as it was.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    // Create tempfile in same directory to ensure same filesystem
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // Keep the original permissions on the replacement
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
