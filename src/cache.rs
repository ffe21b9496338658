use crate::error::CacheError;
use crate::types::Repository;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Last successful result set, kept as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CacheStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the cached set. Each save writes its own uniquely named temp
    /// file next to the cache and renames it into place, so neither a crash
    /// nor a second writer can leave a half-written cache behind.
    pub fn save(&self, repos: &[Repository]) -> Result<(), CacheError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| CacheError::io(dir, e))?;

        let contents = serde_json::to_vec_pretty(repos).map_err(|e| CacheError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CacheError::io(dir, e))?;
        write_synced(&mut tmp, &contents).map_err(|e| CacheError::io(tmp.path(), e))?;
        // A failed persist hands the temp file back; dropping it removes it.
        tmp.persist(&self.path).map_err(|e| CacheError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), count = repos.len(), "cache updated");
        Ok(())
    }

    /// An absent cache file is an empty result set, not an error.
    pub fn load(&self) -> Result<Vec<Repository>, CacheError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(CacheError::io(&self.path, e)),
        };

        serde_json::from_slice(&contents).map_err(|e| CacheError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }
}

fn write_synced(tmp: &mut NamedTempFile, contents: &[u8]) -> io::Result<()> {
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()
}
