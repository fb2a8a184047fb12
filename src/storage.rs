// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Persisted snapshot slot.
//!
//! The live portfolio document is mirrored into a single named __snapshot
//! slot__ after every mutation, and read back once at startup. The slot only
//! holds text. Whether that text is a valid document is the loader's concern.

use std::{
    fs::{read_to_string, remove_file, write},
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// Layer of indirection for snapshot persistence.
pub trait SnapshotStorage {
    /// Read slot contents, if the slot has ever been written.
    fn read(&self) -> Result<Option<String>>;

    /// Overwrite slot contents.
    fn write(&mut self, contents: &str) -> Result<()>;

    /// Empty slot.
    fn clear(&mut self) -> Result<()>;
}

/// Snapshot slot backed by a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Construct new file slot.
    ///
    /// Does not touch the file system until first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to backing file.
    pub fn as_path(&self) -> &Path {
        self.path.as_path()
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Read {
                path: self.path.clone(),
                source: error,
            }),
        }
    }

    #[instrument(skip(self, contents), level = "debug")]
    fn write(&mut self, contents: &str) -> Result<()> {
        // INVARIANT: Parent directory must exist before first write.
        let parent = self.path.parent().filter(|path| !path.as_os_str().is_empty());
        if let Some(parent) = parent {
            mkdirp::mkdirp(parent).map_err(|error| StorageError::Write {
                path: parent.to_path_buf(),
                source: error,
            })?;
        }

        debug!("write snapshot to {:?}", self.path.display());
        write(&self.path, contents).map_err(|error| StorageError::Write {
            path: self.path.clone(),
            source: error,
        })
    }

    fn clear(&mut self) -> Result<()> {
        match remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Write {
                path: self.path.clone(),
                source: error,
            }),
        }
    }
}

/// Snapshot slot kept in memory.
///
/// Useful for embedding the store without touching the disk, and for
/// exercising write failures.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStorage {
    slot: Option<String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStorage {
    /// Construct new empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct slot that already holds contents.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Some(contents.into()),
            ..Self::default()
        }
    }

    /// Make every following write fail, or succeed again.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Current slot contents.
    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable);
        }

        self.slot = Some(contents.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.slot = None;
        Ok(())
    }
}

/// Snapshot storage error types.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to read snapshot file.
    #[error("failed to read snapshot {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write snapshot file.
    #[error("failed to write snapshot {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Storage refuses writes.
    #[error("snapshot storage is unavailable")]
    Unavailable,
}

/// Friendly result alias :3
pub type Result<T, E = StorageError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[sealed_test]
    fn file_storage_round_trip() -> anyhow::Result<()> {
        let mut storage = FileStorage::new("nested/dir/portfolio-config.json");
        assert_eq!(storage.read()?, None);

        storage.write(r#"{"hero":{"name":"Ann"}}"#)?;
        assert_eq!(storage.read()?.as_deref(), Some(r#"{"hero":{"name":"Ann"}}"#));

        storage.clear()?;
        assert_eq!(storage.read()?, None);

        // INVARIANT: Clearing an empty slot is not an error.
        storage.clear()?;

        Ok(())
    }

    #[test]
    fn memory_storage_refuses_writes_on_demand() {
        let mut storage = MemoryStorage::with_contents("{}");
        storage.set_fail_writes(true);
        assert!(matches!(storage.write("[]"), Err(StorageError::Unavailable)));
        assert_eq!(storage.contents(), Some("{}"));
        assert_eq!(storage.writes(), 0);
    }
}
