use alloc::format;
use alloc::string::String;
use core::hash::BuildHasher;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tc_utils::hash::FixedHashState;

use super::{MetaCache, Tags};

/// A persistent [`MetaCache`] keeping one JSON file per key in a directory.
///
/// Parsed tags survive process restarts, so descriptors of a large type
/// graph can be rebuilt without re-reading every doc block. The cache is best
/// effort: I/O and decoding failures are logged at `warn` and behave like a
/// miss.
///
/// File names are derived from the key (sanitized, plus a stable hash), so
/// the directory may be shared between processes of the same build. Stale
/// entries are never detected; clear the directory when the tags change.
#[derive(Debug, Clone)]
pub struct FileMetaCache {
    dir: PathBuf,
}

impl FileMetaCache {
    /// A cache rooted at `dir`. The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let hash = FixedHashState.hash_one(key);
        self.dir.join(format!("{stem}-{hash:016x}.json"))
    }

    fn write_entry(&self, key: &str, tags: &Tags) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_vec(tags)?;

        // Write then rename, so readers never observe a half-written file.
        let path = self.entry_path(key);
        let staging = path.with_extension(format!("{}.tmp", std::process::id()));
        fs::write(&staging, text)?;
        fs::rename(&staging, &path)
    }
}

impl MetaCache for FileMetaCache {
    fn exists(&self, key: &str) -> bool {
        self.entry_path(key).is_file()
    }

    fn get(&self, key: &str) -> Option<Tags> {
        let path = self.entry_path(key);
        let text = match fs::read(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("cannot read metadata cache entry {}: {err}", path.display());
                return None;
            }
        };

        match serde_json::from_slice(&text) {
            Ok(tags) => Some(tags),
            Err(err) => {
                log::warn!("corrupt metadata cache entry {}: {err}", path.display());
                None
            }
        }
    }

    fn set(&self, key: &str, tags: Tags) {
        if let Err(err) = self.write_entry(key, &tags) {
            log::warn!(
                "cannot write metadata cache entry for `{key}` under {}: {err}",
                self.dir.display(),
            );
        }
    }
}
