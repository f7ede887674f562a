//! Component file index
//!
//! Maps a logical component key (e.g. `card`) to the single source file that
//! carries its embedded definition (e.g. `/project/src/card/card.sf.ts`).
//!
//! Directories are read concurrently, one task per directory. Each task only
//! returns what it saw; the index itself is assembled after every task has
//! been joined, so there is no shared map under concurrent mutation. Entries
//! are sorted by path before insertion, which makes duplicate resolution
//! independent of the order in which directory reads complete.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{Error, Result};

/// Directory names that are never descended into by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules"];

/// Predicate deciding whether a directory (by name) is scanned.
pub type IncludeFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Maps a file name to its logical key, or `None` if the file is not indexed.
pub type ExtractFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Default directory predicate: everything except dependency caches.
pub fn default_include(dir_name: &str) -> bool {
    !DEFAULT_EXCLUDED_DIRS.contains(&dir_name)
}

/// The `<key>.<tag>.<ext>` naming convention used by component files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNaming {
    tag: String,
    extensions: Vec<String>,
}

impl FileNaming {
    pub fn new(tag: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            tag: tag.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Return the key for a matching file name.
    ///
    /// The key is everything before the first dot and must be non-empty.
    pub fn key_for(&self, file_name: &str) -> Option<String> {
        let (key, rest) = file_name.split_once('.')?;
        if key.is_empty() {
            return None;
        }
        let ext = rest.strip_prefix(self.tag.as_str())?.strip_prefix('.')?;
        self.extensions
            .iter()
            .any(|e| e == ext)
            .then(|| key.to_string())
    }

    /// Human-readable name of the file expected for `key`, e.g. `card.sf.(ts|js)`.
    pub fn expected_file_name(&self, key: &str) -> String {
        format!("{}.{}.({})", key, self.tag, self.extensions.join("|"))
    }
}

/// Two files resolved to the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    /// Path now held by the index.
    pub kept: PathBuf,
    /// Path that was overwritten.
    pub replaced: PathBuf,
}

/// Key to absolute path mapping, at most one path per key.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    entries: BTreeMap<String, PathBuf>,
    duplicates: Vec<DuplicateKey>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` for `key`, replacing (and remembering) any earlier path.
    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<PathBuf>) {
        let key = key.into();
        let path = path.into();
        if let Some(replaced) = self.entries.insert(key.clone(), path.clone())
            && replaced != path
        {
            tracing::warn!(
                key = %key,
                kept = %path.display(),
                replaced = %replaced.display(),
                "Several files map to the same component key"
            );
            self.duplicates.push(DuplicateKey {
                key,
                kept: path,
                replaced,
            });
        }
    }

    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(k, p)| (k.as_str(), p.as_path()))
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }
}

/// What a single directory read produced.
#[derive(Debug, Default)]
struct Listing {
    files: Vec<(String, PathBuf)>,
    subdirs: Vec<PathBuf>,
}

/// Builds a [`FileIndex`] from a directory tree.
#[derive(Clone)]
pub struct IndexBuilder {
    include: IncludeFn,
    extract: ExtractFn,
}

impl std::fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuilder").finish_non_exhaustive()
    }
}

impl IndexBuilder {
    pub fn new<I, E>(include: I, extract: E) -> Self
    where
        I: Fn(&str) -> bool + Send + Sync + 'static,
        E: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            include: Arc::new(include),
            extract: Arc::new(extract),
        }
    }

    /// Builder for a naming convention with the default directory predicate.
    pub fn for_naming(naming: FileNaming) -> Self {
        Self::new(default_include, move |name| naming.key_for(name))
    }

    /// Walk `root` and build the index.
    ///
    /// # Errors
    ///
    /// Any unreadable directory aborts the scan; scans still in flight are
    /// cancelled when the join set is dropped.
    pub async fn build(&self, root: &Path) -> Result<FileIndex> {
        let root = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;
        tracing::debug!(root = %root.display(), "Scanning for component files");

        let mut scans = JoinSet::new();
        scans.spawn(scan_dir(
            root.clone(),
            Arc::clone(&self.include),
            Arc::clone(&self.extract),
        ));

        let mut found = Vec::new();
        while let Some(joined) = scans.join_next().await {
            let listing = joined.map_err(|e| Error::ScanInterrupted {
                root: root.clone(),
                message: e.to_string(),
            })??;

            for dir in listing.subdirs {
                scans.spawn(scan_dir(
                    dir,
                    Arc::clone(&self.include),
                    Arc::clone(&self.extract),
                ));
            }
            found.extend(listing.files);
        }

        found.sort_by(|a, b| a.1.cmp(&b.1));

        let mut index = FileIndex::new();
        for (key, path) in found {
            index.insert(key, path);
        }

        tracing::debug!(files = index.len(), "Component file index built");
        Ok(index)
    }
}

async fn scan_dir(dir: PathBuf, include: IncludeFn, extract: ExtractFn) -> Result<Listing> {
    let mut entries = tokio::fs::read_dir(&dir)
        .await
        .map_err(|e| Error::io(&dir, e))?;

    let mut listing = Listing::default();
    while let Some(entry) = entries.next_entry().await.map_err(|e| Error::io(&dir, e))? {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| Error::io(entry.path(), e))?;

        let file_name = entry.file_name();
        // Non UTF-8 names can never match a naming convention
        let Some(name) = file_name.to_str() else {
            continue;
        };

        if file_type.is_dir() {
            if include(name) {
                listing.subdirs.push(entry.path());
            }
        } else if file_type.is_file()
            && let Some(key) = extract(name)
        {
            listing.files.push((key, entry.path()));
        }
    }

    Ok(listing)
}
