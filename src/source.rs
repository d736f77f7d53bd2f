//! # Source Files and Registry
//!
//! Every physical file taking part in a combine run is represented by one
//! [`SourceFile`] record, owned by a [`SourceRegistry`] and keyed by its
//! canonical absolute path. Dependency lists refer to other records through
//! [`SourceId`] handles, so a file required from many places is still a
//! single record, parsed once.
//!
//! Records are appended in first-reference order and never removed; that
//! order is what later phases use to break ties deterministically.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Handle to a record in a [`SourceRegistry`].
///
/// Ids compare in first-reference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(usize);

impl SourceId {
    /// Position of the record in first-reference order.
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// One physical source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    directory: PathBuf,
    /// `None` until the file has been parsed.
    contents: Option<String>,
    dependencies: Vec<SourceId>,
}

impl SourceFile {
    fn new(path: PathBuf) -> Self {
        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        Self {
            path,
            directory,
            contents: None,
            dependencies: Vec::new(),
        }
    }

    /// Canonical absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that relative `/*requires */` references are resolved against.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name used in separator markers.
    pub fn name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }

    /// Directive-stripped contents, once parsed.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn is_parsed(&self) -> bool {
        self.contents.is_some()
    }

    /// Declared dependencies, in declaration order.
    pub fn dependencies(&self) -> &[SourceId] {
        &self.dependencies
    }
}

/// Canonical-path keyed store of [`SourceFile`] records for one run.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    files: Vec<SourceFile>,
    index: HashMap<PathBuf, SourceId>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record for `path`, creating an unparsed one on first use.
    ///
    /// The path is canonicalized, so different spellings of the same file
    /// (relative, `..`, symlinks) share one record. Fails if the path cannot
    /// be canonicalized, typically because it does not exist.
    pub fn get<P: AsRef<Path>>(&mut self, path: P) -> Result<SourceId> {
        let path = path.as_ref();
        let canonical = fs::canonicalize(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.get_canonical(canonical))
    }

    fn get_canonical(&mut self, canonical: PathBuf) -> SourceId {
        if let Some(&id) = self.index.get(&canonical) {
            return id;
        }
        let id = SourceId(self.files.len());
        self.files.push(SourceFile::new(canonical.clone()));
        self.index.insert(canonical, id);
        id
    }

    /// Look up an existing record without creating one.
    pub fn lookup<P: AsRef<Path>>(&self, path: P) -> Option<SourceId> {
        let canonical = fs::canonicalize(path).ok()?;
        self.index.get(&canonical).copied()
    }

    /// Borrow a record. Ids are only ever handed out by this registry.
    pub fn file(&self, id: SourceId) -> &SourceFile {
        &self.files[id.0]
    }

    /// Record the result of parsing `id`.
    ///
    /// Contents are set exactly once; a second call for the same file is
    /// ignored and returns `false`.
    pub(crate) fn complete(
        &mut self,
        id: SourceId,
        contents: String,
        dependencies: Vec<SourceId>,
    ) -> bool {
        let file = &mut self.files[id.0];
        if file.contents.is_some() {
            return false;
        }
        file.contents = Some(contents);
        file.dependencies = dependencies;
        true
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All records in first-reference order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| (SourceId(index), file))
    }
}
