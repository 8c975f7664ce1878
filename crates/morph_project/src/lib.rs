//! morph_project: The set of TypeScript files a generation run sees.
//!
//! A [`Project`] owns file texts in load order. Files are added in memory or
//! discovered under a root directory. [`ParsedProject`] is a parsed snapshot
//! of a project, borrowed from one arena; the generator builds a fresh
//! snapshot for every phase that needs to see edited text.

mod discover;
mod parsed;

pub use discover::{glob_match, DiscoveryOptions};
pub use parsed::{ParsedFile, ParsedProject};

use morph_core::collections::FxHashMap;
use morph_tspath::normalize_path;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Index of a file within a [`Project`], stable across re-parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl FileId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project root '{}' is not a directory", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project has no root directory to write '{0}' to")]
    InMemory(String),

    #[error("no file {0} in project")]
    UnknownFile(FileId),
}

/// One source file: its project-relative path and current text.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: String,
    text: String,
    modified: bool,
}

impl ProjectFile {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the text changed since the file was added or last written.
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

#[derive(Debug, Clone, Default)]
pub struct Project {
    root: Option<PathBuf>,
    files: Vec<ProjectFile>,
    by_path: FxHashMap<String, FileId>,
}

impl Project {
    /// An empty in-memory project.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty project whose files are written under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Load every file under `root` matched by `options`, in sorted path order.
    pub fn discover(root: impl AsRef<Path>, options: &DiscoveryOptions) -> Result<Self, ProjectError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ProjectError::RootNotFound(root.to_path_buf()));
        }
        let mut project = Project::with_root(root);
        for relative in discover::discover_source_files(root, options) {
            let path = root.join(&relative);
            let text = std::fs::read_to_string(&path).map_err(|source| ProjectError::Read { path, source })?;
            project.add_file(relative, text);
        }
        info!(root = %root.display(), files = project.len(), "loaded project");
        Ok(project)
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Add a file, or replace the text of the file with the same path.
    /// A replaced file keeps its load position.
    pub fn add_file(&mut self, path: impl AsRef<str>, text: impl Into<String>) -> FileId {
        let path = normalize_path(path.as_ref());
        let text = text.into();
        if let Some(&id) = self.by_path.get(&path) {
            let file = &mut self.files[id.index()];
            file.modified |= file.text != text;
            file.text = text;
            return id;
        }
        let id = FileId(self.files.len() as u32);
        debug!(%path, %id, "added file");
        self.by_path.insert(path.clone(), id);
        self.files.push(ProjectFile {
            path,
            text,
            modified: false,
        });
        id
    }

    pub fn set_text(&mut self, id: FileId, text: impl Into<String>) -> Result<(), ProjectError> {
        let file = self.files.get_mut(id.index()).ok_or(ProjectError::UnknownFile(id))?;
        let text = text.into();
        if file.text != text {
            file.text = text;
            file.modified = true;
        }
        Ok(())
    }

    pub fn file(&self, id: FileId) -> Option<&ProjectFile> {
        self.files.get(id.index())
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.by_path.get(&normalize_path(path)).copied()
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &ProjectFile)> {
        self.files.iter().enumerate().map(|(i, f)| (FileId(i as u32), f))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Persist a file's current text under the project root.
    pub fn write_file(&mut self, id: FileId) -> Result<PathBuf, ProjectError> {
        let file = self.files.get_mut(id.index()).ok_or(ProjectError::UnknownFile(id))?;
        let root = self.root.as_ref().ok_or_else(|| ProjectError::InMemory(file.path.clone()))?;
        let path = root.join(&file.path);
        std::fs::write(&path, &file.text).map_err(|source| ProjectError::Write {
            path: path.clone(),
            source,
        })?;
        file.modified = false;
        info!(path = %path.display(), "wrote file");
        Ok(path)
    }
}
