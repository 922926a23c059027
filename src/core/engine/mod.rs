//! The filesystem operations behind every shell command.
//!
//! Each operation resolves its arguments through [`PathResolver`] before
//! touching anything. Arguments are raw user strings; relative ones are
//! taken against the store's working directory, never the process cwd.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

mod archive;
mod confirm;
mod listing;
mod transfer;

pub use confirm::{Confirm, PromptConfirm};
pub use listing::{EntryDetails, ListEntry};

use crate::core::commands::CommandError;
use crate::core::state::WorkingDirectoryStore;
use crate::path::{EntryKind, PathResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    Text,
    Binary,
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadMode::Text => write!(f, "text"),
            ReadMode::Binary => write!(f, "binary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Text(text) => text.as_bytes(),
            FileContent::Binary(bytes) => bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
}

#[derive(Debug)]
pub struct CommandEngine {
    store: WorkingDirectoryStore,
    resolver: PathResolver,
}

impl CommandEngine {
    pub fn new(store: WorkingDirectoryStore, resolver: PathResolver) -> Self {
        Self { store, resolver }
    }

    pub fn working_dir(&self) -> &Path {
        self.store.current()
    }

    pub fn store_mut(&mut self) -> &mut WorkingDirectoryStore {
        &mut self.store
    }

    fn resolve(&self, raw: &str, expected: Option<EntryKind>) -> Result<PathBuf, CommandError> {
        self.resolver.resolve(self.store.current(), raw, expected)
    }

    /// Immediate children of a directory, sorted by name.
    pub fn list(&self, raw: &str, detailed: bool) -> Result<Vec<ListEntry>, CommandError> {
        let path = self.resolve(raw, Some(EntryKind::Directory))?;
        debug!(path = %path.display(), detailed, "listing");

        let read_error = |e: io::Error| {
            CommandError::io(format!("failed to list {}", path.display()), e).logged()
        };
        let mut entries = fs::read_dir(&path)
            .map_err(read_error)?
            .map(|entry| entry.and_then(|entry| ListEntry::from_dir_entry(&entry, detailed)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        info!(path = %path.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }

    pub fn read(&self, raw: &str, mode: ReadMode) -> Result<FileContent, CommandError> {
        let path = self.resolve(raw, Some(EntryKind::File))?;
        info!(path = %path.display(), %mode, "reading file");

        let read_error = |e: io::Error| {
            CommandError::io(format!("failed to read {}", path.display()), e).logged()
        };
        let content = match mode {
            ReadMode::Text => fs::read_to_string(&path).map(FileContent::Text),
            ReadMode::Binary => fs::read(&path).map(FileContent::Binary),
        };
        content.map_err(read_error)
    }

    /// Moves the working directory and persists the new value.
    pub fn change_directory(&mut self, raw: &str) -> Result<&Path, CommandError> {
        let path = self
            .resolver
            .resolve_directory_change(self.store.current(), raw)?;
        debug!(path = %path.display(), "changing directory");

        self.store.set(&path).map_err(|e| {
            CommandError::io(
                format!(
                    "failed to persist working directory to {}",
                    self.store.state_file().display()
                ),
                e,
            )
            .logged()
        })?;
        Ok(self.store.current())
    }

    /// Copies `source` into the directory `destination`, returning the
    /// path of the copy.
    pub fn copy(
        &self,
        source: &str,
        destination: &str,
        recursive: bool,
    ) -> Result<PathBuf, CommandError> {
        let source = self.resolve(source, None)?;
        let destination = self.resolve(destination, Some(EntryKind::Directory))?;
        let is_dir = source.is_dir();

        if recursive && !is_dir {
            return Err(CommandError::misuse("use without recursive flag to copy a file").logged());
        }
        if !recursive && is_dir {
            return Err(CommandError::misuse("use recursive flag to copy a directory").logged());
        }

        let target = target_in(&source, &destination)?;
        debug!(source = %source.display(), target = %target.display(), "copying");

        let copy_error = |e: io::Error| {
            CommandError::io(
                format!("failed to copy {} to {}", source.display(), destination.display()),
                e,
            )
            .logged()
        };
        // copying walks through a symlinked source, so compare real paths too
        if is_dir && is_within(&destination, &source) {
            return Err(CommandError::misuse("cannot copy a directory into itself").logged());
        }
        if is_same_entry(&source, &target) {
            return Err(CommandError::misuse(format!(
                "{} and {} are the same file",
                source.display(),
                target.display()
            ))
            .logged());
        }
        if is_dir {
            transfer::copy_tree(&source, &target).map_err(copy_error)?;
        } else {
            transfer::copy_file(&source, &target).map_err(copy_error)?;
        }

        info!(source = %source.display(), target = %target.display(), "copied");
        Ok(target)
    }

    /// Moves `source` into the directory `destination`, returning its new
    /// path.
    pub fn move_entry(&self, source: &str, destination: &str) -> Result<PathBuf, CommandError> {
        let source = self.resolve(source, None)?;
        let destination = self.resolve(destination, Some(EntryKind::Directory))?;

        if is_within_entry(&destination, &source) {
            return Err(CommandError::misuse("cannot move a directory into itself").logged());
        }
        let target = target_in(&source, &destination)?;
        if fs::symlink_metadata(&target).is_ok() {
            return Err(CommandError::AlreadyExists(target).logged());
        }
        debug!(source = %source.display(), target = %target.display(), "moving");

        transfer::move_path(&source, &target).map_err(|e| {
            CommandError::io(
                format!("failed to move {} to {}", source.display(), destination.display()),
                e,
            )
            .logged()
        })?;

        info!(source = %source.display(), target = %target.display(), "moved");
        Ok(target)
    }

    /// Deletes a file, or a whole directory tree, once `confirm` agrees.
    /// The working directory and its ancestors are never removed.
    pub fn remove(
        &self,
        raw: &str,
        recursive: bool,
        confirm: &mut dyn Confirm,
    ) -> Result<RemoveOutcome, CommandError> {
        let target = self.resolve(raw, None)?;
        if self.is_working_dir_within(&target) {
            return Err(CommandError::SafetyViolation(target).logged());
        }

        let question = format!("Are you sure you want to remove {}?", target.display());
        let agreed = confirm
            .confirm(&question)
            .map_err(|e| CommandError::io("failed to read confirmation", e).logged())?;
        if !agreed {
            info!(path = %target.display(), "removal cancelled");
            return Ok(RemoveOutcome::Cancelled);
        }
        debug!(path = %target.display(), recursive, "removing");

        let remove_error = |e: io::Error| {
            CommandError::io(format!("failed to remove {}", target.display()), e).logged()
        };
        // a symlink is unlinked, never followed into its target
        let metadata = fs::symlink_metadata(&target).map_err(remove_error)?;
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_file(&target)
        };
        removed.map_err(remove_error)?;

        info!(path = %target.display(), "removed");
        Ok(RemoveOutcome::Removed)
    }

    fn is_working_dir_within(&self, target: &Path) -> bool {
        is_within_entry(self.store.current(), target)
    }

    /// Packs a folder into a new ZIP archive. `archive_name` defaults to the
    /// folder's name; `.zip` is appended when missing.
    pub fn archive(
        &self,
        folder: &str,
        archive_name: Option<&str>,
    ) -> Result<ArchiveSummary, CommandError> {
        let folder = self.resolve(folder, Some(EntryKind::Directory))?;

        let name = match archive_name.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => folder
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "archive".to_string()),
        };
        let mut archive_path = self.resolver.join(self.store.current(), &name)?;
        if archive_path.extension().is_none_or(|ext| ext != "zip") {
            let mut with_ext = archive_path.into_os_string();
            with_ext.push(".zip");
            archive_path = PathBuf::from(with_ext);
        }

        if let Some(parent) = archive_path.parent() {
            self.resolver.check(parent, Some(EntryKind::Directory))?;
        }
        if fs::symlink_metadata(&archive_path).is_ok() {
            return Err(CommandError::AlreadyExists(archive_path).logged());
        }
        debug!(folder = %folder.display(), archive = %archive_path.display(), "archiving");

        let entries = archive::write_archive(&folder, &archive_path).map_err(|source| {
            if let Err(e) = fs::remove_file(&archive_path) {
                warn!(archive = %archive_path.display(), "could not remove partial archive: {e}");
            }
            CommandError::Archive {
                context: format!("failed to archive {}", folder.display()),
                source,
            }
            .logged()
        })?;

        info!(
            folder = %folder.display(),
            archive = %archive_path.display(),
            entries,
            "archived"
        );
        Ok(ArchiveSummary {
            path: archive_path,
            entries,
        })
    }
}

/// Whether `inner` is `outer` or lies below it, either lexically or once
/// symlinks on both sides are resolved.
fn is_within(inner: &Path, outer: &Path) -> bool {
    if inner.starts_with(outer) {
        return true;
    }

    match (fs::canonicalize(inner), fs::canonicalize(outer)) {
        (Ok(inner), Ok(outer)) => inner.starts_with(outer),
        _ => false,
    }
}

/// Like [`is_within`], but a symlink `outer` stands for the link itself.
/// Unlinking or renaming a link never touches what it points to.
fn is_within_entry(inner: &Path, outer: &Path) -> bool {
    let is_link = fs::symlink_metadata(outer).is_ok_and(|meta| meta.file_type().is_symlink());
    if is_link {
        inner.starts_with(outer)
    } else {
        is_within(inner, outer)
    }
}

/// Whether both paths name the same existing entry.
fn is_same_entry(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// `destination/<name of source>`.
fn target_in(source: &Path, destination: &Path) -> Result<PathBuf, CommandError> {
    source
        .file_name()
        .map(|name| destination.join(name))
        .ok_or_else(|| {
            CommandError::misuse(format!("{} has no file name", source.display())).logged()
        })
}
