//! Turns user-typed path strings into validated absolute paths.
//!
//! Resolution is lexical: the raw string is joined onto the working
//! directory and `.`/`..` segments are collapsed without consulting the
//! filesystem. Only the final path is checked for existence and type.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::PathExpander;
use crate::core::commands::CommandError;

/// What a command expects to find at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PathResolver {
    expander: PathExpander,
}

impl PathResolver {
    pub fn new(expander: PathExpander) -> Self {
        Self { expander }
    }

    /// Joins `raw` onto `working_dir` and normalizes the result.
    /// Nothing is checked against the filesystem.
    pub fn join(&self, working_dir: &Path, raw: &str) -> Result<PathBuf, CommandError> {
        let expanded = self.expander.expand(raw)?;
        Ok(normalize(&working_dir.join(expanded)))
    }

    /// Resolves `raw` and checks that it exists and, when `expected` is
    /// given, that it is of that kind. Symlinks are followed for the type
    /// check.
    pub fn resolve(
        &self,
        working_dir: &Path,
        raw: &str,
        expected: Option<EntryKind>,
    ) -> Result<PathBuf, CommandError> {
        let path = self.join(working_dir, raw)?;
        check_entry(&path, expected)?;
        Ok(path)
    }

    /// Checks an already absolute path for existence and kind.
    pub fn check(&self, path: &Path, expected: Option<EntryKind>) -> Result<(), CommandError> {
        check_entry(path, expected)
    }

    /// Resolution rules for `cd`: `..` is the lexical parent of the
    /// working directory (the root is its own parent) and `~` is the home
    /// directory. Everything else must be an existing directory.
    pub fn resolve_directory_change(
        &self,
        working_dir: &Path,
        raw: &str,
    ) -> Result<PathBuf, CommandError> {
        match raw {
            ".." => Ok(working_dir.parent().unwrap_or(working_dir).to_path_buf()),
            "~" => {
                let home = self.expander.home_dir()?;
                check_entry(&home, Some(EntryKind::Directory))?;
                Ok(home)
            }
            _ => self.resolve(working_dir, raw, Some(EntryKind::Directory)),
        }
    }
}

fn check_entry(path: &Path, expected: Option<EntryKind>) -> Result<(), CommandError> {
    // symlink_metadata so that a dangling link still counts as present
    if fs::symlink_metadata(path).is_err() {
        return Err(CommandError::NotFound(path.to_path_buf()).logged());
    }

    let Some(expected) = expected else {
        return Ok(());
    };

    let is_dir = fs::metadata(path)
        .map(|meta| meta.is_dir())
        .map_err(|_| CommandError::NotFound(path.to_path_buf()).logged())?;

    match (expected, is_dir) {
        (EntryKind::Directory, false) => {
            Err(CommandError::NotADirectory(path.to_path_buf()).logged())
        }
        (EntryKind::File, true) => Err(CommandError::IsADirectory(path.to_path_buf()).logged()),
        _ => Ok(()),
    }
}

/// Collapses `.` and `..` segments and redundant separators.
///
/// `..` never climbs above the root of an absolute path.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathResolver) {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("data")).unwrap();
        fs::create_dir(temp.path().join("data/nested")).unwrap();
        fs::write(temp.path().join("file.txt"), "test").unwrap();
        let resolver = PathResolver::new(PathExpander::with_home(temp.path()));
        (temp, resolver)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b//c/../d")), PathBuf::from("/a/b/d"));
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_resolve_relative_directory() {
        let (temp, resolver) = setup();
        let path = resolver
            .resolve(temp.path(), "data/./nested/..", Some(EntryKind::Directory))
            .unwrap();
        assert_eq!(path, temp.path().join("data"));
    }

    #[test]
    fn test_resolve_absolute_ignores_working_dir() {
        let (temp, resolver) = setup();
        let target = temp.path().join("data/nested");
        let path = resolver
            .resolve(Path::new("/nowhere"), target.to_str().unwrap(), None)
            .unwrap();
        assert_eq!(path, target);
    }

    #[test]
    fn test_resolve_missing() {
        let (temp, resolver) = setup();
        for expected in [None, Some(EntryKind::File), Some(EntryKind::Directory)] {
            let result = resolver.resolve(temp.path(), "missing", expected);
            assert!(matches!(result, Err(CommandError::NotFound(_))));
        }
    }

    #[test]
    fn test_resolve_type_mismatch() {
        let (temp, resolver) = setup();
        assert!(matches!(
            resolver.resolve(temp.path(), "file.txt", Some(EntryKind::Directory)),
            Err(CommandError::NotADirectory(_))
        ));
        assert!(matches!(
            resolver.resolve(temp.path(), "data", Some(EntryKind::File)),
            Err(CommandError::IsADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_follows_symlinks_for_type() {
        let (temp, resolver) = setup();
        std::os::unix::fs::symlink(temp.path().join("data"), temp.path().join("link")).unwrap();
        assert!(resolver
            .resolve(temp.path(), "link", Some(EntryKind::Directory))
            .is_ok());
        assert!(matches!(
            resolver.resolve(temp.path(), "link", Some(EntryKind::File)),
            Err(CommandError::IsADirectory(_))
        ));
    }

    #[test]
    fn test_directory_change_parent() {
        let (temp, resolver) = setup();
        let nested = temp.path().join("data/nested");
        assert_eq!(
            resolver.resolve_directory_change(&nested, "..").unwrap(),
            temp.path().join("data")
        );
        assert_eq!(
            resolver.resolve_directory_change(Path::new("/"), "..").unwrap(),
            PathBuf::from("/")
        );
    }

    #[test]
    fn test_directory_change_home() {
        let (temp, resolver) = setup();
        assert_eq!(
            resolver
                .resolve_directory_change(Path::new("/"), "~")
                .unwrap(),
            temp.path()
        );

        let gone = PathResolver::new(PathExpander::with_home(temp.path().join("gone")));
        assert!(matches!(
            gone.resolve_directory_change(Path::new("/"), "~"),
            Err(CommandError::NotFound(_))
        ));
    }
}
