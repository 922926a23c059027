use std::path::{Path, PathBuf};

use crate::core::commands::CommandError;

/// Expands a leading `~` to the home directory.
///
/// The home directory is looked up through `dirs` unless one was pinned
/// with [`PathExpander::with_home`].
#[derive(Clone, Debug, Default)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    pub fn new() -> Self {
        Self { home: None }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, CommandError> {
        if self.is_home_path(path) {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, CommandError> {
        let mut home_path = self.home_dir()?;
        if let Some(stripped) = path.strip_prefix("~/") {
            for part in stripped.split('/') {
                if !part.is_empty() {
                    home_path.push(part);
                }
            }
        }
        Ok(home_path)
    }

    /// `~` and `~/...` only; `~user` is left alone.
    pub fn is_home_path(&self, path: &str) -> bool {
        path == "~" || path.starts_with("~/")
    }

    pub fn home_dir(&self) -> Result<PathBuf, CommandError> {
        match &self.home {
            Some(home) => Ok(home.clone()),
            None => dirs::home_dir().ok_or(CommandError::HomeDirNotFound),
        }
    }
}
