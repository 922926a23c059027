//! The shell's working directory and its on-disk record.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Notified synchronously every time the working directory changes.
pub trait DirectoryObserver {
    fn directory_changed(&mut self, path: &Path);
}

impl<F: FnMut(&Path)> DirectoryObserver for F {
    fn directory_changed(&mut self, path: &Path) {
        self(path)
    }
}

/// Owns the current working directory and persists it to a single-line
/// text file, so the next process starts where this one left off.
pub struct WorkingDirectoryStore {
    current: PathBuf,
    state_file: PathBuf,
    observer: Option<Box<dyn DirectoryObserver>>,
}

impl fmt::Debug for WorkingDirectoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkingDirectoryStore")
            .field("current", &self.current)
            .field("state_file", &self.state_file)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl WorkingDirectoryStore {
    /// Loads the persisted record, falling back to the process's current
    /// directory.
    pub fn load(state_file: impl Into<PathBuf>) -> io::Result<Self> {
        let fallback = env::current_dir()?;
        Self::load_with_fallback(state_file, &fallback)
    }

    /// Loads the persisted record. An empty, unreadable or stale record is
    /// replaced by `fallback`, which is written back immediately.
    pub fn load_with_fallback(state_file: impl Into<PathBuf>, fallback: &Path) -> io::Result<Self> {
        let state_file = state_file.into();

        match read_record(&state_file) {
            Some(current) => {
                debug!(path = %current.display(), "restored working directory");
                Ok(Self {
                    current,
                    state_file,
                    observer: None,
                })
            }
            None => {
                warn!(
                    state_file = %state_file.display(),
                    fallback = %fallback.display(),
                    "no usable working directory record, using fallback"
                );
                write_record(&state_file, fallback)?;
                Ok(Self {
                    current: fallback.to_path_buf(),
                    state_file,
                    observer: None,
                })
            }
        }
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Registers the observer, replacing any previous one. It is called
    /// once right away with the current value.
    pub fn observe(&mut self, mut observer: impl DirectoryObserver + 'static) {
        observer.directory_changed(&self.current);
        self.observer = Some(Box::new(observer));
    }

    /// Persists `path`, then adopts it as the working directory and
    /// notifies the observer. On error nothing changes.
    pub fn set(&mut self, path: impl Into<PathBuf>) -> io::Result<()> {
        let path = path.into();
        write_record(&self.state_file, &path)?;
        self.current = path;
        info!(path = %self.current.display(), "working directory changed");

        if let Some(observer) = self.observer.as_mut() {
            observer.directory_changed(&self.current);
        }
        Ok(())
    }

}

/// Whole-file replace: write a sibling temp file, then rename over the
/// record.
fn write_record(state_file: &Path, path: &Path) -> io::Result<()> {
    if let Some(parent) = state_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = state_file.with_extension("tmp");
    fs::write(&tmp, path.to_string_lossy().as_bytes())?;
    fs::rename(&tmp, state_file)
}

fn read_record(state_file: &Path) -> Option<PathBuf> {
    let content = fs::read_to_string(state_file).ok()?;
    let line = content.lines().next()?.trim_end();
    if line.is_empty() {
        return None;
    }

    let path = PathBuf::from(line);
    (path.is_absolute() && path.is_dir()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn test_missing_record_falls_back_and_persists() {
        let temp = TempDir::new().unwrap();
        let state_file = temp.path().join("state/cwd");

        let store = WorkingDirectoryStore::load_with_fallback(&state_file, temp.path()).unwrap();

        assert_eq!(store.current(), temp.path());
        assert_eq!(
            fs::read_to_string(&state_file).unwrap(),
            temp.path().to_string_lossy()
        );
    }

    #[test]
    fn test_stale_record_falls_back() {
        let temp = TempDir::new().unwrap();
        let state_file = temp.path().join("cwd");
        fs::write(&state_file, temp.path().join("deleted").to_string_lossy().as_bytes()).unwrap();

        let store = WorkingDirectoryStore::load_with_fallback(&state_file, temp.path()).unwrap();
        assert_eq!(store.current(), temp.path());
    }

    #[test]
    fn test_empty_record_falls_back() {
        let temp = TempDir::new().unwrap();
        let state_file = temp.path().join("cwd");
        fs::write(&state_file, "").unwrap();

        let store = WorkingDirectoryStore::load_with_fallback(&state_file, temp.path()).unwrap();
        assert_eq!(store.current(), temp.path());
    }

    #[test]
    fn test_set_round_trips_through_load() {
        let temp = TempDir::new().unwrap();
        let state_file = temp.path().join("cwd");
        let target = temp.path().join("data");
        fs::create_dir(&target).unwrap();

        let mut store = WorkingDirectoryStore::load_with_fallback(&state_file, temp.path()).unwrap();
        store.set(&target).unwrap();

        let reloaded = WorkingDirectoryStore::load_with_fallback(&state_file, Path::new("/")).unwrap();
        assert_eq!(reloaded.current(), target);
    }

    #[test]
    fn test_observer_sees_every_change() {
        let temp = TempDir::new().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let mut store =
            WorkingDirectoryStore::load_with_fallback(temp.path().join("cwd"), temp.path()).unwrap();
        let sink = Rc::clone(&seen);
        store.observe(move |path: &Path| sink.borrow_mut().push(path.to_path_buf()));
        store.set("/").unwrap();

        assert_eq!(*seen.borrow(), vec![temp.path().to_path_buf(), PathBuf::from("/")]);
    }

    #[test]
    fn test_failed_set_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let state_dir = temp.path().join("state");
        let target = temp.path().join("data");
        fs::create_dir(&target).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let mut store =
            WorkingDirectoryStore::load_with_fallback(state_dir.join("cwd"), temp.path()).unwrap();
        let sink = Rc::clone(&seen);
        store.observe(move |path: &Path| sink.borrow_mut().push(path.to_path_buf()));
        // the record's directory turns into a file, so persisting must fail
        fs::remove_dir_all(&state_dir).unwrap();
        fs::write(&state_dir, "blocker").unwrap();

        assert!(store.set(&target).is_err());
        assert_eq!(store.current(), temp.path());
        assert_eq!(*seen.borrow(), vec![temp.path().to_path_buf()]);
    }

    #[test]
    fn test_persist_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = WorkingDirectoryStore::load_with_fallback(blocker.join("cwd"), temp.path());
        assert!(result.is_err());
    }
}
