use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use rustyline::completion::Pair;

/// Completes path arguments. Relative input is looked up against the
/// shell's working directory, which is shared with the prompt.
#[derive(Clone)]
pub struct PathCompleter {
    base: Arc<Mutex<PathBuf>>,
}

impl PathCompleter {
    pub fn new(base: Arc<Mutex<PathBuf>>) -> Self {
        Self { base }
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = split_input(incomplete);
        let Ok(base) = self.base.lock().map(|base| base.clone()) else {
            return Vec::new();
        };

        let search_dir = if typed_dir.is_empty() {
            base
        } else {
            base.join(expand_home(typed_dir))
        };
        get_path_matches(&search_dir, typed_dir, file_prefix)
    }
}

/// Splits `a/b/fi` into the typed directory part `a/b/` and the prefix `fi`.
fn split_input(incomplete: &str) -> (&str, &str) {
    match incomplete.rfind('/') {
        Some(pos) => incomplete.split_at(pos + 1),
        None => ("", incomplete),
    }
}

fn expand_home(typed_dir: &str) -> PathBuf {
    match (typed_dir.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(typed_dir),
    }
}

fn get_path_matches(search_dir: &Path, typed_dir: &str, file_prefix: &str) -> Vec<Pair> {
    let Ok(entries) = fs::read_dir(search_dir) else {
        return Vec::new();
    };

    let mut matches: Vec<Pair> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if !name.starts_with(file_prefix) || (file_prefix.is_empty() && name.starts_with('.')) {
                return None;
            }
            Some(create_completion_pair(&name, &entry.path(), typed_dir))
        })
        .collect();

    matches.sort_by(|a, b| a.display.cmp(&b.display));
    matches
}

fn create_completion_pair(name: &str, path: &Path, typed_dir: &str) -> Pair {
    let full = format!("{typed_dir}{name}");
    if path.is_dir() {
        Pair {
            display: format!("{name}/"),
            replacement: format!("{full}/"),
        }
    } else {
        Pair {
            display: name.to_string(),
            replacement: format!("{full} "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn replacements(completer: &PathCompleter, input: &str) -> Vec<String> {
        completer
            .complete_path(input)
            .into_iter()
            .map(|pair| pair.replacement)
            .collect()
    }

    #[test]
    fn test_completes_relative_to_base() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("data/inner")).unwrap();
        fs::write(temp.path().join("data/file.txt"), "x").unwrap();
        fs::write(temp.path().join("notes.txt"), "x").unwrap();
        let completer = PathCompleter::new(Arc::new(Mutex::new(temp.path().to_path_buf())));

        assert_eq!(replacements(&completer, "d"), vec!["data/"]);
        assert_eq!(replacements(&completer, "data/"), vec!["data/file.txt ", "data/inner/"]);
        assert_eq!(replacements(&completer, "data/f"), vec!["data/file.txt "]);
        assert!(replacements(&completer, "missing/").is_empty());
    }

    #[test]
    fn test_follows_base_changes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        fs::write(temp.path().join("a/inside"), "x").unwrap();
        let base = Arc::new(Mutex::new(temp.path().to_path_buf()));
        let completer = PathCompleter::new(Arc::clone(&base));

        *base.lock().unwrap() = temp.path().join("a");

        assert_eq!(replacements(&completer, "in"), vec!["inside "]);
    }
}
