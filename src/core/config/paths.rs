use super::ConfigError;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "burrow";
const STATE_FILE: &str = "cwd";
const LOG_FILE: &str = "burrow.log";
const HISTORY_FILE: &str = "history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub state_dir: PathBuf,
    pub state_file: PathBuf,
    pub log_file: PathBuf,
    pub history_file: PathBuf,
}

impl ConfigPaths {
    /// Lays out the state files under `state_dir`, or under the platform's
    /// local data directory when none is given.
    pub fn new(state_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let state_dir = match state_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_state_dir()?,
        };

        Ok(Self::in_dir(state_dir))
    }

    pub fn in_dir(state_dir: PathBuf) -> Self {
        ConfigPaths {
            state_file: state_dir.join(STATE_FILE),
            log_file: state_dir.join(LOG_FILE),
            history_file: state_dir.join(HISTORY_FILE),
            state_dir,
        }
    }
}

fn default_state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(data_dir) = dirs::data_local_dir() {
        return Ok(data_dir.join(APP_DIR));
    }

    dirs::home_dir()
        .map(|home| home.join(format!(".{APP_DIR}")))
        .ok_or(ConfigError::StateDirNotFound)
}
