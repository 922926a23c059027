use std::fs;
use std::path::Path;

use thiserror::Error;

mod paths;

pub use paths::ConfigPaths;

use crate::flags::Flags;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a directory for shell state")]
    StateDirNotFound,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    paths: ConfigPaths,
    quiet: bool,
    debug: bool,
}

impl Config {
    pub fn new(flags: &Flags) -> Result<Self, ConfigError> {
        let paths = ConfigPaths::new(flags.state_dir.as_deref())?;
        fs::create_dir_all(&paths.state_dir)?;

        Ok(Config {
            paths,
            quiet: flags.quiet,
            debug: flags.debug,
        })
    }

    pub fn state_file(&self) -> &Path {
        &self.paths.state_file
    }

    pub fn log_file(&self) -> &Path {
        &self.paths.log_file
    }

    pub fn history_file(&self) -> &Path {
        &self.paths.history_file
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}
