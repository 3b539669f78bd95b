//! Configuration for a sorting session

use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Configuration for image sorting
///
/// The naming scheme and quarantine folder are fixed; only where to run and
/// how to log can be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory to sort recursively
    pub root: PathBuf,

    /// Skip the confirmation prompt and run once
    pub assume_yes: bool,

    /// Verbose output
    pub verbose: bool,

    /// Log as JSON
    pub json_log: bool,

    /// Directory for log files, if file logging is wanted
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            assume_yes: false,
            verbose: false,
            json_log: false,
            log_dir: None,
        }
    }
}

impl Config {
    /// Resolve `root` to an absolute path and check that it is a directory
    pub fn validate(mut self) -> Result<Self> {
        let root = self
            .root
            .canonicalize()
            .map_err(|_| Error::NotADirectory {
                path: self.root.clone(),
            })?;
        if !root.is_dir() {
            return Err(Error::NotADirectory { path: root });
        }

        self.root = root;
        Ok(self)
    }

    /// Log file for a session started at `started`, if file logging is enabled
    pub fn log_file_path(&self, started: DateTime<Local>) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| {
            dir.join(format!(
                "ImageSorting_{}.log",
                started.format("%Y%m%d_%H%M%S")
            ))
        })
    }
}
