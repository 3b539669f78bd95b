//! Image Sorting - sequential renaming of photos by creation time
//!
//! This library provides:
//! - A recursive walk that moves files which do not decode as images into
//!   a `NOT_IMAGE_FILES` folder per directory
//! - A two-phase rename that numbers the remaining images `IMG_1`, `IMG_2`,
//!   ... in creation-time order without name collisions
//! - A line-based confirmation prompt and console reporting

pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod prompt;
pub mod report;
pub mod sorter;

pub use cli::Cli;
pub use config::Config;
pub use error::{Error, Result};
pub use probe::{DecodeProbe, ImageProbe};
pub use report::{ConsoleReporter, Reporter, RunSummary, SortEvent};
pub use sorter::{NAME_PREFIX, QUARANTINE_DIR_NAME, Sorter};
