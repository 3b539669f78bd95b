//! CLI argument parsing with clap

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Image Sorting - quarantine non-images and number photos by creation time
///
/// Walks the directory recursively. Files that do not decode as images are
/// moved into a NOT_IMAGE_FILES folder next to them; the remaining images in
/// each folder are renamed IMG_1, IMG_2, ... oldest first.
#[derive(Parser, Debug)]
#[command(name = "image-sorting")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to sort (defaults to the current directory)
    #[arg(short, long, env = "IMAGE_SORTING_DIR")]
    pub dir: Option<PathBuf>,

    /// Start sorting immediately instead of asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Also write a log file into this directory
    #[arg(long, env = "IMAGE_SORTING_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Convert CLI arguments to Config
    pub fn to_config(&self) -> Config {
        let mut config = Config::default();

        if let Some(ref dir) = self.dir {
            config.root = dir.clone();
        }
        config.assume_yes = self.yes;
        config.verbose = self.verbose;
        config.json_log = self.json_log;
        config.log_dir = self.log_dir.clone();

        config
    }
}
