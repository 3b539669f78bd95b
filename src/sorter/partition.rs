//! Recursive directory walk
//!
//! Each directory is handled on its own: subdirectories first as they are
//! encountered, then non-image files go to quarantine and the images left
//! at this level are renamed. Counts are summed on the way back up.

use super::{
    QUARANTINE_DIR_NAME, Sorter, file_name, move_without_replacing, rename_sequentially,
};
use crate::error::Result;
use crate::probe::ImageProbe;
use crate::report::{Reporter, SortEvent};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Whether `directory` is a quarantine directory (or otherwise carries the marker)
pub fn is_quarantine_dir(directory: &Path) -> bool {
    directory
        .file_name()
        .map(|name| name.to_string_lossy().contains(QUARANTINE_DIR_NAME))
        .unwrap_or(false)
}

/// Direct children of `directory`, sorted by file name.
///
/// The listing is complete before anything in the directory is touched.
fn list_children(directory: &Path) -> Result<Vec<DirEntry>> {
    let children = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(children)
}

impl<P: ImageProbe> Sorter<P> {
    /// Sort one directory and, recursively, everything below it.
    ///
    /// Returns the number of images renamed in this subtree.
    pub fn process<R: Reporter>(&self, directory: &Path, reporter: &mut R) -> Result<usize> {
        if is_quarantine_dir(directory) {
            debug!(?directory, "Skipping quarantine directory");
            return Ok(0);
        }

        let children = list_children(directory)?;
        if children.is_empty() {
            return Ok(0);
        }

        let mut renamed = 0;
        let mut images = Vec::new();
        for child in children {
            let path = child.path();
            if child.file_type().is_dir() {
                renamed += self.process(path, reporter)?;
            } else if self.probe.is_image(path)? {
                images.push(child.into_path());
            } else {
                quarantine(directory, path, reporter)?;
            }
        }

        debug!(?directory, images = images.len(), "Renaming images");
        renamed += rename_sequentially(images, reporter)?;

        Ok(renamed)
    }
}

/// Move `file` into the quarantine directory of `directory`, keeping its name
fn quarantine<R: Reporter>(directory: &Path, file: &Path, reporter: &mut R) -> Result<PathBuf> {
    let quarantine_dir = directory.join(QUARANTINE_DIR_NAME);
    if !quarantine_dir.exists() {
        fs::create_dir(&quarantine_dir)?;
        debug!(path = ?quarantine_dir, "Created quarantine directory");
    }

    let destination = quarantine_dir.join(file_name(file)?);
    move_without_replacing(file, &destination)?;
    reporter.report(&SortEvent::Quarantined {
        from: file.to_path_buf(),
        to: destination.clone(),
    });

    Ok(destination)
}
