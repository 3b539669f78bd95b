//! Two-phase sequential rename
//!
//! Giving files their final names directly could clash with a sibling that
//! still holds that name (renaming file 3 to `IMG_5` before `IMG_5` has
//! moved). So every file is first moved to a random UUID name, and only then
//! sorted by creation time and numbered.

use super::{file_extension, file_name, move_without_replacing};
use crate::error::Result;
use crate::report::{Reporter, SortEvent};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};
use uuid::Uuid;

/// Prefix of the final sequential names
pub const NAME_PREFIX: &str = "IMG_";

/// An image being renamed, with the extension it had when discovered
#[derive(Debug)]
struct ImageFile {
    path: PathBuf,
    extension: OsString,
}

impl ImageFile {
    fn new(path: PathBuf) -> Result<Self> {
        let extension = file_extension(file_name(&path)?).to_os_string();
        Ok(Self { path, extension })
    }

    /// Rename within the same directory to `<stem>.<extension>`
    fn rename_to(&mut self, stem: &str) -> Result<()> {
        let mut name = OsString::from(stem);
        name.push(".");
        name.push(&self.extension);
        let destination = self.path.with_file_name(name);
        move_without_replacing(&self.path, &destination)?;
        self.path = destination;
        Ok(())
    }
}

/// Creation timestamp of a file.
///
/// Falls back to the modification time where the filesystem does not record
/// a birth time.
pub fn creation_time(path: &Path) -> Result<SystemTime> {
    let metadata = fs::metadata(path)?;
    match metadata.created() {
        Ok(created) => Ok(created),
        Err(e) if e.kind() == ErrorKind::Unsupported => {
            warn!(?path, "Creation time unavailable, using modification time");
            Ok(metadata.modified()?)
        }
        Err(e) => Err(e.into()),
    }
}

/// Rename sibling image files to `IMG_1.<ext>`, `IMG_2.<ext>`, ... in
/// ascending creation-time order and return how many were renamed.
///
/// Each final rename is passed to `reporter`. If a creation time cannot be
/// read, the whole level is aborted before any final name is assigned.
pub fn rename_sequentially<R: Reporter>(files: Vec<PathBuf>, reporter: &mut R) -> Result<usize> {
    rename_ordered_by(files, reporter, creation_time)
}

/// [`rename_sequentially`] with the timestamp source passed in
fn rename_ordered_by<R, F>(files: Vec<PathBuf>, reporter: &mut R, created: F) -> Result<usize>
where
    R: Reporter,
    F: Fn(&Path) -> Result<SystemTime>,
{
    if files.is_empty() {
        return Ok(0);
    }

    let mut images = files
        .into_iter()
        .map(ImageFile::new)
        .collect::<Result<Vec<_>>>()?;

    // Phase 1: unique temporary names
    for image in &mut images {
        let original = image.path.clone();
        image.rename_to(&Uuid::new_v4().to_string())?;
        debug!(from = ?original, to = ?image.path, "Staged image under temporary name");
    }

    // Phase 2: number by creation time
    let mut timed = images
        .into_iter()
        .map(|image| Ok((created(&image.path)?, image)))
        .collect::<Result<Vec<_>>>()?;
    timed.sort_by_key(|(created, _)| *created);

    let mut renamed = 0;
    for (index, (_, mut image)) in timed.into_iter().enumerate() {
        let from = image.path.clone();
        image.rename_to(&format!("{}{}", NAME_PREFIX, index + 1))?;
        renamed += 1;
        reporter.report(&SortEvent::Renamed {
            from,
            to: image.path,
        });
    }

    Ok(renamed)
}
