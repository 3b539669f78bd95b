//! Image sorting
//!
//! Walks a directory tree, moves every file that does not decode as an image
//! into a `NOT_IMAGE_FILES` directory next to it, and renames the remaining
//! images of each directory to `IMG_1`, `IMG_2`, ... in creation-time order.
//!
//! - [`partition`]: the recursive walk and quarantine moves
//! - [`rename`]: the two-phase sequential rename

pub mod partition;
pub mod rename;

use crate::error::Result;
use crate::probe::{DecodeProbe, ImageProbe};
use crate::report::Reporter;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;
use tracing::{Level, info, span};

pub use rename::{NAME_PREFIX, creation_time, rename_sequentially};

/// Name of the per-directory folder that receives non-image files.
///
/// Any directory whose name contains this marker is never descended into.
pub const QUARANTINE_DIR_NAME: &str = "NOT_IMAGE_FILES";

/// Recursive image sorter
pub struct Sorter<P: ImageProbe = DecodeProbe> {
    probe: P,
}

impl Sorter<DecodeProbe> {
    /// Create a sorter that decodes files with the `image` crate
    pub fn new() -> Self {
        Self::with_probe(DecodeProbe::new())
    }
}

impl Default for Sorter<DecodeProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ImageProbe> Sorter<P> {
    /// Create a sorter with a custom image check
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    /// Sort `root` and everything below it, returning the number of images
    /// that received their final name.
    ///
    /// `root` is canonicalized first, so relative paths such as `.` are
    /// checked against the quarantine marker by their real name.
    ///
    /// The first failure aborts the run. Files already renamed or moved
    /// stay where they are.
    pub fn run<R: Reporter>(&self, root: &Path, reporter: &mut R) -> Result<usize> {
        let root = root.canonicalize()?;
        let _span = span!(Level::INFO, "sort_run", root = %root.display()).entered();

        info!("Sorting images...");
        let renamed = self.process(&root, reporter)?;
        info!(renamed, "Sorting complete");

        Ok(renamed)
    }
}

/// Extension used when building new names for a file.
///
/// Everything after the last `.`. A name without a `.`, or one ending in
/// `.`, is its own extension: `weirdfile` becomes `IMG_1.weirdfile`.
/// Works on the raw name, so names that are not valid UTF-8 are fine.
pub fn file_extension(name: &OsStr) -> &OsStr {
    let bytes = name.as_encoded_bytes();
    match bytes.iter().rposition(|&b| b == b'.') {
        Some(index) if index + 1 < bytes.len() => {
            // SAFETY: the slice starts right after an ASCII `.`, which is a
            // valid split point for OS string encodings
            unsafe { OsStr::from_encoded_bytes_unchecked(&bytes[index + 1..]) }
        }
        _ => name,
    }
}

/// Final component of `path`
pub(crate) fn file_name(path: &Path) -> Result<&OsStr> {
    path.file_name().ok_or_else(|| {
        io::Error::new(
            ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
        .into()
    })
}

/// Move `from` to `to`, refusing to replace anything already at `to`
pub(crate) fn move_without_replacing(from: &Path, to: &Path) -> Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(io::Error::new(
            ErrorKind::AlreadyExists,
            format!(
                "cannot move {} to {}: destination exists",
                from.display(),
                to.display()
            ),
        )
        .into());
    }

    fs::rename(from, to)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::error::Error;
    use crate::report::{RunSummary, SortEvent};
    use std::fs;
    use tempfile::tempdir;

    fn ext(name: &str) -> &OsStr {
        file_extension(OsStr::new(name))
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(ext("photo.jpg"), "jpg");
        assert_eq!(ext("archive.tar.gz"), "gz");
        assert_eq!(ext(".hidden"), "hidden");
    }

    #[test]
    fn test_file_extension_degenerate() {
        assert_eq!(ext("weirdfile"), "weirdfile");
        assert_eq!(ext("trailing."), "trailing.");
        assert_eq!(ext("."), ".");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_extension_not_utf8() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9.j\xffg");
        assert_eq!(file_extension(name).as_bytes(), b"j\xffg");

        let bare = OsStr::from_bytes(b"raw\xff");
        assert_eq!(file_extension(bare), bare);
    }

    #[cfg(unix)]
    #[test]
    fn test_names_that_are_not_utf8() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let notes = OsStr::from_bytes(b"notes\xff.txt");
        fs::write(dir.path().join(notes), "not an image").unwrap();
        write_png(&dir.path().join(OsStr::from_bytes(b"photo\xff.png")), 1);

        let mut summary = RunSummary::new();
        let renamed = Sorter::new().run(dir.path(), &mut summary).unwrap();

        assert_eq!(renamed, 1);
        assert_eq!(summary.quarantined, 1);
        assert!(dir.path().join("IMG_1.png").exists());
        assert!(dir.path().join(QUARANTINE_DIR_NAME).join(notes).exists());
    }

    #[test]
    fn test_move_without_replacing() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let err = move_without_replacing(&a, &b).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == ErrorKind::AlreadyExists));
        assert_eq!(fs::read_to_string(&b).unwrap(), "b");

        let c = dir.path().join("c.txt");
        move_without_replacing(&a, &c).unwrap();
        assert!(!a.exists());
        assert_eq!(fs::read_to_string(&c).unwrap(), "a");
    }

    #[test]
    fn test_mixed_directory_scenario() {
        let dir = tempdir().unwrap();
        write_jpeg(&dir.path().join("a.jpg"), 2);
        fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        tick();
        write_png(&dir.path().join("b.png"), 2);

        let mut summary = RunSummary::new();
        let renamed = Sorter::new().run(dir.path(), &mut summary).unwrap();

        assert_eq!(renamed, 2);
        assert_eq!(summary.renamed, 2);
        assert_eq!(summary.quarantined, 1);
        assert_eq!(
            names(dir.path()),
            vec!["IMG_1.jpg", "IMG_2.png", QUARANTINE_DIR_NAME]
        );
        assert_eq!(
            names(&dir.path().join(QUARANTINE_DIR_NAME)),
            vec!["notes.txt"]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(QUARANTINE_DIR_NAME).join("notes.txt")).unwrap(),
            "not an image"
        );
    }

    #[test]
    fn test_only_images() {
        let dir = tempdir().unwrap();
        for name in ["x.png", "y.png", "z.png", "w.png"] {
            write_png(&dir.path().join(name), 1);
            tick();
        }

        let renamed = Sorter::new().run(dir.path(), &mut RunSummary::new()).unwrap();

        assert_eq!(renamed, 4);
        assert_eq!(
            names(dir.path()),
            vec!["IMG_1.png", "IMG_2.png", "IMG_3.png", "IMG_4.png"]
        );
    }

    #[test]
    fn test_only_non_images() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "# hi").unwrap();
        fs::write(dir.path().join("fake.jpg"), "not a jpeg").unwrap();

        let mut events: Vec<SortEvent> = Vec::new();
        let renamed = Sorter::new().run(dir.path(), &mut events).unwrap();

        assert_eq!(renamed, 0);
        assert_eq!(names(dir.path()), vec![QUARANTINE_DIR_NAME]);
        assert_eq!(
            names(&dir.path().join(QUARANTINE_DIR_NAME)),
            vec!["fake.jpg", "readme.md"]
        );
        assert!(
            events
                .iter()
                .all(|e| matches!(e, SortEvent::Quarantined { .. }))
        );
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();

        let renamed = Sorter::new().run(dir.path(), &mut RunSummary::new()).unwrap();

        assert_eq!(renamed, 0);
        assert!(names(dir.path()).is_empty());
    }

    #[test]
    fn test_image_without_extension() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("weirdfile"), 2);

        let renamed = Sorter::new().run(dir.path(), &mut RunSummary::new()).unwrap();

        assert_eq!(renamed, 1);
        assert_eq!(names(dir.path()), vec!["IMG_1.weirdfile"]);
    }

    #[test]
    fn test_second_run_keeps_names() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("first.png"), 1);
        tick();
        write_jpeg(&dir.path().join("second.jpg"), 2);
        tick();
        write_png(&dir.path().join("third.png"), 3);

        let sorter = Sorter::new();
        sorter.run(dir.path(), &mut RunSummary::new()).unwrap();
        let after_first = names(dir.path());
        let renamed = sorter.run(dir.path(), &mut RunSummary::new()).unwrap();

        assert_eq!(renamed, 3);
        assert_eq!(names(dir.path()), after_first);
        assert_eq!(after_first, vec!["IMG_1.png", "IMG_2.jpg", "IMG_3.png"]);
        assert_eq!(
            image::image_dimensions(dir.path().join("IMG_3.png")).unwrap(),
            (3, 3)
        );
    }
}
