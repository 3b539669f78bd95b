//! Image validity check
//!
//! A file counts as an image only if it can actually be decoded. The file
//! extension is never trusted: a text file named `photo.jpg` is not an image
//! and a PNG named `weirdfile` is.

use crate::error::Result;
use image::{ImageError, ImageReader, Limits};
use std::io::{self, ErrorKind};
use std::path::Path;
use tracing::debug;

/// Decides whether a file is a decodable image
pub trait ImageProbe {
    /// Returns `Ok(false)` for anything that is not an image. I/O failures
    /// while reading the file are returned as errors.
    fn is_image(&self, path: &Path) -> Result<bool>;
}

/// Probe that fully decodes the file with the `image` crate
///
/// By default no decoding limits apply, so very large images still count.
#[derive(Debug, Clone, Default)]
pub struct DecodeProbe {
    limits: Option<Limits>,
}

impl DecodeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap decoding with `limits`.
    ///
    /// A file that exceeds them is an error that aborts the run; it is not
    /// treated as a non-image.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits: Some(limits),
        }
    }
}

impl ImageProbe for DecodeProbe {
    fn is_image(&self, path: &Path) -> Result<bool> {
        let mut reader = ImageReader::open(path)?.with_guessed_format()?;
        match self.limits {
            Some(ref limits) => reader.limits(limits.clone()),
            None => reader.no_limits(),
        }
        let format = reader.format();

        match reader.decode() {
            Ok(img) => {
                debug!(
                    ?path,
                    ?format,
                    width = img.width(),
                    height = img.height(),
                    "Decoded image"
                );
                Ok(true)
            }
            // Truncated or garbled content surfaces as an I/O error from some decoders
            Err(ImageError::IoError(e))
                if matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::InvalidData) =>
            {
                debug!(?path, error = %e, "Image data is truncated or corrupt");
                Ok(false)
            }
            Err(ImageError::IoError(e)) => Err(e.into()),
            Err(ImageError::Limits(e)) => Err(io::Error::other(format!(
                "{} exceeds decoding limits: {}",
                path.display(),
                e
            ))
            .into()),
            Err(e) => {
                debug!(?path, error = %e, "Not a decodable image");
                Ok(false)
            }
        }
    }
}
