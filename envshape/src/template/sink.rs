//! Destinations for rendered example files.

use std::io::{self, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

/// Write capability used by [`super::generate_config_file`].
///
/// The default [`FileSink`] writes to the filesystem; tests and tools can
/// substitute their own destination, such as an in-memory capture.
pub trait TemplateSink {
    /// Replace the contents of `path` with `contents`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the destination.
    fn write(&mut self, path: &Utf8Path, contents: &str) -> io::Result<()>;
}

/// Whole-file writer backed by the filesystem.
///
/// The parent directory must already exist; the file is created or
/// truncated.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSink;

impl TemplateSink for FileSink {
    fn write(&mut self, path: &Utf8Path, contents: &str) -> io::Result<()> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{path}' does not name a file"),
            )
        })?;
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));

        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        let mut file = dir.open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )?;
        file.write_all(contents.as_bytes())?;
        file.flush()
    }
}
