//! In-memory template destination.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use envshape::template::TemplateSink;

/// [`TemplateSink`] that records every write instead of touching disk.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use envshape::template::TemplateSink;
/// use test_helpers::RecordingSink;
///
/// let mut sink = RecordingSink::default();
/// sink.write(Utf8Path::new(".env.example"), "PORT=\n")?;
/// assert_eq!(sink.contents_of(".env.example"), Some("PORT=\n"));
/// # Ok::<_, std::io::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    writes: Vec<(Utf8PathBuf, String)>,
}

impl RecordingSink {
    /// Every write in the order it happened.
    #[must_use]
    pub const fn writes(&self) -> &[(Utf8PathBuf, String)] {
        self.writes.as_slice()
    }

    /// Contents of the most recent write to `path`.
    #[must_use]
    pub fn contents_of(&self, path: impl AsRef<Utf8Path>) -> Option<&str> {
        let wanted = path.as_ref();
        self.writes
            .iter()
            .rev()
            .find(|(written, _)| written == wanted)
            .map(|(_, contents)| contents.as_str())
    }
}

impl TemplateSink for RecordingSink {
    fn write(&mut self, path: &Utf8Path, contents: &str) -> io::Result<()> {
        self.writes.push((path.to_path_buf(), contents.to_owned()));
        Ok(())
    }
}
