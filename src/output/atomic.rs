use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// A buffered file written next to its destination and renamed into place
/// on [`commit`](AtomicFile::commit).
///
/// Dropping an uncommitted `AtomicFile` deletes the temporary file, so an
/// aborted run leaves any previous file at `path` untouched.
#[derive(Debug)]
pub struct AtomicFile {
    writer: BufWriter<NamedTempFile>,
    path: PathBuf,
}

impl AtomicFile {
    /// Create a temporary file in the destination directory
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn create(path: &Path) -> io::Result<Self> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)?;

        Ok(Self {
            writer: BufWriter::new(temp),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and move the file to its destination, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if flushing, syncing or renaming fails.
    pub fn commit(self) -> io::Result<()> {
        let temp = self.writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        temp.as_file().sync_all()?;

        // Temporary files are created owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }

        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
