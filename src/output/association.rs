use std::io::{self, Write};

/// Header of the first column of the association file
pub const MGI_COLUMN: &str = "MGI";

/// Writes `MGI ID <TAB> sequence ID` lines after a header naming the
/// sequence logical database.
#[derive(Debug)]
pub struct AssociationWriter<W: Write> {
    inner: W,
    lines: usize,
}

impl<W: Write> AssociationWriter<W> {
    /// Wrap `inner` and write the header line
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(mut inner: W, sequence_logical_db: &str) -> io::Result<Self> {
        writeln!(inner, "{MGI_COLUMN}\t{sequence_logical_db}")?;
        Ok(Self { inner, lines: 0 })
    }

    /// Write one association line
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be written.
    pub fn write_association(&mut self, mgi_id: &str, sequence_id: &str) -> io::Result<()> {
        writeln!(self.inner, "{mgi_id}\t{sequence_id}")?;
        self.lines += 1;
        Ok(())
    }

    /// Association lines written so far, not counting the header
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
