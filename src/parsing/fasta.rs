//! Streaming FASTA input using noodles.
//!
//! Records are yielded one at a time so arbitrarily large transcript and
//! protein files can be processed in a single pass. Supports uncompressed,
//! gzip and bgzip files, and `-` for stdin.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna`, `.faa` (uncompressed)
//! - any of the above followed by `.gz` or `.bgz`

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;

use crate::core::record::RawRecord;
use crate::parsing::ParseError;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    if [".fa", ".fasta", ".fna", ".faa"].iter().any(|ext| {
        path_str.ends_with(&format!("{ext}.gz")) || path_str.ends_with(&format!("{ext}.bgz"))
    }) {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna" | "faa")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a FASTA file for streaming, or stdin if the path is `-`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_fasta(path: &Path) -> Result<fasta::io::Reader<Box<dyn BufRead>>, ParseError> {
    let inner: Box<dyn BufRead> = if path == Path::new("-") {
        Box::new(BufReader::new(std::io::stdin()))
    } else if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        let file = std::fs::File::open(path)?;
        Box::new(BufReader::new(file))
    };

    Ok(fasta::io::Reader::new(inner))
}

/// Iterate over the records of a noodles FASTA reader as [`RawRecord`]s
pub fn raw_records<'a, R: BufRead + 'a>(
    reader: &'a mut fasta::io::Reader<R>,
) -> impl Iterator<Item = Result<RawRecord, ParseError>> + 'a {
    reader.records().map(|result| {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let id = String::from_utf8_lossy(record.name()).to_string();
        let description = record
            .description()
            .map(|d| String::from_utf8_lossy(d).trim().to_string())
            .unwrap_or_default();

        let sequence: &[u8] = record.sequence().as_ref();

        Ok(RawRecord::new(id, description).with_sequence(sequence))
    })
}
