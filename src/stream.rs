//! Compressed-stream handling: opening plain or gzip files and tracking
//! the read position.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use buffer_redux::BufReader;

use crate::error::{Error, Result};
use crate::handler::{ErrorHandler, Report};

/// Capacity of the internal I/O buffer. Considerably larger than the
/// codec's default, which speeds up decompression of large files.
pub const FILE_BUFFER_SIZE: usize = 1 << 20;

/// Maximum number of bytes of a file path retained in a [`ZFile`];
/// longer paths are truncated when copied into the stream.
pub const MAX_PATH_LEN: usize = 1024;

/// A byte stream opened from a plain or gzip-compressed file.
///
/// The compression format is sniffed when the file is opened, so callers
/// read both kinds of input identically. The stream keeps a bounded copy
/// of the path it was opened from, the cumulative number of content bytes
/// consumed ([`position`](ZFile::position)), and a sticky end-of-file flag
/// ([`is_eof`](ZFile::is_eof)) that is set by the line reader once the
/// underlying stream is exhausted and never reset.
///
/// Closing is dropping: the codec handle and the path copy are released
/// exactly once when the `ZFile` goes out of scope.
///
/// # Example
///
/// ```no_run
/// use seqline::ZFile;
///
/// let zf = ZFile::open("seqs.fastq.gz").unwrap();
/// assert_eq!(zf.position(), 0);
/// assert!(!zf.is_eof());
/// ```
pub struct ZFile<'a> {
    inner: BufReader<Box<dyn io::Read + 'a>>,
    path: String,
    pub(crate) position: u64,
    pub(crate) eof: bool,
}

impl ZFile<'static> {
    /// Opens `path` for reading, sniffing the compression format.
    /// Open failures are reported through the default [`Report`] handler
    /// and returned as [`Error::Open`].
    pub fn open<F: AsRef<Path>>(path: F) -> Result<ZFile<'static>> {
        ZFile::open_with(path, &Report)
    }

    /// Like [`open`](ZFile::open), but failures are reported through the
    /// given handler.
    pub fn open_with<F: AsRef<Path>, H: ErrorHandler>(
        path: F,
        handler: &H,
    ) -> Result<ZFile<'static>> {
        let path = path.as_ref();
        let reader = match open_codec(path) {
            Ok(reader) => reader,
            Err(e) => {
                report_err!(handler, "opening file '{}' failed: {}", path.display(), e);
                return Err(Error::Open {
                    path: path.to_owned(),
                    source: e,
                });
            }
        };
        Ok(ZFile {
            inner: BufReader::with_capacity(FILE_BUFFER_SIZE, reader),
            path: bounded_path(path),
            position: 0,
            eof: false,
        })
    }
}

impl<'a> ZFile<'a> {
    /// Wraps an already-open reader, e.g. an in-memory byte slice.
    /// The path of such a stream is empty.
    pub fn from_reader<R: io::Read + 'a>(reader: R) -> ZFile<'a> {
        ZFile::with_capacity(reader, FILE_BUFFER_SIZE)
    }

    /// Wraps an already-open reader with a given internal buffer capacity.
    pub fn with_capacity<R: io::Read + 'a>(reader: R, capacity: usize) -> ZFile<'a> {
        ZFile {
            inner: BufReader::with_capacity(capacity, Box::new(reader)),
            path: String::new(),
            position: 0,
            eof: false,
        }
    }

    /// The path this stream was opened from, truncated to
    /// [`MAX_PATH_LEN`] bytes. Empty for streams built from a reader.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Cumulative number of content bytes consumed from this stream.
    /// Line terminators are not counted.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the end of the stream has been reached. Sticky: once true,
    /// it stays true for the lifetime of the stream.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    // Buffered window over the decompressed stream; empty means exhausted.
    #[inline]
    pub(crate) fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    #[inline]
    pub(crate) fn consume(&mut self, amount: usize) {
        self.inner.consume(amount);
    }
}

impl std::fmt::Debug for ZFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ZFile")
            .field("path", &self.path)
            .field("position", &self.position)
            .field("eof", &self.eof)
            .finish()
    }
}

// Opens the file and lets the codec sniff the compression format.
// Files too short to carry a compression magic cannot be anything but
// plain and are reopened directly.
fn open_codec(path: &Path) -> io::Result<Box<dyn io::Read>> {
    let file = File::open(path)?;
    match niffler::get_reader(Box::new(file)) {
        Ok((reader, _format)) => Ok(reader),
        Err(niffler::Error::FileTooShort) => Ok(Box::new(File::open(path)?)),
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
    }
}

// Lossy copy of the path, truncated to MAX_PATH_LEN bytes on a character
// boundary. Only used as diagnostic metadata.
fn bounded_path(path: &Path) -> String {
    let mut s = path.to_string_lossy().into_owned();
    if s.len() > MAX_PATH_LEN {
        let mut end = MAX_PATH_LEN;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_path_truncates_long_paths() {
        let long = "a".repeat(MAX_PATH_LEN + 100);
        let bounded = bounded_path(Path::new(&long));
        assert_eq!(bounded.len(), MAX_PATH_LEN);

        let short = bounded_path(Path::new("seqs.fq.gz"));
        assert_eq!(short, "seqs.fq.gz");
    }

    #[test]
    fn from_reader_starts_clean() {
        let zf = ZFile::from_reader(&b"ACGT\n"[..]);
        assert_eq!(zf.path(), "");
        assert_eq!(zf.position(), 0);
        assert!(!zf.is_eof());
    }
}
