//! Line-oriented reading from compressed streams.

use std::io;
use std::path::Path;

use memchr::memchr;

use crate::buffer::SeqBuffer;
use crate::error::{Error, Result};
use crate::handler::{ErrorHandler, Report};
use crate::policy::{BufPolicy, StdPolicy};
use crate::stream::ZFile;

type DefaultBufPolicy = StdPolicy;
type DefaultHandler = Report;

/// Initial capacity allocated by [`LineReader::read_line`] when handed an
/// unallocated buffer.
pub const INIT_LINE_LEN: usize = 128;

/// Outcome of a line read.
///
/// End of stream is a dedicated variant rather than an error: running out
/// of input is the expected way for reading to stop, and it must remain
/// distinguishable both from a successfully read empty line (`Line(0)`)
/// and from real failures (`Err(...)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRead {
    /// A line was consumed. Carries the number of content bytes, which
    /// excludes the line terminator; an empty line yields `Line(0)`.
    Line(usize),
    /// The underlying stream is exhausted. Any bytes of an unterminated
    /// final line have already been committed to the buffer, so callers
    /// that must not drop such a line should check the buffer's length
    /// before discarding it.
    Eof,
}

impl LineRead {
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(*self, LineRead::Eof)
    }
}

/// Reads one line at a time from a [`ZFile`].
///
/// Two calling conventions are provided. [`read_line`](LineReader::read_line)
/// grows the supplied buffer as needed and handles lines of any length;
/// [`read_line_bounded`](LineReader::read_line_bounded) never reallocates
/// and silently truncates, for callers that pre-size their own buffers and
/// want predictable memory use. Both consume one line per call and track
/// the stream position in content bytes.
///
/// # Example
///
/// ```
/// use seqline::{LineRead, LineReader, SeqBuffer};
///
/// let mut reader = LineReader::from_reader(&b"abc\n\ndefghij\n"[..]);
/// let mut line = SeqBuffer::new();
///
/// assert_eq!(reader.read_line(&mut line).unwrap(), LineRead::Line(3));
/// assert_eq!(line.as_bytes(), b"abc");
/// assert_eq!(reader.read_line(&mut line).unwrap(), LineRead::Line(0));
/// assert_eq!(reader.read_line(&mut line).unwrap(), LineRead::Line(7));
/// assert_eq!(reader.read_line(&mut line).unwrap(), LineRead::Eof);
/// ```
pub struct LineReader<'a, P = DefaultBufPolicy, H = DefaultHandler> {
    file: ZFile<'a>,
    policy: P,
    handler: H,
}

impl<'a> LineReader<'a> {
    /// Creates a line reader over an open stream, with the default growth
    /// policy and the default (logging) error handler.
    pub fn new(file: ZFile<'a>) -> LineReader<'a> {
        LineReader {
            file,
            policy: StdPolicy,
            handler: Report,
        }
    }

    /// Opens `path` (plain or gzip-compressed) for line reading.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use seqline::LineReader;
    ///
    /// let mut reader = LineReader::from_path("seqs.fastq").unwrap();
    /// ```
    pub fn from_path<F: AsRef<Path>>(path: F) -> Result<LineReader<'static>> {
        ZFile::open(path).map(LineReader::new)
    }

    /// Creates a line reader over an in-memory or otherwise already-open
    /// reader.
    pub fn from_reader<R: io::Read + 'a>(reader: R) -> LineReader<'a> {
        LineReader::new(ZFile::from_reader(reader))
    }
}

impl<'a, P, H> LineReader<'a, P, H>
where
    P: BufPolicy,
    H: ErrorHandler,
{
    /// Returns a reader with the given buffer policy applied.
    #[inline]
    pub fn set_policy<T: BufPolicy>(self, policy: T) -> LineReader<'a, T, H> {
        LineReader {
            file: self.file,
            policy,
            handler: self.handler,
        }
    }

    /// Returns a reader with the given error handler applied.
    #[inline]
    pub fn set_handler<T: ErrorHandler>(self, handler: T) -> LineReader<'a, P, T> {
        LineReader {
            file: self.file,
            policy: self.policy,
            handler,
        }
    }

    /// Returns the `BufPolicy` of the reader.
    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The underlying stream.
    #[inline]
    pub fn file(&self) -> &ZFile<'a> {
        &self.file
    }

    /// Consumes the reader, returning the underlying stream.
    #[inline]
    pub fn into_file(self) -> ZFile<'a> {
        self.file
    }

    /// Cumulative content bytes consumed (line terminators excluded).
    #[inline]
    pub fn position(&self) -> u64 {
        self.file.position()
    }

    /// Whether the end of the stream has been reached (sticky).
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.file.is_eof()
    }

    /// Reads one line into `out`, growing it as needed.
    ///
    /// The line content (everything up to, but excluding, the next `\n`)
    /// replaces the previous content of `out`; an unallocated buffer is
    /// first allocated with [`INIT_LINE_LEN`] bytes. The newline is
    /// consumed but neither stored nor counted; the stream position
    /// advances by the number of content bytes.
    ///
    /// Whenever the buffer fills up, its new size is negotiated with the
    /// reader's [`BufPolicy`]. If the policy refuses, the failure is
    /// reported through the reader's [`ErrorHandler`] and
    /// [`Error::BufferLimit`] is returned; the bytes committed so far
    /// remain intact in `out`.
    ///
    /// Once the stream is exhausted, `Ok(LineRead::Eof)` is returned and
    /// the stream's sticky EOF flag is set. A final line with no trailing
    /// newline is committed to `out` by the same call that reports `Eof`.
    pub fn read_line(&mut self, out: &mut SeqBuffer) -> Result<LineRead> {
        if !out.is_allocated() {
            out.reserve_to(INIT_LINE_LEN);
        }
        out.clear();
        if self.file.eof {
            return Ok(LineRead::Eof);
        }
        loop {
            let (consumed, found) = {
                let window = self.file.fill_buf()?;
                if window.is_empty() {
                    self.file.eof = true;
                    return Ok(LineRead::Eof);
                }
                let (content, found) = match memchr(b'\n', window) {
                    Some(i) => (&window[..i], true),
                    None => (window, false),
                };
                let needed = out.len() + content.len() + 1;
                if out.capacity() < needed {
                    grow_to(&mut self.policy, &self.handler, out, needed)?;
                }
                out.push_bytes(content);
                (content.len(), found)
            };
            self.file.position += consumed as u64;
            self.file.consume(consumed + found as usize);
            if found {
                return Ok(LineRead::Line(out.len()));
            }
        }
    }

    /// Reads one line into `out` without ever growing it.
    ///
    /// At most `min(max_len, out.capacity() - 1)` content bytes are stored
    /// per call; a longer line is silently truncated at that bound and the
    /// remainder, including its newline, stays in the stream, where
    /// subsequent calls pick it up. Callers that need the whole line in
    /// one piece should use [`read_line`](LineReader::read_line) instead.
    ///
    /// Returns [`Error::UnallocatedBuffer`] if `out` owns no storage.
    /// Terminator, position and EOF behavior match
    /// [`read_line`](LineReader::read_line).
    pub fn read_line_bounded(&mut self, out: &mut SeqBuffer, max_len: usize) -> Result<LineRead> {
        if !out.is_allocated() {
            return Err(Error::UnallocatedBuffer);
        }
        out.clear();
        if self.file.eof {
            return Ok(LineRead::Eof);
        }
        let limit = max_len.min(out.capacity() - 1);
        loop {
            let remaining = limit - out.len();
            if remaining == 0 {
                // truncated; the rest of the line stays in the stream
                return Ok(LineRead::Line(out.len()));
            }
            let (consumed, found) = {
                let window = self.file.fill_buf()?;
                if window.is_empty() {
                    self.file.eof = true;
                    return Ok(LineRead::Eof);
                }
                let search = &window[..window.len().min(remaining)];
                match memchr(b'\n', search) {
                    Some(i) => {
                        out.push_bytes(&search[..i]);
                        (i, true)
                    }
                    None => {
                        out.push_bytes(search);
                        (search.len(), false)
                    }
                }
            };
            self.file.position += consumed as u64;
            self.file.consume(consumed + found as usize);
            if found {
                return Ok(LineRead::Line(out.len()));
            }
        }
    }

    /// Returns a borrowed iterator over all remaining lines as owned
    /// byte vectors. A non-empty unterminated final line is yielded as
    /// the last item.
    ///
    /// This is slower than calling [`read_line`](LineReader::read_line)
    /// with a reused buffer, but convenient when every line is collected
    /// anyway.
    pub fn lines(&mut self) -> LinesIter<'_, 'a, P, H> {
        LinesIter {
            rdr: self,
            buf: SeqBuffer::new(),
            done: false,
        }
    }

    /// Like [`lines`](LineReader::lines), but owns the underlying reader.
    pub fn into_lines(self) -> LinesIntoIter<'a, P, H> {
        LinesIntoIter {
            rdr: self,
            buf: SeqBuffer::new(),
            done: false,
        }
    }
}

// Negotiates a capacity >= `needed` with the policy, then grows the buffer
// in one step so the already-committed content is moved at most once.
// On refusal the buffer is left untouched.
fn grow_to<P, H>(policy: &mut P, handler: &H, out: &mut SeqBuffer, needed: usize) -> Result<()>
where
    P: BufPolicy,
    H: ErrorHandler,
{
    let mut cap = out.capacity();
    while cap < needed {
        match policy.grow_to(cap) {
            Some(new_cap) if new_cap > cap => cap = new_cap,
            _ => {
                report_err!(
                    handler,
                    "buffer policy refused to grow the line buffer beyond {} bytes",
                    cap
                );
                return Err(Error::BufferLimit);
            }
        }
    }
    out.reserve_to(cap);
    Ok(())
}

/// Borrowed iterator over lines, returned by
/// [`LineReader::lines`](LineReader::lines).
pub struct LinesIter<'r, 'a, P = DefaultBufPolicy, H = DefaultHandler>
where
    P: 'r,
    H: 'r,
{
    rdr: &'r mut LineReader<'a, P, H>,
    buf: SeqBuffer,
    done: bool,
}

impl<'r, 'a, P, H> Iterator for LinesIter<'r, 'a, P, H>
where
    P: BufPolicy + 'r,
    H: ErrorHandler + 'r,
{
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        next_line(self.rdr, &mut self.buf, &mut self.done)
    }
}

/// Iterator over lines that owns the underlying reader, returned by
/// [`LineReader::into_lines`](LineReader::into_lines).
pub struct LinesIntoIter<'a, P = DefaultBufPolicy, H = DefaultHandler> {
    rdr: LineReader<'a, P, H>,
    buf: SeqBuffer,
    done: bool,
}

impl<'a, P, H> Iterator for LinesIntoIter<'a, P, H>
where
    P: BufPolicy,
    H: ErrorHandler,
{
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        next_line(&mut self.rdr, &mut self.buf, &mut self.done)
    }
}

fn next_line<P, H>(
    rdr: &mut LineReader<'_, P, H>,
    buf: &mut SeqBuffer,
    done: &mut bool,
) -> Option<Result<Vec<u8>>>
where
    P: BufPolicy,
    H: ErrorHandler,
{
    if *done {
        return None;
    }
    match rdr.read_line(buf) {
        Ok(LineRead::Line(_)) => Some(Ok(buf.as_bytes().to_vec())),
        Ok(LineRead::Eof) => {
            *done = true;
            if !buf.is_empty() {
                Some(Ok(buf.as_bytes().to_vec()))
            } else {
                None
            }
        }
        Err(e) => {
            *done = true;
            Some(Err(e))
        }
    }
}
