//! This library provides the low-level plumbing needed for reading biological
//! sequence files (FASTA/FASTQ-style): growable byte buffers, line-oriented
//! reading from plain or gzip-compressed files, and a sequence record type
//! composed of name/comment/sequence/quality fields.
//!
//! It deliberately stops short of parsing record boundaries: the unit of work
//! is one line, and assembling lines into records is left to the caller.
//!
//! # Reading lines
//!
//! [`LineReader`](reader/struct.LineReader.html) consumes one line per call,
//! growing the supplied [`SeqBuffer`](buffer/struct.SeqBuffer.html) as needed.
//! Sequence lines in genomic files can be arbitrarily long, so the buffer
//! starts small and grows to the enclosing power of two whenever it fills
//! up. How it grows can be configured with a
//! [`BufPolicy`](policy/trait.BufPolicy.html).
//!
//! ```
//! use seqline::{LineRead, LineReader, SeqBuffer};
//!
//! let mut reader = LineReader::from_reader(&b"ACGT\nGGCA\n"[..]);
//! let mut line = SeqBuffer::new();
//!
//! assert_eq!(reader.read_line(&mut line).unwrap(), LineRead::Line(4));
//! assert_eq!(line.as_bytes(), b"ACGT");
//! assert_eq!(reader.read_line(&mut line).unwrap(), LineRead::Line(4));
//! assert_eq!(reader.read_line(&mut line).unwrap(), LineRead::Eof);
//! ```
//!
//! Files are opened through a compression-sniffing codec, so plain and
//! gzip-compressed inputs are read the same way:
//!
//! ```no_run
//! use seqline::LineReader;
//!
//! let mut reader = LineReader::from_path("seqs.fastq.gz").unwrap();
//! for line in reader.lines() {
//!     println!("{}", String::from_utf8_lossy(&line.unwrap()));
//! }
//! ```
//!
//! # Assembling records
//!
//! [`SeqRecord`](record/struct.SeqRecord.html) holds the four fields of a
//! sequence record in reusable buffers:
//!
//! ```
//! use seqline::{LineReader, SeqBuffer, SeqRecord};
//!
//! let data = b"@read1 sample=1\nACGT\n+\nIIII\n";
//! let mut reader = LineReader::from_reader(&data[..]);
//! let mut line = SeqBuffer::new();
//! let mut record = SeqRecord::new();
//!
//! reader.read_line(&mut line).unwrap();
//! record.fill_header(&line.as_bytes()[1..]); // strip '@'
//! reader.read_line(&mut line).unwrap();
//! record.fill_seq(line.as_bytes());
//! reader.read_line(&mut line).unwrap(); // '+' separator line
//! reader.read_line(&mut line).unwrap();
//! record.fill_qual(line.as_bytes());
//!
//! assert_eq!(record.name.as_bytes(), b"read1");
//! assert_eq!(record.comment.as_bytes(), b"sample=1");
//! assert!(record.has_qual());
//! ```
//!
//! # Failure reporting
//!
//! Buffer-growth refusals and open failures are routed through a pluggable
//! [`ErrorHandler`](handler/trait.ErrorHandler.html) *and* returned as
//! ordinary `Result` errors. The default handler logs through the `log`
//! crate; `Silent` and `Fatal` variants are provided as well.

#[macro_use]
extern crate serde_derive;

// Invokes an ErrorHandler with a formatted message and the `file:line`
// of the invocation site.
macro_rules! report_err {
    ($handler:expr, $($arg:tt)*) => {
        $crate::handler::ErrorHandler::report(
            $handler,
            &format!($($arg)*),
            concat!(file!(), ":", line!()),
        )
    };
}

pub mod buffer;
mod error;
pub mod handler;
pub mod policy;
pub mod reader;
pub mod record;
pub mod stream;
mod util;

pub use crate::buffer::SeqBuffer;
pub use crate::error::{Error, Result};
pub use crate::handler::ErrorHandler;
pub use crate::policy::BufPolicy;
pub use crate::reader::{LineRead, LineReader, INIT_LINE_LEN};
pub use crate::record::SeqRecord;
pub use crate::stream::ZFile;
pub use crate::util::round_up_pow2;
