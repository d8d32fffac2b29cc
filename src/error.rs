use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by buffer and line-reading operations.
///
/// Reaching the end of the input is *not* an error; it is reported as
/// [`LineRead::Eof`](crate::LineRead::Eof).
#[derive(Debug)]
pub enum Error {
    /// I/O error from the underlying stream
    Io(io::Error),
    /// Opening a file through the codec failed
    Open {
        /// Path that could not be opened
        path: PathBuf,
        /// OS/codec error description
        source: io::Error,
    },
    /// Buffer growth was refused by the policy
    /// ([`BufPolicy::grow_to`](crate::BufPolicy::grow_to) returned `None`).
    /// This does not happen with the default
    /// [`StdPolicy`](crate::policy::StdPolicy), which does not impose a
    /// memory limit.
    BufferLimit,
    /// An operation that never allocates was handed an unallocated buffer
    UnallocatedBuffer,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref e) => e.fmt(f),
            Error::Open {
                ref path,
                ref source,
            } => write!(f, "opening file '{}' failed: {}", path.display(), source),
            Error::BufferLimit => write!(f, "line buffer limit reached"),
            Error::UnallocatedBuffer => {
                write!(f, "operation requires an allocated buffer")
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            Error::Open { ref source, .. } => Some(source),
            _ => None,
        }
    }
}
