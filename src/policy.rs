use crate::util::round_up_pow2;

/// Policy that decides how a line buffer should grow.
///
/// Takes the current buffer size in bytes and returns the new size the
/// buffer should grow to. Returning `None` instead indicates that the
/// buffer has grown too big; [`LineReader`](crate::LineReader) then returns
/// [`Error::BufferLimit`](crate::Error::BufferLimit).
///
/// # Example
///
/// ```
/// use seqline::{BufPolicy, LineReader, SeqBuffer};
///
/// struct Max1G;
///
/// // This policy lets the buffer double each time, but
/// // limits the buffer size to 1 GiB.
/// impl BufPolicy for Max1G {
///     fn grow_to(&mut self, current_size: usize) -> Option<usize> {
///         if current_size >= 1 << 30 {
///             return None;
///         }
///         Some(current_size * 2)
///     }
/// }
///
/// let mut reader = LineReader::from_reader(&b"ACGT\n"[..]).set_policy(Max1G);
/// let mut line = SeqBuffer::new();
/// reader.read_line(&mut line).unwrap();
/// assert_eq!(line.as_bytes(), b"ACGT");
/// ```
pub trait BufPolicy {
    fn grow_to(&mut self, current_size: usize) -> Option<usize>;
}

/// Standard buffer policy: whenever the buffer fills up, its size is
/// rounded up to the power of two enclosing `current_size + 1`, i.e. it
/// doubles once the size is itself a power of two. Buffer size is not
/// limited, it could theoretically grow indefinitely.
pub struct StdPolicy;

impl BufPolicy for StdPolicy {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        Some(round_up_pow2(current_size + 1))
    }
}

/// Buffer size doubles until it reaches a given limit (in bytes). Above,
/// it will increase linearly in steps of `double_until`. Buffer size is
/// additionally limited to `limit` bytes; the reader will return an error
/// if this limit is reached.
pub struct DoubleUntilLimited {
    double_until: usize,
    limit: usize,
}

impl DoubleUntilLimited {
    pub fn new(double_until: usize, limit: usize) -> Self {
        DoubleUntilLimited {
            double_until,
            limit,
        }
    }
}

impl BufPolicy for DoubleUntilLimited {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        let new_size = if current_size < self.double_until {
            round_up_pow2(current_size + 1)
        } else {
            current_size + self.double_until
        };
        if new_size <= self.limit {
            Some(new_size)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_policy_doubles_power_of_two_sizes() {
        let mut p = StdPolicy;
        assert_eq!(p.grow_to(128), Some(256));
        assert_eq!(p.grow_to(256), Some(512));
        // non-power sizes round up to the enclosing power
        assert_eq!(p.grow_to(100), Some(128));
    }

    #[test]
    fn limited_policy_refuses_above_limit() {
        let mut p = DoubleUntilLimited::new(1 << 10, 1 << 12);
        assert_eq!(p.grow_to(512), Some(1024));
        assert_eq!(p.grow_to(1024), Some(2048));
        assert_eq!(p.grow_to(2048), Some(3072));
        assert_eq!(p.grow_to(4096), None);
    }
}
