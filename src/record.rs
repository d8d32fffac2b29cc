//! Sequence records composed of name/comment/sequence/quality buffers.

use memchr::memchr;

use crate::buffer::SeqBuffer;

// Initial capacity of each pre-allocated record field.
const INIT_FIELD_LEN: usize = 128;

/// A sequence record: name, comment, sequence and quality, each held in
/// its own reusable [`SeqBuffer`].
///
/// Depending on the file format, some fields are legitimately absent:
/// FASTA has no quality, and minimal headers have no comment. Absence is
/// modeled as an *unallocated* field buffer, which is distinct from a
/// field that is present but empty: [`has_comment`](SeqRecord::has_comment)
/// and [`has_qual`](SeqRecord::has_qual) report `true` only for allocated,
/// non-empty fields.
///
/// # Example
///
/// ```
/// use seqline::SeqRecord;
///
/// let mut record = SeqRecord::without_qual();
/// record.fill_header(b"read1 length=4");
/// record.fill_seq(b"ACGT");
///
/// assert_eq!(record.name.as_bytes(), b"read1");
/// assert_eq!(record.comment.as_bytes(), b"length=4");
/// assert!(record.is_valid_no_qual());
/// assert!(!record.is_valid());
/// assert!(!record.has_qual());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqRecord {
    pub name: SeqBuffer,
    pub comment: SeqBuffer,
    pub seq: SeqBuffer,
    pub qual: SeqBuffer,
}

impl SeqRecord {
    /// Creates a record with all four fields pre-allocated.
    pub fn new() -> SeqRecord {
        SeqRecord {
            name: SeqBuffer::with_capacity(INIT_FIELD_LEN),
            comment: SeqBuffer::with_capacity(INIT_FIELD_LEN),
            seq: SeqBuffer::with_capacity(INIT_FIELD_LEN),
            qual: SeqBuffer::with_capacity(INIT_FIELD_LEN),
        }
    }

    /// Creates a record without a quality field, as read from FASTA.
    pub fn without_qual() -> SeqRecord {
        SeqRecord {
            name: SeqBuffer::with_capacity(INIT_FIELD_LEN),
            comment: SeqBuffer::with_capacity(INIT_FIELD_LEN),
            seq: SeqBuffer::with_capacity(INIT_FIELD_LEN),
            qual: SeqBuffer::new(),
        }
    }

    /// Creates a record with neither comment nor quality fields, as read
    /// from FASTA with minimal headers.
    pub fn without_comment_or_qual() -> SeqRecord {
        SeqRecord {
            name: SeqBuffer::with_capacity(INIT_FIELD_LEN),
            comment: SeqBuffer::new(),
            seq: SeqBuffer::with_capacity(INIT_FIELD_LEN),
            qual: SeqBuffer::new(),
        }
    }

    // One validity check parameterized by which optional fields are
    // required; the public predicates below are the supported
    // combinations.
    fn valid_with(&self, need_comment: bool, need_qual: bool) -> bool {
        self.name.is_allocated()
            && self.seq.is_allocated()
            && (!need_comment || self.comment.is_allocated())
            && (!need_qual || self.qual.is_allocated())
    }

    /// All four fields are allocated and usable.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid_with(true, true)
    }

    /// Like [`is_valid`](SeqRecord::is_valid), but the comment may be
    /// unallocated.
    #[inline]
    pub fn is_valid_no_comment(&self) -> bool {
        self.valid_with(false, true)
    }

    /// Like [`is_valid`](SeqRecord::is_valid), but the quality may be
    /// unallocated (FASTA).
    #[inline]
    pub fn is_valid_no_qual(&self) -> bool {
        self.valid_with(true, false)
    }

    /// Only name and sequence are required.
    #[inline]
    pub fn is_valid_no_comment_or_qual(&self) -> bool {
        self.valid_with(false, false)
    }

    /// Whether a comment is present: allocated and non-empty.
    #[inline]
    pub fn has_comment(&self) -> bool {
        self.comment.is_allocated() && !self.comment.is_empty()
    }

    /// Whether quality values are present: allocated and non-empty.
    #[inline]
    pub fn has_qual(&self) -> bool {
        self.qual.is_allocated() && !self.qual.is_empty()
    }

    /// Fills the name field from a byte span.
    #[inline]
    pub fn fill_name(&mut self, name: &[u8]) {
        self.name.fill(name);
    }

    /// Fills the comment field from a byte span.
    #[inline]
    pub fn fill_comment(&mut self, comment: &[u8]) {
        self.comment.fill(comment);
    }

    /// Fills the sequence field from a byte span.
    #[inline]
    pub fn fill_seq(&mut self, seq: &[u8]) {
        self.seq.fill(seq);
    }

    /// Fills the quality field from a byte span.
    #[inline]
    pub fn fill_qual(&mut self, qual: &[u8]) {
        self.qual.fill(qual);
    }

    /// Fills all four fields at once.
    pub fn fill(&mut self, name: &[u8], comment: &[u8], seq: &[u8], qual: &[u8]) {
        self.fill_name(name);
        self.fill_comment(comment);
        self.fill_seq(seq);
        self.fill_qual(qual);
    }

    /// Fills name and comment from a header line (without the leading
    /// `@` or `>` marker): the name is everything before the first space,
    /// the comment everything after it. A header without a space clears
    /// the comment.
    pub fn fill_header(&mut self, header: &[u8]) {
        match memchr(b' ', header) {
            Some(pos) => {
                self.name.fill(&header[..pos]);
                self.comment.fill(&header[pos + 1..]);
            }
            None => {
                self.name.fill(header);
                self.comment.clear();
            }
        }
    }

    /// Empties all four fields, retaining their capacities, so the record
    /// can be refilled without reallocating.
    pub fn clear(&mut self) {
        self.name.clear();
        self.comment.clear();
        self.seq.clear();
        self.qual.clear();
    }

    /// Replaces this record's fields with copies of `src`'s, reusing
    /// existing capacity. Fields that are unallocated in `src` are cleared
    /// in the destination (their allocation state is left as-is), so
    /// records of any shape copy faithfully.
    pub fn copy_from(&mut self, src: &SeqRecord) {
        copy_field(&mut self.name, &src.name);
        copy_field(&mut self.comment, &src.comment);
        copy_field(&mut self.seq, &src.seq);
        copy_field(&mut self.qual, &src.qual);
    }

    /// Number of bytes this record occupies when formatted as FASTQ
    /// (marker, newlines and the `+` separator line included; comment and
    /// quality only if present). `None` unless name and sequence are
    /// allocated.
    pub fn fastq_len(&self) -> Option<usize> {
        if !self.is_valid_no_comment_or_qual() {
            return None;
        }
        let mut n = 1 + self.name.len(); // '@' and name
        if self.has_comment() {
            n += 1 + self.comment.len(); // ' ' and comment
        }
        n += 1 + self.seq.len() + 1; // '\n', sequence, '\n'
        if self.has_qual() {
            n += 2 + self.qual.len() + 1; // "+\n", quality, '\n'
        }
        Some(n)
    }
}

impl Default for SeqRecord {
    fn default() -> SeqRecord {
        SeqRecord::new()
    }
}

// `copy_from` on an unallocated source fails; an unallocated source field
// here simply means "this record has no such field".
fn copy_field(dest: &mut SeqBuffer, src: &SeqBuffer) {
    if src.is_allocated() {
        // infallible: the source is allocated
        let _ = dest.copy_from(src);
    } else {
        dest.clear();
    }
}
