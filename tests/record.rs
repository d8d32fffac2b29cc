use seqline::{SeqBuffer, SeqRecord};

#[test]
fn creation_variants_and_validity() {
    let full = SeqRecord::new();
    assert!(full.is_valid());
    assert!(full.is_valid_no_comment());
    assert!(full.is_valid_no_qual());
    assert!(full.is_valid_no_comment_or_qual());

    let fasta = SeqRecord::without_qual();
    assert!(!fasta.is_valid());
    assert!(!fasta.is_valid_no_comment());
    assert!(fasta.is_valid_no_qual());
    assert!(fasta.is_valid_no_comment_or_qual());

    let minimal = SeqRecord::without_comment_or_qual();
    assert!(!minimal.is_valid());
    assert!(!minimal.is_valid_no_comment());
    assert!(!minimal.is_valid_no_qual());
    assert!(minimal.is_valid_no_comment_or_qual());
}

#[test]
fn empty_comment_is_not_a_comment() {
    // allocated but empty: present fields only count when non-empty
    let mut record = SeqRecord::new();
    record.fill_name(b"r1");
    record.fill_seq(b"ACGT");
    assert!(record.is_valid());
    assert!(!record.has_comment());
    assert!(!record.has_qual());

    record.fill_comment(b"sample=1");
    assert!(record.has_comment());

    // unallocated comment: fails strict validity, passes the relaxed check
    let minimal = SeqRecord::without_comment_or_qual();
    assert!(!minimal.has_comment());
    assert!(!minimal.is_valid());
    assert!(minimal.is_valid_no_comment_or_qual());
}

#[test]
fn fill_round_trip() {
    let mut record = SeqRecord::new();
    record.fill(b"r1", b"sample=1", b"ACGTACGT", b"IIIIIIII");
    assert_eq!(record.name.as_bytes(), b"r1");
    assert_eq!(record.comment.as_bytes(), b"sample=1");
    assert_eq!(record.seq.as_bytes(), b"ACGTACGT");
    assert_eq!(record.qual.as_bytes(), b"IIIIIIII");
    assert!(record.has_comment());
    assert!(record.has_qual());
}

#[test]
fn fill_header_splits_at_first_space() {
    let mut record = SeqRecord::new();
    record.fill_header(b"read1 length=4 pair=2");
    assert_eq!(record.name.as_bytes(), b"read1");
    // everything after the first space belongs to the comment
    assert_eq!(record.comment.as_bytes(), b"length=4 pair=2");
}

#[test]
fn fill_header_without_comment_clears_it() {
    let mut record = SeqRecord::new();
    record.fill_comment(b"stale");
    record.fill_header(b"read1");
    assert_eq!(record.name.as_bytes(), b"read1");
    assert!(!record.has_comment());
    assert!(record.comment.is_allocated());
}

#[test]
fn fill_header_allocates_comment_on_demand() {
    let mut record = SeqRecord::without_comment_or_qual();
    record.fill_header(b"read1 extra");
    assert_eq!(record.name.as_bytes(), b"read1");
    assert_eq!(record.comment.as_bytes(), b"extra");
    assert!(record.has_comment());
}

#[test]
fn clear_retains_capacity() {
    let mut record = SeqRecord::new();
    record.fill(b"r1", b"c", &[b'A'; 500], &[b'I'; 500]);
    let seq_cap = record.seq.capacity();
    record.clear();
    assert!(record.seq.is_empty());
    assert!(record.qual.is_empty());
    assert_eq!(record.seq.capacity(), seq_cap);
    assert!(record.is_valid());
}

#[test]
fn copy_preserves_record_shape() {
    let mut src = SeqRecord::without_qual();
    src.fill_header(b"r1 c1");
    src.fill_seq(b"ACGT");

    let mut dest = SeqRecord::new();
    dest.fill_qual(b"stale");
    dest.copy_from(&src);

    assert_eq!(dest.name.as_bytes(), b"r1");
    assert_eq!(dest.comment.as_bytes(), b"c1");
    assert_eq!(dest.seq.as_bytes(), b"ACGT");
    // the source has no quality, so the destination's was cleared
    assert!(!dest.has_qual());
    assert!(dest.qual.is_allocated());
}

#[test]
fn copy_into_unallocated_fields_initializes_them() {
    let mut src = SeqRecord::new();
    src.fill(b"r1", b"c1", b"ACGT", b"IIII");

    let mut dest = SeqRecord::without_comment_or_qual();
    dest.copy_from(&src);
    assert!(dest.is_valid());
    assert_eq!(dest.comment.as_bytes(), b"c1");
    assert_eq!(dest.qual.as_bytes(), b"IIII");
}

#[test]
fn fastq_len_matches_formatted_size() {
    let mut record = SeqRecord::new();
    record.fill(b"r1", b"c", b"ACGT", b"IIII");
    // "@r1 c\nACGT\n+\nIIII\n"
    assert_eq!(record.fastq_len(), Some(18));

    let mut plain = SeqRecord::without_comment_or_qual();
    plain.fill_name(b"r1");
    plain.fill_seq(b"ACGT");
    // "@r1\nACGT\n"
    assert_eq!(plain.fastq_len(), Some(9));

    // name or sequence missing: no length
    let empty = SeqRecord {
        name: SeqBuffer::new(),
        comment: SeqBuffer::new(),
        seq: SeqBuffer::new(),
        qual: SeqBuffer::new(),
    };
    assert_eq!(empty.fastq_len(), None);
}
