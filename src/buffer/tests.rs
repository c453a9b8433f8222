use super::core::PaddedBuffer;

#[test]
fn fresh_buffer_has_sentinels() {
    let buf = PaddedBuffer::new(16);
    assert_eq!(buf.size(), 0);
    assert_eq!(buf.leading_sentinel(), b'\n');
    assert_eq!(buf.trailing_sentinel(), 0);
}

#[test]
fn set_size_idempotent() {
    let mut buf = PaddedBuffer::from_bytes(b"hello");
    let before = buf.as_slice().to_vec();
    buf.set_size(buf.size());
    assert_eq!(buf.as_slice(), &before[..]);
    assert_eq!(buf.leading_sentinel(), b'\n');
    assert_eq!(buf.trailing_sentinel(), 0);
}

#[test]
fn set_capacity_shrinks_and_clamps_size() {
    let mut buf = PaddedBuffer::from_bytes(b"hello world");
    buf.set_capacity(5);
    assert_eq!(buf.size(), 5);
    assert_eq!(buf.as_slice(), b"hello");
    assert_eq!(buf.trailing_sentinel(), 0);
}

#[test]
fn set_capacity_grows_preserves_live_bytes() {
    let mut buf = PaddedBuffer::from_bytes(b"hi");
    buf.set_capacity(64);
    assert_eq!(buf.size(), 2);
    assert_eq!(buf.as_slice(), b"hi");
    assert_eq!(buf.trailing_sentinel(), 0);
}

#[test]
fn empty_buffer_sentinels_hold() {
    let buf = PaddedBuffer::from_bytes(b"");
    assert_eq!(buf.size(), 0);
    assert_eq!(buf.leading_sentinel(), b'\n');
    assert_eq!(buf.trailing_sentinel(), 0);
}

#[test]
fn from_file_reads_content(
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    use std::io::Write;
    write!(file, "int x = 1; // __DATE__\n")?;
    let buf = PaddedBuffer::from_file(file.path())?;
    assert_eq!(buf.as_slice(), b"int x = 1; // __DATE__\n");
    assert_eq!(buf.trailing_sentinel(), 0);
    Ok(())
}
