use std::io;
use std::path::Path;

/// Trailing sentinel bytes kept past the live region, in addition to the
/// single required post-sentinel at index `size()`. 32 rounds the worst
/// case last SIMD load (which reads up to 31 bytes past `size()`) up to a
/// whole vector width, so the vectorized scanner never special-cases the
/// tail of the buffer.
const TRAILING_PAD: usize = 32;

/// A byte buffer with one leading sentinel (`'\n'`) and at least
/// [`TRAILING_PAD`] trailing sentinel (`'\0'`) bytes around its live region.
///
/// The scanner's inner loop reads up to 7 bytes behind and up to 31 bytes
/// ahead of the cursor without bounds checks; the sentinel padding is what
/// makes that safe. See the module-level invariants in the crate's design
/// notes for the exact contract.
pub struct PaddedBuffer {
    /// Layout: `[leading sentinel][live region: capacity bytes][trailing pad]`.
    /// Length is always `1 + capacity + TRAILING_PAD`.
    data: Vec<u8>,
    capacity: usize,
    size: usize,
}

impl PaddedBuffer {
    /// Construct a buffer with live capacity `capacity`. `size()` starts at 0
    /// and all sentinel invariants hold immediately after construction.
    pub fn new(capacity: usize) -> Self {
        let mut data = vec![0u8; 1 + capacity + TRAILING_PAD];
        data[0] = b'\n';
        PaddedBuffer {
            data,
            capacity,
            size: 0,
        }
    }

    /// Build a buffer from raw bytes; `size() == capacity() == bytes.len()`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = PaddedBuffer::new(bytes.len());
        buf.as_mut_live_slice().copy_from_slice(bytes);
        buf.size = bytes.len();
        buf
    }

    /// Read a file into a buffer, sized by the file's reported length as a
    /// hint. Falls back to growing the buffer if the file turned out larger
    /// than the hint (e.g. it was modified between `stat` and `read`).
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let hint = std::fs::metadata(path).map(|m| m.len() as usize).ok();
        let mut file = std::fs::File::open(path)?;
        let mut buf = PaddedBuffer::new(hint.unwrap_or(0));
        let mut total = 0usize;
        loop {
            if total == buf.capacity {
                // `set_capacity` only preserves `min(size(), c)` live bytes, so
                // the bytes already read here must be reflected in `size`
                // before growing, or the grow zero-fills over them.
                buf.size = total;
                buf.set_capacity(buf.capacity + buf.capacity / 2 + 4096);
            }
            let n = {
                use std::io::Read;
                file.read(&mut buf.data[1 + total..1 + buf.capacity])?
            };
            if n == 0 {
                break;
            }
            total += n;
        }
        buf.set_size(total);
        Ok(buf)
    }

    /// Live byte count. Always `<= capacity()`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Allocated live-region capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The live region, `data[0..size()]`.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[1..1 + self.size]
    }

    /// Mutable access to the full live-capacity window (`0..capacity()`),
    /// for callers filling the buffer themselves before calling
    /// [`PaddedBuffer::set_size`].
    #[inline]
    pub fn as_mut_live_slice(&mut self) -> &mut [u8] {
        &mut self.data[1..1 + self.capacity]
    }

    /// The pre-sentinel byte at index `-1`. Always `b'\n'`.
    #[inline]
    pub fn leading_sentinel(&self) -> u8 {
        self.data[0]
    }

    /// The post-sentinel byte at index `size()`. Always `b'\0'`.
    #[inline]
    pub fn trailing_sentinel(&self) -> u8 {
        self.data[1 + self.size]
    }

    /// Set the live size. Requires `s <= capacity()`; this is a buffer
    /// invariant, not a recoverable caller error, so a violation panics.
    pub fn set_size(&mut self, s: usize) {
        assert!(
            s <= self.capacity,
            "set_size({s}) exceeds capacity({})",
            self.capacity
        );
        self.size = s;
        self.restore_trailing_sentinels();
    }

    /// Reallocate to a new capacity, preserving live bytes up to
    /// `min(size(), c)` and clamping `size()` if it shrank below the old
    /// size. Sentinels are restored after the move.
    pub fn set_capacity(&mut self, c: usize) {
        let mut new_data = vec![0u8; 1 + c + TRAILING_PAD];
        new_data[0] = b'\n';
        let keep = self.size.min(c);
        new_data[1..1 + keep].copy_from_slice(&self.data[1..1 + keep]);
        self.data = new_data;
        self.capacity = c;
        self.size = keep;
        self.restore_trailing_sentinels();
    }

    /// Zero every byte from `size()` through the end of the allocation,
    /// re-establishing the post-sentinel and the full trailing pad.
    fn restore_trailing_sentinels(&mut self) {
        let start = 1 + self.size;
        for b in &mut self.data[start..] {
            *b = 0;
        }
    }

    /// Raw pointer to the start of the live region (index 0). Valid reads
    /// extend from `ptr().offset(-1)` (the leading sentinel) through
    /// `ptr().add(size() + TRAILING_PAD - 1)`.
    #[inline]
    pub(crate) fn scan_ptr(&self) -> *const u8 {
        // SAFETY: `data` always has at least one element at index 0.
        unsafe { self.data.as_ptr().add(1) }
    }
}
