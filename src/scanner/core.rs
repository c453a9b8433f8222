use std::fmt;
use std::sync::OnceLock;

use crate::buffer::PaddedBuffer;

/// `__DATE__` was found as a whole token.
pub const FOUND_DATE: u8 = 1 << 0;
/// `__TIME__` was found as a whole token.
pub const FOUND_TIME: u8 = 1 << 1;
/// `__TIMESTAMP__` was found as a whole token.
pub const FOUND_TIMESTAMP: u8 = 1 << 2;

/// Bitmask over the three temporal macros. Any combination is legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Findings(pub u8);

impl Findings {
    pub const NONE: Findings = Findings(0);

    #[inline]
    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    #[inline]
    pub fn set(&mut self, bit: u8) {
        self.0 |= bit;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Findings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut parts = Vec::with_capacity(3);
        if self.contains(FOUND_DATE) {
            parts.push("DATE");
        }
        if self.contains(FOUND_TIME) {
            parts.push("TIME");
        }
        if self.contains(FOUND_TIMESTAMP) {
            parts.push("TIMESTAMP");
        }
        write!(f, "{}", parts.join("|"))
    }
}

/// A byte is an identifier-continuation character per the token-boundary
/// rule: `[A-Za-z0-9_]`.
#[inline]
fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// The three candidate needles, expressed as the bytes following the
/// leading macro underscore (i.e. starting at the *second* `_`), which is
/// exactly what [`verify_candidate`] receives as `p`.
const NEEDLE_DATE: &[u8] = b"_DATE__";
const NEEDLE_TIME: &[u8] = b"_TIME__";
const NEEDLE_TIMESTAMP: &[u8] = b"_TIMESTAMP__";

/// Verify a candidate match. `p` must point at the byte immediately after
/// the macro's leading underscore (i.e. the second `_` of `__MACRO__`), and
/// must be backed by at least one valid byte of pre-sentinel at `p[-2]` and
/// a valid post-macro byte once `match_len` is known — which the
/// [`PaddedBuffer`] contract guarantees for any `p` drawn from its live
/// region plus sentinels.
///
/// Returns the bit to set if this is a genuine, token-bounded occurrence.
pub(crate) fn verify_candidate(buf: &PaddedBuffer, p_offset: isize) -> Option<u8> {
    let size = buf.size() as isize;
    let remaining = size - p_offset;
    if remaining < 7 {
        return None;
    }

    // SAFETY: `p_offset` ranges over `-1 ..= size`, and the buffer guarantees
    // valid reads for indices `-1 ..= size + TRAILING_PAD - 1`. `read_at`
    // only ever looks at most 12 bytes ahead and 2 bytes behind, both within
    // that range for any `p_offset` produced by the scalar or SIMD callers.
    let read_at = |offset: isize| -> u8 {
        unsafe { *buf.scan_ptr().offset(offset) }
    };

    let (bit, match_len) = if remaining >= 12 && slice_eq(buf, p_offset, NEEDLE_TIMESTAMP) {
        (FOUND_TIMESTAMP, 12isize)
    } else if slice_eq(buf, p_offset, NEEDLE_DATE) {
        (FOUND_DATE, 7isize)
    } else if slice_eq(buf, p_offset, NEEDLE_TIME) {
        (FOUND_TIME, 7isize)
    } else {
        return None;
    };

    let pre = read_at(p_offset - 2);
    let post = read_at(p_offset + match_len);
    if is_identifier_byte(pre) || is_identifier_byte(post) {
        return None;
    }
    Some(bit)
}

/// Compare `needle.len()` bytes starting at `p_offset` against `needle`.
/// Caller has already established `remaining >= needle.len()`.
#[inline]
fn slice_eq(buf: &PaddedBuffer, p_offset: isize, needle: &[u8]) -> bool {
    // SAFETY: caller (verify_candidate) only calls this once it has checked
    // `remaining >= needle.len()`, and `p_offset >= -1` for every caller in
    // this module, so the read stays within the padded buffer's valid range.
    let base = unsafe { buf.scan_ptr().offset(p_offset) };
    for (i, &want) in needle.iter().enumerate() {
        let got = unsafe { *base.add(i) };
        if got != want {
            return false;
        }
    }
    true
}

/// 256-entry Boyer-Moore-Horspool skip table for the 8-byte candidate
/// window of the three temporal macros (`__DATE__`, `__TIME__`, and the
/// first 8 bytes of `__TIMESTAMP__`). Built at compile time; pure function
/// of the fixed needle set, so there is nothing to memoize at runtime.
const BMH_TABLE: [u8; 256] = build_bmh_table();

const fn build_bmh_table() -> [u8; 256] {
    const WINDOW: usize = 8;
    let needles: [&[u8]; 3] = [b"__DATE__", b"__TIME__", b"__TIMEST"];
    let mut table = [WINDOW as u8; 256];
    let mut n = 0;
    while n < needles.len() {
        let needle = needles[n];
        let mut pos = 0;
        // Classical Horspool: for every byte except the window's last
        // position, record the distance from the end; keep the smallest
        // (safest) distance seen across all three needles.
        while pos < WINDOW - 1 {
            let c = needle[pos] as usize;
            let dist = (WINDOW - 1 - pos) as u8;
            if dist < table[c] {
                table[c] = dist;
            }
            pos += 1;
        }
        n += 1;
    }
    table
}

/// Scalar Boyer-Moore-Horspool scan, per the spec's 8-byte needle profile.
/// Correct for all inputs; used whenever the vectorized path is unavailable
/// or disabled.
pub fn scan_scalar(buf: &PaddedBuffer) -> Findings {
    let size = buf.size();
    if size < 8 {
        return Findings::NONE;
    }

    let mut findings = Findings::NONE;
    let mut i: usize = 7;

    // SAFETY: all reads below are at `i - 7 ..= i`, with `i` ranging over
    // `7 .. size`; every such index is within the live region (`0..size`),
    // which the buffer guarantees is valid to read.
    let byte_at = |idx: usize| -> u8 { unsafe { *buf.scan_ptr().add(idx) } };

    while i < size {
        let last = byte_at(i);
        if byte_at(i - 2) == b'E' && byte_at(i - 7) == b'_' {
            if let Some(bit) = verify_candidate(buf, (i - 6) as isize) {
                findings.set(bit);
            }
        }
        let skip = BMH_TABLE[last as usize].max(1) as usize;
        i += skip;
    }

    findings
}

static AVX2_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Memoized AVX2 feature probe. The spec calls for querying CPU support "at
/// the first call"; a [`OnceLock`] makes every later scan free.
#[inline]
#[allow(dead_code)]
fn avx2_available() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        *AVX2_AVAILABLE.get_or_init(|| is_x86_feature_detected!("avx2"))
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

/// Scan a padded buffer for occurrences of `__DATE__`, `__TIME__`, and
/// `__TIMESTAMP__`, returning a bitmask of which were found as whole
/// tokens. Dispatches to the vectorized path when the host supports AVX2
/// and the crate was built with the `simd` feature; falls back to the
/// scalar path otherwise. Both paths are observationally identical.
pub fn scan(buf: &PaddedBuffer) -> Findings {
    #[cfg(all(target_arch = "x86_64", feature = "simd"))]
    {
        if avx2_available() {
            // SAFETY: gated on `is_x86_feature_detected!("avx2")` above.
            return unsafe { crate::scanner::simd::scan_avx2(buf) };
        }
    }
    scan_scalar(buf)
}
