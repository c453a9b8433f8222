//! AVX2 vectorized temporal-macro scan. Only compiled for `x86_64` with the
//! `simd` crate feature enabled; [`crate::scanner::core::scan`] falls back
//! to the scalar path everywhere else.

#![cfg(all(target_arch = "x86_64", feature = "simd"))]

use core::arch::x86_64::*;

use crate::buffer::PaddedBuffer;
use crate::scanner::core::{verify_candidate, Findings};

/// Process 32 bytes per iteration. For every position `i` in range, compare
/// `start[i]` against `'_'` and `start[i+5]` against `'E'` — the two
/// anchors common to all three macros — and verify every candidate that
/// passes both.
///
/// # Safety
/// Caller must have confirmed AVX2 support via `is_x86_feature_detected!`.
#[target_feature(enable = "avx2")]
pub unsafe fn scan_avx2(buf: &PaddedBuffer) -> Findings {
    let size = buf.size();
    let mut findings = Findings::NONE;
    if size < 8 {
        return findings;
    }

    let base = buf.scan_ptr();
    let underscore = _mm256_set1_epi8(b'_' as i8);
    let e_char = _mm256_set1_epi8(b'E' as i8);

    let mut i: usize = 0;
    // Loop condition per spec: `i + 8 <= size`. The 32-byte loads below read
    // up to `i + 36` bytes ahead (`i + 5 + 32`), which stays within the
    // buffer's trailing sentinel pad for every `i` satisfying that bound,
    // since the buffer guarantees `size + 31` valid trailing bytes.
    while i + 8 <= size {
        // SAFETY: `base` points at the live region's start; offsets `i` and
        // `i + 5` plus a 32-byte load stay within `size + TRAILING_PAD`.
        let first = unsafe { _mm256_loadu_si256(base.add(i) as *const __m256i) };
        let last = unsafe { _mm256_loadu_si256(base.add(i + 5) as *const __m256i) };

        let first_eq = _mm256_cmpeq_epi8(first, underscore);
        let last_eq = _mm256_cmpeq_epi8(last, e_char);
        let both = _mm256_and_si256(first_eq, last_eq);
        let mut mask = _mm256_movemask_epi8(both) as u32;

        while mask != 0 {
            let b = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            let p_offset = (i + b + 1) as isize;
            if let Some(bit) = verify_candidate(buf, p_offset) {
                findings.set(bit);
            }
        }

        i += 32;
    }

    findings
}
