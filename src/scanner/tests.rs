use super::core::{scan, scan_scalar, FOUND_DATE, FOUND_TIME, FOUND_TIMESTAMP};
use crate::buffer::PaddedBuffer;

fn scan_bytes(bytes: &[u8]) -> u8 {
    let buf = PaddedBuffer::from_bytes(bytes);
    scan_scalar(&buf).0
}

#[test]
fn scenario_date_in_comment() {
    assert_eq!(
        scan_bytes(b"int x = 1; // __DATE__\n"),
        FOUND_DATE
    );
}

#[test]
fn scenario_prefixed_macro_rejected() {
    assert_eq!(scan_bytes(b"x__DATE__y"), 0);
}

#[test]
fn scenario_all_three_macros() {
    assert_eq!(
        scan_bytes(b"__DATE__ __TIME__ __TIMESTAMP__"),
        FOUND_DATE | FOUND_TIME | FOUND_TIMESTAMP
    );
}

#[test]
fn scenario_extra_underscores_rejected() {
    assert_eq!(scan_bytes(b"___DATE___"), 0);
}

#[test]
fn scenario_empty_buffer() {
    assert_eq!(scan_bytes(b""), 0);
}

#[test]
fn buffer_shorter_than_needle() {
    assert_eq!(scan_bytes(b"__DATE"), 0);
    assert_eq!(scan_bytes(b"_"), 0);
}

#[test]
fn macro_at_exact_end_of_buffer() {
    assert_eq!(scan_bytes(b"x; __DATE__"), FOUND_DATE);
}

#[test]
fn back_to_back_macros_no_separator() {
    // "__DATE____TIME__": the trailing "__" of DATE and leading "__" of
    // TIME overlap into a run of 4 underscores. The byte right after
    // __DATE__'s closing "__" is itself a "_" (identifier byte), so the
    // boundary check on DATE's right side fails -- this models the
    // "overlapping false candidates" edge case, not the no-separator case.
    assert_eq!(scan_bytes(b"__DATE____TIME__"), 0);
}

#[test]
fn back_to_back_macros_with_separator_find_both() {
    assert_eq!(
        scan_bytes(b"__DATE__;__TIME__"),
        FOUND_DATE | FOUND_TIME
    );
}

#[test]
fn only_needle_alphabet_bytes_elsewhere_yields_zero_when_absent() {
    let s = b"the quick brown fox jumps over 12345";
    assert_eq!(scan_bytes(s), 0);
}

#[test]
fn token_boundary_property_sample() {
    for (prefix, suffix) in [("", ""), ("a", "b"), ("_", "_"), ("Z9", "9Z")] {
        let s = format!("{prefix}__DATE__{suffix}");
        assert_eq!(scan_bytes(s.as_bytes()), 0, "prefix={prefix:?} suffix={suffix:?}");
    }
    for (prefix, suffix) in [(" ", " "), (";", ";"), ("\n", "\n"), ("(", ")")] {
        let s = format!("{prefix}__DATE__{suffix}");
        assert_eq!(
            scan_bytes(s.as_bytes()),
            FOUND_DATE,
            "prefix={prefix:?} suffix={suffix:?}"
        );
    }
}

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
#[test]
fn scalar_and_simd_agree() {
    if !is_x86_feature_detected!("avx2") {
        return;
    }
    let samples: &[&[u8]] = &[
        b"",
        b"__DATE__",
        b"__TIME__",
        b"__TIMESTAMP__",
        b"x__DATE__y",
        b"___DATE___",
        b"__DATE__ __TIME__ __TIMESTAMP__ padding padding padding padding padding",
        b"no macros here at all, just plain english text of reasonable length",
    ];
    for sample in samples {
        let buf = PaddedBuffer::from_bytes(sample);
        let scalar = scan_scalar(&buf);
        // SAFETY: gated on is_x86_feature_detected!("avx2") above.
        let simd = unsafe { super::simd::scan_avx2(&buf) };
        assert_eq!(scalar, simd, "mismatch for {:?}", String::from_utf8_lossy(sample));
        assert_eq!(scan(&buf), scalar);
    }
}

use proptest::prelude::*;

/// Identifier-continuation bytes, for generating boundary-property
/// prefixes/suffixes.
fn identifier_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        Just(b'_'),
        (b'a'..=b'z'),
        (b'A'..=b'Z'),
        (b'0'..=b'9'),
    ]
}

/// Bytes outside the needle alphabet named in the universal invariant
/// (`_`, `E`, `D`, `A`, `T`, `I`, `M`, `S`, `P` -- matching is case-sensitive,
/// so lowercase letters are left in scope and simply can't form a match).
fn non_needle_byte() -> impl Strategy<Value = u8> {
    (0u8..=255u8).prop_filter("must not be a needle-alphabet byte", |&b| {
        !matches!(
            b,
            b'_' | b'E' | b'D' | b'A' | b'T' | b'I' | b'M' | b'S' | b'P'
        )
    })
}

proptest! {
    /// Universal invariant (SPEC §8): scalar and vectorized paths must agree
    /// on every input, not just the hand-picked samples above.
    #[test]
    fn prop_scalar_and_simd_agree(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        #[cfg(all(target_arch = "x86_64", feature = "simd"))]
        {
            if is_x86_feature_detected!("avx2") {
                let buf = PaddedBuffer::from_bytes(&bytes);
                let scalar = scan_scalar(&buf);
                // SAFETY: gated on is_x86_feature_detected!("avx2") above.
                let simd = unsafe { super::simd::scan_avx2(&buf) };
                prop_assert_eq!(scalar, simd);
            }
        }
    }

    /// Universal invariant: a buffer containing none of the needle-alphabet
    /// bytes can never match any of the three macros.
    #[test]
    fn prop_no_needle_bytes_yields_zero(bytes in proptest::collection::vec(non_needle_byte(), 0..512)) {
        prop_assert_eq!(scan_bytes(&bytes), 0);
    }

    /// Token-boundary property: identifier-character prefixes/suffixes
    /// always suppress a match; the fixed scenario test above only samples
    /// a handful of cases, this generalizes it.
    #[test]
    fn prop_identifier_boundary_suppresses_match(
        prefix in proptest::collection::vec(identifier_byte(), 0..6),
        suffix in proptest::collection::vec(identifier_byte(), 0..6),
    ) {
        let bytes: Vec<u8> = prefix.into_iter().chain(*b"__DATE__").chain(suffix).collect();
        prop_assert_eq!(scan_bytes(&bytes), 0);
    }

    /// `set_size(size())` must be a no-op for any live content, matching
    /// the `PaddedBuffer` idempotence invariant this module's scanner
    /// relies on for stable sentinel placement.
    #[test]
    fn prop_set_size_idempotent(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut buf = PaddedBuffer::from_bytes(&bytes);
        let before = buf.as_slice().to_vec();
        buf.set_size(buf.size());
        prop_assert_eq!(buf.as_slice().to_vec(), before);
        prop_assert_eq!(buf.leading_sentinel(), b'\n');
        prop_assert_eq!(buf.trailing_sentinel(), 0);
    }
}
