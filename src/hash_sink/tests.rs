use super::core::{Blake2bSink, HashSink};

#[test]
fn delimiter_distinguishes_concatenation() {
    let mut a = Blake2bSink::new();
    a.absorb_bytes(b"foo");
    a.absorb_delimiter("x");
    a.absorb_bytes(b"bar");

    let mut b = Blake2bSink::new();
    b.absorb_bytes(b"foobar");

    assert_ne!(a.finalize(), b.finalize());
}

#[test]
fn same_sequence_is_deterministic() {
    let mut a = Blake2bSink::new();
    a.absorb_bytes(b"foo");
    a.absorb_delimiter("date");
    a.absorb_int(2026);

    let mut b = Blake2bSink::new();
    b.absorb_bytes(b"foo");
    b.absorb_delimiter("date");
    b.absorb_int(2026);

    assert_eq!(a.finalize(), b.finalize());
}

#[test]
fn absorbing_nothing_matches_fresh_state() {
    let a = Blake2bSink::new();
    let b = Blake2bSink::new();
    assert_eq!(a.finalize(), b.finalize());
}

#[test]
fn different_ints_diverge() {
    let mut a = Blake2bSink::new();
    a.absorb_int(1);
    let mut b = Blake2bSink::new();
    b.absorb_int(2);
    assert_ne!(a.finalize(), b.finalize());
}
