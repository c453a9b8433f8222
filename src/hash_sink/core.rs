/// Caller-owned incremental hash accumulator. The crate never creates or
/// destroys a `HashSink`; it only mixes material into one the caller
/// passes in.
///
/// `absorb_delimiter` exists so that `absorb_bytes(a); absorb_delimiter("x");
/// absorb_bytes(b)` is distinguishable from `absorb_bytes(a ++ b)` -- the
/// delimiter frames differently-typed fields so they can't collide by
/// concatenation.
pub trait HashSink {
    fn absorb_bytes(&mut self, bytes: &[u8]);
    fn absorb_delimiter(&mut self, label: &str);
    fn absorb_int(&mut self, value: i64);
}

/// Framing byte prepended to every delimiter label. `0xFF` cannot occur as
/// the first byte of any of this crate's own absorbed content (source
/// bytes, integers, and labels are all plain ASCII or raw little-endian
/// integers that this crate never leads with `0xFF` by construction), so it
/// reliably marks the start of a delimiter.
const DELIMITER_FRAME: u8 = 0xFF;

/// Built-in [`HashSink`] backed by BLAKE2b, so the crate is directly usable
/// without the caller supplying their own accumulator.
pub struct Blake2bSink {
    state: blake2b_simd::State,
}

impl Blake2bSink {
    pub fn new() -> Self {
        Blake2bSink {
            state: blake2b_simd::State::new(),
        }
    }

    pub fn finalize(&self) -> blake2b_simd::Hash {
        self.state.finalize()
    }
}

impl Default for Blake2bSink {
    fn default() -> Self {
        Self::new()
    }
}

impl HashSink for Blake2bSink {
    fn absorb_bytes(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    fn absorb_delimiter(&mut self, label: &str) {
        self.state.update(&[DELIMITER_FRAME]);
        self.state.update(&(label.len() as u32).to_le_bytes());
        self.state.update(label.as_bytes());
    }

    fn absorb_int(&mut self, value: i64) {
        self.state.update(&value.to_le_bytes());
    }
}
