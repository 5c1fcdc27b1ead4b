//! Streaming hash support with caller-chosen output lengths.
//!
//! Signature schemes consume digests through the [`ExpandHasher`] facade:
//! a streaming `update`/`finalize_into` pair where the caller picks the
//! output length. Fixed-output functions (SHA-512) assert the requested
//! length; extendable-output functions (SHAKE256) honour any length.

mod sha512;
pub use sha512::Sha512;

mod shake256;
pub use shake256::Shake256;

/// A streaming hash whose output is written into a caller-provided buffer.
pub trait ExpandHasher: Sized {
    /// Creates a fresh hash state.
    #[must_use]
    fn new() -> Self;

    /// Absorbs additional input. Can be called multiple times.
    fn update(&mut self, input: impl AsRef<[u8]>);

    /// Pads and squeezes the state into `output`.
    ///
    /// # Panics
    ///
    /// Panics if the hash has a fixed output size and `output` has a
    /// different length.
    fn finalize_into(self, output: &mut [u8]);

    /// One-shot digest of `data` into `output`.
    fn digest(data: &[u8], output: &mut [u8]) {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize_into(output);
    }

    /// One-shot digest of up to three concatenated inputs into `output`.
    fn multi(a: &[u8], b: &[u8], c: Option<&[u8]>, output: &mut [u8]) {
        let mut hasher = Self::new();
        hasher.update(a);
        hasher.update(b);
        if let Some(c) = c {
            hasher.update(c);
        }
        hasher.finalize_into(output);
    }
}
