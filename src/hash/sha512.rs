//! SHA-512 behind the [`ExpandHasher`] facade.

use sha2::Digest;

use crate::hash::ExpandHasher;

/// Streaming SHA-512 with a fixed 64-byte output.
#[derive(Clone)]
pub struct Sha512(sha2::Sha512);

impl ExpandHasher for Sha512 {
    fn new() -> Self {
        Self(sha2::Sha512::new())
    }

    fn update(&mut self, input: impl AsRef<[u8]>) {
        Digest::update(&mut self.0, input);
    }

    fn finalize_into(self, output: &mut [u8]) {
        assert_eq!(output.len(), 64, "SHA-512 output is 64 bytes");
        output.copy_from_slice(&self.0.finalize());
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn empty_input() {
        let mut out = [0u8; 64];
        Sha512::digest(b"", &mut out);
        assert_eq!(
            out,
            hex!(
                "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce"
                "47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
            )
        );
    }

    #[test]
    fn split_updates_match_one_shot() {
        let mut split = [0u8; 64];
        let mut hasher = Sha512::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        hasher.finalize_into(&mut split);

        let mut whole = [0u8; 64];
        Sha512::digest(b"hello world", &mut whole);
        assert_eq!(split, whole);
    }
}
