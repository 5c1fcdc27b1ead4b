//! SHAKE256 behind the [`ExpandHasher`] facade.

use tiny_keccak::{Hasher as KeccakHasher, Shake};

use crate::hash::ExpandHasher;

/// Streaming SHAKE256 extendable-output function.
#[derive(Clone)]
pub struct Shake256(Shake);

impl ExpandHasher for Shake256 {
    fn new() -> Self {
        Self(Shake::v256())
    }

    fn update(&mut self, input: impl AsRef<[u8]>) {
        self.0.update(input.as_ref());
    }

    fn finalize_into(self, output: &mut [u8]) {
        self.0.finalize(output);
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn empty_input_prefix() {
        let mut out = [0u8; 32];
        Shake256::digest(b"", &mut out);
        assert_eq!(
            out,
            hex!("46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f")
        );
    }

    #[test]
    fn longer_output_extends_shorter_one() {
        let mut short = [0u8; 32];
        Shake256::digest(b"edwards", &mut short);

        let mut long = [0u8; 114];
        Shake256::digest(b"edwards", &mut long);

        assert_eq!(short, long[..32]);
    }
}
