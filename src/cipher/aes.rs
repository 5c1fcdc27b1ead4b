//! AES key schedules behind the [`BlockCipher`] facade.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};

use super::{BlockCipher, CipherError, Result};

macro_rules! impl_aes {
    ($name:ident, $inner:ty, $bits:expr) => {
        #[doc = "AES with a"]
        #[doc = stringify!($bits)]
        #[doc = "bit key."]
        pub struct $name($inner);

        impl BlockCipher for $name {
            const BLOCK_SIZE: usize = 16;

            fn new(key: &[u8]) -> Result<Self> {
                <$inner>::new_from_slice(key)
                    .map(Self)
                    .map_err(|_| CipherError::InvalidKeyLength)
            }

            fn encrypt_block(&self, input: &[u8], output: &mut [u8]) {
                let mut block = *GenericArray::from_slice(input);
                self.0.encrypt_block(&mut block);
                output.copy_from_slice(&block);
            }

            fn decrypt_block(&self, input: &[u8], output: &mut [u8]) {
                let mut block = *GenericArray::from_slice(input);
                self.0.decrypt_block(&mut block);
                output.copy_from_slice(&block);
            }
        }
    };
}

impl_aes!(Aes128, aes::Aes128, 128);
impl_aes!(Aes192, aes::Aes192, 192);
impl_aes!(Aes256, aes::Aes256, 256);

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn fips_197_single_block() {
        let key = hex!("000102030405060708090a0b0c0d0e0f");
        let plaintext = hex!("00112233445566778899aabbccddeeff");
        let expected = hex!("69c4e0d86a7b0430d8cdb78070b4c55a");

        let cipher = Aes128::new(&key).unwrap();
        let mut ciphertext = [0u8; 16];
        cipher.encrypt_block(&plaintext, &mut ciphertext);
        assert_eq!(ciphertext, expected);

        let mut recovered = [0u8; 16];
        cipher.decrypt_block(&ciphertext, &mut recovered);
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn wrong_key_length_is_rejected() {
        assert_eq!(Aes128::new(&[0u8; 15]).err(), Some(CipherError::InvalidKeyLength));
        assert_eq!(Aes256::new(&[0u8; 16]).err(), Some(CipherError::InvalidKeyLength));
    }
}
