//! Block cipher modes of operation.
//!
//! A streaming `init`/`update`/`finalize` pipeline shared by ECB, CBC, CTR,
//! CFB and OFB, generic over any [`BlockCipher`] primitive. The block-aligned
//! modes (ECB, CBC) carry mandatory PKCS#7 padding; the stream-like modes
//! (CTR, CFB, OFB) emit exactly as many bytes as they consume, finishing
//! with a partial keystream block.

use alloc::{vec, vec::Vec};
use core::fmt;

use zeroize::Zeroize;

mod aes;
pub use aes::{Aes128, Aes192, Aes256};

/// A block cipher primitive: a key schedule plus single-block encryption and
/// decryption.
///
/// The schedule is consumed by a [`Cipher`]; it is dropped (and with it any
/// key material) when the cipher finalizes.
pub trait BlockCipher: Sized {
    /// The cipher's block size in bytes.
    const BLOCK_SIZE: usize;

    /// Expands `key` into a key schedule.
    fn new(key: &[u8]) -> Result<Self>;

    /// Encrypts exactly one block from `input` into `output`.
    fn encrypt_block(&self, input: &[u8], output: &mut [u8]);

    /// Decrypts exactly one block from `input` into `output`.
    fn decrypt_block(&self, input: &[u8], output: &mut [u8]);
}

/// Errors from the cipher-mode layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CipherError {
    /// `update` or `finalize` was called before `init`, or after a previous
    /// `finalize`.
    NotInitialized,
    /// The key length does not match the cipher.
    InvalidKeyLength,
    /// The IV length does not match the mode.
    InvalidIvLength,
    /// Ciphertext is not block-aligned, is missing, or carries invalid
    /// PKCS#7 padding.
    BadDecrypt,
    /// The mode name passed to [`Mode::get`] is not recognised.
    UnknownMode,
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CipherError::NotInitialized => "cipher not initialized",
            CipherError::InvalidKeyLength => "invalid key length",
            CipherError::InvalidIvLength => "invalid IV length",
            CipherError::BadDecrypt => "bad decrypt",
            CipherError::UnknownMode => "unknown cipher mode",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CipherError {}

/// Result alias for cipher operations.
pub type Result<T> = core::result::Result<T, CipherError>;

/// The supported modes of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Electronic codebook; no IV, PKCS#7 padded.
    Ecb,
    /// Cipher block chaining; block-sized IV, PKCS#7 padded.
    Cbc,
    /// Counter mode; the IV is the initial big-endian counter.
    Ctr,
    /// Cipher feedback (full-block).
    Cfb,
    /// Output feedback.
    Ofb,
}

impl Mode {
    /// Resolves a mode from its conventional name, case-insensitively.
    pub fn get(name: &str) -> Result<Self> {
        let mode = if name.eq_ignore_ascii_case("ecb") {
            Mode::Ecb
        } else if name.eq_ignore_ascii_case("cbc") {
            Mode::Cbc
        } else if name.eq_ignore_ascii_case("ctr") {
            Mode::Ctr
        } else if name.eq_ignore_ascii_case("cfb") {
            Mode::Cfb
        } else if name.eq_ignore_ascii_case("ofb") {
            Mode::Ofb
        } else {
            return Err(CipherError::UnknownMode);
        };
        Ok(mode)
    }

    /// Required IV length for a given block size.
    fn iv_len(self, block_size: usize) -> usize {
        match self {
            Mode::Ecb => 0,
            _ => block_size,
        }
    }

    /// Whether the mode pads to the block boundary.
    fn padded(self) -> bool {
        matches!(self, Mode::Ecb | Mode::Cbc)
    }
}

/// Live state between `init` and `finalize`.
struct State<C> {
    ctx: C,
    /// Partial-block buffer.
    buf: Vec<u8>,
    /// Fill level of `buf`.
    bpos: usize,
    /// IV / counter / feedback block, depending on the mode.
    feedback: Vec<u8>,
    /// Last full block held back by a padded decryptor until `finalize`.
    held: Option<Vec<u8>>,
}

/// A streaming cipher: one mode, one direction, one key schedule at a time.
///
/// Lifecycle: `init(key, iv)`, any number of `update`s, exactly one
/// `finalize`. Finalizing destroys the key schedule and zeroes the internal
/// buffers; the object can then be re-initialized.
pub struct Cipher<C: BlockCipher> {
    mode: Mode,
    encrypt: bool,
    state: Option<State<C>>,
}

impl<C: BlockCipher> Cipher<C> {
    /// Creates an uninitialized cipher for `mode`.
    #[must_use]
    pub fn new(mode: Mode, encrypt: bool) -> Self {
        Self { mode, encrypt, state: None }
    }

    /// Resolves `name` with [`Mode::get`] and creates the cipher.
    pub fn get(name: &str, encrypt: bool) -> Result<Self> {
        Ok(Self::new(Mode::get(name)?, encrypt))
    }

    /// An ECB cipher.
    #[must_use]
    pub fn ecb(encrypt: bool) -> Self {
        Self::new(Mode::Ecb, encrypt)
    }

    /// A CBC cipher.
    #[must_use]
    pub fn cbc(encrypt: bool) -> Self {
        Self::new(Mode::Cbc, encrypt)
    }

    /// A CTR cipher.
    #[must_use]
    pub fn ctr(encrypt: bool) -> Self {
        Self::new(Mode::Ctr, encrypt)
    }

    /// A CFB cipher.
    #[must_use]
    pub fn cfb(encrypt: bool) -> Self {
        Self::new(Mode::Cfb, encrypt)
    }

    /// An OFB cipher.
    #[must_use]
    pub fn ofb(encrypt: bool) -> Self {
        Self::new(Mode::Ofb, encrypt)
    }

    /// Expands the key schedule and arms the cipher.
    ///
    /// ECB takes an empty IV; every other mode takes exactly one block.
    pub fn init(&mut self, key: &[u8], iv: &[u8]) -> Result<&mut Self> {
        if iv.len() != self.mode.iv_len(C::BLOCK_SIZE) {
            return Err(CipherError::InvalidIvLength);
        }

        self.state = Some(State {
            ctx: C::new(key)?,
            buf: vec![0; C::BLOCK_SIZE],
            bpos: 0,
            feedback: iv.to_vec(),
            held: None,
        });
        Ok(self)
    }

    /// Feeds `input` through the cipher, returning every complete block of
    /// output.
    ///
    /// Partial blocks stay buffered; a padded decryptor additionally holds
    /// back its most recent full block until [`Self::finalize`] can strip
    /// the padding.
    pub fn update(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let (mode, encrypt) = (self.mode, self.encrypt);
        let hold = !encrypt && mode.padded();
        let state = self.state.as_mut().ok_or(CipherError::NotInitialized)?;

        let bs = C::BLOCK_SIZE;
        let mut input = input;
        let mut out = Vec::with_capacity(input.len() + bs);

        // Top up a partially filled buffer first.
        if state.bpos > 0 {
            let take = (bs - state.bpos).min(input.len());
            state.buf[state.bpos..state.bpos + take].copy_from_slice(&input[..take]);
            state.bpos += take;
            input = &input[take..];

            if state.bpos == bs {
                let block = state.buf.clone();
                crypt_block(mode, encrypt, state, &block, hold, &mut out);
                state.bpos = 0;
            }
        }

        // Whole blocks straight from the input.
        while input.len() >= bs {
            crypt_block(mode, encrypt, state, &input[..bs], hold, &mut out);
            input = &input[bs..];
        }

        // Buffer the tail.
        state.buf[..input.len()].copy_from_slice(input);
        state.bpos = input.len();

        Ok(out)
    }

    /// Finishes the stream: emits the padding block (padded encryption),
    /// validates and strips PKCS#7 (padded decryption), or flushes the
    /// buffered partial block (stream modes).
    ///
    /// The key schedule is destroyed and the internal buffers are zeroed
    /// whether or not finalization succeeds.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        let (mode, encrypt) = (self.mode, self.encrypt);
        let mut state = self.state.take().ok_or(CipherError::NotInitialized)?;
        let bs = C::BLOCK_SIZE;

        let result = if mode.padded() {
            if encrypt {
                // PKCS#7: always at least one byte of padding.
                let pad = u8::try_from(bs - state.bpos).expect("block sizes are small");
                for byte in &mut state.buf[state.bpos..] {
                    *byte = pad;
                }
                let block = state.buf.clone();
                let mut out = Vec::with_capacity(bs);
                crypt_block(mode, true, &mut state, &block, false, &mut out);
                Ok(out)
            } else if state.bpos != 0 {
                Err(CipherError::BadDecrypt)
            } else {
                match state.held.take() {
                    None => Err(CipherError::BadDecrypt),
                    Some(mut block) => {
                        let pad = block[bs - 1] as usize;
                        if pad == 0 || pad > bs || block[bs - pad..].iter().any(|&b| b as usize != pad)
                        {
                            block.zeroize();
                            Err(CipherError::BadDecrypt)
                        } else {
                            block.truncate(bs - pad);
                            Ok(block)
                        }
                    }
                }
            }
        } else {
            // Stream modes XOR the buffered bytes with one more keystream
            // block and emit only those bytes.
            let keystream = match mode {
                Mode::Ctr => next_counter_keystream(&mut state),
                _ => {
                    let mut keystream = vec![0; bs];
                    state.ctx.encrypt_block(&state.feedback, &mut keystream);
                    keystream
                }
            };
            let out = state.buf[..state.bpos]
                .iter()
                .zip(&keystream)
                .map(|(byte, ks)| byte ^ ks)
                .collect();
            Ok(out)
        };

        state.buf.zeroize();
        state.feedback.zeroize();
        if let Some(mut held) = state.held.take() {
            held.zeroize();
        }
        // `state.ctx` drops here, destroying the key schedule.

        result
    }
}

/// Runs one full block through the mode, appending the produced block to
/// `out` (or holding it back when `hold` is set).
fn crypt_block<C: BlockCipher>(
    mode: Mode,
    encrypt: bool,
    state: &mut State<C>,
    input: &[u8],
    hold: bool,
    out: &mut Vec<u8>,
) {
    let bs = C::BLOCK_SIZE;
    let mut block = vec![0u8; bs];

    match mode {
        Mode::Ecb => {
            if encrypt {
                state.ctx.encrypt_block(input, &mut block);
            } else {
                state.ctx.decrypt_block(input, &mut block);
            }
        }
        Mode::Cbc => {
            if encrypt {
                let chained: Vec<u8> =
                    input.iter().zip(&state.feedback).map(|(byte, fb)| byte ^ fb).collect();
                state.ctx.encrypt_block(&chained, &mut block);
                state.feedback.copy_from_slice(&block);
            } else {
                state.ctx.decrypt_block(input, &mut block);
                for (byte, fb) in block.iter_mut().zip(&state.feedback) {
                    *byte ^= fb;
                }
                // Copy the ciphertext block rather than aliasing the
                // caller's buffer, which may be reused before `finalize`.
                state.feedback.copy_from_slice(input);
            }
        }
        Mode::Ctr => {
            let keystream = next_counter_keystream(state);
            for (i, byte) in block.iter_mut().enumerate() {
                *byte = input[i] ^ keystream[i];
            }
        }
        Mode::Cfb => {
            let mut keystream = vec![0u8; bs];
            state.ctx.encrypt_block(&state.feedback, &mut keystream);
            for (i, byte) in block.iter_mut().enumerate() {
                *byte = input[i] ^ keystream[i];
            }
            if encrypt {
                state.feedback.copy_from_slice(&block);
            } else {
                state.feedback.copy_from_slice(input);
            }
        }
        Mode::Ofb => {
            let mut keystream = vec![0u8; bs];
            state.ctx.encrypt_block(&state.feedback, &mut keystream);
            state.feedback.copy_from_slice(&keystream);
            for (i, byte) in block.iter_mut().enumerate() {
                *byte = input[i] ^ keystream[i];
            }
        }
    }

    if hold {
        if let Some(previous) = state.held.replace(block) {
            out.extend_from_slice(&previous);
        }
    } else {
        out.extend_from_slice(&block);
    }
}

/// Encrypts the current counter and increments it as a big-endian integer
/// with wrap-around.
fn next_counter_keystream<C: BlockCipher>(state: &mut State<C>) -> Vec<u8> {
    let mut keystream = vec![0u8; C::BLOCK_SIZE];
    state.ctx.encrypt_block(&state.feedback, &mut keystream);

    for byte in state.feedback.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }

    keystream
}
