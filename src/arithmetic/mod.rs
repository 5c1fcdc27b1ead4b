//! Generic interface and constant-capable functions for fixed-width big
//! integers.

pub mod limb;
pub mod uint;

use core::fmt::{Debug, Display};

use zeroize::Zeroize;

use crate::bits::BitIteratorBE;

/// Runs `$code` for every `$i` in `$start..$end`, usable in `const fn`s.
#[macro_export]
macro_rules! const_for {
    (($i:ident in $start:tt.. $end:tt) $code:expr) => {{
        let mut $i = $start;
        loop {
            if $i < $end {
                $code
            } else {
                break;
            }
            $i += 1;
        }
    }};
}

/// Defines a big integer with a constant length.
pub trait BigInteger:
    'static
    + Copy
    + Clone
    + Debug
    + Default
    + Display
    + Eq
    + Ord
    + Send
    + Sized
    + Sync
    + Zeroize
    + From<u64>
    + From<u32>
    + From<u16>
    + From<u8>
    + BitIteratorBE
{
    /// Number of limbs representing `Self`.
    const NUM_LIMBS: usize;

    /// Number of bits in the integer.
    const BITS: usize;

    /// Number of bytes in the integer.
    const BYTES: usize = Self::BITS / 8;

    /// The additive identity element of Self, 0.
    const ZERO: Self;

    /// The multiplicative identity element of Self, 1.
    const ONE: Self;

    /// The largest value that can be represented by this integer type.
    const MAX: Self;

    /// Returns true if this number is odd.
    fn is_odd(&self) -> bool;

    /// Returns true if this number is even.
    fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Returns true if this number is zero.
    fn is_zero(&self) -> bool;

    /// Compute the minimum number of bits needed to encode this number.
    fn num_bits(&self) -> usize;

    /// Compute the `i`-th bit of `self`.
    fn get_bit(&self, i: usize) -> bool;

    /// Set `self += other`, returning the carry out of the top limb.
    fn add_with_carry(&mut self, other: &Self) -> bool;

    /// Set `self -= other`, returning the borrow out of the top limb.
    fn sub_with_borrow(&mut self, other: &Self) -> bool;

    /// Divide `self` by two, dropping the lowest bit.
    fn div2(&mut self);

    /// Create a bigint from little-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if the number of bytes is not equal to [`Self::BYTES`].
    fn from_bytes_le(bytes: &[u8]) -> Self;

    /// Convert the bigint to little-endian bytes.
    fn into_bytes_le(self) -> alloc::vec::Vec<u8>;
}
