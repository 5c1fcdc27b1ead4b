//! Fixed-width unsigned big integers, with enough `const fn` arithmetic to
//! evaluate field parameters at compile time.

use core::fmt::{Debug, Display};

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroize;

use crate::{
    arithmetic::{
        limb,
        limb::{Limb, Limbs},
        BigInteger,
    },
    bits::BitIteratorBE,
    const_for,
};

/// Little-endian unsigned integer with `N` 64-bit limbs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct Uint<const N: usize> {
    pub(crate) limbs: Limbs<N>,
}

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Declare [`Uint`] types for different bit sizes.
macro_rules! declare_num {
    ($num:ident, $bits:expr) => {
        #[doc = "Unsigned integer with"]
        #[doc = stringify!($bits)]
        #[doc = "bits of capacity."]
        pub type $num = $crate::arithmetic::uint::Uint<
            { usize::div_ceil($bits, $crate::arithmetic::limb::Limb::BITS as usize) },
        >;
    };
}

declare_num!(U64, 64);
declare_num!(U128, 128);
declare_num!(U192, 192);
declare_num!(U256, 256);
declare_num!(U320, 320);
declare_num!(U384, 384);
declare_num!(U448, 448);
declare_num!(U512, 512);

impl<const N: usize> Uint<N> {
    /// Construct an integer from its limbs, least significant first.
    #[must_use]
    pub const fn new(limbs: [Limb; N]) -> Self {
        Self { limbs }
    }

    /// Construct an integer from a `u32`.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        let mut uint = Self::ZERO;
        uint.limbs[0] = value as u64;
        uint
    }

    /// Borrow the underlying limbs.
    #[must_use]
    pub const fn as_limbs(&self) -> &[Limb; N] {
        &self.limbs
    }

    pub(crate) const fn const_is_zero(&self) -> bool {
        let mut is_zero = true;
        const_for!((i in 0..N) {
            is_zero &= self.limbs[i] == 0;
        });
        is_zero
    }

    /// Compares limbs from the most significant down; usable in `const fn`.
    pub(crate) const fn const_ge(&self, rhs: &Self) -> bool {
        const_for!((i in 0..N) {
            let a = self.limbs[N - i - 1];
            let b = rhs.limbs[N - i - 1];
            if a < b {
                return false;
            } else if a > b {
                return true;
            }
        });
        true
    }

    /// Return the minimum number of bits needed to encode this number.
    pub(crate) const fn const_num_bits(&self) -> usize {
        let mut index = N - 1;
        loop {
            let leading = self.limbs[index].leading_zeros() as usize;
            if leading != Limb::BITS as usize || index == 0 {
                return (index + 1) * Limb::BITS as usize - leading;
            }
            index -= 1;
        }
    }

    /// Find the `i`-th bit of `self`; out-of-range bits read as zero.
    pub(crate) const fn const_get_bit(&self, i: usize) -> bool {
        if i >= Self::BITS {
            return false;
        }

        let bits_in_limb = Limb::BITS as usize;
        let limb = i / bits_in_limb;
        let bit = i - bits_in_limb * limb;
        (self.limbs[limb] >> bit) & 1 == 1
    }

    #[inline]
    pub(crate) const fn const_add_with_carry(mut self, other: &Self) -> (Self, bool) {
        let mut carry = 0;

        const_for!((i in 0..N) {
            (self.limbs[i], carry) = limb::adc(self.limbs[i], other.limbs[i], carry);
        });

        (self, carry != 0)
    }

    #[inline]
    pub(crate) const fn const_sub_with_borrow(mut self, other: &Self) -> (Self, bool) {
        let mut borrow = 0;

        const_for!((i in 0..N) {
            (self.limbs[i], borrow) = limb::sbb(self.limbs[i], other.limbs[i], borrow);
        });

        (self, borrow != 0)
    }

    pub(crate) const fn const_mul2_with_carry(mut self) -> (Self, bool) {
        let mut last = 0;
        const_for!((i in 0..N) {
            let tmp = self.limbs[i] >> 63;
            self.limbs[i] <<= 1;
            self.limbs[i] |= last;
            last = tmp;
        });
        (self, last != 0)
    }

    /// Compute "wide" multiplication, with a product twice the size of the
    /// inputs, returned as `(lo, hi)`.
    pub(crate) const fn const_mul_wide(&self, rhs: &Self) -> (Self, Self) {
        let (mut lo, mut hi) = ([0u64; N], [0u64; N]);
        const_for!((i in 0..N) {
            let mut carry = 0;
            const_for!((j in 0..N) {
                let k = i + j;
                if k >= N {
                    (hi[k - N], carry) =
                        limb::carrying_mac(hi[k - N], self.limbs[i], rhs.limbs[j], carry);
                } else {
                    (lo[k], carry) =
                        limb::carrying_mac(lo[k], self.limbs[i], rhs.limbs[j], carry);
                }
            });
            hi[i] = carry;
        });

        (Self::new(lo), Self::new(hi))
    }

    /// Multiply two numbers and panic on overflow.
    #[must_use]
    pub const fn const_mul(&self, rhs: &Self) -> Self {
        let (low, high) = self.const_mul_wide(rhs);
        assert!(high.const_is_zero(), "overflow on multiplication");
        low
    }

    /// Add two numbers and panic on overflow.
    #[must_use]
    pub const fn const_add(&self, rhs: &Self) -> Self {
        let (low, carry) = self.const_add_with_carry(rhs);
        assert!(!carry, "overflow on addition");
        low
    }

    /// Compute `2^exp mod self` by binary long division.
    ///
    /// Used to evaluate the Montgomery constants `R = 2^(64 * N) mod p` and
    /// `R^2 = 2^(128 * N) mod p` at compile time.
    #[must_use]
    pub const fn rem_of_pow2(&self, exp: usize) -> Self {
        assert!(!self.const_is_zero(), "division by zero");

        let mut rem = Self::ZERO;
        let mut i = exp as isize;
        while i >= 0 {
            let (doubled, carry) = rem.const_mul2_with_carry();
            rem = doubled;
            if i == exp as isize {
                rem.limbs[0] |= 1;
            }
            if rem.const_ge(self) || carry {
                let (r, borrow) = rem.const_sub_with_borrow(self);
                rem = r;
                assert!(borrow == carry);
            }
            i -= 1;
        }
        rem
    }

    /// Set `self *= 2`, returning the bit shifted out of the top limb.
    pub(crate) fn mul2(&mut self) -> bool {
        let mut last = 0;
        for limb in &mut self.limbs {
            let tmp = *limb >> 63;
            *limb <<= 1;
            *limb |= last;
            last = tmp;
        }
        last != 0
    }
}

// ----------- Trait Impls -----------

impl<const N: usize> Debug for Uint<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", BigUint::from(*self))
    }
}

impl<const N: usize> Display for Uint<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", BigUint::from(*self))
    }
}

impl<const N: usize> Ord for Uint<N> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering;
        for i in (0..N).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => {}
                order => return order,
            }
        }
        Ordering::Equal
    }
}

impl<const N: usize> PartialOrd for Uint<N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_uint_from_unsigned_int {
    ($int:ty) => {
        impl<const N: usize> From<$int> for Uint<N> {
            #[inline]
            fn from(value: $int) -> Uint<N> {
                let mut uint = Self::default();
                uint.limbs[0] = u64::from(value);
                uint
            }
        }
    };
}

impl_uint_from_unsigned_int!(u64);
impl_uint_from_unsigned_int!(u32);
impl_uint_from_unsigned_int!(u16);
impl_uint_from_unsigned_int!(u8);

impl<const N: usize> From<Uint<N>> for BigUint {
    #[inline]
    fn from(value: Uint<N>) -> BigUint {
        BigUint::from_bytes_le(&value.into_bytes_le())
    }
}

impl<const N: usize> BigInteger for Uint<N> {
    const BITS: usize = N * (Limb::BITS as usize);
    const MAX: Self = Self { limbs: [u64::MAX; N] };
    const NUM_LIMBS: usize = N;
    const ONE: Self = {
        let mut one = Self::ZERO;
        one.limbs[0] = 1;
        one
    };
    const ZERO: Self = Self { limbs: [0; N] };

    fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    fn is_zero(&self) -> bool {
        self.limbs.iter().all(Zero::is_zero)
    }

    fn num_bits(&self) -> usize {
        self.const_num_bits()
    }

    fn get_bit(&self, i: usize) -> bool {
        self.const_get_bit(i)
    }

    #[inline]
    fn add_with_carry(&mut self, other: &Self) -> bool {
        let mut carry = false;
        for i in 0..N {
            carry = limb::adc_assign(&mut self.limbs[i], other.limbs[i], carry);
        }
        carry
    }

    #[inline]
    fn sub_with_borrow(&mut self, other: &Self) -> bool {
        let mut borrow = false;
        for i in 0..N {
            borrow = limb::sbb_assign(&mut self.limbs[i], other.limbs[i], borrow);
        }
        borrow
    }

    fn div2(&mut self) {
        let mut t = 0;
        for limb in self.limbs.iter_mut().rev() {
            let t2 = *limb << 63;
            *limb >>= 1;
            *limb |= t;
            t = t2;
        }
    }

    fn from_bytes_le(bytes: &[u8]) -> Self {
        const LIMB_BYTES: usize = Limb::BITS as usize / 8;
        assert!(bytes.len() == LIMB_BYTES * N, "bytes are not the expected size");

        let mut limbs = [0 as Limb; N];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(LIMB_BYTES)) {
            *limb = Limb::from_le_bytes(chunk.try_into().expect("chunk size is exact"));
        }
        Self::new(limbs)
    }

    fn into_bytes_le(self) -> alloc::vec::Vec<u8> {
        self.limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect()
    }
}

impl<const N: usize> BitIteratorBE for Uint<N> {
    fn bit_be_iter(&self) -> impl Iterator<Item = bool> {
        self.as_limbs().iter().rev().flat_map(Limb::bit_be_iter)
    }
}

/// Parse a number from a string in a given radix.
///
/// This implementation can be slow on big numbers and possibly fail constant
/// compilation by timeout.
#[must_use]
pub const fn from_str_radix<const LIMBS: usize>(s: &str, radix: u32) -> Uint<LIMBS> {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "empty string");

    // The lowest order digit is at the end of the string; parse from there.
    let mut index = bytes.len() - 1;

    let mut uint = Uint::from_u32(0);
    let mut order = Uint::from_u32(1);
    let uint_radix = Uint::from_u32(radix);

    loop {
        let digit = Uint::from_u32(parse_digit(bytes[index], radix));

        uint = uint.const_add(&digit.const_mul(&order));

        if index == 0 {
            return uint;
        }

        order = uint_radix.const_mul(&order);
        index -= 1;
    }
}

/// Parse a number from a hex string.
///
/// Performs faster than [`from_str_radix`], since a base-16 digit maps to a
/// fixed group of bits.
#[must_use]
pub const fn from_str_hex<const LIMBS: usize>(s: &str) -> Uint<LIMBS> {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "empty string");

    let mut index = bytes.len() - 1;

    let mut limbs = [0 as Limb; LIMBS];
    let mut digit_index = 0;

    let digit_size = 4; // Bits in a hex digit.
    let digits_in_limb = Limb::BITS / digit_size;

    loop {
        let digit = parse_digit(bytes[index], 16) as Limb;

        limbs[(digit_index / digits_in_limb) as usize] |=
            digit << ((digit_index % digits_in_limb) * digit_size);

        if index == 0 {
            return Uint::new(limbs);
        }

        index -= 1;
        digit_index += 1;
    }
}

const fn parse_digit(utf8_digit: u8, radix: u32) -> u32 {
    let ch = match utf8_digit {
        0x00..=0x7F => utf8_digit as char,
        _ => panic!("non-ASCII character found"),
    };
    match ch.to_digit(radix) {
        None => panic!("invalid digit"),
        Some(digit) => digit,
    }
}

/// Converts a base-10 string literal to a big integer.
#[macro_export]
macro_rules! from_num {
    ($num:literal) => {
        $crate::arithmetic::uint::from_str_radix($num, 10)
    };
}

/// Converts a hex string literal to a big integer.
#[macro_export]
macro_rules! from_hex {
    ($num:literal) => {
        $crate::arithmetic::uint::from_str_hex($num)
    };
}

#[cfg(test)]
mod tests {
    use proptest::proptest;

    use super::*;

    #[test]
    fn convert_from_str_radix() {
        let uint_from_base10: Uint<4> = from_str_radix(
            "28948022309329048855892746252171976963363056481941647379679742748393362948097",
            10,
        );
        #[allow(clippy::unreadable_literal)]
        let expected = Uint::<4>::new([
            10108024940646105089u64,
            2469829653919213789u64,
            0u64,
            4611686018427387904u64,
        ]);
        assert_eq!(uint_from_base10, expected);

        let uint_from_base10: Uint<1> = from_str_radix("18446744069414584321", 10);
        let uint_from_binary: Uint<1> = from_str_radix(
            "1111111111111111111111111111111100000000000000000000000000000001",
            2,
        );
        assert_eq!(uint_from_base10, uint_from_binary);
    }

    #[test]
    fn convert_from_str_hex() {
        // Test different implementations of hex parsing on random inputs.
        proptest!(|(s in "[0-9a-fA-F]{1,64}")| {
            let uint_from_hex: Uint<4> = from_str_hex(&s);
            let expected: Uint<4> = from_str_radix(&s, 16);
            assert_eq!(uint_from_hex, expected);
        });
    }

    #[test]
    fn uint_bit_iterator_be() {
        let words: [Limb; 4] = [0b1100, 0, 0, 0];
        let num = Uint::<4>::new(words);
        let bits: Vec<bool> = num.bit_be_trimmed_iter().collect();

        assert_eq!(bits.len(), 4);
        assert_eq!(bits, vec![true, true, false, false]);
    }

    #[test]
    fn num_bits() {
        let words: [Limb; 4] = [0b1100, 0, 0, 0];
        let num = Uint::<4>::new(words);
        assert_eq!(num.num_bits(), 4);

        let words: [Limb; 4] = [0, 0b1100, 0, 0];
        let num = Uint::<4>::new(words);
        assert_eq!(num.num_bits(), 64 + 4);

        assert_eq!(Uint::<4>::ZERO.num_bits(), 0);
    }

    #[test]
    fn rem_of_pow2_matches_num_bigint() {
        use num_bigint::BigUint;

        let modulus: Uint<4> = from_str_radix(
            "115792089237316195423570985008687907852837564279074904382605163141518161494337",
            10,
        );
        for exp in [0usize, 1, 63, 64, 255, 256, 512] {
            let got = BigUint::from(modulus.rem_of_pow2(exp));
            let expect = BigUint::from(2u8).pow(u32::try_from(exp).unwrap())
                % BigUint::from(modulus);
            assert_eq!(got, expect, "exp = {exp}");
        }
    }

    proptest! {
        #[test]
        fn add_sub_round_trip(a: [u64; 4], b: [u64; 4]) {
            let a = Uint::<4>::new(a);
            let b = Uint::<4>::new(b);

            let mut sum = a;
            let carry = sum.add_with_carry(&b);
            let borrow = sum.sub_with_borrow(&b);
            assert_eq!(sum, a);
            assert_eq!(carry, borrow);
        }

        #[test]
        fn const_ops_match_runtime(a: [u64; 4], b: [u64; 4]) {
            let a = Uint::<4>::new(a);
            let b = Uint::<4>::new(b);

            let (const_sum, const_carry) = a.const_add_with_carry(&b);
            let mut sum = a;
            let carry = sum.add_with_carry(&b);
            assert_eq!(const_sum, sum);
            assert_eq!(const_carry, carry);

            assert_eq!(a.const_ge(&b), a >= b);
        }
    }
}
