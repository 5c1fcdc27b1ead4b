//! This module provides a generic interface for finite prime fields.

use rand::{CryptoRng, RngCore};

use crate::{arithmetic::BigInteger, field::Field};

/// Defines an abstract prime field.
/// I.e., the field of integers mod the prime [`Self::MODULUS`].
pub trait PrimeField:
    Field + From<<Self as PrimeField>::BigInt> + Into<<Self as PrimeField>::BigInt>
{
    /// A `BigInteger` type that can represent elements of this field.
    type BigInt: BigInteger;

    /// The modulus `p`.
    const MODULUS: Self::BigInt;

    /// The size of the modulus in bits.
    const MODULUS_BIT_SIZE: usize;

    /// Returns the characteristic of the field,
    /// in little-endian representation.
    #[must_use]
    fn characteristic() -> Self::BigInt {
        Self::MODULUS
    }

    /// Construct a prime field element from a big integer, reducing it mod
    /// the field order.
    fn from_bigint(repr: Self::BigInt) -> Self;

    /// Converts an element of the prime field into an integer less than
    /// [`Self::MODULUS`].
    fn into_bigint(self) -> Self::BigInt;

    /// A fixed quadratic non-residue of the field, consumed by the
    /// Tonelli–Shanks square root.
    #[must_use]
    fn quadratic_nonresidue() -> Self;

    /// Interprets `bytes` as a little-endian integer of arbitrary length and
    /// reduces it mod the field order.
    #[must_use]
    fn from_le_bytes_mod_order(bytes: &[u8]) -> Self {
        let radix = Self::from(1u64 << 8);
        let mut acc = Self::zero();
        for &byte in bytes.iter().rev() {
            acc *= radix;
            acc += Self::from(byte);
        }
        acc
    }

    /// Interprets `bytes` as a big-endian integer of arbitrary length and
    /// reduces it mod the field order.
    #[must_use]
    fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        let radix = Self::from(1u64 << 8);
        let mut acc = Self::zero();
        for &byte in bytes {
            acc *= radix;
            acc += Self::from(byte);
        }
        acc
    }

    /// Computes the Legendre symbol of `self`: `1` for quadratic residues,
    /// `-1` for non-residues and `0` for zero (Euler's criterion).
    #[must_use]
    fn legendre(&self) -> i8 {
        if self.is_zero() {
            return 0;
        }

        // (p - 1) / 2
        let mut exp = Self::MODULUS;
        exp.sub_with_borrow(&Self::BigInt::ONE);
        exp.div2();

        if self.pow(exp) == Self::ONE {
            1
        } else {
            -1
        }
    }

    /// Computes a square root of `self`, if one exists.
    ///
    /// For `p ≡ 3 (mod 4)` a single exponentiation by `(p + 1) / 4`
    /// suffices; other moduli take the Tonelli–Shanks path seeded with
    /// [`Self::quadratic_nonresidue`].
    #[must_use]
    fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::zero());
        }

        if Self::MODULUS.get_bit(0) && Self::MODULUS.get_bit(1) {
            // a^((p + 1) / 4) computed as a * a^((p - 3) / 4).
            let mut exp = Self::MODULUS;
            exp.sub_with_borrow(&Self::BigInt::from(3u64));
            exp.div2();
            exp.div2();
            let candidate = self.pow(exp) * *self;
            return (candidate.square() == *self).then_some(candidate);
        }

        tonelli_shanks(self)
    }

    /// Samples a uniformly random field element in `[0, p)` by rejection.
    fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = alloc::vec![0u8; Self::BigInt::BYTES];
        loop {
            rng.fill_bytes(&mut bytes);

            // Mask off the bits above the modulus size, so that the loop
            // terminates after two draws on average.
            let mut excess = Self::BigInt::BYTES * 8 - Self::MODULUS_BIT_SIZE;
            for byte in bytes.iter_mut().rev() {
                if excess == 0 {
                    break;
                }
                if excess >= 8 {
                    *byte = 0;
                    excess -= 8;
                } else {
                    *byte >>= excess;
                    excess = 0;
                }
            }

            let repr = Self::BigInt::from_bytes_le(&bytes);
            if repr < Self::MODULUS {
                return Self::from_bigint(repr);
            }
        }
    }

    /// Samples a uniformly random field element in `[1, p)`.
    fn random_nonzero<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let element = Self::random(rng);
            if !element.is_zero() {
                return element;
            }
        }
    }
}

/// Generic Tonelli–Shanks square root for `p ≡ 1 (mod 4)`.
fn tonelli_shanks<F: PrimeField>(element: &F) -> Option<F> {
    // Write p - 1 = q * 2^s with q odd.
    let mut q = F::MODULUS;
    q.sub_with_borrow(&F::BigInt::ONE);
    let mut s = 0u32;
    while q.is_even() {
        q.div2();
        s += 1;
    }

    let mut c = F::quadratic_nonresidue().pow(q);
    let mut t = element.pow(q);

    // r = a^((q + 1) / 2)
    let mut exp = q;
    exp.div2();
    exp.add_with_carry(&F::BigInt::ONE);
    let mut r = element.pow(exp);

    let mut m = s;
    loop {
        if t == F::ONE {
            return Some(r);
        }

        // Find the least i with t^(2^i) == 1.
        let mut i = 0;
        let mut t2 = t;
        while t2 != F::ONE {
            t2.square_in_place();
            i += 1;
            if i == m {
                // `element` is a non-residue.
                return None;
            }
        }

        let mut b = c;
        for _ in 0..(m - i - 1) {
            b.square_in_place();
        }

        m = i;
        c = b.square();
        t *= c;
        r *= b;
    }
}
