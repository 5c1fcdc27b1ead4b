//! This module provides a generic interface for finite fields and an
//! efficient Montgomery-form implementation of prime fields.

pub mod fp;
pub mod group;
pub mod prime;

use core::ops::{Div, DivAssign};

use num_traits::One;

use crate::{bits::BitIteratorBE, field::group::AdditiveGroup};

/// Defines an abstract field.
///
/// Fields are additive groups whose non-zero elements also form a
/// multiplicative group.
pub trait Field:
    AdditiveGroup<Scalar = Self>
    + One
    + Div<Self, Output = Self>
    + DivAssign<Self>
    + for<'a> Div<&'a Self, Output = Self>
    + for<'a> DivAssign<&'a Self>
    + From<bool>
    + From<u8>
    + From<u16>
    + From<u32>
    + From<u64>
{
    /// The multiplicative identity of the field.
    const ONE: Self;

    /// Returns `self * self`.
    #[must_use]
    fn square(&self) -> Self;

    /// Squares `self` in place.
    fn square_in_place(&mut self) -> &mut Self;

    /// Computes the multiplicative inverse of `self` if `self` is nonzero.
    #[must_use]
    fn inverse(&self) -> Option<Self>;

    /// Sets `self` to `self`'s inverse if it exists. Otherwise it is a no-op.
    fn inverse_in_place(&mut self) -> Option<&mut Self>;

    /// Returns `self^exp`, where `exp` is an integer exposing its bits in
    /// big-endian order.
    #[must_use]
    fn pow(&self, exp: impl BitIteratorBE) -> Self {
        let mut res = Self::ONE;
        for bit in exp.bit_be_trimmed_iter() {
            res.square_in_place();
            if bit {
                res *= self;
            }
        }
        res
    }
}
