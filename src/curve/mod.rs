//! Elliptic curve models.
//!
//! The engines in this crate only ever touch two curve shapes: twisted
//! Edwards curves carry EdDSA and the X25519/X448 ladder, short Weierstrass
//! curves carry Schnorr. Each shape lives in its own submodule with concrete
//! `Affine` and `Projective` point types and exposes its group API as
//! inherent methods; the engines are generic over curve *parameters*, not
//! over an abstract point hierarchy. What is shared here is small: the
//! naming of the two fields every curve drags along, and the operator
//! plumbing both projective representations need.

pub mod sw;
pub mod te;

use crate::field::{prime::PrimeField, Field};

/// The two finite fields attached to a curve: the field its coordinates
/// live in, and the prime field of scalars for its main subgroup.
///
/// Everything else is model-specific and lives on [`te::TECurveConfig`] or
/// [`sw::SWCurveConfig`]; byte-level sizes, clamping and cofactor data live
/// with the engines that interpret them.
pub trait CurveConfig: Send + Sync + Sized + 'static {
    /// Field of point coordinates.
    type BaseField: Field;
    /// Prime field of scalars, of order equal to the main subgroup.
    type ScalarField: PrimeField;
}

/// Implements the owned-operand group operators (`+`, `-`, the assigning
/// forms and summation) for a projective point type whose arithmetic is
/// written once against `&Self`.
#[macro_export]
macro_rules! impl_owned_group_ops {
    ($point:ident, $config:ident) => {
        impl<P: $config> core::ops::Add for $point<P> {
            type Output = Self;

            #[inline]
            fn add(mut self, other: Self) -> Self {
                self += &other;
                self
            }
        }

        impl<P: $config> core::ops::Sub for $point<P> {
            type Output = Self;

            #[inline]
            fn sub(mut self, other: Self) -> Self {
                self -= &other;
                self
            }
        }

        impl<P: $config> core::ops::AddAssign for $point<P> {
            #[inline]
            fn add_assign(&mut self, other: Self) {
                *self += &other;
            }
        }

        impl<P: $config> core::ops::SubAssign for $point<P> {
            #[inline]
            fn sub_assign(&mut self, other: Self) {
                *self -= &other;
            }
        }

        impl<P: $config> core::iter::Sum for $point<P> {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(num_traits::Zero::zero(), core::ops::Add::add)
            }
        }

        impl<'a, P: $config> core::iter::Sum<&'a Self> for $point<P> {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.fold(num_traits::Zero::zero(), core::ops::Add::add)
            }
        }
    };
}
