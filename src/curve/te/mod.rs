//! Twisted Edwards curves and their Montgomery forms.
//!
//! EdDSA does its group arithmetic on the Edwards shape of a curve, while
//! the RFC 7748 key agreement walks an x-only ladder on the Montgomery
//! shape of the same curve. Both coefficient sets therefore hang off a
//! single config type, and [`montgomery_ladder`] works purely in the base
//! field without ever materialising a Montgomery point.

mod affine;
pub use affine::*;

mod projective;
pub use projective::*;

pub mod instance;

use num_traits::Zero;

use crate::field::{group::AdditiveGroup, Field};

/// Constants of a curve in twisted Edwards form,
/// `a·x² + y² = 1 + d·x²·y²`.
pub trait TECurveConfig: super::CurveConfig {
    /// The equation's `a` coefficient.
    const COEFF_A: Self::BaseField;
    /// The equation's `d` coefficient.
    const COEFF_D: Self::BaseField;
    /// Generator of the main subgroup.
    const GENERATOR: Affine<Self>;

    /// The Montgomery form this curve maps to.
    type MontCurveConfig: MontCurveConfig<BaseField = Self::BaseField>;

    /// Multiplies an element by [`Self::COEFF_A`].
    ///
    /// Instances whose `a` is zero or `±1` may override this with something
    /// cheaper than a full field multiplication.
    #[inline(always)]
    fn mul_by_a(elem: Self::BaseField) -> Self::BaseField {
        elem * Self::COEFF_A
    }
}

/// Constants of a curve in Montgomery form, `b·y² = x³ + a·x² + x`.
pub trait MontCurveConfig: super::CurveConfig {
    /// The equation's `a` coefficient.
    const COEFF_A: Self::BaseField;
    /// The equation's `b` coefficient.
    const COEFF_B: Self::BaseField;
}

/// The x-only [RFC 7748] Montgomery ladder.
///
/// `scalar` holds the clamped scalar in little-endian bytes, and `bits` is
/// the fixed ladder length of the curve (255 for X25519, 448 for X448).
///
/// Returns `None` when the result is the neutral element (the all-zero
/// output that RFC 7748 tells implementations to check for).
///
/// [RFC 7748]: https://www.rfc-editor.org/rfc/rfc7748#section-5
pub fn montgomery_ladder<P: MontCurveConfig>(
    scalar: &[u8],
    bits: usize,
    u: P::BaseField,
) -> Option<P::BaseField> {
    // a24 = (A + 2) / 4
    let a24 = (P::COEFF_A + P::BaseField::from(2u8))
        * P::BaseField::from(4u8).inverse().expect("four is invertible");

    let x1 = u;
    let mut x2 = P::BaseField::ONE;
    let mut z2 = P::BaseField::ZERO;
    let mut x3 = u;
    let mut z3 = P::BaseField::ONE;
    let mut swap = false;

    for t in (0..bits).rev() {
        let bit = scalar.get(t / 8).is_some_and(|byte| (byte >> (t % 8)) & 1 == 1);
        if swap ^ bit {
            core::mem::swap(&mut x2, &mut x3);
            core::mem::swap(&mut z2, &mut z3);
        }
        swap = bit;

        let a = x2 + z2;
        let aa = a.square();
        let b = x2 - z2;
        let bb = b.square();
        let e = aa - bb;
        let c = x3 + z3;
        let d = x3 - z3;
        let da = d * a;
        let cb = c * b;
        x3 = (da + cb).square();
        z3 = x1 * (da - cb).square();
        x2 = aa * bb;
        z2 = e * (aa + a24 * e);
    }

    if swap {
        core::mem::swap(&mut x2, &mut x3);
        core::mem::swap(&mut z2, &mut z3);
    }

    let out = z2.inverse().map(|z_inv| x2 * z_inv)?;
    (!out.is_zero()).then_some(out)
}
