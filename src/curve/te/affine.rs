//! Affine coordinates for a point on a twisted Edwards curve.

use core::{
    borrow::Borrow,
    fmt::{Debug, Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

use educe::Educe;
use num_traits::{One, Zero};
use zeroize::Zeroize;

use super::{Projective, TECurveConfig};
use crate::{
    bits::BitIteratorBE,
    field::{group::AdditiveGroup, Field},
};

/// A point on a twisted Edwards curve in affine `(x, y)` coordinates.
///
/// The group identity is the affine point `(0, 1)`, so unlike the short
/// Weierstrass shape no separate infinity flag is needed. A point of this
/// type is a valid curve point; it is *not* assumed to lie in the main
/// subgroup.
#[derive(Educe)]
#[educe(Copy, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct Affine<P: TECurveConfig> {
    /// X coordinate of the point represented as a field element.
    pub x: P::BaseField,
    /// Y coordinate of the point represented as a field element.
    pub y: P::BaseField,
}

impl<P: TECurveConfig> Display for Affine<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.is_zero() {
            write!(f, "infinity")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl<P: TECurveConfig> Debug for Affine<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.is_zero() {
            write!(f, "infinity")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl<P: TECurveConfig> PartialEq<Projective<P>> for Affine<P> {
    fn eq(&self, other: &Projective<P>) -> bool {
        self.into_group() == *other
    }
}

impl<P: TECurveConfig> Affine<P> {
    /// Construct a point without checking that it satisfies the curve
    /// equation.
    pub const fn new_unchecked(x: P::BaseField, y: P::BaseField) -> Self {
        Self { x, y }
    }

    /// Construct a point, enforcing that it lies on the curve.
    ///
    /// # Panics
    ///
    /// * If the point is not on the curve.
    pub fn new(x: P::BaseField, y: P::BaseField) -> Self {
        let point = Self::new_unchecked(x, y);
        assert!(point.is_on_curve());
        point
    }

    /// The group identity, `(0, 1)`.
    pub const fn zero() -> Self {
        Self::new_unchecked(P::BaseField::ZERO, P::BaseField::ONE)
    }

    /// Is this point the identity?
    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_one()
    }

    /// The configured generator of the main subgroup.
    pub fn generator() -> Self {
        P::GENERATOR
    }

    /// Coordinates of a finite (non-identity) point.
    pub fn xy(&self) -> Option<(P::BaseField, P::BaseField)> {
        (!self.is_zero()).then_some((self.x, self.y))
    }

    /// Checks that the point satisfies the curve equation.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();

        let lhs = y2 + P::mul_by_a(x2);
        let rhs = P::BaseField::one() + (P::COEFF_D * (x2 * y2));

        lhs == rhs
    }

    /// Lifts the point into extended projective coordinates.
    pub fn into_group(self) -> Projective<P> {
        self.into()
    }

    /// Multiplies by a scalar exposed as big-endian bits, accumulating in
    /// projective form with mixed additions.
    pub fn mul_bigint(&self, scalar: impl BitIteratorBE) -> Projective<P> {
        let mut acc = Projective::zero();
        for bit in scalar.bit_be_trimmed_iter() {
            acc.double_in_place();
            if bit {
                acc += self;
            }
        }
        acc
    }
}

impl<P: TECurveConfig> Zeroize for Affine<P> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}

impl<P: TECurveConfig> Neg for Affine<P> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new_unchecked(-self.x, self.y)
    }
}

impl<P: TECurveConfig, T: Borrow<Self>> Add<T> for Affine<P> {
    type Output = Projective<P>;

    fn add(self, other: T) -> Self::Output {
        let mut sum = self.into_group();
        sum += other.borrow();
        sum
    }
}

impl<P: TECurveConfig> Add<Projective<P>> for Affine<P> {
    type Output = Projective<P>;

    fn add(self, other: Projective<P>) -> Projective<P> {
        other + self
    }
}

impl<'a, P: TECurveConfig> Add<&'a Projective<P>> for Affine<P> {
    type Output = Projective<P>;

    fn add(self, other: &'a Projective<P>) -> Projective<P> {
        *other + self
    }
}

impl<P: TECurveConfig, T: Borrow<Self>> Sub<T> for Affine<P> {
    type Output = Projective<P>;

    fn sub(self, other: T) -> Self::Output {
        let mut diff = self.into_group();
        diff -= other.borrow();
        diff
    }
}

impl<P: TECurveConfig> Sub<Projective<P>> for Affine<P> {
    type Output = Projective<P>;

    fn sub(self, other: Projective<P>) -> Projective<P> {
        self + (-other)
    }
}

impl<'a, P: TECurveConfig> Sub<&'a Projective<P>> for Affine<P> {
    type Output = Projective<P>;

    fn sub(self, other: &'a Projective<P>) -> Projective<P> {
        self + (-*other)
    }
}

impl<P: TECurveConfig> Default for Affine<P> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: TECurveConfig, T: Borrow<P::ScalarField>> Mul<T> for Affine<P> {
    type Output = Projective<P>;

    #[inline]
    fn mul(self, other: T) -> Self::Output {
        use crate::field::prime::PrimeField;
        self.mul_bigint(other.borrow().into_bigint())
    }
}

// The affine point (X, Y) becomes (X, Y, X·Y, 1) in extended coordinates.
impl<P: TECurveConfig> From<Affine<P>> for Projective<P> {
    fn from(p: Affine<P>) -> Projective<P> {
        Self::new_unchecked(p.x, p.y, p.x * p.y, P::BaseField::one())
    }
}

// A projective point (X, Y, T, Z) normalizes to (X/Z, Y/Z).
impl<P: TECurveConfig> From<Projective<P>> for Affine<P> {
    fn from(p: Projective<P>) -> Affine<P> {
        if p.is_zero() {
            Affine::zero()
        } else if p.z.is_one() {
            // Already normalized.
            Affine::new_unchecked(p.x, p.y)
        } else {
            let z_inv = p.z.inverse().expect("nonzero field elements are invertible");
            Affine::new_unchecked(p.x * z_inv, p.y * z_inv)
        }
    }
}
