//! Affine coordinates for a point on a short Weierstrass curve.

use core::{
    borrow::Borrow,
    fmt::{Debug, Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

use educe::Educe;
use num_traits::{One, Zero};
use zeroize::Zeroize;

use super::{Projective, SWCurveConfig};
use crate::{
    bits::BitIteratorBE,
    field::{group::AdditiveGroup, prime::PrimeField, Field},
};

/// A point on a short Weierstrass curve in affine `(x, y)` coordinates.
///
/// The group identity has no affine coordinates, so it is carried as an
/// explicit `infinity` flag.
#[derive(Educe)]
#[educe(Copy, Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct Affine<P: SWCurveConfig> {
    #[doc(hidden)]
    pub x: P::BaseField,
    #[doc(hidden)]
    pub y: P::BaseField,
    #[doc(hidden)]
    pub infinity: bool,
}

impl<P: SWCurveConfig> PartialEq<Projective<P>> for Affine<P> {
    fn eq(&self, other: &Projective<P>) -> bool {
        self.into_group() == *other
    }
}

impl<P: SWCurveConfig> Display for Affine<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.infinity {
            write!(f, "infinity")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl<P: SWCurveConfig> Debug for Affine<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.infinity {
            write!(f, "infinity")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl<P: SWCurveConfig> Affine<P> {
    /// Constructs a point, enforcing that it lies on the curve.
    ///
    /// # Panics
    ///
    /// * If the point is not on the curve.
    pub fn new(x: P::BaseField, y: P::BaseField) -> Self {
        let point = Self { x, y, infinity: false };
        assert!(point.is_on_curve());
        point
    }

    /// Constructs a point without checking that it satisfies the curve
    /// equation.
    pub const fn new_unchecked(x: P::BaseField, y: P::BaseField) -> Self {
        Self { x, y, infinity: false }
    }

    /// The point at infinity.
    pub const fn identity() -> Self {
        Self { x: P::BaseField::ZERO, y: P::BaseField::ZERO, infinity: true }
    }

    /// The configured generator of the main subgroup.
    pub fn generator() -> Self {
        P::GENERATOR
    }

    /// Coordinates of a finite point.
    pub fn xy(&self) -> Option<(P::BaseField, P::BaseField)> {
        (!self.infinity).then_some((self.x, self.y))
    }

    /// Checks that the point satisfies the curve equation.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let mut x3b = P::add_b(self.x.square() * self.x);
        if !P::COEFF_A.is_zero() {
            x3b += P::mul_by_a(self.x);
        }
        self.y.square() == x3b
    }

    /// Lifts the point into Jacobian coordinates.
    pub fn into_group(self) -> Projective<P> {
        self.into()
    }

    /// Multiplies by a scalar exposed as big-endian bits, accumulating in
    /// Jacobian form with mixed additions.
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

impl<P: SWCurveConfig> Zeroize for Affine<P> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.infinity.zeroize();
    }
}

impl<P: SWCurveConfig> Neg for Affine<P> {
    type Output = Self;

    /// The identity negates to itself; a finite `(x, y)` becomes `(x, -y)`.
    #[inline]
    fn neg(mut self) -> Self {
        self.y.neg_in_place();
        self
    }
}

impl<P: SWCurveConfig, T: Borrow<Self>> Add<T> for Affine<P> {
    type Output = Projective<P>;

    fn add(self, other: T) -> Projective<P> {
        let mut sum = self.into_group();
        sum += other.borrow();
        sum
    }
}

impl<P: SWCurveConfig> Add<Projective<P>> for Affine<P> {
    type Output = Projective<P>;

    fn add(self, other: Projective<P>) -> Projective<P> {
        other + self
    }
}

impl<'a, P: SWCurveConfig> Add<&'a Projective<P>> for Affine<P> {
    type Output = Projective<P>;

    fn add(self, other: &'a Projective<P>) -> Projective<P> {
        *other + self
    }
}

impl<P: SWCurveConfig, T: Borrow<Self>> Sub<T> for Affine<P> {
    type Output = Projective<P>;

    fn sub(self, other: T) -> Projective<P> {
        let mut diff = self.into_group();
        diff -= other.borrow();
        diff
    }
}

impl<P: SWCurveConfig> Sub<Projective<P>> for Affine<P> {
    type Output = Projective<P>;

    fn sub(self, other: Projective<P>) -> Projective<P> {
        self + (-other)
    }
}

impl<'a, P: SWCurveConfig> Sub<&'a Projective<P>> for Affine<P> {
    type Output = Projective<P>;

    fn sub(self, other: &'a Projective<P>) -> Projective<P> {
        self + (-*other)
    }
}

impl<P: SWCurveConfig> Default for Affine<P> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl<P: SWCurveConfig, T: Borrow<P::ScalarField>> Mul<T> for Affine<P> {
    type Output = Projective<P>;

    #[inline]
    fn mul(self, other: T) -> Self::Output {
        self.mul_bigint(other.borrow().into_bigint())
    }
}

// An affine point lifts to Jacobian coordinates with Z = 1.
impl<P: SWCurveConfig> From<Affine<P>> for Projective<P> {
    fn from(p: Affine<P>) -> Projective<P> {
        if p.infinity {
            Projective::zero()
        } else {
            Projective::new_unchecked(p.x, p.y, P::BaseField::one())
        }
    }
}

// A Jacobian point (X, Y, Z) normalizes to (X/Z², Y/Z³).
impl<P: SWCurveConfig> From<Projective<P>> for Affine<P> {
    fn from(p: Projective<P>) -> Affine<P> {
        if p.is_zero() {
            Affine::identity()
        } else {
            let z_inv = p.z.inverse().expect("nonzero field elements are invertible");
            let z_inv_sq = z_inv.square();
            Affine::new_unchecked(p.x * z_inv_sq, p.y * z_inv_sq * z_inv)
        }
    }
}
