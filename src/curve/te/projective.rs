//! Extended projective coordinates for a point on a twisted Edwards curve.
//!
//! A point `(X, Y, T, Z)` represents the affine point `(X/Z, Y/Z)` with the
//! auxiliary coordinate `T = X·Y/Z`, which is what makes the unified
//! add/double formulas of [\[HKCD08\]](https://eprint.iacr.org/2008/522.pdf)
//! (Sections 3.1 and 3.3) available.

use core::{
    borrow::Borrow,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use educe::Educe;
use num_traits::Zero;
use rand::CryptoRng;
use zeroize::Zeroize;

use super::{Affine, TECurveConfig};
use crate::{
    arithmetic::BigInteger,
    bits::BitIteratorBE,
    field::{group::AdditiveGroup, prime::PrimeField, Field},
    impl_owned_group_ops,
};

/// A point on a twisted Edwards curve in extended projective coordinates.
#[derive(Educe)]
#[educe(Copy, Clone, Eq(bound(P: TECurveConfig)), Debug)]
#[must_use]
pub struct Projective<P: TECurveConfig> {
    /// The x-coordinate of the point in projective coordinates.
    pub x: P::BaseField,
    /// The y-coordinate of the point in projective coordinates.
    pub y: P::BaseField,
    /// The t-coordinate of the point in projective coordinates.
    pub t: P::BaseField,
    /// The z-coordinate of the point in projective coordinates.
    pub z: P::BaseField,
}

impl<P: TECurveConfig> PartialEq<Affine<P>> for Projective<P> {
    fn eq(&self, other: &Affine<P>) -> bool {
        self == &other.into_group()
    }
}

impl<P: TECurveConfig> Display for Projective<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", Affine::from(*self))
    }
}

impl<P: TECurveConfig> PartialEq for Projective<P> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() {
            return other.is_zero();
        }

        if other.is_zero() {
            return false;
        }

        // Equality without an inversion:
        // x1/z1 == x2/z2 <==> x1 * z2 == x2 * z1, likewise for y.
        (self.x * other.z) == (other.x * self.z) && (self.y * other.z) == (other.y * self.z)
    }
}

impl<P: TECurveConfig> Hash for Projective<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.into_affine().hash(state);
    }
}

impl<P: TECurveConfig> Default for Projective<P> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: TECurveConfig> Projective<P> {
    /// Construct a point without checking that it satisfies the curve
    /// equation.
    pub const fn new_unchecked(
        x: P::BaseField,
        y: P::BaseField,
        t: P::BaseField,
        z: P::BaseField,
    ) -> Self {
        Self { x, y, t, z }
    }

    /// Construct a point, enforcing that it lies on the curve.
    ///
    /// # Panics
    ///
    /// * If the point is not on the curve.
    pub fn new(x: P::BaseField, y: P::BaseField, t: P::BaseField, z: P::BaseField) -> Self {
        let point = Self::new_unchecked(x, y, t, z).into_affine();
        assert!(point.is_on_curve());
        point.into()
    }

    /// A projective copy of the configured subgroup generator.
    pub fn generator() -> Self {
        Affine::generator().into()
    }

    /// Normalizes the point to affine coordinates.
    pub fn into_affine(self) -> Affine<P> {
        self.into()
    }

    /// Multiplies by a scalar exposed as big-endian bits, by plain
    /// double-and-add.
    pub fn mul_bigint(&self, scalar: impl BitIteratorBE) -> Self {
        let mut acc = Self::zero();
        for bit in scalar.bit_be_trimmed_iter() {
            acc.double_in_place();
            if bit {
                acc += self;
            }
        }
        acc
    }

    /// Multiplies `self` by `scalar`, splitting the scalar into two random
    /// shares so a fixed exponent never drives the double-and-add loop
    /// directly.
    pub fn mul_blind<R: CryptoRng + ?Sized>(&self, scalar: &P::ScalarField, rng: &mut R) -> Self {
        let mask = P::ScalarField::random_nonzero(rng);
        let rest = *scalar - mask;
        self.mul_bigint(rest.into_bigint()) + self.mul_bigint(mask.into_bigint())
    }

    /// Computes `[a]self + [b]other` with a shared doubling loop
    /// (Shamir's trick).
    pub fn mul_add(&self, a: &P::ScalarField, other: &Self, b: &P::ScalarField) -> Self {
        let sum = *self + other;
        let a = a.into_bigint();
        let b = b.into_bigint();

        let bits = <<P::ScalarField as PrimeField>::BigInt as BigInteger>::BITS;
        let mut acc = Self::zero();
        for i in (0..bits).rev() {
            acc.double_in_place();
            match (a.get_bit(i), b.get_bit(i)) {
                (true, true) => acc += &sum,
                (true, false) => acc += self,
                (false, true) => acc += other,
                (false, false) => {}
            }
        }
        acc
    }
}

impl<P: TECurveConfig> Zeroize for Projective<P> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.t.zeroize();
        self.z.zeroize();
    }
}

impl<P: TECurveConfig> Zero for Projective<P> {
    fn zero() -> Self {
        Projective::<P>::ZERO
    }

    fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y == self.z && !self.y.is_zero() && self.t.is_zero()
    }
}

impl<P: TECurveConfig> AdditiveGroup for Projective<P> {
    type Scalar = P::ScalarField;

    const ZERO: Self = Self::new_unchecked(
        P::BaseField::ZERO,
        P::BaseField::ONE,
        P::BaseField::ZERO,
        P::BaseField::ONE,
    );

    // Extended-coordinate doubling ("dbl-2008-hwcd"):
    // https://www.hyperelliptic.org/EFD/g1p/data/twisted/extended/doubling/dbl-2008-hwcd
    fn double_in_place(&mut self) -> &mut Self {
        // A = X1^2
        let a = self.x.square();
        // B = Y1^2
        let b = self.y.square();
        // C = 2 * Z1^2
        let c = self.z.square().double();
        // D = a * A
        let d = P::mul_by_a(a);
        // E = (X1 + Y1)^2 - A - B
        let e = (self.x + self.y).square() - a - b;
        // G = D + B
        let g = d + b;
        // F = G - C
        let f = g - c;
        // H = D - B
        let h = d - b;
        // X3 = E * F
        self.x = e * f;
        // Y3 = G * H
        self.y = g * h;
        // T3 = E * H
        self.t = e * h;
        // Z3 = F * G
        self.z = f * g;

        self
    }
}

impl<P: TECurveConfig, T: Borrow<Affine<P>>> AddAssign<T> for Projective<P> {
    // Unified mixed addition ("madd-2008-hwcd", Z2 = 1 so T2 = X2·Y2):
    // https://www.hyperelliptic.org/EFD/g1p/data/twisted/extended/addition/madd-2008-hwcd
    fn add_assign(&mut self, other: T) {
        let other = other.borrow();
        // A = X1*X2
        let a = self.x * other.x;
        // B = Y1*Y2
        let b = self.y * other.y;
        // C = T1*d*T2, with T2 = X2*Y2 since Z2 = 1
        let c = P::COEFF_D * self.t * other.x * other.y;

        // D = Z1
        let d = self.z;
        // E = (X1+Y1)*(X2+Y2)-A-B
        let e = (self.x + self.y) * (other.x + other.y) - a - b;
        // F = D-C
        let f = d - c;
        // G = D+C
        let g = d + c;
        // H = B-a*A
        let h = b - P::mul_by_a(a);
        // X3 = E*F
        self.x = e * f;
        // Y3 = G*H
        self.y = g * h;
        // T3 = E*H
        self.t = e * h;
        // Z3 = F*G
        self.z = f * g;
    }
}

impl<P: TECurveConfig, T: Borrow<Affine<P>>> Add<T> for Projective<P> {
    type Output = Self;

    fn add(mut self, other: T) -> Self {
        self += other.borrow();
        self
    }
}

impl<P: TECurveConfig, T: Borrow<Affine<P>>> SubAssign<T> for Projective<P> {
    fn sub_assign(&mut self, other: T) {
        *self += -(*other.borrow());
    }
}

impl<P: TECurveConfig, T: Borrow<Affine<P>>> Sub<T> for Projective<P> {
    type Output = Self;

    fn sub(mut self, other: T) -> Self {
        self -= other.borrow();
        self
    }
}

impl<P: TECurveConfig> Neg for Projective<P> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.x = -self.x;
        self.t = -self.t;
        self
    }
}

impl<'a, P: TECurveConfig> AddAssign<&'a Self> for Projective<P> {
    // Unified addition ("add-2008-hwcd"):
    // https://www.hyperelliptic.org/EFD/g1p/data/twisted/extended/addition/add-2008-hwcd
    fn add_assign(&mut self, other: &'a Self) {
        // A = x1 * x2
        let a = self.x * other.x;

        // B = y1 * y2
        let b = self.y * other.y;

        // C = d * t1 * t2
        let c = P::COEFF_D * self.t * other.t;

        // D = z1 * z2
        let d = self.z * other.z;

        // H = B - aA
        let h = b - P::mul_by_a(a);

        // E = (x1 + y1) * (x2 + y2) - A - B
        let e = (self.x + self.y) * (other.x + other.y) - a - b;

        // F = D - C
        let f = d - c;

        // G = D + C
        let g = d + c;

        // x3 = E * F
        self.x = e * f;

        // y3 = G * H
        self.y = g * h;

        // t3 = E * H
        self.t = e * h;

        // z3 = F * G
        self.z = f * g;
    }
}

impl<'a, P: TECurveConfig> Add<&'a Self> for Projective<P> {
    type Output = Self;

    fn add(mut self, other: &'a Self) -> Self {
        self += other;
        self
    }
}

impl<'a, P: TECurveConfig> SubAssign<&'a Self> for Projective<P> {
    fn sub_assign(&mut self, other: &'a Self) {
        *self += -(*other);
    }
}

impl<'a, P: TECurveConfig> Sub<&'a Self> for Projective<P> {
    type Output = Self;

    fn sub(mut self, other: &'a Self) -> Self {
        self -= other;
        self
    }
}

impl_owned_group_ops!(Projective, TECurveConfig);

impl<P: TECurveConfig, T: Borrow<P::ScalarField>> MulAssign<T> for Projective<P> {
    fn mul_assign(&mut self, other: T) {
        *self = self.mul_bigint(other.borrow().into_bigint());
    }
}

impl<P: TECurveConfig, T: Borrow<P::ScalarField>> Mul<T> for Projective<P> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: T) -> Self {
        self *= other;
        self
    }
}

impl<P: TECurveConfig, T: Borrow<Affine<P>>> core::iter::Sum<T> for Projective<P> {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::zero(), |acc, x| acc + x.borrow())
    }
}
