//! Jacobian coordinates for a point on a short Weierstrass curve.
//!
//! A point `(X, Y, Z)` represents the affine point `(X/Z², Y/Z³)`; the
//! point at infinity is any representative with `Z = 0`.

use core::{
    borrow::Borrow,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use educe::Educe;
use num_traits::{One, Zero};
use rand::CryptoRng;
use zeroize::Zeroize;

use super::{Affine, SWCurveConfig};
use crate::{
    arithmetic::BigInteger,
    bits::BitIteratorBE,
    field::{group::AdditiveGroup, prime::PrimeField, Field},
    impl_owned_group_ops,
};

/// A point on a short Weierstrass curve in Jacobian coordinates.
#[derive(Educe)]
#[educe(Copy, Clone, Eq(bound(P: SWCurveConfig)), Debug)]
#[must_use]
pub struct Projective<P: SWCurveConfig> {
    /// The x-coordinate of the point.
    pub x: P::BaseField,
    /// The y-coordinate of the point.
    pub y: P::BaseField,
    /// The z-coordinate of the point.
    pub z: P::BaseField,
}

impl<P: SWCurveConfig> PartialEq<Affine<P>> for Projective<P> {
    fn eq(&self, other: &Affine<P>) -> bool {
        self == &other.into_group()
    }
}

impl<P: SWCurveConfig> Display for Projective<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", Affine::from(*self))
    }
}

impl<P: SWCurveConfig> PartialEq for Projective<P> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() {
            return other.is_zero();
        }

        if other.is_zero() {
            return false;
        }

        // x1/z1² == x2/z2² <==> x1 * z2² == x2 * z1², and likewise for y
        // with the cubes.
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();

        self.x * z2z2 == other.x * z1z1
            && self.y * (z2z2 * other.z) == other.y * (z1z1 * self.z)
    }
}

impl<P: SWCurveConfig> Hash for Projective<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.into_affine().hash(state);
    }
}

impl<P: SWCurveConfig> Default for Projective<P> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: SWCurveConfig> Projective<P> {
    /// Construct a point without checking that it satisfies the curve
    /// equation.
    pub const fn new_unchecked(x: P::BaseField, y: P::BaseField, z: P::BaseField) -> Self {
        Self { x, y, z }
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

impl<P: SWCurveConfig> Zeroize for Projective<P> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.z.zeroize();
    }
}

impl<P: SWCurveConfig> Zero for Projective<P> {
    fn zero() -> Self {
        Projective::<P>::ZERO
    }

    fn is_zero(&self) -> bool {
        self.z.is_zero()
    }
}

impl<P: SWCurveConfig> AdditiveGroup for Projective<P> {
    type Scalar = P::ScalarField;

    const ZERO: Self =
        Self::new_unchecked(P::BaseField::ONE, P::BaseField::ONE, P::BaseField::ZERO);

    // Jacobian doubling ("dbl-2007-bl"):
    // https://www.hyperelliptic.org/EFD/g1p/data/shortw/jacobian/doubling/dbl-2007-bl
    fn double_in_place(&mut self) -> &mut Self {
        if self.is_zero() {
            return self;
        }

        // XX = X1^2
        let xx = self.x.square();
        // YY = Y1^2
        let yy = self.y.square();
        // YYYY = YY^2
        let yyyy = yy.square();
        // ZZ = Z1^2
        let zz = self.z.square();
        // S = 2 * ((X1 + YY)^2 - XX - YYYY)
        let s = ((self.x + yy).square() - xx - yyyy).double();
        // M = 3 * XX + a * ZZ^2
        let m = xx + xx.double() + P::mul_by_a(zz.square());
        // T = M^2 - 2 * S
        let t = m.square() - s.double();
        // X3 = T
        // Y3 = M * (S - T) - 8 * YYYY
        let y3 = m * (s - t) - yyyy.double().double().double();
        // Z3 = (Y1 + Z1)^2 - YY - ZZ
        self.z = (self.y + self.z).square() - yy - zz;
        self.x = t;
        self.y = y3;

        self
    }
}

impl<P: SWCurveConfig, T: Borrow<Affine<P>>> AddAssign<T> for Projective<P> {
    // Mixed addition with Z2 = 1 ("madd-2007-bl"):
    // https://www.hyperelliptic.org/EFD/g1p/data/shortw/jacobian/addition/madd-2007-bl
    fn add_assign(&mut self, other: T) {
        let other = other.borrow();
        let Some((x2, y2)) = other.xy() else {
            return;
        };

        if self.is_zero() {
            self.x = x2;
            self.y = y2;
            self.z = P::BaseField::one();
            return;
        }

        // Z1Z1 = Z1^2
        let z1z1 = self.z.square();
        // U2 = X2 * Z1Z1
        let u2 = x2 * z1z1;
        // S2 = Y2 * Z1 * Z1Z1
        let s2 = y2 * self.z * z1z1;

        if self.x == u2 && self.y == s2 {
            // The points are equal, so we double.
            self.double_in_place();
            return;
        }

        // H = U2 - X1
        let h = u2 - self.x;
        // HH = H^2
        let hh = h.square();
        // I = 4 * HH
        let i = hh.double().double();
        // J = H * I
        let j = h * i;
        // r = 2 * (S2 - Y1)
        let r = (s2 - self.y).double();
        // V = X1 * I
        let v = self.x * i;
        // X3 = r^2 - J - 2 * V
        let x3 = r.square() - j - v.double();
        // Y3 = r * (V - X3) - 2 * Y1 * J
        let y3 = r * (v - x3) - (self.y * j).double();
        // Z3 = (Z1 + H)^2 - Z1Z1 - HH
        self.z = (self.z + h).square() - z1z1 - hh;
        self.x = x3;
        self.y = y3;
    }
}

impl<P: SWCurveConfig, T: Borrow<Affine<P>>> Add<T> for Projective<P> {
    type Output = Self;

    fn add(mut self, other: T) -> Self {
        self += other.borrow();
        self
    }
}

impl<P: SWCurveConfig, T: Borrow<Affine<P>>> SubAssign<T> for Projective<P> {
    fn sub_assign(&mut self, other: T) {
        *self += -(*other.borrow());
    }
}

impl<P: SWCurveConfig, T: Borrow<Affine<P>>> Sub<T> for Projective<P> {
    type Output = Self;

    fn sub(mut self, other: T) -> Self {
        self -= other.borrow();
        self
    }
}

impl<P: SWCurveConfig> Neg for Projective<P> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.y = -self.y;
        self
    }
}

impl<'a, P: SWCurveConfig> AddAssign<&'a Self> for Projective<P> {
    // Jacobian addition ("add-2007-bl"):
    // https://www.hyperelliptic.org/EFD/g1p/data/shortw/jacobian/addition/add-2007-bl
    fn add_assign(&mut self, other: &'a Self) {
        if self.is_zero() {
            *self = *other;
            return;
        }
        if other.is_zero() {
            return;
        }

        // Z1Z1 = Z1^2
        let z1z1 = self.z.square();
        // Z2Z2 = Z2^2
        let z2z2 = other.z.square();
        // U1 = X1 * Z2Z2
        let u1 = self.x * z2z2;
        // U2 = X2 * Z1Z1
        let u2 = other.x * z1z1;
        // S1 = Y1 * Z2 * Z2Z2
        let s1 = self.y * other.z * z2z2;
        // S2 = Y2 * Z1 * Z1Z1
        let s2 = other.y * self.z * z1z1;

        if u1 == u2 && s1 == s2 {
            // The points are equal, so we double.
            self.double_in_place();
            return;
        }

        // H = U2 - U1
        let h = u2 - u1;
        // I = (2 * H)^2
        let i = h.double().square();
        // J = H * I
        let j = h * i;
        // r = 2 * (S2 - S1)
        let r = (s2 - s1).double();
        // V = U1 * I
        let v = u1 * i;
        // X3 = r^2 - J - 2 * V
        let x3 = r.square() - j - v.double();
        // Y3 = r * (V - X3) - 2 * S1 * J
        let y3 = r * (v - x3) - (s1 * j).double();
        // Z3 = ((Z1 + Z2)^2 - Z1Z1 - Z2Z2) * H
        self.z = ((self.z + other.z).square() - z1z1 - z2z2) * h;
        self.x = x3;
        self.y = y3;
    }
}

impl<'a, P: SWCurveConfig> Add<&'a Self> for Projective<P> {
    type Output = Self;

    fn add(mut self, other: &'a Self) -> Self {
        self += other;
        self
    }
}

impl<'a, P: SWCurveConfig> SubAssign<&'a Self> for Projective<P> {
    fn sub_assign(&mut self, other: &'a Self) {
        *self += -(*other);
    }
}

impl<'a, P: SWCurveConfig> Sub<&'a Self> for Projective<P> {
    type Output = Self;

    fn sub(mut self, other: &'a Self) -> Self {
        self -= other;
        self
    }
}

impl_owned_group_ops!(Projective, SWCurveConfig);

impl<P: SWCurveConfig, T: Borrow<P::ScalarField>> MulAssign<T> for Projective<P> {
    fn mul_assign(&mut self, other: T) {
        *self = self.mul_bigint(other.borrow().into_bigint());
    }
}

impl<P: SWCurveConfig, T: Borrow<P::ScalarField>> Mul<T> for Projective<P> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: T) -> Self {
        self *= other;
        self
    }
}

impl<P: SWCurveConfig, T: Borrow<Affine<P>>> core::iter::Sum<T> for Projective<P> {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::zero(), |acc, x| acc + x.borrow())
    }
}
