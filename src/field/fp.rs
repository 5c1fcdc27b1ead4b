//! This module contains the implementation of a prime field element [`Fp`],
//! along with width-specific aliases such as [`Fp256`] and [`Fp448`].
//!
//! A field element wraps a big integer in [Montgomery form], which makes
//! modular multiplication cheap enough for curve arithmetic.
//!
//! Note that the implementation of `Ord` for [`Fp`] compares field elements
//! viewing them as integers in the range `0, 1, ..., P::MODULUS - 1`.
//!
//! [Montgomery form]: https://en.wikipedia.org/wiki/Montgomery_modular_multiplication
use core::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    marker::PhantomData,
};

use educe::Educe;
use num_traits::{One, Zero};

use crate::{
    arithmetic::{
        limb,
        uint::Uint,
        BigInteger,
    },
    const_for,
    field::{group::AdditiveGroup, prime::PrimeField, Field},
};

/// A trait that specifies the constants defining a prime field.
/// The arithmetic on its elements is provided in terms of these constants.
pub trait FpParams<const N: usize>: Send + Sync + 'static + Sized {
    /// The modulus of the field.
    const MODULUS: Uint<N>;

    /// A multiplicative generator of the field, which is in particular a
    /// quadratic non-residue.
    const GENERATOR: Fp<Self, N>;

    /// Does the modulus leave the top bit of the top limb unused?
    const MODULUS_HAS_SPARE_BIT: bool = modulus_has_spare_bit::<Self, N>();

    /// `INV = -MODULUS^{-1} mod 2^64`.
    const INV: u64 = inv::<Self, N>();

    /// `R = 2^(64 * N) mod MODULUS`; the Montgomery representation of one.
    const R: Uint<N> = Self::MODULUS.rem_of_pow2(64 * N);

    /// `R2 = R^2 mod MODULUS`, used to enter Montgomery form.
    const R2: Uint<N> = Self::MODULUS.rem_of_pow2(128 * N);

    /// Set `a += b`.
    #[inline(always)]
    fn add_assign(a: &mut Fp<Self, N>, b: &Fp<Self, N>) {
        // This cannot exceed the backing capacity.
        let carry = a.montgomery_form.add_with_carry(&b.montgomery_form);
        // However, it may need to be reduced.
        if Self::MODULUS_HAS_SPARE_BIT {
            a.subtract_modulus();
        } else {
            a.subtract_modulus_with_carry(carry);
        }
    }

    /// Set `a -= b`.
    #[inline(always)]
    fn sub_assign(a: &mut Fp<Self, N>, b: &Fp<Self, N>) {
        // If `other` is larger than `self`, add the modulus to self first.
        if b.montgomery_form > a.montgomery_form {
            a.montgomery_form.add_with_carry(&Self::MODULUS);
        }
        a.montgomery_form.sub_with_borrow(&b.montgomery_form);
    }

    /// Set `a = a + a`.
    #[inline(always)]
    fn double_in_place(a: &mut Fp<Self, N>) {
        // This cannot exceed the backing capacity.
        let carry = a.montgomery_form.mul2();
        // However, it may need to be reduced.
        if Self::MODULUS_HAS_SPARE_BIT {
            a.subtract_modulus();
        } else {
            a.subtract_modulus_with_carry(carry);
        }
    }

    /// Set `a = -a`.
    #[inline(always)]
    fn neg_in_place(a: &mut Fp<Self, N>) {
        if !a.is_zero() {
            let mut tmp = Self::MODULUS;
            tmp.sub_with_borrow(&a.montgomery_form);
            a.montgomery_form = tmp;
        }
    }

    /// Set `a *= b`, using CIOS Montgomery multiplication.
    #[inline(always)]
    fn mul_assign(a: &mut Fp<Self, N>, b: &Fp<Self, N>) {
        let (carry, res) = a.const_mul_without_cond_subtract(b);
        *a = res;

        if Self::MODULUS_HAS_SPARE_BIT {
            a.subtract_modulus();
        } else {
            a.subtract_modulus_with_carry(carry);
        }
    }

    /// Set `a *= a`.
    #[inline(always)]
    fn square_in_place(a: &mut Fp<Self, N>) {
        Self::mul_assign(a, &a.clone());
    }

    /// Compute `a^{-1}` if `a` is not zero.
    #[must_use]
    #[inline(always)]
    fn inverse(a: &Fp<Self, N>) -> Option<Fp<Self, N>> {
        if a.is_zero() {
            return None;
        }
        // Guajardo Kumar Paar Pelzl
        // Efficient Software-Implementation of Finite Fields with Applications
        // to Cryptography
        // Algorithm 16 (BEA for Inversion in Fp)

        let one = Uint::ONE;

        let mut u = a.montgomery_form;
        let mut v = Self::MODULUS;
        let mut b = Fp::new_unchecked(Self::R2); // Avoids unnecessary reduction step.
        let mut c = Fp::zero();

        while u != one && v != one {
            while u.is_even() {
                u.div2();

                if b.montgomery_form.is_even() {
                    b.montgomery_form.div2();
                } else {
                    let carry = b.montgomery_form.add_with_carry(&Self::MODULUS);
                    b.montgomery_form.div2();
                    if !Self::MODULUS_HAS_SPARE_BIT && carry {
                        b.montgomery_form.limbs[N - 1] |= 1 << 63;
                    }
                }
            }

            while v.is_even() {
                v.div2();

                if c.montgomery_form.is_even() {
                    c.montgomery_form.div2();
                } else {
                    let carry = c.montgomery_form.add_with_carry(&Self::MODULUS);
                    c.montgomery_form.div2();
                    if !Self::MODULUS_HAS_SPARE_BIT && carry {
                        c.montgomery_form.limbs[N - 1] |= 1 << 63;
                    }
                }
            }

            if v < u {
                u.sub_with_borrow(&v);
                b -= &c;
            } else {
                v.sub_with_borrow(&u);
                c -= &b;
            }
        }

        if u == one {
            Some(b)
        } else {
            Some(c)
        }
    }

    /// Construct a field element from an integer.
    ///
    /// The element is converted to Montgomery form and reduced.
    #[must_use]
    #[inline]
    fn from_bigint(repr: Uint<N>) -> Fp<Self, N> {
        let mut elem = Fp::new_unchecked(repr);
        if !elem.is_zero() {
            elem *= &Fp::new_unchecked(Self::R2);
        }
        elem
    }

    /// Convert a field element to an integer less than [`Self::MODULUS`].
    #[must_use]
    #[inline(always)]
    fn into_bigint(a: Fp<Self, N>) -> Uint<N> {
        let mut r = a.montgomery_form.limbs;
        // Montgomery reduction
        for i in 0..N {
            let k = r[i].wrapping_mul(Self::INV);

            let (_, mut carry) = limb::mac(r[i], k, Self::MODULUS.limbs[0]);
            for j in 1..N {
                (r[(j + i) % N], carry) =
                    limb::carrying_mac(r[(j + i) % N], k, Self::MODULUS.limbs[j], carry);
            }
            r[i % N] = carry;
        }

        Uint::new(r)
    }
}

/// Compute `-M^{-1} mod 2^64`.
pub const fn inv<T: FpParams<N>, const N: usize>() -> u64 {
    // We compute this as follows.
    // First, MODULUS mod 2^64 is just the lower 64 bits of MODULUS.
    // Hence MODULUS mod 2^64 = MODULUS.limbs[0] mod 2^64.
    //
    // Next, computing the inverse mod 2^64 involves exponentiating by
    // the multiplicative group order, which is euler_totient(2^64) - 1.
    // Now, euler_totient(2^64) = 1 << 63, and so
    // euler_totient(2^64) - 1 = (1 << 63) - 1 = 1111111... (63 digits).
    // We compute this powering via standard square and multiply.
    let mut inv = 1u64;
    const_for!((_i in 0..63) {
        // Square
        inv = inv.wrapping_mul(inv);
        // Multiply
        inv = inv.wrapping_mul(T::MODULUS.limbs[0]);
    });
    inv.wrapping_neg()
}

/// Whether the modulus leaves the top bit of its top limb unused.
#[inline]
pub const fn modulus_has_spare_bit<T: FpParams<N>, const N: usize>() -> bool {
    T::MODULUS.limbs[N - 1] >> 63 == 0
}

/// Represents an element of the prime field `F_p`, where `p == P::MODULUS`.
///
/// This type can represent elements in any field of size at most `N * 64`
/// bits.
#[derive(Educe)]
#[educe(Default, Hash, Clone, Copy, PartialEq, Eq)]
pub struct Fp<P: FpParams<N>, const N: usize> {
    /// Contains the element in Montgomery form for efficient multiplication.
    /// To convert an element to a [`Uint`], use [`FpParams::into_bigint`]
    /// or `into`.
    montgomery_form: Uint<N>,
    #[doc(hidden)]
    phantom: PhantomData<P>,
}

/// Declare [`Fp`] types for different bit sizes.
macro_rules! declare_fp {
    ($fp:ident, $limbs:ident, $bits:expr) => {
        #[doc = "Finite field with max"]
        #[doc = stringify!($bits)]
        #[doc = "bits size element."]
        pub type $fp<P> = $crate::field::fp::Fp<
            P,
            { usize::div_ceil($bits, $crate::arithmetic::limb::Limb::BITS as usize) },
        >;

        #[doc = "Number of limbs in the field with"]
        #[doc = stringify!($bits)]
        #[doc = "bits size element."]
        pub const $limbs: usize =
            usize::div_ceil($bits, $crate::arithmetic::limb::Limb::BITS as usize);
    };
}

declare_fp!(Fp64, LIMBS_64, 64);
declare_fp!(Fp128, LIMBS_128, 128);
declare_fp!(Fp192, LIMBS_192, 192);
declare_fp!(Fp256, LIMBS_256, 256);
declare_fp!(Fp320, LIMBS_320, 320);
declare_fp!(Fp384, LIMBS_384, 384);
declare_fp!(Fp448, LIMBS_448, 448);
declare_fp!(Fp512, LIMBS_512, 512);

impl<P: FpParams<N>, const N: usize> Fp<P, N> {
    /// A multiplicative generator of the field.
    /// [`Self::GENERATOR`] is an element having multiplicative order
    /// `MODULUS - 1`.
    pub const GENERATOR: Fp<P, N> = P::GENERATOR;
    /// Multiplicative identity of the field, i.e., the element `e`
    /// such that, for all elements `f` of the field, `e * f = f`.
    pub const ONE: Fp<P, N> = Fp::new_unchecked(P::R);
    /// Additive identity of the field, i.e., the element `e`
    /// such that, for all elements `f` of the field, `e + f = f`.
    pub const ZERO: Fp<P, N> = Fp::new_unchecked(Uint::new([0; N]));

    /// Construct a new field element from [`Uint`].
    ///
    /// Unlike [`Self::new`], this method does not perform Montgomery
    /// reduction. This method should be used only when constructing an
    /// element from an integer that has already been put in Montgomery form.
    #[must_use]
    #[inline(always)]
    pub const fn new_unchecked(element: Uint<N>) -> Self {
        Self { montgomery_form: element, phantom: PhantomData }
    }

    /// Construct a new field element from its underlying [`Uint`] value.
    #[inline]
    #[must_use]
    pub const fn new(element: Uint<N>) -> Self {
        let mut r = Self::new_unchecked(element);
        if r.const_is_zero() {
            r
        } else {
            r = r.const_mul(&Fp::new_unchecked(P::R2));
            r
        }
    }

    /// Negate a field element; usable in constant evaluation.
    #[must_use]
    pub const fn const_neg(self) -> Self {
        if self.const_is_zero() {
            self
        } else {
            let (r, _) = P::MODULUS.const_sub_with_borrow(&self.montgomery_form);
            Self::new_unchecked(r)
        }
    }

    #[doc(hidden)]
    #[inline(always)]
    pub fn is_geq_modulus(&self) -> bool {
        self.montgomery_form >= P::MODULUS
    }

    #[inline(always)]
    fn subtract_modulus(&mut self) {
        if self.is_geq_modulus() {
            self.montgomery_form.sub_with_borrow(&P::MODULUS);
        }
    }

    #[inline(always)]
    fn subtract_modulus_with_carry(&mut self, carry: bool) {
        if carry || self.is_geq_modulus() {
            self.montgomery_form.sub_with_borrow(&P::MODULUS);
        }
    }

    const fn const_is_zero(&self) -> bool {
        self.montgomery_form.const_is_zero()
    }

    const fn const_mul(self, other: &Self) -> Self {
        let (carry, res) = self.const_mul_without_cond_subtract(other);
        if P::MODULUS_HAS_SPARE_BIT {
            res.const_subtract_modulus()
        } else {
            res.const_subtract_modulus_with_carry(carry)
        }
    }

    #[inline(always)]
    const fn const_mul_without_cond_subtract(mut self, other: &Self) -> (bool, Self) {
        let (mut lo, mut hi) = ([0u64; N], [0u64; N]);
        const_for!((i in 0..N) {
            let mut carry = 0;
            const_for!((j in 0..N) {
                let k = i + j;
                if k >= N {
                    (hi[k - N], carry) = limb::carrying_mac(
                        hi[k - N],
                        self.montgomery_form.limbs[i],
                        other.montgomery_form.limbs[j],
                        carry,
                    );
                } else {
                    (lo[k], carry) = limb::carrying_mac(
                        lo[k],
                        self.montgomery_form.limbs[i],
                        other.montgomery_form.limbs[j],
                        carry,
                    );
                }
            });
            hi[i] = carry;
        });

        // Montgomery reduction
        let mut carry2 = 0;
        const_for!((i in 0..N) {
            let tmp = lo[i].wrapping_mul(P::INV);

            let (_, mut carry) = limb::mac(lo[i], tmp, P::MODULUS.limbs[0]);

            const_for!((j in 1..N) {
                let k = i + j;
                if k >= N {
                    (hi[k - N], carry) =
                        limb::carrying_mac(hi[k - N], tmp, P::MODULUS.limbs[j], carry);
                } else {
                    (lo[k], carry) =
                        limb::carrying_mac(lo[k], tmp, P::MODULUS.limbs[j], carry);
                }
            });
            (hi[i], carry2) = limb::adc(hi[i], carry, carry2);
        });

        const_for!((i in 0..N) {
            self.montgomery_form.limbs[i] = hi[i];
        });
        (carry2 != 0, self)
    }

    const fn const_is_valid(&self) -> bool {
        const_for!((i in 0..N) {
            if self.montgomery_form.limbs[N - i - 1] < P::MODULUS.limbs[N - i - 1] {
                return true;
            } else if self.montgomery_form.limbs[N - i - 1] > P::MODULUS.limbs[N - i - 1] {
                return false;
            }
        });
        false
    }

    #[inline]
    const fn const_subtract_modulus(mut self) -> Self {
        if !self.const_is_valid() {
            let (r, _) = self.montgomery_form.const_sub_with_borrow(&P::MODULUS);
            self.montgomery_form = r;
        }
        self
    }

    #[inline]
    const fn const_subtract_modulus_with_carry(mut self, carry: bool) -> Self {
        if carry || !self.const_is_valid() {
            let (r, _) = self.montgomery_form.const_sub_with_borrow(&P::MODULUS);
            self.montgomery_form = r;
        }
        self
    }
}

impl<P: FpParams<N>, const N: usize> Debug for Fp<P, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.into_bigint(), f)
    }
}

impl<P: FpParams<N>, const N: usize> Zero for Fp<P, N> {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl<P: FpParams<N>, const N: usize> One for Fp<P, N> {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == Self::ONE
    }
}

impl<P: FpParams<N>, const N: usize> AdditiveGroup for Fp<P, N> {
    type Scalar = Self;

    const ZERO: Self = Self::ZERO;

    #[inline]
    fn double(&self) -> Self {
        let mut temp = *self;
        temp.double_in_place();
        temp
    }

    #[inline]
    fn double_in_place(&mut self) -> &mut Self {
        P::double_in_place(self);
        self
    }

    #[inline]
    fn neg_in_place(&mut self) -> &mut Self {
        P::neg_in_place(self);
        self
    }
}

impl<P: FpParams<N>, const N: usize> Field for Fp<P, N> {
    const ONE: Self = Fp::new_unchecked(P::R);

    #[inline]
    fn square(&self) -> Self {
        let mut temp = *self;
        temp.square_in_place();
        temp
    }

    #[inline]
    fn square_in_place(&mut self) -> &mut Self {
        P::square_in_place(self);
        self
    }

    #[inline]
    fn inverse(&self) -> Option<Self> {
        P::inverse(self)
    }

    fn inverse_in_place(&mut self) -> Option<&mut Self> {
        if let Some(inverse) = self.inverse() {
            *self = inverse;
            Some(self)
        } else {
            None
        }
    }
}

impl<P: FpParams<N>, const N: usize> PrimeField for Fp<P, N> {
    type BigInt = Uint<N>;

    const MODULUS: Self::BigInt = P::MODULUS;
    const MODULUS_BIT_SIZE: usize = P::MODULUS.const_num_bits();

    #[inline]
    fn from_bigint(repr: Self::BigInt) -> Self {
        P::from_bigint(repr)
    }

    #[inline]
    fn into_bigint(self) -> Uint<N> {
        P::into_bigint(self)
    }

    #[inline]
    fn quadratic_nonresidue() -> Self {
        P::GENERATOR
    }
}

impl<P: FpParams<N>, const N: usize> Ord for Fp<P, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.into_bigint().cmp(&other.into_bigint())
    }
}

impl<P: FpParams<N>, const N: usize> PartialOrd for Fp<P, N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Auto implements conversion from unsigned integer of type `$int` to [`Fp`].
macro_rules! impl_fp_from_unsigned_int {
    ($int:ty) => {
        impl<P: FpParams<N>, const N: usize> From<$int> for Fp<P, N> {
            fn from(other: $int) -> Self {
                Fp::from_bigint(Uint::from(other))
            }
        }
    };
}

/// Auto implements conversion from signed integer of type `$int` to [`Fp`].
macro_rules! impl_fp_from_signed_int {
    ($int:ty) => {
        impl<P: FpParams<N>, const N: usize> From<$int> for Fp<P, N> {
            fn from(other: $int) -> Self {
                let abs = other.unsigned_abs().into();
                if other.is_positive() {
                    abs
                } else {
                    -abs
                }
            }
        }
    };
}

impl_fp_from_unsigned_int!(u64);
impl_fp_from_unsigned_int!(u32);
impl_fp_from_unsigned_int!(u16);
impl_fp_from_unsigned_int!(u8);

impl_fp_from_signed_int!(i64);
impl_fp_from_signed_int!(i32);
impl_fp_from_signed_int!(i16);
impl_fp_from_signed_int!(i8);

impl<P: FpParams<N>, const N: usize> From<bool> for Fp<P, N> {
    fn from(other: bool) -> Self {
        u8::from(other).into()
    }
}

/// Auto implements conversion from [`Fp`] to integer of type `$int`.
///
/// Conversion is available only for single limb field elements,
/// i.e. `N = 1`.
macro_rules! impl_int_from_fp {
    ($int:ty) => {
        impl<P: FpParams<1>> From<Fp<P, 1>> for $int {
            fn from(other: Fp<P, 1>) -> Self {
                let uint = other.into_bigint();
                let words = uint.as_limbs();
                <$int>::try_from(words[0]).unwrap_or_else(|_| {
                    panic!("should convert to {}", stringify!($int))
                })
            }
        }
    };
}

impl_int_from_fp!(u128);
impl_int_from_fp!(u64);
impl_int_from_fp!(i128);
impl_int_from_fp!(i64);

/// Outputs a string containing the value of `self`,
/// represented as a decimal without leading zeroes.
impl<P: FpParams<N>, const N: usize> Display for Fp<P, N> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let str = self.into_bigint().to_string();
        write!(f, "{str}")
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::Neg for Fp<P, N> {
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self {
        P::neg_in_place(&mut self);
        self
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::AddAssign<&Self> for Fp<P, N> {
    #[inline]
    fn add_assign(&mut self, other: &Self) {
        P::add_assign(self, other);
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::SubAssign<&Self> for Fp<P, N> {
    #[inline]
    fn sub_assign(&mut self, other: &Self) {
        P::sub_assign(self, other);
    }
}

impl<P: FpParams<N>, const N: usize> core::ops::MulAssign<&Self> for Fp<P, N> {
    fn mul_assign(&mut self, other: &Self) {
        P::mul_assign(self, other);
    }
}

/// Computes `self *= other.inverse()` if `other.inverse()` is `Some`, and
/// panics otherwise.
impl<P: FpParams<N>, const N: usize> core::ops::DivAssign<&Self> for Fp<P, N> {
    #[inline]
    fn div_assign(&mut self, other: &Self) {
        use core::ops::MulAssign;
        self.mul_assign(&other.inverse().expect("should not divide by zero"));
    }
}

macro_rules! impl_fp_binop {
    ($op:ident, $fn:ident, $assign:ident, $assign_fn:ident) => {
        impl<P: FpParams<N>, const N: usize> core::ops::$op<&Fp<P, N>> for Fp<P, N> {
            type Output = Self;

            #[inline]
            fn $fn(mut self, other: &Self) -> Self {
                use core::ops::$assign;
                self.$assign_fn(other);
                self
            }
        }

        impl<P: FpParams<N>, const N: usize> core::ops::$op<&Fp<P, N>> for &Fp<P, N> {
            type Output = Fp<P, N>;

            #[inline]
            fn $fn(self, other: &Fp<P, N>) -> Fp<P, N> {
                use core::ops::$assign;
                let mut result = *self;
                result.$assign_fn(other);
                result
            }
        }

        #[allow(unused_qualifications)]
        impl<P: FpParams<N>, const N: usize> core::ops::$op<Self> for Fp<P, N> {
            type Output = Self;

            #[inline]
            fn $fn(mut self, other: Self) -> Self {
                use core::ops::$assign;
                self.$assign_fn(&other);
                self
            }
        }

        #[allow(unused_qualifications)]
        impl<P: FpParams<N>, const N: usize> core::ops::$op<&mut Self> for Fp<P, N> {
            type Output = Self;

            #[inline]
            fn $fn(mut self, other: &mut Self) -> Self {
                use core::ops::$assign;
                self.$assign_fn(&*other);
                self
            }
        }

        #[allow(unused_qualifications)]
        impl<P: FpParams<N>, const N: usize> core::ops::$assign<Self> for Fp<P, N> {
            #[inline]
            fn $assign_fn(&mut self, other: Self) {
                self.$assign_fn(&other);
            }
        }

        #[allow(unused_qualifications)]
        impl<P: FpParams<N>, const N: usize> core::ops::$assign<&mut Self> for Fp<P, N> {
            #[inline]
            fn $assign_fn(&mut self, other: &mut Self) {
                self.$assign_fn(&*other);
            }
        }
    };
}

impl_fp_binop!(Add, add, AddAssign, add_assign);
impl_fp_binop!(Sub, sub, SubAssign, sub_assign);
impl_fp_binop!(Mul, mul, MulAssign, mul_assign);
impl_fp_binop!(Div, div, DivAssign, div_assign);

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::iter::Sum<Self> for Fp<P, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), core::ops::Add::add)
    }
}

#[allow(unused_qualifications)]
impl<'a, P: FpParams<N>, const N: usize> core::iter::Sum<&'a Self> for Fp<P, N> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), core::ops::Add::add)
    }
}

#[allow(unused_qualifications)]
impl<P: FpParams<N>, const N: usize> core::iter::Product<Self> for Fp<P, N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), core::ops::Mul::mul)
    }
}

#[allow(unused_qualifications)]
impl<'a, P: FpParams<N>, const N: usize> core::iter::Product<&'a Self> for Fp<P, N> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::one(), core::ops::Mul::mul)
    }
}

impl<P: FpParams<N>, const N: usize> zeroize::Zeroize for Fp<P, N> {
    // The phantom data does not contain element-specific data
    // and thus does not need to be zeroized.
    fn zeroize(&mut self) {
        self.montgomery_form.zeroize();
    }
}

impl<P: FpParams<N>, const N: usize> From<Fp<P, N>> for Uint<N> {
    #[inline]
    fn from(fp: Fp<P, N>) -> Self {
        fp.into_bigint()
    }
}

impl<P: FpParams<N>, const N: usize> From<Uint<N>> for Fp<P, N> {
    #[inline]
    fn from(int: Uint<N>) -> Self {
        Self::from_bigint(int)
    }
}

/// This macro converts a string base-10 number to a field element.
#[macro_export]
macro_rules! fp_from_num {
    ($num:literal) => {
        $crate::field::fp::Fp::new($crate::arithmetic::uint::from_str_radix($num, 10))
    };
}

/// This macro converts a string hex number to a field element.
#[macro_export]
macro_rules! fp_from_hex {
    ($num:literal) => {{
        $crate::field::fp::Fp::new($crate::arithmetic::uint::from_str_hex($num))
    }};
}

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use super::*;
    use crate::{
        field::{group::AdditiveGroup, prime::PrimeField, Field},
        fp_from_num, from_num,
    };

    type Field64 = Fp64<Fp64Param>;
    struct Fp64Param;
    impl FpParams<LIMBS_64> for Fp64Param {
        const GENERATOR: Fp64<Fp64Param> = fp_from_num!("3");
        const MODULUS: Uint<LIMBS_64> = from_num!("1000003"); // Prime number.
    }

    const MODULUS: i128 = 1000003;

    proptest! {
        #[test]
        fn add(a: i64, b: i64) {
            let res = Field64::from(a) + Field64::from(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            prop_assert_eq!(res, (a + b).rem_euclid(MODULUS));
        }

        #[test]
        fn double(a: i64) {
            let res = Field64::from(a).double();
            let res: i128 = res.into();
            let a = i128::from(a);
            prop_assert_eq!(res, (a + a).rem_euclid(MODULUS));
        }

        #[test]
        fn sub(a: i64, b: i64) {
            let res = Field64::from(a) - Field64::from(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            prop_assert_eq!(res, (a - b).rem_euclid(MODULUS));
        }

        #[test]
        fn mul(a: i64, b: i64) {
            let res = Field64::from(a) * Field64::from(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            prop_assert_eq!(res, (a * b).rem_euclid(MODULUS));
        }

        #[test]
        fn square(a: i64) {
            let res = Field64::from(a).square();
            let res: i128 = res.into();
            let a = i128::from(a);
            prop_assert_eq!(res, (a * a).rem_euclid(MODULUS));
        }

        #[test]
        fn div(a: i64, b: i64) {
            // Skip if `b` is zero.
            if i128::from(b) % MODULUS == 0 {
                return Ok(());
            }

            let res = Field64::from(a) / Field64::from(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            // a / b = res mod M => res * b = a mod M
            prop_assert_eq!((res * b).rem_euclid(MODULUS), a.rem_euclid(MODULUS));
        }

        #[test]
        fn pow(a: i64, b in 0_u32..1000) {
            /// Compute a^b in an expensive and iterative way.
            fn dumb_pow(a: i128, b: i128) -> i128 {
                (0..b).fold(1, |acc, _| (acc * a).rem_euclid(MODULUS))
            }

            let res = Field64::from(a).pow(b);
            let res: i128 = res.into();
            let a = i128::from(a);
            let b = i128::from(b);
            prop_assert_eq!(res, dumb_pow(a, b));
        }

        #[test]
        fn neg(a: i64) {
            let res = -Field64::from(a);
            let res: i128 = res.into();
            let a = i128::from(a);
            prop_assert_eq!(res, (-a).rem_euclid(MODULUS));
        }

        #[test]
        fn sqrt_of_square_is_plus_minus_root(a: i64) {
            let elem = Field64::from(a);
            let root = elem.square().sqrt().expect("squares have roots");
            prop_assert!(root == elem || root == -elem);
        }

        #[test]
        fn legendre_matches_sqrt(a: i64) {
            let elem = Field64::from(a);
            match elem.legendre() {
                0 => prop_assert!(elem.is_zero()),
                1 => prop_assert!(elem.sqrt().is_some()),
                _ => prop_assert!(elem.sqrt().is_none()),
            }
        }

        #[test]
        fn bytes_mod_order_matches_reference(a: u64, b: u64) {
            let mut bytes = [0u8; 16];
            bytes[..8].copy_from_slice(&a.to_le_bytes());
            bytes[8..].copy_from_slice(&b.to_le_bytes());

            let got = Field64::from_le_bytes_mod_order(&bytes);
            let expect = u128::from_le_bytes(bytes) % (MODULUS as u128);
            prop_assert_eq!(i128::from(got), i128::try_from(expect).unwrap());

            let mut be = bytes;
            be.reverse();
            prop_assert_eq!(Field64::from_be_bytes_mod_order(&be), got);
        }

        #[test]
        fn one(a: i64) {
            let res = Field64::one();
            let res: i128 = res.into();
            prop_assert_eq!(res, 1);

            let res = Field64::one() * Field64::from(a);
            let res: i128 = res.into();
            let a: i128 = a.into();
            prop_assert_eq!(res, a.rem_euclid(MODULUS));
        }

        #[test]
        fn zero(a: i64) {
            let res = Field64::zero();
            let res: i128 = res.into();
            prop_assert_eq!(res, 0);

            let res = Field64::zero() + Field64::from(a);
            let res: i128 = res.into();
            let a: i128 = a.into();
            prop_assert_eq!(res, a.rem_euclid(MODULUS));
        }
    }

    #[test]
    fn random_is_in_range() {
        use rand::SeedableRng;

        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let elem = Field64::random(&mut rng);
            assert!(i128::from(elem) < MODULUS);
            assert!(!Field64::random_nonzero(&mut rng).is_zero());
        }
    }
}
