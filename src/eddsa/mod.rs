//! EdDSA signatures over twisted Edwards curves ([RFC 8032]), with scalar
//! and public-key tweaking, batch verification, Edwards ↔ Montgomery key
//! conversion and X25519/X448 key agreement ([RFC 7748]).
//!
//! The byte-level API lives on the [`EdDsa`] engine; [`Ed25519`] and
//! [`Ed448`] are its concrete instances.
//!
//! [RFC 8032]: https://www.rfc-editor.org/rfc/rfc8032
//! [RFC 7748]: https://www.rfc-editor.org/rfc/rfc7748

use alloc::{string::String, vec, vec::Vec};
use core::{fmt, marker::PhantomData};

use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

mod ed25519;
pub use ed25519::Ed25519;

mod ed448;
pub use ed448::Ed448;

mod encoding;

use pkcs8::ObjectIdentifier;

use crate::{
    arithmetic::BigInteger,
    curve::te::{montgomery_ladder, Affine, MontCurveConfig, Projective, TECurveConfig},
    field::{group::AdditiveGroup, prime::PrimeField, Field},
    hash::ExpandHasher,
};

/// Errors from key handling and signing operations.
///
/// Signature *verification* never surfaces an error: [`EdDsa::verify`] and
/// [`EdDsa::batch_verify`] report any failure, structural or cryptographic,
/// as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A key, scalar, signature or seed has the wrong length.
    InvalidLength,
    /// A scalar is zero (or out of range) where a nonzero value is required.
    InvalidScalar,
    /// A point failed to decode, or an operation produced the identity.
    InvalidPoint,
    /// A context string was supplied for a curve without a built-in domain
    /// prefix and no pre-hash flag.
    ContextRequiresPrehash,
    /// An ASN.1, PKCS#8, SPKI or JWK document failed to parse or named the
    /// wrong algorithm.
    InvalidEncoding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidLength => "invalid length",
            Error::InvalidScalar => "invalid scalar",
            Error::InvalidPoint => "invalid point",
            Error::ContextRequiresPrehash => "context requires a pre-hash flag",
            Error::InvalidEncoding => "invalid key encoding",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result alias for EdDSA operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything an [`EdDsa`] engine needs to know about its curve beyond the
/// group arithmetic: byte sizes, clamping, the RFC 8032 domain prefix, the
/// seed-expansion hash and the Montgomery-form maps.
pub trait EdwardsParams: TECurveConfig<MontCurveConfig = Self> + MontCurveConfig
where
    Self::BaseField: PrimeField,
{
    /// Hash used for seed expansion and challenge computation; must support
    /// an output of `2 * POINT_BYTES`.
    type Expand: ExpandHasher;

    /// Byte length of an encoded point, which is also the length of a
    /// secret seed and of each signature half.
    const POINT_BYTES: usize;
    /// Byte length of a base field element.
    const FIELD_BYTES: usize;
    /// Byte length of a raw scalar.
    const SCALAR_BYTES: usize;
    /// Byte length of a Montgomery-form (x-only) public key.
    const MONT_BYTES: usize;
    /// Base-2 logarithm of the cofactor.
    const COFACTOR_LOG2: u32;
    /// Fixed ladder length of the Montgomery form.
    const LADDER_BITS: usize;
    /// RFC 8032 domain separation prefix.
    const PREFIX: &'static [u8];
    /// Whether the domain prefix is always hashed in, even without a
    /// pre-hash flag or context string.
    const CONTEXT: bool;
    /// RFC 8410 algorithm identifier.
    const OID: ObjectIdentifier;
    /// JWK `crv` parameter.
    const JWK_CURVE: &'static str;

    /// Forces the cofactor-clearing bit pattern onto a raw scalar.
    fn clamp(scalar: &mut [u8]);

    /// Checks whether a scalar carries the clamp bit pattern.
    fn is_clamped(scalar: &[u8]) -> bool;

    /// Maps an Edwards point to the u-coordinate of its Montgomery form.
    fn to_mont_u(point: &Affine<Self>) -> Option<Self::BaseField>;

    /// Lifts a Montgomery u-coordinate back to an Edwards point, with
    /// `x_is_odd` selecting the x parity.
    ///
    /// Only available when the two forms are birationally equivalent; for
    /// curves related by an isogeny there is no pointwise inverse and this
    /// returns `None`.
    fn from_mont_u(u: Self::BaseField, x_is_odd: bool) -> Option<Affine<Self>>;

    /// Masks the non-coordinate bits of an incoming Montgomery public key.
    fn mask_mont_key(bytes: &mut [u8]);
}

/// Encodes a point as its little-endian y coordinate with the x parity in
/// the top bit of the final byte.
pub(crate) fn encode_point<P: EdwardsParams>(point: &Affine<P>) -> Vec<u8>
where
    P::BaseField: PrimeField,
{
    let mut bytes = point.y.into_bigint().into_bytes_le();
    bytes.resize(P::POINT_BYTES, 0);
    if point.x.into_bigint().is_odd() {
        bytes[P::POINT_BYTES - 1] |= 0x80;
    }
    bytes
}

/// Decodes a point from its compressed-y form. Accepts any valid curve
/// point; membership of the prime-order subgroup is *not* checked.
pub(crate) fn decode_point<P: EdwardsParams>(bytes: &[u8]) -> Option<Affine<P>>
where
    P::BaseField: PrimeField,
{
    if bytes.len() != P::POINT_BYTES {
        return None;
    }

    let mut data = bytes.to_vec();
    let x_is_odd = data[P::POINT_BYTES - 1] & 0x80 != 0;
    data[P::POINT_BYTES - 1] &= 0x7f;
    if data[P::FIELD_BYTES..].iter().any(|&b| b != 0) {
        return None;
    }

    let repr = <<P::BaseField as PrimeField>::BigInt as BigInteger>::from_bytes_le(
        &data[..P::FIELD_BYTES],
    );
    if repr >= <P::BaseField as PrimeField>::MODULUS {
        return None;
    }

    point_from_y(P::BaseField::from_bigint(repr), x_is_odd)
}

/// Solves the curve equation `a * x² + y² = 1 + d * x² * y²` for `x`, with
/// the requested parity.
pub(crate) fn point_from_y<P: EdwardsParams>(
    y: P::BaseField,
    x_is_odd: bool,
) -> Option<Affine<P>>
where
    P::BaseField: PrimeField,
{
    // x² = (y² - 1) / (d * y² - a)
    let y2 = y.square();
    let denom = (P::COEFF_D * y2 - <P as TECurveConfig>::COEFF_A).inverse()?;
    let x2 = (y2 - P::BaseField::ONE) * denom;

    let mut x = x2.sqrt()?;
    if x.is_zero() {
        // The sign bit of x = 0 must be clear.
        if x_is_odd {
            return None;
        }
    } else if x.into_bigint().is_odd() != x_is_odd {
        x = -x;
    }

    Some(Affine::new_unchecked(x, y))
}

/// EdDSA engine over the Edwards curve `P`.
///
/// All operations take and return plain byte slices/vectors in the wire
/// formats of RFC 8032: little-endian field elements, compressed-y points
/// and `R ‖ S` signatures of `2 * POINT_BYTES` bytes.
pub struct EdDsa<P: EdwardsParams>(PhantomData<P>)
where
    P::BaseField: PrimeField;

type Scalar<P> = <P as crate::curve::CurveConfig>::ScalarField;

impl<P: EdwardsParams> EdDsa<P>
where
    P::BaseField: PrimeField,
{
    // ----- key lifecycle -----

    /// Generates a fresh secret seed.
    pub fn private_key_generate<R: CryptoRng + ?Sized>(rng: &mut R) -> Vec<u8> {
        let mut secret = vec![0u8; P::POINT_BYTES];
        rng.fill_bytes(&mut secret);
        secret
    }

    /// Generates a uniformly random nonzero scalar.
    pub fn scalar_generate<R: CryptoRng + ?Sized>(rng: &mut R) -> Vec<u8> {
        Self::encode_scalar(&Scalar::<P>::random_nonzero(rng))
    }

    /// Checks that a secret seed has the right shape.
    #[must_use]
    pub fn private_key_verify(secret: &[u8]) -> bool {
        secret.len() == P::POINT_BYTES
    }

    /// Checks that a raw scalar has the right shape.
    #[must_use]
    pub fn scalar_verify(scalar: &[u8]) -> bool {
        scalar.len() == P::SCALAR_BYTES
    }

    /// Applies the curve's clamp pattern to a scalar, unless it is already
    /// clamped.
    pub fn scalar_clamp(scalar: &[u8]) -> Result<Vec<u8>> {
        if scalar.len() != P::SCALAR_BYTES {
            return Err(Error::InvalidLength);
        }
        let mut out = scalar.to_vec();
        if !P::is_clamped(&out) {
            P::clamp(&mut out);
        }
        Ok(out)
    }

    /// Expands a secret seed into its clamped signing scalar and the nonce
    /// prefix, as in RFC 8032 § 5.1.5.
    fn expand_secret(secret: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
        if secret.len() != P::POINT_BYTES {
            return Err(Error::InvalidLength);
        }

        let mut expanded = vec![0u8; 2 * P::POINT_BYTES];
        P::Expand::digest(secret, &mut expanded);

        let mut scalar = expanded[..P::SCALAR_BYTES].to_vec();
        P::clamp(&mut scalar);
        let prefix = expanded[P::POINT_BYTES..].to_vec();
        expanded.zeroize();

        Ok((scalar, prefix))
    }

    /// Converts a secret seed into its clamped signing scalar.
    pub fn private_key_convert(secret: &[u8]) -> Result<Vec<u8>> {
        Self::expand_secret(secret).map(|(scalar, _)| scalar)
    }

    // ----- scalar and point codecs -----

    fn decode_scalar(bytes: &[u8]) -> Result<Scalar<P>> {
        if bytes.len() != P::SCALAR_BYTES {
            return Err(Error::InvalidLength);
        }
        let repr =
            <<Scalar<P> as PrimeField>::BigInt as BigInteger>::from_bytes_le(bytes);
        Ok(Scalar::<P>::from_bigint(repr))
    }

    fn encode_scalar(scalar: &Scalar<P>) -> Vec<u8> {
        scalar.into_bigint().into_bytes_le()
    }

    /// Encodes `S` into a signature half, padded to the point length.
    fn encode_sig_scalar(scalar: &Scalar<P>) -> Vec<u8> {
        let mut bytes = Self::encode_scalar(scalar);
        bytes.resize(P::POINT_BYTES, 0);
        bytes
    }

    /// Decodes `S` from a signature half, rejecting values at or above the
    /// group order.
    fn decode_sig_scalar(bytes: &[u8]) -> Option<Scalar<P>> {
        if bytes.len() != P::POINT_BYTES || bytes[P::SCALAR_BYTES..].iter().any(|&b| b != 0) {
            return None;
        }
        let repr = <<Scalar<P> as PrimeField>::BigInt as BigInteger>::from_bytes_le(
            &bytes[..P::SCALAR_BYTES],
        );
        if repr >= <Scalar<P> as PrimeField>::MODULUS {
            return None;
        }
        Some(Scalar::<P>::from_bigint(repr))
    }

    // ----- hash to scalar -----

    /// Hashes the domain prefix (when applicable) and `parts` to a scalar
    /// mod the group order.
    fn hash_int(ph: Option<bool>, ctx: Option<&[u8]>, parts: &[&[u8]]) -> Result<Scalar<P>> {
        let mut hasher = P::Expand::new();

        if P::CONTEXT || ph.is_some() {
            let ctx = ctx.unwrap_or(&[]);
            let ctx_len = u8::try_from(ctx.len()).map_err(|_| Error::InvalidLength)?;
            hasher.update(P::PREFIX);
            hasher.update([u8::from(ph == Some(true))]);
            hasher.update([ctx_len]);
            hasher.update(ctx);
        } else if ctx.is_some() {
            return Err(Error::ContextRequiresPrehash);
        }

        for part in parts {
            hasher.update(part);
        }

        let mut wide = vec![0u8; 2 * P::POINT_BYTES];
        hasher.finalize_into(&mut wide);
        Ok(Scalar::<P>::from_le_bytes_mod_order(&wide))
    }

    /// Computes `b⁻¹ mod n` as `b^(n-2)`.
    ///
    /// A binary-extended GCD would be cheaper but takes a data-dependent
    /// path through the loop; the fixed exponentiation does not.
    fn fermat_invert(b: &Scalar<P>) -> Scalar<P> {
        let mut exp = <Scalar<P> as PrimeField>::MODULUS;
        exp.sub_with_borrow(&<Scalar<P> as PrimeField>::BigInt::from(2u64));
        b.pow(exp)
    }

    // ----- signing -----

    /// Signs `msg` with a secret seed.
    ///
    /// `ph` is the pre-hash flag and `ctx` the optional context string of
    /// RFC 8032; pass `None` for both to get the plain scheme.
    pub fn sign<R: CryptoRng + ?Sized>(
        msg: &[u8],
        secret: &[u8],
        ph: Option<bool>,
        ctx: Option<&[u8]>,
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let (mut scalar, mut prefix) = Self::expand_secret(secret)?;
        let sig = Self::sign_with_scalar(msg, &scalar, &prefix, ph, ctx, rng);
        scalar.zeroize();
        prefix.zeroize();
        sig
    }

    /// Signs `msg` with an explicit scalar and nonce seed.
    ///
    /// The scalar multiplications are blinded, and `S` is assembled on
    /// blinded operands: with a fresh uniform `b ∈ [1, n)`,
    /// `S = ((r·b + h·b·a) · b⁻¹) mod n`, where `b⁻¹` comes from
    /// [`Self::fermat_invert`].
    pub fn sign_with_scalar<R: CryptoRng + ?Sized>(
        msg: &[u8],
        scalar: &[u8],
        nonce: &[u8],
        ph: Option<bool>,
        ctx: Option<&[u8]>,
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let a = Self::decode_scalar(scalar)?;
        let g = Projective::<P>::generator();

        let a_point = g.mul_blind(&a, rng).into_affine();
        let a_bytes = encode_point(&a_point);

        let r = Self::hash_int(ph, ctx, &[nonce, msg])?;
        let r_point = g.mul_blind(&r, rng).into_affine();
        let r_bytes = encode_point(&r_point);

        let h = Self::hash_int(ph, ctx, &[&r_bytes, &a_bytes, msg])?;

        let b = Scalar::<P>::random_nonzero(rng);
        let b_inv = Self::fermat_invert(&b);
        let s = ((r * b) + (h * (b * a))) * b_inv;

        let mut sig = r_bytes;
        sig.extend_from_slice(&Self::encode_sig_scalar(&s));
        Ok(sig)
    }

    /// Derives the additively tweaked nonce seed for tweaked signing.
    fn tweak_nonce(prefix: &[u8], tweak: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; 2 * P::POINT_BYTES];
        P::Expand::multi(prefix, tweak, None, &mut out);
        out.truncate(P::POINT_BYTES);
        out
    }

    /// Signs with the secret scalar additively tweaked by `tweak`.
    pub fn sign_tweak_add<R: CryptoRng + ?Sized>(
        msg: &[u8],
        secret: &[u8],
        tweak: &[u8],
        ph: Option<bool>,
        ctx: Option<&[u8]>,
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let (scalar, prefix) = Self::expand_secret(secret)?;
        let tweaked = Self::scalar_tweak_add(&scalar, tweak)?;
        let nonce = Self::tweak_nonce(&prefix, tweak);
        Self::sign_with_scalar(msg, &tweaked, &nonce, ph, ctx, rng)
    }

    /// Signs with the secret scalar multiplicatively tweaked by `tweak`.
    pub fn sign_tweak_mul<R: CryptoRng + ?Sized>(
        msg: &[u8],
        secret: &[u8],
        tweak: &[u8],
        ph: Option<bool>,
        ctx: Option<&[u8]>,
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let (scalar, prefix) = Self::expand_secret(secret)?;
        let tweaked = Self::scalar_tweak_mul(&scalar, tweak)?;
        let nonce = Self::tweak_nonce(&prefix, tweak);
        Self::sign_with_scalar(msg, &tweaked, &nonce, ph, ctx, rng)
    }

    // ----- verification -----

    /// Verifies a signature. Never panics or errors; every failure is
    /// reported as `false`, with no distinction of cause.
    #[must_use]
    pub fn verify(
        msg: &[u8],
        sig: &[u8],
        key: &[u8],
        ph: Option<bool>,
        ctx: Option<&[u8]>,
    ) -> bool {
        Self::verify_inner(msg, sig, key, ph, ctx).unwrap_or(false)
    }

    fn verify_inner(
        msg: &[u8],
        sig: &[u8],
        key: &[u8],
        ph: Option<bool>,
        ctx: Option<&[u8]>,
    ) -> Option<bool> {
        if sig.len() != 2 * P::POINT_BYTES || key.len() != P::POINT_BYTES {
            return Some(false);
        }

        let r_point = decode_point::<P>(&sig[..P::POINT_BYTES])?;
        let s = Self::decode_sig_scalar(&sig[P::POINT_BYTES..])?;
        let a_point = decode_point::<P>(key)?;

        let h = Self::hash_int(ph, ctx, &[&sig[..P::POINT_BYTES], key, msg]).ok()?;

        let mut lhs = Projective::<P>::generator().mul_bigint(s.into_bigint());
        let mut rhs = r_point.into_group() + a_point.mul_bigint(h.into_bigint());

        // Clear the cofactor by doubling both sides log2(h) times, instead
        // of multiplying the equation through by the cofactor scalar.
        for _ in 0..P::COFACTOR_LOG2 {
            lhs.double_in_place();
            rhs.double_in_place();
        }

        Some(lhs == rhs)
    }

    /// Verifies a batch of `(msg, sig, key)` triples at once by folding them
    /// into a single group equation with random weights.
    ///
    /// An empty batch verifies. Structural problems (bad lengths, dud
    /// points) make the whole batch report `false`; this function never
    /// errors.
    #[must_use]
    pub fn batch_verify<R: CryptoRng + ?Sized>(
        batch: &[(&[u8], &[u8], &[u8])],
        ph: Option<bool>,
        ctx: Option<&[u8]>,
        rng: &mut R,
    ) -> bool {
        Self::batch_verify_inner(batch, ph, ctx, rng).unwrap_or(false)
    }

    fn batch_verify_inner<R: CryptoRng + ?Sized>(
        batch: &[(&[u8], &[u8], &[u8])],
        ph: Option<bool>,
        ctx: Option<&[u8]>,
        rng: &mut R,
    ) -> Option<bool> {
        let mut lhs = Scalar::<P>::zero();
        let mut rhs = Projective::<P>::zero();

        for (i, (msg, sig, key)) in batch.iter().enumerate() {
            if sig.len() != 2 * P::POINT_BYTES || key.len() != P::POINT_BYTES {
                return Some(false);
            }

            let r_point = decode_point::<P>(&sig[..P::POINT_BYTES])?;
            let s = Self::decode_sig_scalar(&sig[P::POINT_BYTES..])?;
            let a_point = decode_point::<P>(key)?;
            let e = Self::hash_int(ph, ctx, &[&sig[..P::POINT_BYTES], key, msg]).ok()?;

            if i == 0 {
                lhs = s;
                rhs = r_point.into_group() + a_point.mul_bigint(e.into_bigint());
            } else {
                let weight = Scalar::<P>::random_nonzero(rng);
                lhs += weight * s;
                rhs += r_point
                    .into_group()
                    .mul_add(&weight, &a_point.into_group(), &(weight * e));
            }
        }

        let folded = Projective::<P>::generator().mul_bigint(lhs.into_bigint());
        Some(folded == rhs)
    }

    // ----- scalar arithmetic -----

    /// Computes `(a + t) mod n`; a zero result is rejected.
    pub fn scalar_tweak_add(a: &[u8], t: &[u8]) -> Result<Vec<u8>> {
        let sum = Self::decode_scalar(a)? + Self::decode_scalar(t)?;
        if sum.is_zero() {
            return Err(Error::InvalidScalar);
        }
        Ok(Self::encode_scalar(&sum))
    }

    /// Computes `(a * t) mod n`; a zero result is rejected.
    pub fn scalar_tweak_mul(a: &[u8], t: &[u8]) -> Result<Vec<u8>> {
        let product = Self::decode_scalar(a)? * Self::decode_scalar(t)?;
        if product.is_zero() {
            return Err(Error::InvalidScalar);
        }
        Ok(Self::encode_scalar(&product))
    }

    /// Computes `(n - (a mod n)) mod n`.
    pub fn scalar_negate(a: &[u8]) -> Result<Vec<u8>> {
        let negated = -Self::decode_scalar(a)?;
        Ok(Self::encode_scalar(&negated))
    }

    /// Computes `a⁻¹ mod n`; zero is rejected.
    pub fn scalar_invert(a: &[u8]) -> Result<Vec<u8>> {
        let inverse = Self::decode_scalar(a)?
            .inverse()
            .ok_or(Error::InvalidScalar)?;
        Ok(Self::encode_scalar(&inverse))
    }

    // ----- public keys -----

    /// Derives the public key of a secret seed.
    pub fn public_key_create<R: CryptoRng + ?Sized>(
        secret: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let mut scalar = Self::private_key_convert(secret)?;
        let key = Self::public_key_from_scalar(&scalar, rng);
        scalar.zeroize();
        key
    }

    /// Computes `[a mod n]·G` with blinded multiplication.
    pub fn public_key_from_scalar<R: CryptoRng + ?Sized>(
        scalar: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let a = Self::decode_scalar(scalar)?;
        let point = Projective::<P>::generator().mul_blind(&a, rng);
        Ok(encode_point(&point.into_affine()))
    }

    /// Returns true iff `key` decodes to a valid curve point.
    #[must_use]
    pub fn public_key_verify(key: &[u8]) -> bool {
        key.len() == P::POINT_BYTES && decode_point::<P>(key).is_some()
    }

    /// Exports a public key in raw form, validating it first.
    pub fn public_key_export(key: &[u8]) -> Result<Vec<u8>> {
        if !Self::public_key_verify(key) {
            return Err(Error::InvalidPoint);
        }
        Ok(key.to_vec())
    }

    /// Imports a raw public key, validating it.
    pub fn public_key_import(bytes: &[u8]) -> Result<Vec<u8>> {
        if !Self::public_key_verify(bytes) {
            return Err(Error::InvalidPoint);
        }
        Ok(bytes.to_vec())
    }

    /// Computes `[t]·G + K`.
    pub fn public_key_tweak_add(key: &[u8], tweak: &[u8]) -> Result<Vec<u8>> {
        let point = decode_point::<P>(key).ok_or(Error::InvalidPoint)?;
        let t = Self::decode_scalar(tweak)?;
        let sum = Projective::<P>::generator().mul_bigint(t.into_bigint()) + point;
        Ok(encode_point(&sum.into_affine()))
    }

    /// Computes `[t]·K`.
    pub fn public_key_tweak_mul(key: &[u8], tweak: &[u8]) -> Result<Vec<u8>> {
        let point = decode_point::<P>(key).ok_or(Error::InvalidPoint)?;
        let t = Self::decode_scalar(tweak)?;
        Ok(encode_point(&point.mul_bigint(t.into_bigint()).into_affine()))
    }

    /// Computes `K₁ + K₂`.
    pub fn public_key_add(key1: &[u8], key2: &[u8]) -> Result<Vec<u8>> {
        let p1 = decode_point::<P>(key1).ok_or(Error::InvalidPoint)?;
        let p2 = decode_point::<P>(key2).ok_or(Error::InvalidPoint)?;
        Ok(encode_point(&(p1.into_group() + p2).into_affine()))
    }

    /// Computes `-K`.
    pub fn public_key_negate(key: &[u8]) -> Result<Vec<u8>> {
        let point = decode_point::<P>(key).ok_or(Error::InvalidPoint)?;
        Ok(encode_point(&-point))
    }

    /// Maps an Edwards public key to its Montgomery (x-only) form.
    pub fn public_key_convert(key: &[u8]) -> Result<Vec<u8>> {
        let point = decode_point::<P>(key).ok_or(Error::InvalidPoint)?;
        let u = P::to_mont_u(&point).ok_or(Error::InvalidPoint)?;
        let mut bytes = u.into_bigint().into_bytes_le();
        bytes.truncate(P::MONT_BYTES);
        Ok(bytes)
    }

    /// Maps a Montgomery (x-only) public key back to Edwards form; `x_is_odd`
    /// selects the sign of the recovered coordinate.
    pub fn public_key_deconvert(mont_key: &[u8], x_is_odd: bool) -> Result<Vec<u8>> {
        if mont_key.len() != P::MONT_BYTES {
            return Err(Error::InvalidLength);
        }
        let mut bytes = mont_key.to_vec();
        P::mask_mont_key(&mut bytes);
        let u = P::BaseField::from_le_bytes_mod_order(&bytes);
        let point = P::from_mont_u(u, x_is_odd).ok_or(Error::InvalidPoint)?;
        Ok(encode_point(&point))
    }

    // ----- key agreement -----

    /// Edwards-form Diffie-Hellman with a secret seed.
    pub fn derive<R: CryptoRng + ?Sized>(
        pub_key: &[u8],
        secret: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let mut scalar = Self::private_key_convert(secret)?;
        let shared = Self::derive_with_scalar(pub_key, &scalar, rng);
        scalar.zeroize();
        shared
    }

    /// Computes `[a mod n]·pub` in Edwards form with blinded multiplication.
    pub fn derive_with_scalar<R: CryptoRng + ?Sized>(
        pub_key: &[u8],
        scalar: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let a = Self::decode_scalar(scalar)?;
        let point = decode_point::<P>(pub_key).ok_or(Error::InvalidPoint)?;
        let shared = point.into_group().mul_blind(&a, rng);
        if shared.is_zero() {
            return Err(Error::InvalidPoint);
        }
        Ok(encode_point(&shared.into_affine()))
    }

    /// Montgomery-form Diffie-Hellman (X25519/X448) with a secret seed.
    pub fn exchange(mont_pub: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
        let mut scalar = Self::private_key_convert(secret)?;
        let shared = Self::exchange_with_scalar(mont_pub, &scalar);
        scalar.zeroize();
        shared
    }

    /// Montgomery-form Diffie-Hellman with an explicit scalar.
    ///
    /// The ladder itself takes a scalar-independent path, so no extra
    /// blinding is applied here.
    pub fn exchange_with_scalar(mont_pub: &[u8], scalar: &[u8]) -> Result<Vec<u8>> {
        if mont_pub.len() != P::MONT_BYTES {
            return Err(Error::InvalidLength);
        }
        if scalar.len() != P::SCALAR_BYTES {
            return Err(Error::InvalidLength);
        }

        let mut clamped = scalar.to_vec();
        P::clamp(&mut clamped);

        let mut u_bytes = mont_pub.to_vec();
        P::mask_mont_key(&mut u_bytes);
        let u = P::BaseField::from_le_bytes_mod_order(&u_bytes);

        let shared =
            montgomery_ladder::<P>(&clamped, P::LADDER_BITS, u).ok_or(Error::InvalidPoint)?;
        clamped.zeroize();

        let mut bytes = shared.into_bigint().into_bytes_le();
        bytes.truncate(P::MONT_BYTES);
        Ok(bytes)
    }

    // ----- key encodings -----

    /// Exports a secret seed as a DER OCTET STRING.
    pub fn private_key_export(secret: &[u8]) -> Result<Vec<u8>> {
        if secret.len() != P::POINT_BYTES {
            return Err(Error::InvalidLength);
        }
        encoding::encode_octet_string(secret)
    }

    /// Imports a secret seed from a DER OCTET STRING.
    pub fn private_key_import(der_bytes: &[u8]) -> Result<Vec<u8>> {
        let secret = encoding::decode_octet_string(der_bytes)?;
        if secret.len() != P::POINT_BYTES {
            return Err(Error::InvalidLength);
        }
        Ok(secret)
    }

    /// Exports a secret seed as a PKCS#8 `PrivateKeyInfo` document.
    pub fn private_key_export_pkcs8(secret: &[u8]) -> Result<Vec<u8>> {
        if secret.len() != P::POINT_BYTES {
            return Err(Error::InvalidLength);
        }
        encoding::encode_pkcs8(P::OID, secret)
    }

    /// Imports a secret seed from a PKCS#8 `PrivateKeyInfo` document.
    pub fn private_key_import_pkcs8(der_bytes: &[u8]) -> Result<Vec<u8>> {
        let secret = encoding::decode_pkcs8(P::OID, der_bytes)?;
        if secret.len() != P::POINT_BYTES {
            return Err(Error::InvalidLength);
        }
        Ok(secret)
    }

    /// Exports a public key as an X.509 `SubjectPublicKeyInfo` document.
    pub fn public_key_export_spki(key: &[u8]) -> Result<Vec<u8>> {
        if !Self::public_key_verify(key) {
            return Err(Error::InvalidPoint);
        }
        encoding::encode_spki(P::OID, key)
    }

    /// Imports a public key from an X.509 `SubjectPublicKeyInfo` document.
    pub fn public_key_import_spki(der_bytes: &[u8]) -> Result<Vec<u8>> {
        let key = encoding::decode_spki(P::OID, der_bytes)?;
        if !Self::public_key_verify(&key) {
            return Err(Error::InvalidPoint);
        }
        Ok(key)
    }

    /// Exports a secret seed as an OKP JWK with both `d` and `x` members.
    pub fn private_key_export_jwk<R: CryptoRng + ?Sized>(
        secret: &[u8],
        rng: &mut R,
    ) -> Result<String> {
        let public = Self::public_key_create(secret, rng)?;
        Ok(encoding::encode_jwk(P::JWK_CURVE, &public, Some(secret)))
    }

    /// Imports a secret seed from an OKP JWK.
    pub fn private_key_import_jwk(json: &str) -> Result<Vec<u8>> {
        let (_, secret) = encoding::decode_jwk(P::JWK_CURVE, json)?;
        let secret = secret.ok_or(Error::InvalidEncoding)?;
        if secret.len() != P::POINT_BYTES {
            return Err(Error::InvalidLength);
        }
        Ok(secret)
    }

    /// Exports a public key as an OKP JWK.
    pub fn public_key_export_jwk(key: &[u8]) -> Result<String> {
        if !Self::public_key_verify(key) {
            return Err(Error::InvalidPoint);
        }
        Ok(encoding::encode_jwk(P::JWK_CURVE, key, None))
    }

    /// Imports a public key from an OKP JWK.
    pub fn public_key_import_jwk(json: &str) -> Result<Vec<u8>> {
        let (key, _) = encoding::decode_jwk(P::JWK_CURVE, json)?;
        if !Self::public_key_verify(&key) {
            return Err(Error::InvalidPoint);
        }
        Ok(key)
    }
}
