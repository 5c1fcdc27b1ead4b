//! Schnorr signatures over secp256k1, in the legacy [bip-schnorr] draft
//! flavour: the nonce is `H(key ‖ msg)`, the challenge is
//! `H(x(R) ‖ encode(A) ‖ msg)`, and `R` is canonicalised by requiring
//! `jacobi(y(R), p) = 1` instead of transmitting a parity bit.
//!
//! [bip-schnorr]: https://github.com/sipa/bips/blob/bip-schnorr/bip-schnorr.mediawiki

use alloc::vec::Vec;
use core::fmt;

use num_traits::Zero;
use rand::CryptoRng;
use sha2::{Digest, Sha256};

use crate::{
    arithmetic::BigInteger,
    curve::sw::{
        decode_compressed, encode_compressed, instance::secp256k1::Secp256k1Config, Affine,
        Projective,
    },
    field::{prime::PrimeField, Field},
};

type Fq = crate::curve::sw::instance::secp256k1::Fq;
type Fr = crate::curve::sw::instance::secp256k1::Fr;
type Repr = <Fr as PrimeField>::BigInt;

/// Byte length of the curve's field elements, scalars and message digests.
pub const SIZE: usize = 32;
/// Byte length of a compressed public key.
pub const PUBLIC_KEY_SIZE: usize = 33;
/// Byte length of a signature (`x(R) ‖ S`).
pub const SIGNATURE_SIZE: usize = 2 * SIZE;

/// Errors from Schnorr signing.
///
/// Verification never errors; every failure is reported as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The message or secret key has the wrong length.
    InvalidLength,
    /// The secret key or the derived nonce is zero or out of range.
    InvalidScalar,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidLength => "invalid length",
            Error::InvalidScalar => "invalid scalar",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result alias for Schnorr operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Hashes `parts` and reduces the digest to a scalar mod the group order.
fn hash_int(parts: &[&[u8]]) -> Fr {
    let mut hasher = Sha256::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    Fr::from_be_bytes_mod_order(&hasher.finalize())
}

/// Decodes a 32-byte big-endian scalar, rejecting zero and values at or
/// above the group order.
fn decode_scalar(bytes: &[u8]) -> Option<Fr> {
    if bytes.len() != SIZE {
        return None;
    }
    let mut le = bytes.to_vec();
    le.reverse();
    let repr = Repr::from_bytes_le(&le);
    if repr.is_zero() || repr >= <Fr as PrimeField>::MODULUS {
        return None;
    }
    Some(Fr::from_bigint(repr))
}

fn encode_scalar(scalar: &Fr) -> Vec<u8> {
    let mut bytes = scalar.into_bigint().into_bytes_le();
    bytes.reverse();
    bytes
}

fn encode_field(elem: &Fq) -> Vec<u8> {
    let mut bytes = elem.into_bigint().into_bytes_le();
    bytes.reverse();
    bytes
}

/// Decodes a 32-byte big-endian field element, rejecting values at or above
/// the field characteristic.
fn decode_field(bytes: &[u8]) -> Option<Fq> {
    if bytes.len() != SIZE {
        return None;
    }
    let mut le = bytes.to_vec();
    le.reverse();
    let repr = <Fq as PrimeField>::BigInt::from_bytes_le(&le);
    if repr >= <Fq as PrimeField>::MODULUS {
        return None;
    }
    Some(Fq::from_bigint(repr))
}

/// Computes `b⁻¹ mod n` as `b^(n-2)`; the fixed exponentiation avoids the
/// data-dependent loop of a binary GCD.
fn fermat_invert(b: &Fr) -> Fr {
    let mut exp = <Fr as PrimeField>::MODULUS;
    exp.sub_with_borrow(&Repr::from(2u64));
    b.pow(exp)
}

/// Signs a 32-byte message digest with a 32-byte secret key.
///
/// The nonce point is canonicalised by negating `k` whenever
/// `jacobi(y(R), p) ≠ 1`, and `S = (k + e·a) mod n` is assembled on blinded
/// operands with a fresh uniform `b ∈ [1, n)`.
pub fn sign<R: CryptoRng + ?Sized>(msg: &[u8], key: &[u8], rng: &mut R) -> Result<Vec<u8>> {
    if msg.len() != SIZE || key.len() != SIZE {
        return Err(Error::InvalidLength);
    }

    let mut k = hash_int(&[key, msg]);
    if k.is_zero() {
        return Err(Error::InvalidScalar);
    }

    let g = Projective::<Secp256k1Config>::generator();
    let r_point = g.mul_blind(&k, rng).into_affine();
    let (r_x, r_y) = r_point.xy().expect("nonzero multiple of the generator");
    if r_y.legendre() != 1 {
        k = -k;
    }

    let a = decode_scalar(key).ok_or(Error::InvalidScalar)?;
    let a_point: Affine<Secp256k1Config> = g.mul_blind(&a, rng).into_affine();
    let a_bytes = encode_compressed(&a_point).expect("nonzero multiple of the generator");

    let r_bytes = encode_field(&r_x);
    let e = hash_int(&[&r_bytes, &a_bytes, msg]);

    let b = Fr::random_nonzero(rng);
    let b_inv = fermat_invert(&b);
    let s = ((k * b) + (e * (b * a))) * b_inv;

    let mut sig = r_bytes;
    sig.extend_from_slice(&encode_scalar(&s));
    Ok(sig)
}

/// Verifies a signature over a 32-byte message digest against a compressed
/// public key. Never panics or errors; every failure is reported as `false`,
/// with no distinction of cause.
#[must_use]
pub fn verify(msg: &[u8], sig: &[u8], key: &[u8]) -> bool {
    verify_inner(msg, sig, key).unwrap_or(false)
}

fn verify_inner(msg: &[u8], sig: &[u8], key: &[u8]) -> Option<bool> {
    if msg.len() != SIZE || sig.len() != SIGNATURE_SIZE || key.len() != PUBLIC_KEY_SIZE {
        return Some(false);
    }

    let a_point: Affine<Secp256k1Config> = decode_compressed(key)?;
    let r_x = decode_field(&sig[..SIZE])?;

    let s_repr = {
        let mut le = sig[SIZE..].to_vec();
        le.reverse();
        Repr::from_bytes_le(&le)
    };
    if s_repr >= <Fr as PrimeField>::MODULUS {
        return Some(false);
    }
    let s = Fr::from_bigint(s_repr);

    let e = hash_int(&[&sig[..SIZE], &encode_compressed(&a_point)?, msg]);

    // R = [S]G + [-e]A
    let r_point = Projective::<Secp256k1Config>::generator()
        .mul_add(&s, &a_point.into_group(), &-e)
        .into_affine();
    let (x, y) = r_point.xy()?;

    Some(y.legendre() == 1 && x == r_x)
}

/// Verifies a batch of `(msg, sig, key)` triples by folding them into one
/// group equation with random weights.
///
/// Each `R` is reconstructed from its x coordinate by a modular square
/// root. An empty batch verifies; any structural problem reports `false`.
#[must_use]
pub fn batch_verify<R: CryptoRng + ?Sized>(
    batch: &[(&[u8], &[u8], &[u8])],
    rng: &mut R,
) -> bool {
    batch_verify_inner(batch, rng).unwrap_or(false)
}

fn batch_verify_inner<R: CryptoRng + ?Sized>(
    batch: &[(&[u8], &[u8], &[u8])],
    rng: &mut R,
) -> Option<bool> {
    let mut lhs = Fr::zero();
    let mut rhs = Projective::<Secp256k1Config>::zero();

    for (i, (msg, sig, key)) in batch.iter().enumerate() {
        if msg.len() != SIZE || sig.len() != SIGNATURE_SIZE || key.len() != PUBLIC_KEY_SIZE {
            return Some(false);
        }

        let a_point: Affine<Secp256k1Config> = decode_compressed(key)?;
        let r_x = decode_field(&sig[..SIZE])?;

        let s_repr = {
            let mut le = sig[SIZE..].to_vec();
            le.reverse();
            Repr::from_bytes_le(&le)
        };
        if s_repr >= <Fr as PrimeField>::MODULUS {
            return Some(false);
        }
        let s = Fr::from_bigint(s_repr);

        // Lift R from its x coordinate: y = sqrt(x³ + a·x + b), taking the
        // root with jacobi(y, p) = 1.
        let rhs_curve = curve_rhs(r_x);
        let mut r_y = rhs_curve.sqrt()?;
        if r_y.legendre() != 1 {
            r_y = -r_y;
        }
        if r_y.square() != rhs_curve {
            return Some(false);
        }
        let r_point = Affine::<Secp256k1Config>::new_unchecked(r_x, r_y);

        let e = hash_int(&[&sig[..SIZE], &encode_compressed(&a_point)?, msg]);

        if i == 0 {
            lhs = s;
            rhs = r_point.into_group() + a_point.mul_bigint(e.into_bigint());
        } else {
            let weight = Fr::random_nonzero(rng);
            lhs += weight * s;
            rhs += r_point
                .into_group()
                .mul_add(&weight, &a_point.into_group(), &(weight * e));
        }
    }

    let folded = Projective::<Secp256k1Config>::generator().mul_bigint(lhs.into_bigint());
    Some(folded == rhs)
}

/// Curve equation right-hand side `x³ + a·x + b` for an x coordinate.
fn curve_rhs(x: Fq) -> Fq {
    use crate::curve::sw::SWCurveConfig;
    Secp256k1Config::add_b(x.square() * x + Secp256k1Config::mul_by_a(x))
}

/// Derives the compressed public key of a 32-byte secret key.
pub fn public_key_create<R: CryptoRng + ?Sized>(key: &[u8], rng: &mut R) -> Result<Vec<u8>> {
    if key.len() != SIZE {
        return Err(Error::InvalidLength);
    }
    let a = decode_scalar(key).ok_or(Error::InvalidScalar)?;
    let point = Projective::<Secp256k1Config>::generator()
        .mul_blind(&a, rng)
        .into_affine();
    Ok(encode_compressed(&point).expect("nonzero multiple of the generator"))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5c40)
    }

    // Vectors from the legacy bip-schnorr draft.
    const SECRET_1: [u8; 32] =
        hex!("0000000000000000000000000000000000000000000000000000000000000001");
    const MSG_1: [u8; 32] =
        hex!("0000000000000000000000000000000000000000000000000000000000000000");
    const SIG_1: [u8; 64] = hex!(
        "787a848e71043d280c50470e8e1532b2dd5d20ee912a45dbdd2bd1dfbf187ef6"
        "7031a98831859dc34dffeedda86831842ccd0079e1f92af177f7f22cc1dced05"
    );

    const SECRET_2: [u8; 32] =
        hex!("b7e151628aed2a6abf7158809cf4f3c762e7160f38b4da56a784d9045190cfef");
    const MSG_2: [u8; 32] =
        hex!("243f6a8885a308d313198a2e03707344a4093822299f31d0082efa98ec4e6c89");
    const SIG_2: [u8; 64] = hex!(
        "2a298dacae57395a15d0795ddbfd1dcb564da82b0f269bc70a74f8220429ba1d"
        "1e51a22ccec35599b8f266912281f8365ffc2d035a230434a1a64dc59f7013fd"
    );

    #[test]
    fn draft_test_vector_1() {
        let mut rng = rng();
        let public = public_key_create(&SECRET_1, &mut rng).unwrap();
        let sig = sign(&MSG_1, &SECRET_1, &mut rng).unwrap();
        assert_eq!(sig, SIG_1);
        assert!(verify(&MSG_1, &sig, &public));
    }

    #[test]
    fn draft_test_vector_2() {
        let mut rng = rng();
        let public = public_key_create(&SECRET_2, &mut rng).unwrap();
        let sig = sign(&MSG_2, &SECRET_2, &mut rng).unwrap();
        assert_eq!(sig, SIG_2);
        assert!(verify(&MSG_2, &sig, &public));
    }

    #[test]
    fn rejects_tampering_and_bad_lengths() {
        let mut rng = rng();
        let public = public_key_create(&SECRET_2, &mut rng).unwrap();

        let mut bad = SIG_2;
        bad[10] ^= 1;
        assert!(!verify(&MSG_2, &bad, &public));

        let mut bad = MSG_2;
        bad[0] ^= 0x80;
        assert!(!verify(&bad, &SIG_2, &public));

        assert!(!verify(&MSG_2[..31], &SIG_2, &public));
        assert!(!verify(&MSG_2, &SIG_2[..63], &public));
        assert!(!verify(&MSG_2, &SIG_2, &public[..32]));
    }

    #[test]
    fn signing_rejects_bad_inputs() {
        let mut rng = rng();
        assert_eq!(sign(&MSG_1[..31], &SECRET_1, &mut rng), Err(Error::InvalidLength));
        assert_eq!(sign(&MSG_1, &[0u8; 32], &mut rng), Err(Error::InvalidScalar));
    }

    #[test]
    fn batch_verify_empty_single_and_mixed() {
        let mut rng = rng();
        assert!(batch_verify(&[], &mut rng));

        let pub_1 = public_key_create(&SECRET_1, &mut rng).unwrap();
        let pub_2 = public_key_create(&SECRET_2, &mut rng).unwrap();

        let single = [(&MSG_1[..], &SIG_1[..], &pub_1[..])];
        assert!(batch_verify(&single, &mut rng));

        let both = [
            (&MSG_1[..], &SIG_1[..], &pub_1[..]),
            (&MSG_2[..], &SIG_2[..], &pub_2[..]),
        ];
        assert!(batch_verify(&both, &mut rng));

        // Corrupting any entry fails the batch, as does a random blob.
        let mut blob = [0u8; 64];
        rng.fill_bytes(&mut blob);
        let tampered = [
            (&MSG_1[..], &SIG_1[..], &pub_1[..]),
            (&MSG_2[..], &blob[..], &pub_2[..]),
        ];
        assert!(!batch_verify(&tampered, &mut rng));

        let swapped = [
            (&MSG_1[..], &SIG_1[..], &pub_2[..]),
            (&MSG_2[..], &SIG_2[..], &pub_1[..]),
        ];
        assert!(!batch_verify(&swapped, &mut rng));
    }

    #[test]
    fn fresh_keys_sign_and_verify() {
        let mut rng = rng();
        for _ in 0..4 {
            let mut secret = [0u8; 32];
            rng.fill_bytes(&mut secret);
            let mut msg = [0u8; 32];
            rng.fill_bytes(&mut msg);

            let Ok(public) = public_key_create(&secret, &mut rng) else {
                continue;
            };
            let sig = sign(&msg, &secret, &mut rng).unwrap();
            assert!(verify(&msg, &sig, &public));
        }
    }
}
