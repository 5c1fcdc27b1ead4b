//! Ed25519 signatures and X25519 key agreement.

use pkcs8::ObjectIdentifier;

use super::{point_from_y, EdDsa, EdwardsParams};
use crate::{
    curve::te::{instance::ed25519::Ed25519Config, Affine},
    field::Field,
    hash::Sha512,
};

/// The Ed25519 signature engine (RFC 8032 § 5.1).
pub type Ed25519 = EdDsa<Ed25519Config>;

impl EdwardsParams for Ed25519Config {
    type Expand = Sha512;

    const COFACTOR_LOG2: u32 = 3;
    const CONTEXT: bool = false;
    const FIELD_BYTES: usize = 32;
    const JWK_CURVE: &'static str = "Ed25519";
    const LADDER_BITS: usize = 255;
    const MONT_BYTES: usize = 32;
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
    const POINT_BYTES: usize = 32;
    const PREFIX: &'static [u8] = b"SigEd25519 no Ed25519 collisions";
    const SCALAR_BYTES: usize = 32;

    fn clamp(scalar: &mut [u8]) {
        scalar[0] &= 0b1111_1000;
        scalar[31] &= 0b0111_1111;
        scalar[31] |= 0b0100_0000;
    }

    fn is_clamped(scalar: &[u8]) -> bool {
        scalar.len() == 32
            && scalar[0] & 0b0000_0111 == 0
            && scalar[31] & 0b1000_0000 == 0
            && scalar[31] & 0b0100_0000 != 0
    }

    // u = (1 + y) / (1 - y)
    fn to_mont_u(point: &Affine<Self>) -> Option<Self::BaseField> {
        let one = Self::BaseField::ONE;
        let denom = (one - point.y).inverse()?;
        Some((one + point.y) * denom)
    }

    // y = (u - 1) / (u + 1), then solve the curve equation for x.
    fn from_mont_u(u: Self::BaseField, x_is_odd: bool) -> Option<Affine<Self>> {
        let one = Self::BaseField::ONE;
        let denom = (u + one).inverse()?;
        let y = (u - one) * denom;
        point_from_y(y, x_is_odd)
    }

    fn mask_mont_key(bytes: &mut [u8]) {
        bytes[31] &= 0b0111_1111;
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        arithmetic::{uint::U256, BigInteger},
        field::prime::PrimeField,
    };

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    // RFC 8032 § 7.1, test 1.
    const SECRET_1: [u8; 32] =
        hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    const PUBLIC_1: [u8; 32] =
        hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
    const SIG_1: [u8; 64] = hex!(
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
        "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
    );

    // RFC 8032 § 7.1, test 3.
    const SECRET_3: [u8; 32] =
        hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7");
    const PUBLIC_3: [u8; 32] =
        hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025");
    const MSG_3: [u8; 2] = hex!("af82");
    const SIG_3: [u8; 64] = hex!(
        "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac"
        "18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
    );

    #[test]
    fn rfc8032_test_vector_1() {
        let mut rng = rng();
        let public = Ed25519::public_key_create(&SECRET_1, &mut rng).unwrap();
        assert_eq!(public, PUBLIC_1);

        let sig = Ed25519::sign(b"", &SECRET_1, None, None, &mut rng).unwrap();
        assert_eq!(sig, SIG_1);
        assert!(Ed25519::verify(b"", &sig, &public, None, None));
    }

    #[test]
    fn rfc8032_test_vector_3() {
        let mut rng = rng();
        let public = Ed25519::public_key_create(&SECRET_3, &mut rng).unwrap();
        assert_eq!(public, PUBLIC_3);

        let sig = Ed25519::sign(&MSG_3, &SECRET_3, None, None, &mut rng).unwrap();
        assert_eq!(sig, SIG_3);
        assert!(Ed25519::verify(&MSG_3, &sig, &public, None, None));
    }

    #[test]
    fn rejects_high_s_malleation() {
        // Replace S with S + n; the length does not change, but the range
        // check must fire.
        let mut sig = SIG_1;
        let order = <crate::curve::te::instance::ed25519::Fr as PrimeField>::MODULUS;
        let mut s = U256::from_bytes_le(&sig[32..]);
        assert!(!s.add_with_carry(&order));
        sig[32..].copy_from_slice(&s.into_bytes_le());

        assert!(!Ed25519::verify(b"", &sig, &PUBLIC_1, None, None));
    }

    #[test]
    fn rejects_any_single_bit_flip() {
        let mut rng = rng();
        let msg = b"bit flip resistance";
        let sig = Ed25519::sign(msg, &SECRET_1, None, None, &mut rng).unwrap();

        for byte in 0..sig.len() {
            let mut bad = sig.clone();
            bad[byte] ^= 1 << (byte % 8);
            assert!(!Ed25519::verify(msg, &bad, &PUBLIC_1, None, None));
        }

        let mut bad_msg = msg.to_vec();
        bad_msg[0] ^= 1;
        assert!(!Ed25519::verify(&bad_msg, &sig, &PUBLIC_1, None, None));

        let mut bad_key = PUBLIC_1;
        bad_key[3] ^= 0x10;
        assert!(!Ed25519::verify(msg, &sig, &bad_key, None, None));
    }

    #[test]
    fn wrong_lengths_verify_false_without_panicking() {
        assert!(!Ed25519::verify(b"m", &SIG_1[..63], &PUBLIC_1, None, None));
        assert!(!Ed25519::verify(b"m", &SIG_1, &PUBLIC_1[..31], None, None));
        assert!(!Ed25519::verify(b"m", &[], &[], None, None));
    }

    #[test]
    fn context_requires_prehash_flag() {
        let mut rng = rng();
        // Plain Ed25519 has no built-in domain prefix, so a bare context is
        // a caller bug.
        assert_eq!(
            Ed25519::sign(b"m", &SECRET_1, None, Some(b"ctx"), &mut rng),
            Err(crate::eddsa::Error::ContextRequiresPrehash)
        );
        assert!(!Ed25519::verify(b"m", &SIG_1, &PUBLIC_1, None, Some(b"ctx")));

        // With a pre-hash flag the context is hashed in, and mismatching
        // contexts no longer verify.
        let sig = Ed25519::sign(b"m", &SECRET_1, Some(false), Some(b"ctx"), &mut rng).unwrap();
        assert!(Ed25519::verify(b"m", &sig, &PUBLIC_1, Some(false), Some(b"ctx")));
        assert!(!Ed25519::verify(b"m", &sig, &PUBLIC_1, Some(false), Some(b"other")));
        assert!(!Ed25519::verify(b"m", &sig, &PUBLIC_1, None, None));
    }

    #[test]
    fn tweak_add_commutes_with_public_key() {
        let mut rng = rng();
        for _ in 0..4 {
            let a = Ed25519::scalar_generate(&mut rng);
            let t = Ed25519::scalar_generate(&mut rng);

            let tweaked_scalar = Ed25519::scalar_tweak_add(&a, &t).unwrap();
            let lhs = Ed25519::public_key_from_scalar(&tweaked_scalar, &mut rng).unwrap();

            let public = Ed25519::public_key_from_scalar(&a, &mut rng).unwrap();
            let rhs = Ed25519::public_key_tweak_add(&public, &t).unwrap();

            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn tweak_mul_commutes_with_public_key() {
        let mut rng = rng();
        for _ in 0..4 {
            let a = Ed25519::scalar_generate(&mut rng);
            let t = Ed25519::scalar_generate(&mut rng);

            let tweaked_scalar = Ed25519::scalar_tweak_mul(&a, &t).unwrap();
            let lhs = Ed25519::public_key_from_scalar(&tweaked_scalar, &mut rng).unwrap();

            let public = Ed25519::public_key_from_scalar(&a, &mut rng).unwrap();
            let rhs = Ed25519::public_key_tweak_mul(&public, &t).unwrap();

            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn tweaked_signatures_verify_under_tweaked_keys() {
        let mut rng = rng();
        let msg = b"tweaked";
        let tweak = Ed25519::scalar_generate(&mut rng);

        let scalar = Ed25519::private_key_convert(&SECRET_1).unwrap();
        let public = Ed25519::public_key_create(&SECRET_1, &mut rng).unwrap();

        let sig = Ed25519::sign_tweak_add(msg, &SECRET_1, &tweak, None, None, &mut rng).unwrap();
        let tweaked_pub = Ed25519::public_key_tweak_add(&public, &tweak).unwrap();
        assert!(Ed25519::verify(msg, &sig, &tweaked_pub, None, None));
        assert!(!Ed25519::verify(msg, &sig, &public, None, None));

        let sig = Ed25519::sign_tweak_mul(msg, &SECRET_1, &tweak, None, None, &mut rng).unwrap();
        let tweaked_scalar = Ed25519::scalar_tweak_mul(&scalar, &tweak).unwrap();
        let tweaked_pub = Ed25519::public_key_from_scalar(&tweaked_scalar, &mut rng).unwrap();
        assert!(Ed25519::verify(msg, &sig, &tweaked_pub, None, None));
    }

    #[test]
    fn scalar_negate_and_invert_are_involutions() {
        let mut rng = rng();
        let a = Ed25519::scalar_generate(&mut rng);

        let round_trip = Ed25519::scalar_negate(&Ed25519::scalar_negate(&a).unwrap()).unwrap();
        assert_eq!(round_trip, a);

        let round_trip = Ed25519::scalar_invert(&Ed25519::scalar_invert(&a).unwrap()).unwrap();
        assert_eq!(round_trip, a);

        assert!(Ed25519::scalar_invert(&[0u8; 32]).is_err());
    }

    #[test]
    fn public_key_add_and_negate_cancel() {
        let mut rng = rng();
        let a = Ed25519::public_key_create(&SECRET_1, &mut rng).unwrap();
        let b = Ed25519::public_key_create(&SECRET_3, &mut rng).unwrap();

        let sum = Ed25519::public_key_add(&a, &b).unwrap();
        let recovered =
            Ed25519::public_key_add(&sum, &Ed25519::public_key_negate(&b).unwrap()).unwrap();
        assert_eq!(recovered, a);
    }

    #[test]
    fn convert_then_deconvert_round_trips() {
        let mut rng = rng();
        let key = Ed25519::public_key_create(&SECRET_3, &mut rng).unwrap();

        let mont = Ed25519::public_key_convert(&key).unwrap();
        let x_is_odd = key[31] & 0x80 != 0;
        let back = Ed25519::public_key_deconvert(&mont, x_is_odd).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn rfc7748_x25519_test_vector() {
        let scalar =
            hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
        let u_coord =
            hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
        let expected =
            hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");

        let shared = Ed25519::exchange_with_scalar(&u_coord, &scalar).unwrap();
        assert_eq!(shared, expected);
    }

    #[test]
    fn derive_and_exchange_agree_between_peers() {
        let mut rng = rng();
        let (secret_a, secret_b) = (SECRET_1, SECRET_3);
        let pub_a = Ed25519::public_key_create(&secret_a, &mut rng).unwrap();
        let pub_b = Ed25519::public_key_create(&secret_b, &mut rng).unwrap();

        // Edwards-form agreement.
        let ab = Ed25519::derive(&pub_b, &secret_a, &mut rng).unwrap();
        let ba = Ed25519::derive(&pub_a, &secret_b, &mut rng).unwrap();
        assert_eq!(ab, ba);

        // Montgomery-form agreement over the converted keys.
        let mont_a = Ed25519::public_key_convert(&pub_a).unwrap();
        let mont_b = Ed25519::public_key_convert(&pub_b).unwrap();
        let ab = Ed25519::exchange(&mont_b, &secret_a).unwrap();
        let ba = Ed25519::exchange(&mont_a, &secret_b).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn batch_verify_empty_and_single() {
        let mut rng = rng();
        assert!(Ed25519::batch_verify(&[], None, None, &mut rng));

        let entry: (&[u8], &[u8], &[u8]) = (b"", &SIG_1, &PUBLIC_1);
        assert!(Ed25519::batch_verify(&[entry], None, None, &mut rng));

        // A single-entry batch agrees with plain verification on a bad
        // signature as well.
        let bad: (&[u8], &[u8], &[u8]) = (b"x", &SIG_1, &PUBLIC_1);
        assert!(!Ed25519::verify(b"x", &SIG_1, &PUBLIC_1, None, None));
        assert!(!Ed25519::batch_verify(&[bad], None, None, &mut rng));
    }

    #[test]
    fn batch_verify_mixed_batches() {
        let mut rng = rng();
        let ok = [
            (&b""[..], &SIG_1[..], &PUBLIC_1[..]),
            (&MSG_3[..], &SIG_3[..], &PUBLIC_3[..]),
        ];
        assert!(Ed25519::batch_verify(&ok, None, None, &mut rng));

        // Replacing one entry with random bytes must fail the whole batch.
        let mut blob = [0u8; 64];
        rand::RngCore::fill_bytes(&mut rng, &mut blob);
        let tampered = [
            (&b""[..], &SIG_1[..], &PUBLIC_1[..]),
            (&MSG_3[..], &blob[..], &PUBLIC_3[..]),
        ];
        assert!(!Ed25519::batch_verify(&tampered, None, None, &mut rng));

        // Structural problems never raise; they report false.
        let short = [(&b""[..], &SIG_1[..40], &PUBLIC_1[..])];
        assert!(!Ed25519::batch_verify(&short, None, None, &mut rng));
    }

    #[test]
    fn der_and_pkcs8_round_trips() {
        let exported = Ed25519::private_key_export(&SECRET_1).unwrap();
        assert_eq!(Ed25519::private_key_import(&exported).unwrap(), SECRET_1);

        let pkcs8 = Ed25519::private_key_export_pkcs8(&SECRET_1).unwrap();
        assert_eq!(Ed25519::private_key_import_pkcs8(&pkcs8).unwrap(), SECRET_1);

        let spki = Ed25519::public_key_export_spki(&PUBLIC_1).unwrap();
        assert_eq!(Ed25519::public_key_import_spki(&spki).unwrap(), PUBLIC_1);

        // Mangled documents are rejected rather than misread.
        assert!(Ed25519::private_key_import_pkcs8(&pkcs8[..pkcs8.len() - 1]).is_err());
        assert!(Ed25519::public_key_import_spki(&exported).is_err());
    }

    #[test]
    fn jwk_round_trips() {
        let mut rng = rng();
        let jwk = Ed25519::private_key_export_jwk(&SECRET_1, &mut rng).unwrap();
        assert_eq!(Ed25519::private_key_import_jwk(&jwk).unwrap(), SECRET_1);
        assert_eq!(Ed25519::public_key_import_jwk(&jwk).unwrap(), PUBLIC_1);

        let jwk = Ed25519::public_key_export_jwk(&PUBLIC_1).unwrap();
        assert_eq!(Ed25519::public_key_import_jwk(&jwk).unwrap(), PUBLIC_1);
        assert!(Ed25519::private_key_import_jwk(&jwk).is_err());

        assert!(Ed25519::public_key_import_jwk("{\"kty\":\"EC\"}").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn sign_verify_round_trip(secret: [u8; 32], msg: Vec<u8>) {
            let mut rng = rng();
            let public = Ed25519::public_key_create(&secret, &mut rng).unwrap();
            let sig = Ed25519::sign(&msg, &secret, None, None, &mut rng).unwrap();

            prop_assert!(Ed25519::verify(&msg, &sig, &public, None, None));

            let mut tampered = msg.clone();
            tampered.push(0x55);
            prop_assert!(!Ed25519::verify(&tampered, &sig, &public, None, None));
        }

        #[test]
        fn scalar_clamp_is_idempotent(scalar: [u8; 32]) {
            let once = Ed25519::scalar_clamp(&scalar).unwrap();
            let twice = Ed25519::scalar_clamp(&once).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert!(Ed25519Config::is_clamped(&once));
        }
    }
}
