//! Ed448 signatures and X448 key agreement.

use pkcs8::ObjectIdentifier;

use super::{EdDsa, EdwardsParams};
use crate::{
    curve::te::{instance::ed448::Ed448Config, Affine},
    field::Field,
    hash::Shake256,
};

/// The Ed448 signature engine (RFC 8032 § 5.2).
pub type Ed448 = EdDsa<Ed448Config>;

impl EdwardsParams for Ed448Config {
    type Expand = Shake256;

    const COFACTOR_LOG2: u32 = 2;
    const CONTEXT: bool = true;
    const FIELD_BYTES: usize = 56;
    const JWK_CURVE: &'static str = "Ed448";
    const LADDER_BITS: usize = 448;
    const MONT_BYTES: usize = 56;
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.113");
    const POINT_BYTES: usize = 57;
    const PREFIX: &'static [u8] = b"SigEd448";
    const SCALAR_BYTES: usize = 56;

    fn clamp(scalar: &mut [u8]) {
        scalar[0] &= 0b1111_1100;
        scalar[55] |= 0b1000_0000;
    }

    fn is_clamped(scalar: &[u8]) -> bool {
        scalar.len() == 56 && scalar[0] & 0b0000_0011 == 0 && scalar[55] & 0b1000_0000 != 0
    }

    // The 4-isogeny of RFC 7748 § 4.2: u = y² / x².
    fn to_mont_u(point: &Affine<Self>) -> Option<Self::BaseField> {
        let x2_inv = point.x.square().inverse()?;
        Some(point.y.square() * x2_inv)
    }

    // The isogeny has no pointwise inverse, so edwards448 keys cannot be
    // recovered from X448 keys.
    fn from_mont_u(_u: Self::BaseField, _x_is_odd: bool) -> Option<Affine<Self>> {
        None
    }

    fn mask_mont_key(_bytes: &mut [u8]) {}
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::eddsa::Error;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x448)
    }

    // RFC 8032 § 7.4, blank message.
    const SECRET: [u8; 57] = hex!(
        "6c82a562cb808d10d632be89c8513ebf6c929f34ddfa8c9f63c9960ef6e348a3"
        "528c8a3fcc2f044e39a3fc5b94492f8f032e7549a20098f95b"
    );
    const PUBLIC: [u8; 57] = hex!(
        "5fd7449b59b461fd2ce787ec616ad46a1da1342485a70e1f8a0ea75d80e96778"
        "edf124769b46c7061bd6783df1e50f6cd1fa1abeafe8256180"
    );
    const SIG: [u8; 114] = hex!(
        "533a37f6bbe457251f023c0d88f976ae2dfb504a843e34d2074fd823d41a591f"
        "2b233f034f628281f2fd7a22ddd47d7828c59bd0a21bfd3980ff0d2028d4b18a"
        "9df63e006c5d1c2d345b925d8dc00b4104852db99ac5c7cdda8530a113a0f4db"
        "b61149f05a7363268c71d95808ff2e652600"
    );

    #[test]
    fn rfc8032_blank_message_vector() {
        let mut rng = rng();
        let public = Ed448::public_key_create(&SECRET, &mut rng).unwrap();
        assert_eq!(public, PUBLIC);

        let sig = Ed448::sign(b"", &SECRET, None, None, &mut rng).unwrap();
        assert_eq!(sig.len(), 114);
        assert_eq!(sig, SIG);
        assert!(Ed448::verify(b"", &sig, &public, None, None));
    }

    #[test]
    fn context_is_always_bound() {
        let mut rng = rng();
        // Ed448 carries its domain prefix unconditionally, so a context
        // without a pre-hash flag is fine, and mismatches do not verify.
        let sig = Ed448::sign(b"m", &SECRET, None, Some(b"ctx"), &mut rng).unwrap();
        assert!(Ed448::verify(b"m", &sig, &PUBLIC, None, Some(b"ctx")));
        assert!(!Ed448::verify(b"m", &sig, &PUBLIC, None, Some(b"other")));
        assert!(!Ed448::verify(b"m", &sig, &PUBLIC, None, None));
    }

    #[test]
    fn sign_verify_round_trip_with_tampering() {
        let mut rng = rng();
        let secret = Ed448::private_key_generate(&mut rng);
        let public = Ed448::public_key_create(&secret, &mut rng).unwrap();
        let msg = b"the crowded synod of elephants";

        let sig = Ed448::sign(msg, &secret, None, None, &mut rng).unwrap();
        assert!(Ed448::verify(msg, &sig, &public, None, None));

        let mut bad = sig.clone();
        bad[20] ^= 4;
        assert!(!Ed448::verify(msg, &bad, &public, None, None));
        assert!(!Ed448::verify(b"other", &sig, &public, None, None));
    }

    #[test]
    fn batch_verify_agrees_with_verify() {
        let mut rng = rng();
        assert!(Ed448::batch_verify(&[], None, None, &mut rng));

        let secret = Ed448::private_key_generate(&mut rng);
        let public = Ed448::public_key_create(&secret, &mut rng).unwrap();
        let sig2 = Ed448::sign(b"two", &secret, None, None, &mut rng).unwrap();

        let ok = [
            (&b""[..], &SIG[..], &PUBLIC[..]),
            (&b"two"[..], &sig2[..], &public[..]),
        ];
        assert!(Ed448::batch_verify(&ok, None, None, &mut rng));

        let bad = [
            (&b""[..], &SIG[..], &PUBLIC[..]),
            (&b"wrong"[..], &sig2[..], &public[..]),
        ];
        assert!(!Ed448::batch_verify(&bad, None, None, &mut rng));
    }

    #[test]
    fn tweaks_commute_with_public_keys() {
        let mut rng = rng();
        let a = Ed448::scalar_generate(&mut rng);
        let t = Ed448::scalar_generate(&mut rng);

        let lhs = Ed448::public_key_from_scalar(
            &Ed448::scalar_tweak_add(&a, &t).unwrap(),
            &mut rng,
        )
        .unwrap();
        let rhs = Ed448::public_key_tweak_add(
            &Ed448::public_key_from_scalar(&a, &mut rng).unwrap(),
            &t,
        )
        .unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn x448_exchange_agrees_between_peers() {
        let mut rng = rng();
        let secret_a = Ed448::private_key_generate(&mut rng);
        let secret_b = Ed448::private_key_generate(&mut rng);

        let mont_a =
            Ed448::public_key_convert(&Ed448::public_key_create(&secret_a, &mut rng).unwrap())
                .unwrap();
        let mont_b =
            Ed448::public_key_convert(&Ed448::public_key_create(&secret_b, &mut rng).unwrap())
                .unwrap();

        let ab = Ed448::exchange(&mont_b, &secret_a).unwrap();
        let ba = Ed448::exchange(&mont_a, &secret_b).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.len(), 56);
    }

    #[test]
    fn deconvert_is_unsupported() {
        assert_eq!(
            Ed448::public_key_deconvert(&[0u8; 56], false),
            Err(Error::InvalidPoint)
        );
    }

    #[test]
    fn pkcs8_round_trip() {
        let pkcs8 = Ed448::private_key_export_pkcs8(&SECRET).unwrap();
        assert_eq!(Ed448::private_key_import_pkcs8(&pkcs8).unwrap(), SECRET);

        let spki = Ed448::public_key_export_spki(&PUBLIC).unwrap();
        assert_eq!(Ed448::public_key_import_spki(&spki).unwrap(), PUBLIC);
    }
}
