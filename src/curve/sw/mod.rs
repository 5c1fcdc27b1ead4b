//! Short Weierstrass curves.
//!
//! Schnorr signing runs on this shape. Next to the point types, the module
//! carries the [SEC1] compressed point codec the signature wire format
//! needs.
//!
//! [SEC1]: https://www.secg.org/sec1-v2.pdf

use alloc::vec::Vec;

use num_traits::Zero;

mod affine;
pub use affine::*;

mod projective;
pub use projective::*;

pub mod instance;

use crate::{
    arithmetic::BigInteger,
    field::{group::AdditiveGroup, prime::PrimeField, Field},
};

/// Constants of a curve in short Weierstrass form, `y² = x³ + a·x + b`.
pub trait SWCurveConfig: super::CurveConfig {
    /// The equation's `a` coefficient.
    const COEFF_A: Self::BaseField;
    /// The equation's `b` coefficient.
    const COEFF_B: Self::BaseField;
    /// Generator of the main subgroup.
    const GENERATOR: Affine<Self>;

    /// Multiplies an element by [`Self::COEFF_A`], skipping the
    /// multiplication entirely for the common `a = 0` case.
    #[inline(always)]
    fn mul_by_a(elem: Self::BaseField) -> Self::BaseField {
        if Self::COEFF_A.is_zero() {
            Self::BaseField::ZERO
        } else {
            elem * Self::COEFF_A
        }
    }

    /// Adds [`Self::COEFF_B`] to an element, free when `b` is zero.
    #[inline(always)]
    fn add_b(elem: Self::BaseField) -> Self::BaseField {
        if Self::COEFF_B.is_zero() {
            elem
        } else {
            elem + Self::COEFF_B
        }
    }
}

/// Encodes a point in [SEC1] compressed form: an `0x02`/`0x03` parity prefix
/// followed by the big-endian x coordinate.
///
/// Returns `None` for the point at infinity, which has no compressed
/// encoding.
///
/// [SEC1]: https://www.secg.org/sec1-v2.pdf
pub fn encode_compressed<P: SWCurveConfig>(point: &Affine<P>) -> Option<Vec<u8>>
where
    P::BaseField: PrimeField,
{
    let (x, y) = point.xy()?;

    let mut bytes = x.into_bigint().into_bytes_le();
    bytes.reverse();
    bytes.insert(0, 2 | u8::from(y.into_bigint().is_odd()));
    Some(bytes)
}

/// Decodes a [SEC1] compressed point, solving the curve equation for `y`
/// with the parity the prefix byte selects.
///
/// Returns `None` for malformed input, a non-canonical x coordinate, or an
/// x that is not on the curve.
///
/// [SEC1]: https://www.secg.org/sec1-v2.pdf
pub fn decode_compressed<P: SWCurveConfig>(bytes: &[u8]) -> Option<Affine<P>>
where
    P::BaseField: PrimeField,
{
    if bytes.len() != 1 + <<P::BaseField as PrimeField>::BigInt as BigInteger>::BYTES {
        return None;
    }
    let y_is_odd = match bytes[0] {
        2 => false,
        3 => true,
        _ => return None,
    };

    let mut le = bytes[1..].to_vec();
    le.reverse();
    let repr = <<P::BaseField as PrimeField>::BigInt as BigInteger>::from_bytes_le(&le);
    if repr >= <P::BaseField as PrimeField>::MODULUS {
        return None;
    }

    let x = P::BaseField::from_bigint(repr);
    let rhs = P::add_b(x.square() * x + P::mul_by_a(x));
    let mut y = rhs.sqrt()?;
    if y.into_bigint().is_odd() != y_is_odd {
        y = -y;
    }

    Some(Affine::new_unchecked(x, y))
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;

    use super::{instance::secp256k1::Secp256k1Config, *};
    use crate::{curve::CurveConfig, fp_from_hex};

    type Affine = super::Affine<Secp256k1Config>;
    type Projective = super::Projective<Secp256k1Config>;

    #[test]
    fn scalar_mul() {
        assert!(Affine::generator().mul_bigint(0u32).into_affine().infinity);

        let result: Vec<_> = (1u32..10)
            .map(|k| Affine::generator().mul_bigint(k).into_affine())
            .collect();

        let expected =
            [
                (fp_from_hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"), fp_from_hex!("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8")),
                (fp_from_hex!("C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5"), fp_from_hex!("1AE168FEA63DC339A3C58419466CEAEEF7F632653266D0E1236431A950CFE52A")),
                (fp_from_hex!("F9308A019258C31049344F85F89D5229B531C845836F99B08601F113BCE036F9"), fp_from_hex!("388F7B0F632DE8140FE337E62A37F3566500A99934C2231B6CB9FD7584B8E672")),
                (fp_from_hex!("E493DBF1C10D80F3581E4904930B1404CC6C13900EE0758474FA94ABE8C4CD13"), fp_from_hex!("51ED993EA0D455B75642E2098EA51448D967AE33BFBDFE40CFE97BDC47739922")),
                (fp_from_hex!("2F8BDE4D1A07209355B4A7250A5C5128E88B84BDDC619AB7CBA8D569B240EFE4"), fp_from_hex!("D8AC222636E5E3D6D4DBA9DDA6C9C426F788271BAB0D6840DCA87D3AA6AC62D6")),
                (fp_from_hex!("FFF97BD5755EEEA420453A14355235D382F6472F8568A18B2F057A1460297556"), fp_from_hex!("AE12777AACFBB620F3BE96017F45C560DE80F0F6518FE4A03C870C36B075F297")),
                (fp_from_hex!("5CBDF0646E5DB4EAA398F365F2EA7A0E3D419B7E0330E39CE92BDDEDCAC4F9BC"), fp_from_hex!("6AEBCA40BA255960A3178D6D861A54DBA813D0B813FDE7B5A5082628087264DA")),
                (fp_from_hex!("2F01E5E15CCA351DAFF3843FB70F3C2F0A1BDD05E5AF888A67784EF3E10A2A01"), fp_from_hex!("5C4DA8A741539949293D082A132D13B4C2E213D6BA5B7617B5DA2CB76CBDE904")),
                (fp_from_hex!("ACD484E2F0C7F65309AD178A9F559ABDE09796974C57E714C35F110DFC27CCBE"), fp_from_hex!("CC338921B0A7D9FD64380971763B61E9ADD888A4375F8E0F05CC262AC64F9C37")),
            ];

        for (result, (expected_x, expected_y)) in result.iter().zip(expected) {
            assert!(result.is_on_curve());
            assert_eq!(result.x, expected_x);
            assert_eq!(result.y, expected_y);
        }
    }

    #[test]
    fn point_add() {
        let g = Affine::generator();
        let g_proj: Projective = g.into();

        // Test G + G = 2G
        let expected_g2 = Affine::new_unchecked(
            fp_from_hex!("C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5"),
            fp_from_hex!("1AE168FEA63DC339A3C58419466CEAEEF7F632653266D0E1236431A950CFE52A"),
        );
        let g2 = g_proj + g;
        assert_eq!(g2.into_affine(), expected_g2);
        assert_eq!(g_proj.double().into_affine(), expected_g2);

        // Test G + (-G) = 0
        let neg_g = -g_proj;
        let zero = g_proj + neg_g;
        assert!(zero.is_zero());
    }

    #[test]
    fn point_sub() {
        let g = Affine::generator();
        let g_proj: Projective = g.into();

        // Test G - G = 0
        let zero = g_proj - g_proj;
        assert!(zero.is_zero());

        // Test 2G - G = G
        let g2: Projective = Affine::new_unchecked(
                fp_from_hex!("C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5"),
                fp_from_hex!("1AE168FEA63DC339A3C58419466CEAEEF7F632653266D0E1236431A950CFE52A"),
            ).into();
        assert_eq!(g2 - g_proj, g_proj);
    }

    #[test]
    fn mul_add_matches_separate_multiplications() {
        use rand::SeedableRng;

        use crate::field::prime::PrimeField;

        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let g: Projective = Affine::generator().into();
        let q = g.double() + g;

        for _ in 0..8 {
            let a = <Secp256k1Config as CurveConfig>::ScalarField::random(&mut rng);
            let b = <Secp256k1Config as CurveConfig>::ScalarField::random(&mut rng);
            let fused = g.mul_add(&a, &q, &b);
            let split = g * a + q * b;
            assert_eq!(fused, split);
        }
    }

    #[test]
    fn compressed_round_trip() {
        let points = [
            Affine::generator(),
            Affine::generator().mul_bigint(7u32).into_affine(),
            (-Affine::generator().mul_bigint(12u32)).into_affine(),
        ];
        for point in points {
            let encoded = encode_compressed(&point).expect("finite point");
            assert_eq!(encoded.len(), 33);
            let decoded: Affine = decode_compressed(&encoded).expect("valid encoding");
            assert_eq!(decoded, point);
        }

        // Infinity has no compressed form.
        assert!(encode_compressed::<Secp256k1Config>(&Affine::identity()).is_none());

        // Bad prefix and bad length are rejected.
        let mut encoded = encode_compressed(&Affine::generator()).unwrap();
        encoded[0] = 4;
        assert!(decode_compressed::<Secp256k1Config>(&encoded).is_none());
        assert!(decode_compressed::<Secp256k1Config>(&encoded[1..]).is_none());
    }
}
