//! This module contains the [edwards448] configuration ("Goldilocks") in
//! its untwisted Edwards (ed448) and Montgomery (X448) forms.
//!
//! [edwards448]: <https://www.rfc-editor.org/rfc/rfc7748>
use crate::{
    arithmetic::uint::U448,
    curve::{
        te::{Affine, MontCurveConfig, TECurveConfig},
        CurveConfig,
    },
    field::fp::{Fp448, FpParams, LIMBS_448},
    fp_from_num, from_num,
};

const G_GENERATOR_X: Fq =
        fp_from_num!("224580040295924300187604334099896036246789641632564134246125461686950415467406032909029192869357953282578032075146446173674602635247710");

const G_GENERATOR_Y: Fq =
        fp_from_num!("298819210078481492676017930443930673437544040154080242095928241372331506189835876003536878655418784733982303233503462500531545062832660");

/// Base Field for [`Ed448Config`]; `p = 2^448 - 2^224 - 1`.
pub type Fq = Fp448<Ed448FqParam>;
/// Base Field parameters for [`Ed448Config`].
pub struct Ed448FqParam;

impl FpParams<LIMBS_448> for Ed448FqParam {
    const GENERATOR: Fp448<Self> = fp_from_num!("7");
    const MODULUS: U448 = from_num!("726838724295606890549323807888004534353641360687318060281490199180612328166730772686396383698676545930088884461843637361053498018365439");
}

/// Scalar Field for [`Ed448Config`].
pub type Fr = Fp448<Ed448FrParam>;
/// Scalar Field parameters for [`Ed448Config`].
pub struct Ed448FrParam;

impl FpParams<LIMBS_448> for Ed448FrParam {
    const GENERATOR: Fp448<Self> = fp_from_num!("2");
    const MODULUS: U448 = from_num!("181709681073901722637330951972001133588410340171829515070372549795146003961539585716195755291692375963310293709091662304773755859649779");
}

/// Curve configuration shared by the ed448 and X448 forms.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Ed448Config;

impl CurveConfig for Ed448Config {
    type BaseField = Fq;
    type ScalarField = Fr;
}

impl TECurveConfig for Ed448Config {
    type MontCurveConfig = Self;

    const COEFF_A: Self::BaseField = fp_from_num!("1");
    const COEFF_D: Self::BaseField = fp_from_num!("726838724295606890549323807888004534353641360687318060281490199180612328166730772686396383698676545930088884461843637361053498018326358");
    const GENERATOR: Affine<Self> = Affine::new_unchecked(G_GENERATOR_X, G_GENERATOR_Y);
}

impl MontCurveConfig for Ed448Config {
    const COEFF_A: Self::BaseField = fp_from_num!("156326");
    const COEFF_B: Self::BaseField = fp_from_num!("1");
}
