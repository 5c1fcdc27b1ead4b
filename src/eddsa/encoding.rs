//! Key encodings: raw DER OCTET STRINGs, PKCS#8 `PrivateKeyInfo`,
//! X.509 `SubjectPublicKeyInfo` and OKP JWKs ([RFC 8410]).
//!
//! [RFC 8410]: https://www.rfc-editor.org/rfc/rfc8410

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use der::{
    asn1::{AnyRef, BitStringRef, OctetStringRef},
    Decode, Encode,
};
use pkcs8::{AlgorithmIdentifierRef, ObjectIdentifier, PrivateKeyInfo};
use serde::{Deserialize, Serialize};
use spki::SubjectPublicKeyInfoRef;

use super::{Error, Result};

fn algorithm(oid: ObjectIdentifier) -> AlgorithmIdentifierRef<'static> {
    AlgorithmIdentifierRef { oid, parameters: Some(AnyRef::NULL) }
}

pub(super) fn encode_octet_string(data: &[u8]) -> Result<Vec<u8>> {
    OctetStringRef::new(data)
        .and_then(|octets| octets.to_der())
        .map_err(|_| Error::InvalidEncoding)
}

pub(super) fn decode_octet_string(der_bytes: &[u8]) -> Result<Vec<u8>> {
    OctetStringRef::from_der(der_bytes)
        .map(|octets| octets.as_bytes().to_vec())
        .map_err(|_| Error::InvalidEncoding)
}

pub(super) fn encode_pkcs8(oid: ObjectIdentifier, secret: &[u8]) -> Result<Vec<u8>> {
    let inner = encode_octet_string(secret)?;
    PrivateKeyInfo::new(algorithm(oid), &inner)
        .to_der()
        .map_err(|_| Error::InvalidEncoding)
}

pub(super) fn decode_pkcs8(oid: ObjectIdentifier, der_bytes: &[u8]) -> Result<Vec<u8>> {
    let info = PrivateKeyInfo::try_from(der_bytes).map_err(|_| Error::InvalidEncoding)?;
    if info.algorithm.oid != oid {
        return Err(Error::InvalidEncoding);
    }
    decode_octet_string(info.private_key)
}

pub(super) fn encode_spki(oid: ObjectIdentifier, key: &[u8]) -> Result<Vec<u8>> {
    let spki = SubjectPublicKeyInfoRef {
        algorithm: algorithm(oid),
        subject_public_key: BitStringRef::from_bytes(key).map_err(|_| Error::InvalidEncoding)?,
    };
    spki.to_der().map_err(|_| Error::InvalidEncoding)
}

pub(super) fn decode_spki(oid: ObjectIdentifier, der_bytes: &[u8]) -> Result<Vec<u8>> {
    let spki =
        SubjectPublicKeyInfoRef::try_from(der_bytes).map_err(|_| Error::InvalidEncoding)?;
    if spki.algorithm.oid != oid {
        return Err(Error::InvalidEncoding);
    }
    spki.subject_public_key
        .as_bytes()
        .map(<[u8]>::to_vec)
        .ok_or(Error::InvalidEncoding)
}

/// JSON Web Key of the "OKP" (octet key pair) type.
#[derive(Serialize, Deserialize)]
struct OkpJwk {
    kty: String,
    crv: String,
    x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    d: Option<String>,
}

pub(super) fn encode_jwk(curve: &str, public: &[u8], secret: Option<&[u8]>) -> String {
    let jwk = OkpJwk {
        kty: "OKP".to_string(),
        crv: curve.to_string(),
        x: URL_SAFE_NO_PAD.encode(public),
        d: secret.map(|secret| URL_SAFE_NO_PAD.encode(secret)),
    };
    serde_json::to_string(&jwk).expect("jwk serialization is infallible")
}

/// Returns the `(public, secret)` members of an OKP JWK for `curve`.
pub(super) fn decode_jwk(curve: &str, json: &str) -> Result<(Vec<u8>, Option<Vec<u8>>)> {
    let jwk: OkpJwk = serde_json::from_str(json).map_err(|_| Error::InvalidEncoding)?;
    if jwk.kty != "OKP" || jwk.crv != curve {
        return Err(Error::InvalidEncoding);
    }

    let public = URL_SAFE_NO_PAD.decode(&jwk.x).map_err(|_| Error::InvalidEncoding)?;
    let secret = match &jwk.d {
        Some(d) => Some(URL_SAFE_NO_PAD.decode(d).map_err(|_| Error::InvalidEncoding)?),
        None => None,
    };
    Ok((public, secret))
}
