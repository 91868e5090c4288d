// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

use crate::key_type::KeyType;
use der::asn1::ObjectIdentifier;
use hex_literal::hex;

/// Supported short Weierstrass curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EccCurve {
    #[cfg(feature = "ecc_nist_p256")]
    NistP256,
    #[cfg(feature = "ecc_nist_p384")]
    NistP384,
    #[cfg(feature = "ecc_nist_p521")]
    NistP521,
}

impl EccCurve {
    pub const ALL: &'static [EccCurve] = &[
        #[cfg(feature = "ecc_nist_p256")]
        Self::NistP256,
        #[cfg(feature = "ecc_nist_p384")]
        Self::NistP384,
        #[cfg(feature = "ecc_nist_p521")]
        Self::NistP521,
    ];

    /// Bit width of the curve's prime field.
    pub const fn nbits(&self) -> usize {
        match *self {
            #[cfg(feature = "ecc_nist_p256")]
            Self::NistP256 => 256,
            #[cfg(feature = "ecc_nist_p384")]
            Self::NistP384 => 384,
            #[cfg(feature = "ecc_nist_p521")]
            Self::NistP521 => 521,
        }
    }

    /// Length of a field element or scalar in bytes.
    pub const fn field_len(&self) -> usize {
        self.nbits().div_ceil(8)
    }

    /// The order of the generator subgroup, big-endian, [`field_len()`](Self::field_len) bytes.
    pub const fn order(&self) -> &'static [u8] {
        match *self {
            #[cfg(feature = "ecc_nist_p256")]
            Self::NistP256 => &NIST_P256_N,
            #[cfg(feature = "ecc_nist_p384")]
            Self::NistP384 => &NIST_P384_N,
            #[cfg(feature = "ecc_nist_p521")]
            Self::NistP521 => &NIST_P521_N,
        }
    }

    /// The named curve OID, as found in SEC1 encoded keys.
    pub const fn oid(&self) -> ObjectIdentifier {
        match *self {
            #[cfg(feature = "ecc_nist_p256")]
            Self::NistP256 => NIST_P256_OID,
            #[cfg(feature = "ecc_nist_p384")]
            Self::NistP384 => NIST_P384_OID,
            #[cfg(feature = "ecc_nist_p521")]
            Self::NistP521 => NIST_P521_OID,
        }
    }

    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        Self::ALL.iter().copied().find(|curve| curve.oid() == *oid)
    }

    pub const fn key_type(&self) -> KeyType {
        match *self {
            #[cfg(feature = "ecc_nist_p256")]
            Self::NistP256 => KeyType::Ec256,
            #[cfg(feature = "ecc_nist_p384")]
            Self::NistP384 => KeyType::Ec384,
            #[cfg(feature = "ecc_nist_p521")]
            Self::NistP521 => KeyType::Ec521,
        }
    }

    pub const fn from_key_type(key_type: KeyType) -> Option<Self> {
        match key_type {
            #[cfg(feature = "ecc_nist_p256")]
            KeyType::Ec256 => Some(Self::NistP256),
            #[cfg(feature = "ecc_nist_p384")]
            KeyType::Ec384 => Some(Self::NistP384),
            #[cfg(feature = "ecc_nist_p521")]
            KeyType::Ec521 => Some(Self::NistP521),
            _ => None,
        }
    }
}

#[cfg(feature = "ecc_nist_p256")]
const NIST_P256_N: [u8; 32] =
    hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
#[cfg(feature = "ecc_nist_p256")]
const NIST_P256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

#[cfg(feature = "ecc_nist_p384")]
const NIST_P384_N: [u8; 48] = hex!(
    "ffffffffffffffffffffffffffffffffffffffffffffffff"
    "c7634d81f4372ddf581a0db248b0a77aecec196accc52973"
);
#[cfg(feature = "ecc_nist_p384")]
const NIST_P384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

#[cfg(feature = "ecc_nist_p521")]
const NIST_P521_N: [u8; 66] = hex!(
    "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    "fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138"
    "6409"
);
#[cfg(feature = "ecc_nist_p521")]
const NIST_P521_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

#[test]
fn test_curve_parameters() {
    for curve in EccCurve::ALL.iter().copied() {
        assert_eq!(curve.order().len(), curve.field_len());
        assert_eq!(EccCurve::from_oid(&curve.oid()), Some(curve));
        assert_eq!(EccCurve::from_key_type(curve.key_type()), Some(curve));
    }

    assert_eq!(EccCurve::from_key_type(KeyType::Rsa2048), None);
    assert_eq!(
        EccCurve::from_oid(&ObjectIdentifier::new_unwrap("1.3.101.112")),
        None
    );
}
