// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 The pwkeygen Authors

//! Supported key types and their realm salting.

extern crate alloc;
use crate::error::Error;
use alloc::string::{String, ToString as _};
use core::{fmt, str};

/// Kind of private key to derive.
///
/// All variants are always present. Whether a variant can actually be
/// derived depends on the Cargo features enabled, see
/// [`is_supported()`](Self::is_supported).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa2048,
    Rsa4096,
    Ec256,
    Ec384,
    Ec521,
    X25519,
    Ed25519,
}

impl KeyType {
    pub const ALL: [KeyType; 7] = [
        Self::Rsa2048,
        Self::Rsa4096,
        Self::Ec256,
        Self::Ec384,
        Self::Ec521,
        Self::X25519,
        Self::Ed25519,
    ];

    /// Canonical name, as used in realm salting.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rsa2048 => "RSA2048",
            Self::Rsa4096 => "RSA4096",
            Self::Ec256 => "EC256",
            Self::Ec384 => "EC384",
            Self::Ec521 => "EC521",
            Self::X25519 => "X25519",
            Self::Ed25519 => "ED25519",
        }
    }

    /// The realm effectively used to seed the deterministic stream.
    ///
    /// Appends `-key(NAME)` to `realm` so that different key types derived
    /// under the same nominal realm never share a stream.
    pub fn salted_realm(&self, realm: &str) -> String {
        let mut salted = String::with_capacity(realm.len() + 6 + self.name().len());
        salted.push_str(realm);
        salted.push_str("-key(");
        salted.push_str(self.name());
        salted.push(')');
        salted
    }

    /// Modulus width for RSA key types.
    pub const fn rsa_modulus_nbits(&self) -> Option<usize> {
        match self {
            Self::Rsa2048 => Some(2048),
            Self::Rsa4096 => Some(4096),
            _ => None,
        }
    }

    /// Whether derivation of this key type has been compiled in.
    pub const fn is_supported(&self) -> bool {
        match self {
            Self::Rsa2048 | Self::Rsa4096 => cfg!(feature = "rsa"),
            Self::Ec256 => cfg!(feature = "ecc_nist_p256"),
            Self::Ec384 => cfg!(feature = "ecc_nist_p384"),
            Self::Ec521 => cfg!(feature = "ecc_nist_p521"),
            Self::X25519 => cfg!(feature = "x25519"),
            Self::Ed25519 => cfg!(feature = "ed25519"),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for KeyType {
    type Err = Error;

    /// Parse a canonical key type name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|kt| kt.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::UnsupportedKeyType(s.to_string()))
    }
}

#[test]
fn test_key_type_from_str() {
    use core::str::FromStr as _;

    assert_eq!(KeyType::from_str("RSA2048").unwrap(), KeyType::Rsa2048);
    assert_eq!(KeyType::from_str("rsa4096").unwrap(), KeyType::Rsa4096);
    assert_eq!(KeyType::from_str("ec521").unwrap(), KeyType::Ec521);
    assert_eq!(KeyType::from_str("Ed25519").unwrap(), KeyType::Ed25519);
    for kt in KeyType::ALL {
        assert_eq!(KeyType::from_str(kt.name()).unwrap(), kt);
    }
    assert!(matches!(
        KeyType::from_str("rsa1024"),
        Err(Error::UnsupportedKeyType(name)) if name == "rsa1024"
    ));
    assert!(KeyType::from_str("").is_err());
}

#[test]
fn test_key_type_salted_realm() {
    assert_eq!(
        KeyType::Rsa2048.salted_realm("example.com"),
        "example.com-key(RSA2048)"
    );
    assert_eq!(KeyType::Ed25519.salted_realm(""), "-key(ED25519)");

    for (i, a) in KeyType::ALL.iter().enumerate() {
        for b in KeyType::ALL[i + 1..].iter() {
            assert_ne!(a.salted_realm("r"), b.salted_realm("r"));
        }
    }
}
