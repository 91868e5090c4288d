// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 The pwkeygen Authors

//! Deterministic random byte stream seeded from a password and a realm.

use super::{IncidentalReadRng, RngCore, RngGenerateError};
use crate::crypto::{kdf, symcipher};
use crate::error::Error;
use cipher::{generic_array::GenericArray, Block, KeyInit as _};

/// Deterministic random byte stream.
///
/// The stream is the AES-256-CTR keystream, counting up from an all-zero
/// counter block, under the PBKDF2-HMAC-SHA256 derivation of the password
/// salted with the realm. Identical seed material always reproduces the
/// identical, unbounded stream. Reads of any size may be mixed freely, the
/// concatenated output is the same.
///
/// Incidental reads are not treated specially: they are served from the
/// stream just like algorithmic ones. Wrap the `Drng` in a
/// [`CompatShim`](super::compat_shim::CompatShim) to neutralize them.
pub struct Drng {
    keystream: symcipher::CtrKeystream<aes::Aes256>,
}

impl Drng {
    /// Instantiate the stream for `password` and `realm`.
    ///
    /// # Errors:
    ///
    /// - [`InvalidSeedMaterial`](Error::InvalidSeedMaterial) - The password
    ///   is empty.
    pub fn new(password: &[u8], realm: &str) -> Result<Self, Error> {
        if password.is_empty() {
            return Err(Error::InvalidSeedMaterial("empty password"));
        }
        let key = kdf::pbkdf2_sha256(password, realm.as_bytes());
        Ok(Self::from_key(&key))
    }

    /// Instantiate the stream for `password` and `realm`, keyed additionally
    /// by a [`MasterSeed`](crate::seed::MasterSeed).
    ///
    /// The stream key is HKDF-SHA256 of the seed, with the realm as salt and
    /// the password as info.
    #[cfg(feature = "seed")]
    pub fn with_seed(
        password: &[u8],
        realm: &str,
        seed: &crate::seed::MasterSeed,
    ) -> Result<Self, Error> {
        if password.is_empty() {
            return Err(Error::InvalidSeedMaterial("empty password"));
        }
        let key = kdf::hkdf_sha256(seed.as_bytes(), realm.as_bytes(), password)?;
        Ok(Self::from_key(&key))
    }

    fn from_key(key: &[u8; kdf::DERIVED_KEY_LEN]) -> Self {
        let cipher = aes::Aes256::new(GenericArray::from_slice(key));
        Self {
            keystream: symcipher::CtrKeystream::new(cipher, &Block::<aes::Aes256>::default()),
        }
    }
}

impl RngCore for Drng {
    fn generate(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError> {
        self.keystream.generate(output);
        Ok(())
    }
}

impl IncidentalReadRng for Drng {
    fn generate_incidental(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError> {
        self.keystream.generate(output);
        Ok(())
    }
}

#[cfg(test)]
fn test_drng_output(password: &[u8], realm: &str, len: usize) -> alloc::vec::Vec<u8> {
    use alloc::vec;

    let mut drng = Drng::new(password, realm).unwrap();
    let mut output = vec![0u8; len];
    drng.generate(&mut output).unwrap();
    output
}

#[test]
fn test_drng_deterministic() {
    assert_eq!(
        test_drng_output(b"pass", "example.com", 77),
        test_drng_output(b"pass", "example.com", 77)
    );
}

#[test]
fn test_drng_is_pbkdf2_keyed_aes256_ctr() {
    let key = kdf::pbkdf2_sha256(b"pass", b"example.com");
    let cipher = aes::Aes256::new(GenericArray::from_slice(&key[..]));
    let mut keystream = symcipher::CtrKeystream::new(cipher, &GenericArray::default());
    let mut expected = [0u8; 48];
    keystream.generate(&mut expected);

    assert_eq!(test_drng_output(b"pass", "example.com", 48), expected);
}

#[test]
fn test_drng_chunking() {
    let expected = test_drng_output(b"pass", "example.com", 300);

    let mut drng = Drng::new(b"pass", "example.com").unwrap();
    let mut generated = [0u8; 300];
    let (a, rest) = generated.split_at_mut(1);
    let (b, rest) = rest.split_at_mut(40);
    let (c, d) = rest.split_at_mut(7);
    drng.generate(a).unwrap();
    drng.generate_incidental(b).unwrap();
    drng.generate(c).unwrap();
    drng.generate(d).unwrap();
    assert_eq!(&generated[..], &expected[..]);
}

#[test]
fn test_drng_domain_separation() {
    let reference = test_drng_output(b"pass", "example.com", 32);
    assert_ne!(test_drng_output(b"pass", "Example.com", 32), reference);
    assert_ne!(test_drng_output(b"pass", "example.com ", 32), reference);
    assert_ne!(test_drng_output(b"pass2", "example.com", 32), reference);
}

#[test]
fn test_drng_empty_password() {
    assert!(matches!(
        Drng::new(b"", "example.com"),
        Err(Error::InvalidSeedMaterial(_))
    ));
}
