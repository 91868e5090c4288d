// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 The pwkeygen Authors

//! Curve25519 keys in Edwards (Ed25519) and Montgomery (X25519) form.
//!
//! Both are 32 byte strings drawn directly from the randomness source. The
//! X25519 scalar gets clamped right away, so that the stored bytes are the
//! ones that end up in the encoded key.

use crate::crypto::{ct_cmp, rng};
use crate::error::Error;
use crate::utils::cfg_zeroize;
use core::fmt;

/// Length of both Ed25519 seeds and X25519 scalars.
pub const KEY_LEN: usize = 32;

/// Clamp an X25519 scalar as per RFC 7748, section 5.
#[cfg(feature = "x25519")]
fn clamp_scalar(scalar: &mut [u8; KEY_LEN]) {
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
}

/// Ed25519 private key, i.e. its 32 byte seed.
#[cfg(feature = "ed25519")]
pub struct Ed25519PrivateKey {
    seed: cfg_zeroize::Zeroizing<[u8; KEY_LEN]>,
}

#[cfg(feature = "ed25519")]
impl Ed25519PrivateKey {
    pub fn generate<R: rng::RngCore + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let mut seed = cfg_zeroize::Zeroizing::from([0u8; KEY_LEN]);
        rng.generate(&mut seed[..])?;
        Ok(Self { seed })
    }

    pub fn from_bytes(seed: &[u8; KEY_LEN]) -> Self {
        Self {
            seed: cfg_zeroize::Zeroizing::from(*seed),
        }
    }

    pub fn seed(&self) -> &[u8; KEY_LEN] {
        &self.seed
    }

    /// The compressed Edwards point of the associated public key.
    pub fn public_key(&self) -> [u8; KEY_LEN] {
        ed25519_dalek::SigningKey::from_bytes(&self.seed)
            .verifying_key()
            .to_bytes()
    }
}

#[cfg(feature = "ed25519")]
impl cfg_zeroize::ZeroizeOnDrop for Ed25519PrivateKey {}

#[cfg(feature = "ed25519")]
impl PartialEq for Ed25519PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        ct_cmp::ct_bytes_eq(&self.seed[..], &other.seed[..])
    }
}

#[cfg(feature = "ed25519")]
impl Eq for Ed25519PrivateKey {}

#[cfg(feature = "ed25519")]
impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519PrivateKey").finish_non_exhaustive()
    }
}

/// X25519 private key, i.e. its clamped scalar.
#[cfg(feature = "x25519")]
pub struct X25519PrivateKey {
    scalar: cfg_zeroize::Zeroizing<[u8; KEY_LEN]>,
}

#[cfg(feature = "x25519")]
impl X25519PrivateKey {
    pub fn generate<R: rng::RngCore + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let mut scalar = cfg_zeroize::Zeroizing::from([0u8; KEY_LEN]);
        rng.generate(&mut scalar[..])?;
        clamp_scalar(&mut scalar);
        Ok(Self { scalar })
    }

    /// Load a scalar, clamping it if it isn't already.
    pub fn from_bytes(scalar: &[u8; KEY_LEN]) -> Self {
        let mut scalar = cfg_zeroize::Zeroizing::from(*scalar);
        clamp_scalar(&mut scalar);
        Self { scalar }
    }

    pub fn scalar(&self) -> &[u8; KEY_LEN] {
        &self.scalar
    }

    /// The u-coordinate of the associated public key.
    pub fn public_key(&self) -> [u8; KEY_LEN] {
        let secret = x25519_dalek::StaticSecret::from(*self.scalar);
        x25519_dalek::PublicKey::from(&secret).to_bytes()
    }
}

#[cfg(feature = "x25519")]
impl cfg_zeroize::ZeroizeOnDrop for X25519PrivateKey {}

#[cfg(feature = "x25519")]
impl PartialEq for X25519PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        ct_cmp::ct_bytes_eq(&self.scalar[..], &other.scalar[..])
    }
}

#[cfg(feature = "x25519")]
impl Eq for X25519PrivateKey {}

#[cfg(feature = "x25519")]
impl fmt::Debug for X25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X25519PrivateKey").finish_non_exhaustive()
    }
}

#[cfg(feature = "ed25519")]
#[test]
fn test_ed25519_public_key() {
    use hex_literal::hex;

    let seed = hex!("5cbb5e721f79740ba009c7156f11765e843e22a9161cfc3c4a9ba7c04916f68e");
    let mut rng = rng::ReplayRng::new(&seed);
    let key = Ed25519PrivateKey::generate(&mut rng).unwrap();
    assert_eq!(key.seed(), &seed);
    assert_eq!(
        key.public_key(),
        hex!("1f6345a415241cb3eb1630c16fb45fb23f38c6093039a74b60da6d767c282096")
    );
}

#[cfg(feature = "x25519")]
#[test]
fn test_x25519_clamping() {
    use hex_literal::hex;

    let mut rng = rng::ReplayRng::new(&[0xffu8; KEY_LEN]);
    let key = X25519PrivateKey::generate(&mut rng).unwrap();
    assert_eq!(key.scalar()[0], 0xf8);
    assert_eq!(key.scalar()[31], 0x7f);
    assert!(key.scalar()[1..31].iter().all(|b| *b == 0xff));

    let mut rng = rng::ReplayRng::new(&[0u8; KEY_LEN]);
    let key = X25519PrivateKey::generate(&mut rng).unwrap();
    assert_eq!(key.scalar()[31], 0x40);

    let scalar = hex!("80db32aa323e86bb575f1e11ee19db22586a51ffde050ad309d3d7c59c1d2c6b");
    let key = X25519PrivateKey::from_bytes(&scalar);
    assert_eq!(key.scalar(), &scalar);
    assert_eq!(
        key.public_key(),
        hex!("7c0c4748e74769ba3baacdf40baf9fda7c3fec622c7f79513e169a7d187aef64")
    );
}
