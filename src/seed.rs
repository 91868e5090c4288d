// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 The pwkeygen Authors

//! Password-encrypted master seed.
//!
//! A [`MasterSeed`] is a random 256 byte string mixed into every derivation
//! made with [`derive_with_seed()`](crate::derive_with_seed). At
//! rest it is kept encrypted under the password:
//!
//! ```text
//! salt (12 bytes) || AES-256-GCM(PBKDF2-HMAC-SHA256(password, salt), nonce = salt, seed)
//! ```

extern crate alloc;
use crate::crypto::kdf;
use crate::utils::{self, cfg_zeroize};
use aes_gcm::aead::{generic_array::GenericArray, Aead as _, KeyInit as _};
use alloc::vec::Vec;
use core::fmt;

/// Length of the plain seed.
pub const SEED_LEN: usize = 256;
/// Length of the salt, which doubles as the AES-GCM nonce.
pub const SALT_LEN: usize = 12;
const TAG_LEN: usize = 16;
/// Length of an encrypted seed blob.
pub const ENCRYPTED_SEED_LEN: usize = SALT_LEN + SEED_LEN + TAG_LEN;

/// Error returned from the [`MasterSeed`] primitives.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("empty password")]
    InvalidPassword,
    #[error("malformed encrypted seed")]
    Malformed,
    /// Either the password is wrong or the blob has been tampered with.
    #[error("seed authentication failed")]
    AuthenticationFailed,
    #[error("seed encryption failed")]
    Encryption,
}

/// A decrypted master seed.
pub struct MasterSeed {
    seed: cfg_zeroize::Zeroizing<Vec<u8>>,
}

impl MasterSeed {
    /// Generate a fresh seed from `rng` and encrypt it under `password`.
    ///
    /// Returns the seed along with its encrypted blob, which is
    /// [`ENCRYPTED_SEED_LEN`] bytes long.
    pub fn generate<R: rand_core::RngCore + rand_core::CryptoRng>(
        password: &[u8],
        rng: &mut R,
    ) -> Result<(Self, Vec<u8>), SeedError> {
        if password.is_empty() {
            return Err(SeedError::InvalidPassword);
        }

        let mut seed = utils::alloc_zeroizing_vec(SEED_LEN);
        rng.fill_bytes(&mut seed);
        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);

        let cipher = seed_cipher(password, &salt);
        let ciphertext = cipher
            .encrypt(GenericArray::from_slice(&salt), seed.as_slice())
            .map_err(|_| SeedError::Encryption)?;

        let mut blob = Vec::with_capacity(ENCRYPTED_SEED_LEN);
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&ciphertext);
        Ok((Self { seed }, blob))
    }

    /// Decrypt an encrypted seed blob with `password`.
    ///
    /// # Errors:
    ///
    /// - [`InvalidPassword`](SeedError::InvalidPassword) - The password is
    ///   empty.
    /// - [`Malformed`](SeedError::Malformed) - The blob has the wrong length.
    /// - [`AuthenticationFailed`](SeedError::AuthenticationFailed) - Wrong
    ///   password or corrupted blob.
    pub fn open(password: &[u8], blob: &[u8]) -> Result<Self, SeedError> {
        if password.is_empty() {
            return Err(SeedError::InvalidPassword);
        }
        if blob.len() != ENCRYPTED_SEED_LEN {
            return Err(SeedError::Malformed);
        }

        let (salt, ciphertext) = blob.split_at(SALT_LEN);
        let cipher = seed_cipher(password, salt);
        let seed = cipher
            .decrypt(GenericArray::from_slice(salt), ciphertext)
            .map_err(|_| SeedError::AuthenticationFailed)?;
        Ok(Self {
            seed: cfg_zeroize::Zeroizing::from(seed),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.seed
    }
}

impl fmt::Debug for MasterSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterSeed").finish_non_exhaustive()
    }
}

fn seed_cipher(password: &[u8], salt: &[u8]) -> aes_gcm::Aes256Gcm {
    let key = kdf::pbkdf2_sha256(password, salt);
    aes_gcm::Aes256Gcm::new(GenericArray::from_slice(&key[..]))
}

#[cfg(test)]
fn test_rng() -> rand_chacha::ChaCha8Rng {
    use rand_core::SeedableRng as _;
    rand_chacha::ChaCha8Rng::from_seed([7u8; 32])
}

#[test]
fn test_seed_generate_open() {
    let (seed, blob) = MasterSeed::generate(b"pass", &mut test_rng()).unwrap();
    assert_eq!(blob.len(), ENCRYPTED_SEED_LEN);
    assert_eq!(seed.as_bytes().len(), SEED_LEN);

    let opened = MasterSeed::open(b"pass", &blob).unwrap();
    assert_eq!(opened.as_bytes(), seed.as_bytes());

    assert!(matches!(
        MasterSeed::open(b"wrong", &blob),
        Err(SeedError::AuthenticationFailed)
    ));
    assert!(matches!(
        MasterSeed::open(b"pass", &blob[1..]),
        Err(SeedError::Malformed)
    ));
    assert!(matches!(
        MasterSeed::open(b"", &blob),
        Err(SeedError::InvalidPassword)
    ));

    let mut tampered = blob.clone();
    tampered[SALT_LEN] ^= 1;
    assert!(matches!(
        MasterSeed::open(b"pass", &tampered),
        Err(SeedError::AuthenticationFailed)
    ));
}

#[cfg(feature = "ecc_nist_p256")]
#[test]
fn test_derive_with_seed() {
    use crate::derive::{derive, derive_with_seed};
    use crate::key_type::KeyType;

    let mut rng = test_rng();
    let (seed0, _) = MasterSeed::generate(b"pass", &mut rng).unwrap();
    let (seed1, _) = MasterSeed::generate(b"pass", &mut rng).unwrap();

    let key0 = derive_with_seed(b"pass", "example.com", &seed0, KeyType::Ec256).unwrap();
    assert_eq!(
        derive_with_seed(b"pass", "example.com", &seed0, KeyType::Ec256).unwrap(),
        key0
    );
    assert_ne!(
        derive_with_seed(b"pass", "example.com", &seed1, KeyType::Ec256).unwrap(),
        key0
    );
    assert_ne!(
        derive_with_seed(b"pass2", "example.com", &seed0, KeyType::Ec256).unwrap(),
        key0
    );
    assert_ne!(derive(b"pass", "example.com", KeyType::Ec256).unwrap(), key0);
}
