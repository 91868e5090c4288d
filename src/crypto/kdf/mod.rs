//! Key derivation functions turning passwords and seeds into stream keys.

#[cfg(feature = "seed")]
use crate::error::InternalError;
use crate::utils::cfg_zeroize;
use sha2::Sha256;

/// Number of PBKDF2 iterations applied to the password.
pub const PBKDF2_ROUNDS: u32 = 4096;

/// Length of all derived keys, sized for AES-256.
pub const DERIVED_KEY_LEN: usize = 32;

pub type DerivedKey = cfg_zeroize::Zeroizing<[u8; DERIVED_KEY_LEN]>;

/// PBKDF2-HMAC-SHA256 with [`PBKDF2_ROUNDS`] iterations.
pub fn pbkdf2_sha256(password: &[u8], salt: &[u8]) -> DerivedKey {
    let mut key = DerivedKey::from([0u8; DERIVED_KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ROUNDS, &mut key[..]);
    key
}

/// HKDF-SHA256 extract-and-expand to a single [`DERIVED_KEY_LEN`] key.
#[cfg(feature = "seed")]
pub fn hkdf_sha256(ikm: &[u8], salt: &[u8], info: &[u8]) -> Result<DerivedKey, InternalError> {
    let mut key = DerivedKey::from([0u8; DERIVED_KEY_LEN]);
    let hk = hkdf::Hkdf::<Sha256>::new(Some(salt), ikm);
    hk.expand(info, &mut key[..])
        .map_err(|_| InternalError::KeyDerivation)?;
    Ok(key)
}

#[test]
fn test_pbkdf2_sha256() {
    use hex_literal::hex;

    let key = pbkdf2_sha256(b"password", b"salt");
    assert_eq!(
        *key,
        hex!("c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a")
    );
}

#[cfg(feature = "seed")]
#[test]
fn test_hkdf_sha256_rfc5869_case_1() {
    use hex_literal::hex;

    // RFC 5869, A.1, first 32 octets of the OKM.
    let key = hkdf_sha256(
        &hex!("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b"),
        &hex!("000102030405060708090a0b0c"),
        &hex!("f0f1f2f3f4f5f6f7f8f9"),
    )
    .unwrap();
    assert_eq!(
        *key,
        hex!("3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf")
    );
}
