extern crate alloc;
use super::{curve::EccCurve, gen_random_scalar_impl};
use crate::crypto::{ct_cmp, rng};
use crate::error::{Error, InternalError};
use crate::utils::cfg_zeroize;
use alloc::vec::Vec;
use core::{cmp, fmt};

/// Private key on one of the [`EccCurve`]s.
pub struct EccPrivateKey {
    curve: EccCurve,
    /// Big-endian scalar, padded to the curve's field length.
    d: cfg_zeroize::Zeroizing<Vec<u8>>,
}

impl EccPrivateKey {
    pub fn generate<R: rng::RngCore + ?Sized>(rng: &mut R, curve: EccCurve) -> Result<Self, Error> {
        let d = gen_random_scalar_impl::gen_random_scalar(rng, curve)?;
        Ok(Self::from_bytes(curve, &d)?)
    }

    /// Load a big-endian private scalar.
    ///
    /// Leading zeros may be omitted, but the scalar may not exceed the
    /// field length and must be in the range `[1, n - 1]`.
    pub fn from_bytes(curve: EccCurve, d: &[u8]) -> Result<Self, InternalError> {
        let field_len = curve.field_len();
        if d.len() > field_len {
            return Err(InternalError::ScalarRange);
        }
        let mut padded = crate::utils::alloc_zeroizing_vec(field_len);
        padded[field_len - d.len()..].copy_from_slice(d);

        // Fixed length big-endian, so the lexicographic order is the numeric one.
        if padded.iter().all(|b| *b == 0)
            || padded.as_slice().cmp(curve.order()) != cmp::Ordering::Less
        {
            return Err(InternalError::ScalarRange);
        }

        Ok(Self { curve, d: padded })
    }

    pub fn get_curve(&self) -> EccCurve {
        self.curve
    }

    pub fn get_d(&self) -> &[u8] {
        &self.d
    }
}

impl cfg_zeroize::ZeroizeOnDrop for EccPrivateKey {}

impl PartialEq for EccPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && ct_cmp::ct_bytes_eq(&self.d, &other.d)
    }
}

impl Eq for EccPrivateKey {}

impl fmt::Debug for EccPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EccPrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "ecc_nist_p256")]
#[test]
fn test_from_bytes_range() {
    let curve = EccCurve::NistP256;
    assert!(EccPrivateKey::from_bytes(curve, &[1]).is_ok());
    assert!(matches!(
        EccPrivateKey::from_bytes(curve, &[0u8; 32]),
        Err(InternalError::ScalarRange)
    ));
    assert!(matches!(
        EccPrivateKey::from_bytes(curve, curve.order()),
        Err(InternalError::ScalarRange)
    ));
    assert!(matches!(
        EccPrivateKey::from_bytes(curve, &[1u8; 33]),
        Err(InternalError::ScalarRange)
    ));

    let mut n_minus_one = [0u8; 32];
    n_minus_one.copy_from_slice(curve.order());
    n_minus_one[31] -= 1;
    let key = EccPrivateKey::from_bytes(curve, &n_minus_one).unwrap();
    assert_eq!(key.get_d(), &n_minus_one);
}

#[cfg(feature = "ecc_nist_p384")]
#[test]
fn test_generate_deterministic() {
    use crate::crypto::rng::drng::Drng;

    let mut drng = Drng::new(b"pass", "test_generate_deterministic").unwrap();
    let key0 = EccPrivateKey::generate(&mut drng, EccCurve::NistP384).unwrap();
    let key1 = EccPrivateKey::generate(&mut drng, EccCurve::NistP384).unwrap();
    assert_eq!(key0.get_d().len(), 48);
    assert_ne!(key0, key1);

    let mut drng = Drng::new(b"pass", "test_generate_deterministic").unwrap();
    assert_eq!(
        EccPrivateKey::generate(&mut drng, EccCurve::NistP384).unwrap(),
        key0
    );
}
