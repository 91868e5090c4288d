// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

use super::keygen_impl;
use crate::crypto::{ct_cmp, rng};
use crate::error::{Error, InternalError};
use crate::utils::cfg_zeroize::{self, Zeroize as _};
use core::fmt;
use num_bigint_dig::BigUint;
use num_traits::One as _;

/// Two-prime RSA private key.
///
/// Holds the complete PKCS #1 set of values. The CRT values are always
/// computed from the private exponent and the primes, never taken from
/// the outside, and all values are checked for consistency upon
/// construction.
pub struct RsaPrivateKey {
    modulus: BigUint,
    public_exponent: BigUint,
    private_exponent: BigUint,
    primes: [BigUint; 2],
    dp: BigUint,
    dq: BigUint,
    qinv: BigUint,
}

impl RsaPrivateKey {
    /// Generate a key with a modulus of `modulus_nbits` from `rng`.
    ///
    /// The public exponent is always
    /// [`PUBLIC_EXPONENT`](keygen_impl::PUBLIC_EXPONENT). The output is
    /// a pure function of the bytes drawn from `rng`, so a deterministic
    /// stream yields a deterministic key.
    ///
    /// # Errors:
    ///
    /// - [`Internal`](Error::Internal) - The `rng` failed, or the generated
    ///   key violates one of the structural invariants.
    pub fn generate<R: rng::IncidentalReadRng + ?Sized>(
        rng: &mut R,
        modulus_nbits: usize,
    ) -> Result<Self, Error> {
        let keygen_impl::RsaKeyComponents {
            modulus,
            private_exponent,
            primes,
        } = keygen_impl::gen_key(rng, modulus_nbits, keygen_impl::PUBLIC_EXPONENT)?;
        let key = Self::from_components(
            modulus,
            BigUint::from(keygen_impl::PUBLIC_EXPONENT),
            private_exponent,
            primes,
        )?;
        if key.modulus_nbits() != modulus_nbits {
            return Err(InternalError::ModulusSize {
                expected: modulus_nbits,
                actual: key.modulus_nbits(),
            }
            .into());
        }
        Ok(key)
    }

    /// Assemble a key from its components and compute the CRT values.
    ///
    /// # Errors:
    ///
    /// - [`EqualPrimes`](InternalError::EqualPrimes) - Both primes are equal.
    /// - [`FactorMismatch`](InternalError::FactorMismatch) - The modulus is
    ///   not the product of the primes.
    /// - [`ExponentMismatch`](InternalError::ExponentMismatch) - The private
    ///   exponent does not invert the public one modulo `p - 1` and `q - 1`.
    /// - [`CrtMismatch`](InternalError::CrtMismatch) - `q` is not
    ///   invertible modulo `p`.
    pub fn from_components(
        modulus: BigUint,
        public_exponent: BigUint,
        private_exponent: BigUint,
        primes: [BigUint; 2],
    ) -> Result<Self, InternalError> {
        let one = BigUint::one();
        let [p, q] = &primes;
        if p == q {
            return Err(InternalError::EqualPrimes);
        }
        if p <= &one || q <= &one || &(p * q) != &modulus {
            return Err(InternalError::FactorMismatch);
        }

        let p_minus_one = p - &one;
        let q_minus_one = q - &one;
        let mut de = &private_exponent * &public_exponent;
        let exponents_match = &de % &p_minus_one == one && &de % &q_minus_one == one;
        de.zeroize();
        if !exponents_match {
            return Err(InternalError::ExponentMismatch);
        }

        let dp = &private_exponent % &p_minus_one;
        let dq = &private_exponent % &q_minus_one;
        let qinv = keygen_impl::mod_inverse(q, p).ok_or(InternalError::CrtMismatch)?;

        Ok(Self {
            modulus,
            public_exponent,
            private_exponent,
            primes,
            dp,
            dq,
            qinv,
        })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn modulus_nbits(&self) -> usize {
        self.modulus.bits()
    }

    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    pub fn private_exponent(&self) -> &BigUint {
        &self.private_exponent
    }

    /// The prime factors `p` and `q`, in generation order.
    pub fn primes(&self) -> &[BigUint; 2] {
        &self.primes
    }

    /// `d mod (p - 1)`
    pub fn dp(&self) -> &BigUint {
        &self.dp
    }

    /// `d mod (q - 1)`
    pub fn dq(&self) -> &BigUint {
        &self.dq
    }

    /// `q^-1 mod p`
    pub fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.private_exponent.zeroize();
        self.primes[0].zeroize();
        self.primes[1].zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl cfg_zeroize::ZeroizeOnDrop for RsaPrivateKey {}

impl PartialEq for RsaPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        fn secret_bytes(v: &BigUint) -> cfg_zeroize::Zeroizing<alloc::vec::Vec<u8>> {
            cfg_zeroize::Zeroizing::from(v.to_bytes_be())
        }

        // The CRT values are functions of the rest.
        self.modulus == other.modulus
            && self.public_exponent == other.public_exponent
            && ct_cmp::ct_bytes_eq(
                &secret_bytes(&self.private_exponent),
                &secret_bytes(&other.private_exponent),
            )
            && ct_cmp::ct_bytes_eq(
                &secret_bytes(&self.primes[0]),
                &secret_bytes(&other.primes[0]),
            )
    }
}

impl Eq for RsaPrivateKey {}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("modulus_nbits", &self.modulus_nbits())
            .field("public_exponent", &self.public_exponent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
fn test_key(realm: &str, modulus_nbits: usize) -> RsaPrivateKey {
    use crate::crypto::rng::{compat_shim::CompatShim, drng::Drng};

    let mut rng = CompatShim::new(Drng::new(b"pass", realm).unwrap());
    RsaPrivateKey::generate(&mut rng, modulus_nbits).unwrap()
}

#[test]
fn test_generate_crt_values() {
    let key = test_key("test_generate_crt_values", 768);
    assert_eq!(key.modulus_nbits(), 768);
    assert_eq!(key.public_exponent(), &BigUint::from(65537u32));

    let one = BigUint::one();
    let [p, q] = key.primes();
    assert_eq!(key.dp(), &(key.private_exponent() % (p - &one)));
    assert_eq!(key.dq(), &(key.private_exponent() % (q - &one)));
    assert_eq!((key.qinv() * q) % p, one);
}

#[test]
fn test_generate_deterministic() {
    let key0 = test_key("test_generate_deterministic", 512);
    let key1 = test_key("test_generate_deterministic", 512);
    assert_eq!(key0, key1);

    let key2 = test_key("test_generate_deterministic-2", 512);
    assert_ne!(key0, key2);
}

#[test]
fn test_from_components_rejects_inconsistencies() {
    let key = test_key("test_from_components", 512);
    let [p, q] = key.primes().clone();

    assert!(matches!(
        RsaPrivateKey::from_components(
            key.modulus().clone(),
            key.public_exponent().clone(),
            key.private_exponent().clone(),
            [p.clone(), p.clone()],
        ),
        Err(InternalError::EqualPrimes)
    ));

    assert!(matches!(
        RsaPrivateKey::from_components(
            key.modulus() + BigUint::from(2u32),
            key.public_exponent().clone(),
            key.private_exponent().clone(),
            [p.clone(), q.clone()],
        ),
        Err(InternalError::FactorMismatch)
    ));

    assert!(matches!(
        RsaPrivateKey::from_components(
            key.modulus().clone(),
            key.public_exponent().clone(),
            key.private_exponent() + BigUint::one(),
            [p.clone(), q.clone()],
        ),
        Err(InternalError::ExponentMismatch)
    ));

    // Swapping the primes is fine, but changes the CRT coefficient.
    let swapped = RsaPrivateKey::from_components(
        key.modulus().clone(),
        key.public_exponent().clone(),
        key.private_exponent().clone(),
        [q, p],
    )
    .unwrap();
    assert_ne!(swapped.qinv(), key.qinv());
}
