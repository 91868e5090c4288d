// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

//! Implementation of the RSA key generation.
//!
//! The primitives in here reproduce, draw for draw, how Go's `crypto/rsa`
//! `GenerateMultiPrimeKey()` and `crypto/rand.Prime()` up to and including
//! Go 1.10 consume their randomness source. Any deviation in the number or
//! size of reads, in the bit fixups applied to candidates or in the
//! acceptance criteria results in an entirely different key for the same
//! stream, so none of the steps below may be reordered or "optimized".

use crate::crypto::rng;
use crate::error::{Error, InternalError};
use crate::utils::{self, cfg_zeroize::Zeroize as _};
use core::convert;
use num_bigint_dig::{prime::probably_prime, BigInt, BigUint, Sign};
use num_integer::Integer as _;
use num_traits::{One as _, Signed as _};

/// The public exponent of all generated keys, *2<sup>16</sup> + 1*.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// Number of prime factors of the modulus.
const NPRIMES: usize = 2;

/// Number of Miller-Rabin rounds, on top of a Baillie-PSW test, a prime
/// candidate must pass.
const PRIME_TEST_ROUNDS: usize = 20;

/// The odd primes whose product still fits into an `u64`.
const SMALL_PRIMES: [u8; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// Product of all [`SMALL_PRIMES`].
const SMALL_PRIMES_PRODUCT: u64 = 16_294_579_238_595_022_365;

/// Smallest modulus width with enough distinct primes of half its width
/// for [`gen_key()`] to terminate.
///
/// Equals the cutoff of Go's prime count estimate
/// *π(2<sup>bits/2</sup>) / 8 > 2*, which first holds at 12 bits.
pub const MIN_MODULUS_NBITS: usize = 12;

/// Exclusive upper bound on the offset searched for a candidate free of
/// [`SMALL_PRIMES`] factors.
const MAX_SIEVE_DELTA: u64 = 1 << 20;

/// Error returned from the RSA prime generation primitives.
#[derive(Debug)]
pub enum GenPrimesError {
    /// [Random number generator](rng::RngCore) failure.
    RngGenerateError(rng::RngGenerateError),
    /// Invalid parameter, like a prime width of less than two bits.
    InvalidParams,
    /// A computed value violates an arithmetic invariant.
    Internal(InternalError),
}

impl convert::From<GenPrimesError> for Error {
    fn from(value: GenPrimesError) -> Self {
        match value {
            GenPrimesError::RngGenerateError(e) => Self::from(e),
            GenPrimesError::InvalidParams => Self::Internal(InternalError::InvalidParams),
            GenPrimesError::Internal(e) => Self::Internal(e),
        }
    }
}

/// The components of a freshly generated RSA key.
pub struct RsaKeyComponents {
    pub modulus: BigUint,
    pub private_exponent: BigUint,
    pub primes: [BigUint; NPRIMES],
}

/// Remainder of the big-endian integer `bytes` modulo [`SMALL_PRIMES_PRODUCT`].
fn small_primes_product_rem(bytes: &[u8]) -> u64 {
    let product = u128::from(SMALL_PRIMES_PRODUCT);
    bytes.iter().fold(0u64, |rem, b| {
        // rem < product < 2^64, so the shifted value fits comfortably.
        (((u128::from(rem) << 8) | u128::from(*b)) % product) as u64
    })
}

/// Generate a probable prime of exactly `nbits` bits.
///
/// Each attempt reads `ceil(nbits / 8)` bytes from `rng` and nothing else.
///
/// # Arguments:
///
/// - `rng` - The [`RngCore`](rng::RngCore) instance to draw random bytes from.
/// - `nbits` - The requested bit width of the prime. Must be at least two.
///
/// # Errors:
///
/// - [`RngGenerateError`](GenPrimesError::RngGenerateError) - The provided
///   `rng` instance's [`generate()`](rng::RngCore::generate) returned a failure
///   condition.
/// - [`InvalidParams`](GenPrimesError::InvalidParams) - `nbits` is less than
///   two.
pub fn gen_prime<R: rng::RngCore + ?Sized>(
    rng: &mut R,
    nbits: usize,
) -> Result<BigUint, GenPrimesError> {
    if nbits < 2 {
        return Err(GenPrimesError::InvalidParams);
    }

    // Number of candidate bits living in the most significant byte.
    let high_byte_nbits = match nbits % 8 {
        0 => 8,
        b => b,
    };
    let mut bytes = utils::alloc_zeroizing_vec(nbits.div_ceil(8));

    let mut rejected: usize = 0;
    loop {
        // Step 1: draw the raw candidate.
        rng.generate(&mut bytes)
            .map_err(GenPrimesError::RngGenerateError)?;

        // Step 2: clear the bits above nbits, then force the two most
        // significant bits to one, so that the product of two such primes
        // has exactly twice their width. Force the candidate to be odd.
        bytes[0] &= ((1u16 << high_byte_nbits) - 1) as u8;
        if high_byte_nbits >= 2 {
            bytes[0] |= 3 << (high_byte_nbits - 2);
        } else {
            bytes[0] |= 1;
            if bytes.len() > 1 {
                bytes[1] |= 0x80;
            }
        }
        let last = bytes.len() - 1;
        bytes[last] |= 1;

        let mut p = BigUint::from_bytes_be(&bytes);

        // Step 3: advance the candidate to the nearest odd value free of any
        // of the SMALL_PRIMES as a factor. For tiny widths, the small
        // primes themselves are acceptable.
        let rem = small_primes_product_rem(&bytes);
        for delta in (0..MAX_SIEVE_DELTA).step_by(2) {
            let m = rem + delta;
            if SMALL_PRIMES.iter().any(|prime| {
                let prime = u64::from(*prime);
                m % prime == 0 && (nbits > 6 || m != prime)
            }) {
                continue;
            }
            if delta > 0 {
                p += BigUint::from(delta);
            }
            break;
        }

        // Step 4: accept only probable primes which have not outgrown the
        // requested width in step 3.
        if probably_prime(&p, PRIME_TEST_ROUNDS) && p.bits() == nbits {
            tracing::trace!(nbits, rejected, "found prime");
            return Ok(p);
        }
        p.zeroize();
        rejected += 1;
    }
}

/// Modular inverse of `a` modulo `m`, if it exists.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    let egcd = BigInt::from_biguint(Sign::Plus, a.clone()).extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return None;
    }
    let mut inverse = egcd.x % &m;
    if inverse.is_negative() {
        inverse = inverse + &m;
    }
    inverse.to_biguint()
}

/// Generate a two-prime RSA key with a modulus of exactly `modulus_nbits`.
///
/// # Arguments:
///
/// - `rng` - The randomness source. Besides the draws for the prime
///   candidates, a single incidental read of one byte is issued upfront,
///   just like Go 1.11 and later would do.
/// - `modulus_nbits` - Requested width of the modulus in bits.
/// - `public_exponent` - The public exponent, must be odd.
///
/// # Errors:
///
/// - [`RngGenerateError`](GenPrimesError::RngGenerateError) - The provided
///   `rng` instance returned a failure condition.
/// - [`InvalidParams`](GenPrimesError::InvalidParams) - `modulus_nbits` is
///   less than [`MIN_MODULUS_NBITS`].
/// - [`Internal`](GenPrimesError::Internal) - The private exponent came out
///   negative.
pub fn gen_key<R: rng::IncidentalReadRng + ?Sized>(
    rng: &mut R,
    modulus_nbits: usize,
    public_exponent: u32,
) -> Result<RsaKeyComponents, GenPrimesError> {
    if modulus_nbits < MIN_MODULUS_NBITS {
        return Err(GenPrimesError::InvalidParams);
    }

    // The randomized control flow of Go 1.11+'s MaybeReadByte().
    let mut incidental = [0u8; 1];
    rng.generate_incidental(&mut incidental)
        .map_err(GenPrimesError::RngGenerateError)?;

    let e = BigInt::from(public_exponent);
    let mut primes: [BigUint; NPRIMES] = Default::default();
    let mut rejected_sets: usize = 0;
    'next_set_of_primes: loop {
        let mut todo = modulus_nbits;
        for i in 0..NPRIMES {
            primes[i] = gen_prime(rng, todo / (NPRIMES - i))?;
            todo -= primes[i].bits();
        }

        for (i, prime) in primes.iter().enumerate() {
            if primes[..i].contains(prime) {
                tracing::trace!(rejected_sets, "prime factors not distinct");
                rejected_sets += 1;
                continue 'next_set_of_primes;
            }
        }

        let modulus = primes
            .iter()
            .fold(BigUint::one(), |n, prime| n * prime);
        if modulus.bits() != modulus_nbits {
            tracing::trace!(rejected_sets, nbits = modulus.bits(), "modulus width mismatch");
            rejected_sets += 1;
            continue 'next_set_of_primes;
        }

        let totient = primes
            .iter()
            .fold(BigUint::one(), |t, prime| t * (prime - BigUint::one()));
        let totient = BigInt::from_biguint(Sign::Plus, totient);
        let egcd = e.extended_gcd(&totient);
        if !egcd.gcd.is_one() {
            tracing::trace!(rejected_sets, "public exponent not invertible");
            rejected_sets += 1;
            continue 'next_set_of_primes;
        }

        let mut private_exponent = egcd.x % &totient;
        if private_exponent.is_negative() {
            private_exponent = private_exponent + &totient;
        }
        let private_exponent = private_exponent
            .to_biguint()
            .ok_or(GenPrimesError::Internal(InternalError::ExponentMismatch))?;

        return Ok(RsaKeyComponents {
            modulus,
            private_exponent,
            primes,
        });
    }
}

#[test]
fn test_small_primes_product() {
    let product = SMALL_PRIMES
        .iter()
        .fold(1u128, |product, prime| product * u128::from(*prime));
    assert_eq!(product, u128::from(SMALL_PRIMES_PRODUCT));
}

#[test]
fn test_small_primes_product_rem() {
    use num_traits::ToPrimitive as _;

    let bytes = [0xffu8; 37];
    let expected = (BigUint::from_bytes_be(&bytes) % BigUint::from(SMALL_PRIMES_PRODUCT))
        .to_u64()
        .unwrap();
    assert_eq!(small_primes_product_rem(&bytes), expected);
    assert_eq!(small_primes_product_rem(&[]), 0);
}

#[test]
fn test_gen_prime_invalid_params() {
    let mut rng = rng::ReplayRng::new(&[0u8; 8]);
    assert!(matches!(
        gen_prime(&mut rng, 0),
        Err(GenPrimesError::InvalidParams)
    ));
    assert!(matches!(
        gen_prime(&mut rng, 1),
        Err(GenPrimesError::InvalidParams)
    ));
}

#[test]
fn test_gen_prime_tiny() {
    // With three bits, every candidate gets forced to 0b111 which the small
    // primes sieve must not reject.
    let mut rng = rng::ReplayRng::new(&[0x00]);
    assert_eq!(gen_prime(&mut rng, 3).unwrap(), BigUint::from(7u32));
    assert_eq!(rng.remaining_len(), 0);

    // 0b11 with two bits.
    let mut rng = rng::ReplayRng::new(&[0xa5]);
    assert_eq!(gen_prime(&mut rng, 2).unwrap(), BigUint::from(3u32));
}

#[test]
fn test_gen_prime_widths() {
    use crate::crypto::rng::drng::Drng;

    let mut drng = Drng::new(b"pass", "test_gen_prime_widths").unwrap();
    for nbits in [9usize, 16, 17, 64, 127, 256, 512] {
        let p = gen_prime(&mut drng, nbits).unwrap();
        assert_eq!(p.bits(), nbits);
        assert!(probably_prime(&p, PRIME_TEST_ROUNDS));
        // The two top bits are always set.
        assert_eq!(&p >> (nbits - 2), BigUint::from(3u32));
    }
}

#[test]
fn test_gen_prime_stream_exhausted() {
    // An odd candidate of width 16 needs two bytes per attempt.
    let mut rng = rng::ReplayRng::new(&[0u8; 1]);
    assert!(matches!(
        gen_prime(&mut rng, 16),
        Err(GenPrimesError::RngGenerateError(
            rng::RngGenerateError::Exhausted
        ))
    ));
}

#[test]
fn test_mod_inverse() {
    let inverse = mod_inverse(&BigUint::from(3u32), &BigUint::from(11u32)).unwrap();
    assert_eq!(inverse, BigUint::from(4u32));
    assert!(mod_inverse(&BigUint::from(6u32), &BigUint::from(9u32)).is_none());
}

#[test]
fn test_gen_key_min_modulus_nbits() {
    use crate::crypto::rng::{compat_shim::CompatShim, drng::Drng};

    // Moduli of four or five bits would only ever see p = q = 3.
    for modulus_nbits in [0usize, 4, 5, MIN_MODULUS_NBITS - 1] {
        let mut rng =
            CompatShim::new(Drng::new(b"pass", "test_gen_key_min_modulus_nbits").unwrap());
        assert!(matches!(
            gen_key(&mut rng, modulus_nbits, PUBLIC_EXPONENT),
            Err(GenPrimesError::InvalidParams)
        ));
        // Rejected before anything gets drawn.
        assert_eq!(rng.intercepted_reads(), 0);
    }

    let mut rng = CompatShim::new(Drng::new(b"pass", "test_gen_key_min_modulus_nbits").unwrap());
    let components = gen_key(&mut rng, MIN_MODULUS_NBITS, PUBLIC_EXPONENT).unwrap();
    assert_eq!(components.modulus.bits(), MIN_MODULUS_NBITS);
}

#[test]
fn test_gen_primes_error_conversion() {
    assert!(matches!(
        Error::from(GenPrimesError::Internal(InternalError::ExponentMismatch)),
        Error::Internal(InternalError::ExponentMismatch)
    ));
    assert!(matches!(
        Error::from(GenPrimesError::InvalidParams),
        Error::Internal(InternalError::InvalidParams)
    ));
}

#[test]
fn test_gen_key_structure() {
    use crate::crypto::rng::{compat_shim::CompatShim, drng::Drng};

    let mut rng = CompatShim::new(Drng::new(b"pass", "test_gen_key_structure").unwrap());
    let components = gen_key(&mut rng, 512, PUBLIC_EXPONENT).unwrap();
    assert_eq!(rng.intercepted_reads(), 1);

    let [p, q] = &components.primes;
    assert_ne!(p, q);
    assert_eq!(p.bits(), 256);
    assert_eq!(q.bits(), 256);
    assert!(probably_prime(p, PRIME_TEST_ROUNDS));
    assert!(probably_prime(q, PRIME_TEST_ROUNDS));
    assert_eq!(&components.modulus, &(p * q));
    assert_eq!(components.modulus.bits(), 512);

    let one = BigUint::one();
    let de = &components.private_exponent * BigUint::from(PUBLIC_EXPONENT);
    assert_eq!(&de % (p - &one), one);
    assert_eq!(&de % (q - &one), one);
}
