// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 The pwkeygen Authors

//! Error types returned from key derivation.

extern crate alloc;
use crate::crypto::rng;
use alloc::string::String;
use core::convert;

/// Error returned from [`derive()`](crate::derive()) and the deterministic
/// stream constructors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The password or seed material cannot be used, e.g. an empty password.
    #[error("invalid seed material: {0}")]
    InvalidSeedMaterial(&'static str),
    /// The key type name is unknown or its support has not been compiled in.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),
    /// A generated key failed its consistency checks. Indicates a defect,
    /// never a property of the input.
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

/// Internal invariant violations.
#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    /// The randomness source failed to deliver.
    #[error("randomness source failure: {0}")]
    Rng(rng::RngGenerateError),
    /// A key derivation function rejected its parameters.
    #[error("key derivation failure")]
    KeyDerivation,
    /// Prime generation has been invoked with an impossible bit width.
    #[error("invalid prime generation parameters")]
    InvalidParams,
    /// The modulus width does not match the requested one.
    #[error("modulus has {actual} bits, expected {expected}")]
    ModulusSize { expected: usize, actual: usize },
    /// The modulus is not the product of the two primes.
    #[error("modulus does not match its prime factors")]
    FactorMismatch,
    /// Both prime factors are equal.
    #[error("prime factors are not distinct")]
    EqualPrimes,
    /// The private exponent is not the inverse of the public one.
    #[error("private exponent does not invert the public exponent")]
    ExponentMismatch,
    /// A CRT value does not match the private exponent and primes.
    #[error("inconsistent CRT parameters")]
    CrtMismatch,
    /// An elliptic curve scalar is outside of `[1, n - 1]`.
    #[error("scalar out of range for the curve")]
    ScalarRange,
}

impl convert::From<rng::RngGenerateError> for Error {
    fn from(value: rng::RngGenerateError) -> Self {
        Self::Internal(InternalError::Rng(value))
    }
}
