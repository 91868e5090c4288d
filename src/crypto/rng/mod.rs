// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

//! Randomness sources consumed by the key generation primitives.
//!
//! Key generation never draws from system entropy. All of its randomness
//! comes through the [`RngCore`] trait, and for key derivation that is
//! always a [`Drng`](drng::Drng) stream seeded from the password and realm.

pub mod compat_shim;
pub mod drng;

/// Error returned from [`RngCore::generate()`].
#[derive(Debug, thiserror::Error)]
pub enum RngGenerateError {
    /// The source cannot produce any more output.
    #[error("randomness source exhausted")]
    Exhausted,
}

/// Source of random bytes driving key generation.
///
/// Implementations must deliver the same stream of bytes no matter how the
/// requests are chunked.
pub trait RngCore {
    fn generate(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError>;
}

/// [`RngCore`] with a separate entry point for incidental reads.
///
/// An incidental read is one that a generation routine performs for reasons
/// unrelated to the algorithm proper, e.g. a single byte drawn to randomize
/// the control flow. Compatibility wrappers may answer those without
/// touching the underlying stream, see [`CompatShim`](compat_shim::CompatShim).
pub trait IncidentalReadRng: RngCore {
    fn generate_incidental(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError>;
}

impl<R: RngCore + ?Sized> RngCore for &mut R {
    fn generate(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError> {
        (**self).generate(output)
    }
}

impl<R: IncidentalReadRng + ?Sized> IncidentalReadRng for &mut R {
    fn generate_incidental(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError> {
        (**self).generate_incidental(output)
    }
}

/// Test source replaying a fixed byte sequence.
#[cfg(test)]
pub struct ReplayRng<'a> {
    remaining: &'a [u8],
}

#[cfg(test)]
impl<'a> ReplayRng<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { remaining: bytes }
    }

    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }
}

#[cfg(test)]
impl<'a> RngCore for ReplayRng<'a> {
    fn generate(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError> {
        if output.len() > self.remaining.len() {
            return Err(RngGenerateError::Exhausted);
        }
        let (head, tail) = self.remaining.split_at(output.len());
        output.copy_from_slice(head);
        self.remaining = tail;
        Ok(())
    }
}

#[test]
fn test_replay_rng_exhaustion() {
    let mut rng = ReplayRng::new(&[1, 2, 3]);
    let mut buf = [0u8; 2];
    rng.generate(&mut buf).unwrap();
    assert_eq!(buf, [1, 2]);
    assert!(matches!(
        rng.generate(&mut buf),
        Err(RngGenerateError::Exhausted)
    ));
    assert_eq!(rng.remaining_len(), 1);
}
