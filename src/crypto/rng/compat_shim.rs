// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 The pwkeygen Authors

//! Neutralization of incidental randomness reads.
//!
//! Starting with Go 1.11, `crypto/rsa` key generation draws a single byte
//! from the randomness source, with probability one half, before doing
//! anything else (`crypto/internal/randutil.MaybeReadByte`). Against a
//! deterministic stream, that read would shift all subsequent output and
//! produce a different key than the pre-1.11 algorithm this crate
//! reproduces. The [`CompatShim`] answers such reads with a fixed filler
//! and leaves the wrapped stream where it was.

use super::{IncidentalReadRng, RngCore, RngGenerateError};

/// Byte written to the buffers of neutralized incidental reads.
pub const INCIDENTAL_READ_FILLER: u8 = 0x00;

/// The generation algorithm version whose stream consumption the shim
/// reproduces.
pub const COMPAT_PROFILE: &str = "go1.10-rsa";

/// Wrapper forwarding algorithmic reads and neutralizing incidental ones.
pub struct CompatShim<R: RngCore> {
    inner: R,
    intercepted_reads: usize,
}

impl<R: RngCore> CompatShim<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            intercepted_reads: 0,
        }
    }

    /// Number of incidental reads neutralized so far.
    pub fn intercepted_reads(&self) -> usize {
        self.intercepted_reads
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: RngCore> RngCore for CompatShim<R> {
    fn generate(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError> {
        self.inner.generate(output)
    }
}

impl<R: RngCore> IncidentalReadRng for CompatShim<R> {
    fn generate_incidental(&mut self, output: &mut [u8]) -> Result<(), RngGenerateError> {
        output.fill(INCIDENTAL_READ_FILLER);
        self.intercepted_reads += 1;
        tracing::debug!(
            len = output.len(),
            profile = COMPAT_PROFILE,
            "neutralized incidental randomness read"
        );
        Ok(())
    }
}

#[test]
fn test_compat_shim_forwards_algorithmic_reads() {
    use super::ReplayRng;

    let stream: [u8; 6] = [1, 2, 3, 4, 5, 6];
    let mut shim = CompatShim::new(ReplayRng::new(&stream));
    let mut buf = [0u8; 4];
    shim.generate(&mut buf).unwrap();
    assert_eq!(buf, [1, 2, 3, 4]);
    assert_eq!(shim.intercepted_reads(), 0);
    assert_eq!(shim.into_inner().remaining_len(), 2);
}

#[test]
fn test_compat_shim_neutralizes_incidental_reads() {
    use super::ReplayRng;

    let stream: [u8; 4] = [0xa1, 0xa2, 0xa3, 0xa4];
    let mut shim = CompatShim::new(ReplayRng::new(&stream));

    let mut incidental = [0xffu8; 1];
    shim.generate_incidental(&mut incidental).unwrap();
    assert_eq!(incidental, [INCIDENTAL_READ_FILLER]);
    assert_eq!(shim.intercepted_reads(), 1);

    // The wrapped stream has not moved.
    let mut buf = [0u8; 2];
    shim.generate(&mut buf).unwrap();
    assert_eq!(buf, [0xa1, 0xa2]);

    shim.generate_incidental(&mut incidental).unwrap();
    shim.generate(&mut buf).unwrap();
    assert_eq!(buf, [0xa3, 0xa4]);
    assert_eq!(shim.intercepted_reads(), 2);
}
