// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

//! Zeroization of secret material, switchable through the `zeroize` Cargo
//! feature.
//!
//! With the feature enabled, everything here resolves to the
//! [`zeroize`](https://docs.rs/zeroize) crate. Without it, trivial stand-ins
//! with the same API are provided so that the rest of the crate can wipe its
//! stream state, primes and scalars unconditionally.

#[cfg(feature = "zeroize")]
pub use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Wrapper wiping the contained secret on drop.
///
/// Aliases [`zeroize::Zeroizing`](https://docs.rs/zeroize/latest/zeroize/struct.Zeroizing.html)
/// if the `zeroize` feature is enabled.
#[cfg(not(feature = "zeroize"))]
pub type Zeroizing<T> = NotZeroizing<T>;

/// Transparent stand-in for `Zeroizing` which leaves the memory alone on
/// drop.
#[cfg(not(feature = "zeroize"))]
#[derive(Clone)]
#[repr(transparent)]
pub struct NotZeroizing<T>(T);

#[cfg(not(feature = "zeroize"))]
impl<T> core::ops::Deref for NotZeroizing<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(not(feature = "zeroize"))]
impl<T> core::ops::DerefMut for NotZeroizing<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(not(feature = "zeroize"))]
impl<T> From<T> for NotZeroizing<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

#[cfg(not(feature = "zeroize"))]
pub trait Zeroize {
    fn zeroize(&mut self);
}

#[cfg(not(feature = "zeroize"))]
impl<T: ?Sized> Zeroize for T {
    fn zeroize(&mut self) {}
}

#[cfg(not(feature = "zeroize"))]
pub trait ZeroizeOnDrop {}

#[cfg(feature = "zeroize")]
#[test]
fn test_zeroizing_deref() {
    let mut secret = Zeroizing::from([0u8; 4]);
    secret[1] = 0xa5;
    assert_eq!(*secret, [0x00, 0xa5, 0x00, 0x00]);
    secret.zeroize();
    assert_eq!(*secret, [0u8; 4]);
}
