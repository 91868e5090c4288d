// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

pub mod ct_cmp;
#[cfg(any(feature = "ed25519", feature = "x25519"))]
pub mod curve25519;
#[cfg(feature = "ecc")]
pub mod ecc;
pub mod kdf;
pub mod rng;
#[cfg(feature = "rsa")]
pub mod rsa;
pub mod symcipher;
