// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

pub mod cfg_zeroize;

/// Allocate a zero-filled buffer of length `len` to receive secret material.
pub fn alloc_zeroizing_vec(len: usize) -> cfg_zeroize::Zeroizing<Vec<u8>> {
    cfg_zeroize::Zeroizing::from(vec![0u8; len])
}
