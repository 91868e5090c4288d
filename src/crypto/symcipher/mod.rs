// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

//! Symmetric block cipher modes.

mod ctr_impl;

pub use ctr_impl::CtrKeystream;
