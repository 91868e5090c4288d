// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

pub mod curve;
mod gen_random_scalar_impl;
pub mod key;
