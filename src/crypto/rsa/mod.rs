//! RSA implementation.

pub mod key;
pub mod keygen_impl;
