#![no_std]

//! Deterministic derivation of private keys from a password and a realm.
//!
//! The same password, realm and [`KeyType`] always yield the same key, so
//! that one memorized password regenerates any number of distinct keys on
//! demand. Keys are compatible with those produced by `gokey`.
//!
//! ```no_run
//! use pwkeygen::{derive, encoding, KeyType};
//!
//! let key = derive(b"pass", "example.com", KeyType::Ed25519)?;
//! let pem = encoding::to_pem(&key)?;
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```

extern crate alloc;

pub mod crypto;
mod derive;
pub mod encoding;
mod error;
mod key_type;
#[cfg(feature = "seed")]
pub mod seed;
mod utils;

pub use crypto::rng::{
    compat_shim::{CompatShim, COMPAT_PROFILE, INCIDENTAL_READ_FILLER},
    drng::Drng,
    IncidentalReadRng, RngCore, RngGenerateError,
};
#[cfg(feature = "seed")]
pub use derive::derive_with_seed;
pub use derive::{derive, new_deterministic_stream, PrivateKey};
pub use error::{Error, InternalError};
pub use key_type::KeyType;
