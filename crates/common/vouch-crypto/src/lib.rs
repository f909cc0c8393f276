//! Vouch Crypto – the narrow crypto seam used by vouch cards.
//!
//! - `CryptoProvider` exposes `hash`, `sign` and `verify` over opaque key buffers.
//! - `Ed25519Crypto` implements it with Ed25519 signatures and SHA-256 digests.
//! - Zero `unsafe`; `#![forbid(unsafe_code)]`.

#![forbid(unsafe_code)]

mod ed25519;
mod error;
mod keys;
mod provider;

pub use ed25519::{Ed25519Crypto, ED25519_KEY_LENGTH, ED25519_SIGNATURE_LENGTH};
pub use error::CryptoError;
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use provider::CryptoProvider;
