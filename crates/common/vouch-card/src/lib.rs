//! Vouch Card – signed identity cards binding an identity to a public key.
//!
//! - Canonical `Snapshot` encoding of card content (fixed JSON layout, see [`CARD_VERSION`]).
//! - Content-addressed `CardId` derived from the snapshot hash.
//! - `RequestSigner` for owner, authority and service signatures.
//! - `CardRequest` export/import through a base64 transport envelope.
//! - `CardValidator` with lenient and strict (default verifier) policies.
//! - Zero `unsafe`; `#![forbid(unsafe_code)]`.

#![forbid(unsafe_code)]

mod card;
mod card_id;
mod config;
mod content;
mod encoding;
mod error;
mod request;
mod signature_set;
mod signer;
mod snapshot;
mod validator;

pub use card::{Card, CardSignature};
pub use card_id::CardId;
pub use config::{ValidatorConfig, VerifierConfig};
pub use content::{CardContent, CardScope, DeviceInfo, GlobalIdentityType};
pub use error::{CardError, MalformedRequestError};
pub use request::CardRequest;
pub use signature_set::SignatureSet;
pub use signer::RequestSigner;
pub use snapshot::{Snapshot, CARD_VERSION};
pub use validator::{CardValidator, Verifier, SERVICE_CARD_ID, SERVICE_PUBLIC_KEY};

pub use vouch_crypto::{CryptoError, CryptoProvider, Ed25519Crypto, KeyPair, PrivateKey, PublicKey};
