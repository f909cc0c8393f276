use thiserror::Error;
use vouch_crypto::CryptoError;

/// Errors raised by card construction, signing and request transport.
///
/// Trust-policy failures are not errors: [`crate::CardValidator::validate`]
/// reports them as `false`.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("malformed card request: {0}")]
    MalformedRequest(#[from] MalformedRequestError),

    #[error("crypto provider error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("failed to encode card snapshot: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("invalid validator configuration: {0}")]
    Config(String),
}

/// Why an encoded request or snapshot could not be reconstructed.
#[derive(Debug, Error)]
pub enum MalformedRequestError {
    #[error("base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid envelope structure: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("invalid content snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("content snapshot is empty")]
    EmptySnapshot,

    #[error("content snapshot is missing {0}")]
    MissingContent(&'static str),

    #[error("signature entry has an empty signer id")]
    EmptySignerId,

    #[error("card id is not a lowercase hex digest: {0}")]
    InvalidCardId(String),
}
