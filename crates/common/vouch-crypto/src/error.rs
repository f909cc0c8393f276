use thiserror::Error;

/// Errors raised by a crypto provider.
///
/// A signature that simply fails to verify is not an error; providers report
/// that as `Ok(false)` from [`crate::CryptoProvider::verify`].
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key: expected {expected_len} bytes, found {found_len} bytes")]
    InvalidKeyLength { expected_len: usize, found_len: usize },

    #[error("invalid key material: {0}")]
    InvalidKey(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("hashing failed: {0}")]
    Hashing(String),
}
