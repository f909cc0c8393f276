use crate::{CryptoError, PrivateKey, PublicKey};

/// Primitive operations the card core needs from a crypto backend.
///
/// Implementations are passed explicitly to whatever needs them; there is no
/// process-wide provider.
pub trait CryptoProvider: Send + Sync {
    /// Digest `data` with the provider's 256-bit hash.
    fn hash(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Sign `data` with `private_key`, returning the raw signature bytes.
    fn sign(&self, data: &[u8], private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError>;

    /// Check `signature` over `data` against `public_key`.
    ///
    /// Returns `Ok(false)` when the signature is wrong or malformed, and `Err`
    /// only when the provider itself cannot work with the inputs.
    fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> Result<bool, CryptoError>;
}

impl<T: CryptoProvider + ?Sized> CryptoProvider for &T {
    fn hash(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        (**self).hash(data)
    }

    fn sign(&self, data: &[u8], private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError> {
        (**self).sign(data, private_key)
    }

    fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> Result<bool, CryptoError> {
        (**self).verify(data, signature, public_key)
    }
}

impl<T: CryptoProvider + ?Sized> CryptoProvider for std::sync::Arc<T> {
    fn hash(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        (**self).hash(data)
    }

    fn sign(&self, data: &[u8], private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError> {
        (**self).sign(data, private_key)
    }

    fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> Result<bool, CryptoError> {
        (**self).verify(data, signature, public_key)
    }
}
