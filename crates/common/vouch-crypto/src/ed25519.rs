use crate::{CryptoError, CryptoProvider, KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Length in bytes of an Ed25519 seed or public key.
pub const ED25519_KEY_LENGTH: usize = 32;

/// Length in bytes of an Ed25519 signature.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Ed25519 signatures over SHA-256 content hashes.
///
/// Private keys are 32-byte seeds, public keys are the 32-byte compressed
/// point, signatures are 64 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Crypto;

impl Ed25519Crypto {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new random keypair.
    pub fn generate_keys(&self) -> KeyPair {
        let sk = SigningKey::generate(&mut OsRng);
        KeyPair {
            private_key: PrivateKey::from_bytes(sk.to_bytes().to_vec()),
            public_key: PublicKey::from_bytes(sk.verifying_key().to_bytes().to_vec()),
        }
    }

    /// Import a private key from its raw seed bytes.
    pub fn import_private_key(&self, bytes: &[u8]) -> Result<PrivateKey, CryptoError> {
        signing_key(bytes)?;
        Ok(PrivateKey::from_bytes(bytes.to_vec()))
    }

    /// Derive the public half of `private_key`.
    pub fn extract_public_key(&self, private_key: &PrivateKey) -> Result<PublicKey, CryptoError> {
        let sk = signing_key(private_key.as_bytes())?;
        Ok(PublicKey::from_bytes(sk.verifying_key().to_bytes().to_vec()))
    }
}

fn key_array(bytes: &[u8]) -> Result<[u8; ED25519_KEY_LENGTH], CryptoError> {
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            expected_len: ED25519_KEY_LENGTH,
            found_len: bytes.len(),
        })
}

fn signing_key(bytes: &[u8]) -> Result<SigningKey, CryptoError> {
    Ok(SigningKey::from_bytes(&key_array(bytes)?))
}

fn verifying_key(bytes: &[u8]) -> Result<VerifyingKey, CryptoError> {
    VerifyingKey::from_bytes(&key_array(bytes)?)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))
}

impl CryptoProvider for Ed25519Crypto {
    fn hash(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(Sha256::digest(data).to_vec())
    }

    fn sign(&self, data: &[u8], private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError> {
        let sk = signing_key(private_key.as_bytes())?;
        Ok(sk.sign(data).to_bytes().to_vec())
    }

    fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> Result<bool, CryptoError> {
        let pk = verifying_key(public_key.as_bytes())?;
        if signature.len() != ED25519_SIGNATURE_LENGTH {
            return Ok(false);
        }
        let sig = match Signature::from_slice(signature) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };
        Ok(pk.verify(data, &sig).is_ok())
    }
}
