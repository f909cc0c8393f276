use crate::{CardError, MalformedRequestError, Snapshot};
use std::fmt;
use std::str::FromStr;
use vouch_crypto::CryptoProvider;

/// Content-addressed card identifier: lowercase hex of the snapshot hash.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId {
    hex: String,
    digest: Vec<u8>,
}

impl CardId {
    /// Hash `snapshot` with the provider and label it.
    pub fn derive<C>(snapshot: &Snapshot, crypto: &C) -> Result<Self, CardError>
    where
        C: CryptoProvider + ?Sized,
    {
        let digest = crypto.hash(snapshot.as_bytes())?;
        Ok(Self {
            hex: hex::encode(&digest),
            digest,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// The raw digest bytes the hex string stands for.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

impl FromStr for CardId {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase_hex = s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if s.is_empty() || !lowercase_hex {
            return Err(MalformedRequestError::InvalidCardId(s.to_string()).into());
        }
        let digest = hex::decode(s)
            .map_err(|_| MalformedRequestError::InvalidCardId(s.to_string()))?;
        Ok(Self {
            hex: s.to_string(),
            digest,
        })
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({})", self.hex)
    }
}

impl AsRef<str> for CardId {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}
