use crate::{CardContent, CardError, CardId, CardScope, DeviceInfo, Snapshot, CARD_VERSION};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use vouch_crypto::PublicKey;

/// One signature on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSignature {
    pub signer_id: String,
    pub signature: Vec<u8>,
}

impl CardSignature {
    pub fn new(signer_id: impl Into<String>, signature: Vec<u8>) -> Self {
        Self {
            signer_id: signer_id.into(),
            signature,
        }
    }
}

/// A published card: its claimed id, the snapshot it was issued with, the
/// content parsed from that snapshot, and the signatures vouching for it.
///
/// The id is whatever the issuer claimed; only [`crate::CardValidator`]
/// checks it against the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    content: CardContent,
    snapshot: Snapshot,
    signatures: Vec<CardSignature>,
    created_at: DateTime<Utc>,
    version: String,
}

impl Card {
    /// Assemble a card from received parts. The snapshot must decode.
    pub fn new(
        id: CardId,
        snapshot: Snapshot,
        signatures: impl IntoIterator<Item = CardSignature>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CardError> {
        let content = snapshot.decode_content()?;
        let mut card = Self {
            id,
            content,
            snapshot,
            signatures: Vec::new(),
            created_at,
            version: CARD_VERSION.to_string(),
        };
        for signature in signatures {
            card.add_signature(signature);
        }
        Ok(card)
    }

    /// Override the protocol version recorded for this card.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Add a late signature, e.g. an authority co-signing after publication.
    ///
    /// A signature from a signer already on the card replaces the old one in
    /// place; otherwise it is appended.
    pub fn add_signature(&mut self, signature: CardSignature) {
        match self
            .signatures
            .iter_mut()
            .find(|existing| existing.signer_id == signature.signer_id)
        {
            Some(existing) => existing.signature = signature.signature,
            None => self.signatures.push(signature),
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn content(&self) -> &CardContent {
        &self.content
    }

    pub fn identity(&self) -> &str {
        self.content.identity()
    }

    pub fn identity_type(&self) -> &str {
        self.content.identity_type()
    }

    pub fn public_key(&self) -> &PublicKey {
        self.content.public_key()
    }

    pub fn custom_fields(&self) -> &BTreeMap<String, String> {
        self.content.data()
    }

    pub fn scope(&self) -> CardScope {
        self.content.scope()
    }

    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.content.device_info()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Signatures in the order they were received.
    pub fn signatures(&self) -> &[CardSignature] {
        &self.signatures
    }

    pub fn signature(&self, signer_id: &str) -> Option<&[u8]> {
        self.signatures
            .iter()
            .find(|s| s.signer_id == signer_id)
            .map(|s| s.signature.as_slice())
    }
}
