use crate::encoding::{base64_bytes, base64_map};
use crate::{
    Card, CardContent, CardError, CardId, CardSignature, MalformedRequestError, SignatureSet,
    Snapshot,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use vouch_crypto::CryptoProvider;

/// Transport envelope: `{"content_snapshot": <base64>, "meta": {"signs": {id: <base64>}}}`.
#[derive(Serialize, Deserialize)]
struct SignedRequestModel {
    #[serde(with = "base64_bytes")]
    content_snapshot: Vec<u8>,
    meta: SignedRequestMeta,
}

#[derive(Serialize, Deserialize)]
struct SignedRequestMeta {
    #[serde(with = "base64_map")]
    signs: BTreeMap<String, Vec<u8>>,
}

/// A card on its way to publication: the canonical snapshot plus the
/// signatures gathered so far.
///
/// The snapshot is fixed at creation; signing only grows the signature set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequest {
    content: CardContent,
    snapshot: Snapshot,
    signatures: SignatureSet,
}

impl CardRequest {
    /// Start a request for `content`, encoding its snapshot.
    pub fn new(content: CardContent) -> Result<Self, CardError> {
        let snapshot = Snapshot::encode(&content)?;
        Ok(Self {
            content,
            snapshot,
            signatures: SignatureSet::new(),
        })
    }

    pub fn content(&self) -> &CardContent {
        &self.content
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn signatures(&self) -> &SignatureSet {
        &self.signatures
    }

    /// Identifier of the card this request would create.
    pub fn card_id<C>(&self, crypto: &C) -> Result<CardId, CardError>
    where
        C: CryptoProvider + ?Sized,
    {
        CardId::derive(&self.snapshot, crypto)
    }

    /// Record `signature` under `signer_id`, replacing an earlier one.
    pub fn add_signature(
        &mut self,
        signer_id: impl Into<String>,
        signature: Vec<u8>,
    ) -> Result<(), CardError> {
        let signer_id = signer_id.into();
        if signer_id.is_empty() {
            return Err(CardError::InvalidArgument("signer id is empty"));
        }
        if signature.is_empty() {
            return Err(CardError::InvalidArgument("signature is empty"));
        }
        self.signatures.insert(signer_id, signature);
        Ok(())
    }

    /// Builder form of [`CardRequest::add_signature`].
    pub fn with_signature(
        mut self,
        signer_id: impl Into<String>,
        signature: Vec<u8>,
    ) -> Result<Self, CardError> {
        self.add_signature(signer_id, signature)?;
        Ok(self)
    }

    /// Serialize the envelope to JSON and base64 it.
    ///
    /// Output is byte-stable: exporting the same request twice yields the
    /// same string.
    pub fn export(&self) -> Result<String, CardError> {
        let model = SignedRequestModel {
            content_snapshot: self.snapshot.as_bytes().to_vec(),
            meta: SignedRequestMeta {
                signs: self.signatures.as_map().clone(),
            },
        };
        let json = serde_json::to_vec(&model).map_err(CardError::Encoding)?;
        Ok(STANDARD.encode(json))
    }

    /// Rebuild a request from [`CardRequest::export`] output.
    ///
    /// Signatures are carried over as-is; nothing is verified here.
    pub fn import(encoded: &str) -> Result<Self, CardError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(CardError::InvalidArgument("request is empty or whitespace"));
        }

        let json = STANDARD
            .decode(encoded.as_bytes())
            .map_err(MalformedRequestError::from)?;
        let model: SignedRequestModel =
            serde_json::from_slice(&json).map_err(MalformedRequestError::Envelope)?;

        if model.meta.signs.keys().any(|id| id.is_empty()) {
            return Err(MalformedRequestError::EmptySignerId.into());
        }

        let snapshot = Snapshot::from_bytes(model.content_snapshot);
        let content = snapshot.decode_content()?;
        let signatures = SignatureSet::from(model.meta.signs);

        debug!(
            identity = content.identity(),
            signatures = signatures.len(),
            "imported card request"
        );

        Ok(Self {
            content,
            snapshot,
            signatures,
        })
    }

    /// Materialize the card this request describes, as published at `created_at`.
    pub fn into_card<C>(self, created_at: DateTime<Utc>, crypto: &C) -> Result<Card, CardError>
    where
        C: CryptoProvider + ?Sized,
    {
        let id = CardId::derive(&self.snapshot, crypto)?;
        let signatures = self
            .signatures
            .iter()
            .map(|(signer_id, sig)| CardSignature::new(signer_id, sig.to_vec()))
            .collect::<Vec<_>>();
        Card::new(id, self.snapshot, signatures, created_at)
    }
}
