use crate::content::{CardContent, CardScope, DeviceInfo};
use crate::encoding::base64_bytes;
use crate::{CardError, CardId, MalformedRequestError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vouch_crypto::PublicKey;

/// Version of the snapshot byte layout produced by [`Snapshot::encode`].
///
/// Layout 1.0 is compact JSON with the members, in order: `identity`,
/// `identity_type`, `public_key` (standard padded base64), `scope`
/// (`"application"` | `"global"`), `data` (object with keys in byte order),
/// `info` (`null`, or `{"device":…,"device_name":…}` with `null` members).
pub const CARD_VERSION: &str = "1.0";

/// Wire model of the snapshot. Field order here is the encoded order.
#[derive(Serialize, Deserialize)]
struct SnapshotModel {
    identity: String,
    identity_type: String,
    #[serde(with = "base64_bytes")]
    public_key: Vec<u8>,
    #[serde(default)]
    scope: CardScope,
    #[serde(default)]
    data: BTreeMap<String, String>,
    #[serde(default)]
    info: Option<DeviceInfo>,
}

/// Canonical bytes of a [`CardContent`]; the exact input to the card id and
/// to every signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Vec<u8>);

impl Snapshot {
    /// Encode `content` in the fixed [`CARD_VERSION`] layout.
    pub fn encode(content: &CardContent) -> Result<Self, CardError> {
        let model = SnapshotModel {
            identity: content.identity().to_string(),
            identity_type: content.identity_type().to_string(),
            public_key: content.public_key().to_vec(),
            scope: content.scope(),
            data: content.data().clone(),
            info: content.device_info().cloned(),
        };
        serde_json::to_vec(&model)
            .map(Self)
            .map_err(CardError::Encoding)
    }

    /// Wrap bytes received from elsewhere. The bytes are kept verbatim.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse the snapshot back into the content it encodes.
    pub fn decode_content(&self) -> Result<CardContent, CardError> {
        if self.0.is_empty() {
            return Err(MalformedRequestError::EmptySnapshot.into());
        }
        let model: SnapshotModel =
            serde_json::from_slice(&self.0).map_err(MalformedRequestError::Snapshot)?;

        if model.identity.is_empty() {
            return Err(MalformedRequestError::MissingContent("identity").into());
        }
        if model.public_key.is_empty() {
            return Err(MalformedRequestError::MissingContent("public_key").into());
        }

        CardContent::from_parts(
            model.identity,
            model.identity_type,
            PublicKey::from_bytes(model.public_key),
            model.data,
            model.scope,
            model.info,
        )
    }

    /// Payload signed by authorities and services: the snapshot followed by
    /// the raw digest behind `id`, binding the signature to that identifier.
    pub fn endorsement_payload(&self, id: &CardId) -> Vec<u8> {
        let digest = id.digest();
        let mut payload = Vec::with_capacity(self.0.len() + digest.len());
        payload.extend_from_slice(&self.0);
        payload.extend_from_slice(digest);
        payload
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Snapshot {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
