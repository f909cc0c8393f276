use crate::CardError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use vouch_crypto::PublicKey;

/// Visibility of a card: private to one application, or globally published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardScope {
    #[default]
    Application,
    Global,
}

impl fmt::Display for CardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardScope::Application => f.write_str("application"),
            CardScope::Global => f.write_str("global"),
        }
    }
}

/// Identity kinds accepted for globally scoped cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalIdentityType {
    #[default]
    Email,
    Application,
}

impl GlobalIdentityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalIdentityType::Email => "email",
            GlobalIdentityType::Application => "application",
        }
    }
}

/// Optional metadata about the device that holds the card's private key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub device: Option<String>,
    pub device_name: Option<String>,
}

impl DeviceInfo {
    pub fn new(device: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            device: Some(device.into()),
            device_name: Some(device_name.into()),
        }
    }
}

/// The signed part of a card: who the key belongs to and what it is for.
///
/// Values are immutable once built; every signature is computed over the
/// canonical encoding of this content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    identity: String,
    identity_type: String,
    public_key: PublicKey,
    data: BTreeMap<String, String>,
    scope: CardScope,
    info: Option<DeviceInfo>,
}

impl CardContent {
    /// Application-scoped content for `identity` and its public key.
    pub fn new(
        identity: impl Into<String>,
        identity_type: impl Into<String>,
        public_key: PublicKey,
    ) -> Result<Self, CardError> {
        Self::from_parts(
            identity.into(),
            identity_type.into(),
            public_key,
            BTreeMap::new(),
            CardScope::Application,
            None,
        )
    }

    /// Globally scoped content; the identity type comes from `identity_type`.
    pub fn new_global(
        identity: impl Into<String>,
        public_key: PublicKey,
        identity_type: GlobalIdentityType,
    ) -> Result<Self, CardError> {
        Self::from_parts(
            identity.into(),
            identity_type.as_str().to_string(),
            public_key,
            BTreeMap::new(),
            CardScope::Global,
            None,
        )
    }

    pub(crate) fn from_parts(
        identity: String,
        identity_type: String,
        public_key: PublicKey,
        data: BTreeMap<String, String>,
        scope: CardScope,
        info: Option<DeviceInfo>,
    ) -> Result<Self, CardError> {
        if identity.is_empty() {
            return Err(CardError::InvalidArgument("identity is empty"));
        }
        if public_key.is_empty() {
            return Err(CardError::InvalidArgument("public key is empty"));
        }
        Ok(Self {
            identity,
            identity_type,
            public_key,
            data,
            scope,
            info,
        })
    }

    /// Attach custom fields. Insertion order is irrelevant to the encoding.
    pub fn with_data<I, K, V>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.data = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_device_info(mut self, info: DeviceInfo) -> Self {
        self.info = Some(info);
        self
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn identity_type(&self) -> &str {
        &self.identity_type
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn scope(&self) -> CardScope {
        self.scope
    }

    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.info.as_ref()
    }
}
