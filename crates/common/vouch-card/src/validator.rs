use crate::{Card, CardError, CardId};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};
use vouch_crypto::{CryptoError, CryptoProvider, PublicKey};

/// Card id of the hosted card service, the built-in default verifier.
pub const SERVICE_CARD_ID: &str =
    "112fe106c55bbf1aa88eb77b47262ac4c95280990c15f2cab89e98661aff004a";

/// Ed25519 public key of the hosted card service.
pub const SERVICE_PUBLIC_KEY: [u8; 32] = [
    0x40, 0xbb, 0x59, 0xad, 0x11, 0xe9, 0x7b, 0x8a, 0x10, 0x1f, 0x8a, 0x4a, 0x81, 0x6f, 0xba, 0x32,
    0x56, 0x2f, 0xa0, 0xca, 0xea, 0x75, 0x79, 0x2b, 0x5a, 0xd3, 0x7e, 0x42, 0xa5, 0x45, 0x8d, 0xa7,
];

/// A signer the validator trusts, identified the same way it signs cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verifier {
    pub id: String,
    pub public_key: PublicKey,
}

impl Verifier {
    pub fn new(id: impl Into<String>, public_key: PublicKey) -> Self {
        Self {
            id: id.into(),
            public_key,
        }
    }

    /// The hosted card service.
    pub fn service() -> Self {
        Self::new(SERVICE_CARD_ID, PublicKey::from_bytes(SERVICE_PUBLIC_KEY.to_vec()))
    }
}

/// Why a card was turned down. Only ever logged; callers see `false`.
#[derive(Debug, Error)]
enum Rejection {
    #[error("claimed id {claimed} does not match snapshot id {expected}")]
    IdMismatch { claimed: CardId, expected: CardId },

    #[error("owner signature is missing")]
    MissingSelfSignature,

    #[error("owner signature does not verify")]
    InvalidSelfSignature,

    #[error("signature from verifier {0} is missing")]
    MissingSignature(String),

    #[error("signature from verifier {0} does not verify")]
    InvalidSignature(String),

    #[error("crypto provider failed: {0}")]
    Provider(#[from] CryptoError),

    #[error("card error: {0}")]
    Card(CardError),
}

impl From<CardError> for Rejection {
    fn from(err: CardError) -> Self {
        match err {
            CardError::Crypto(e) => Rejection::Provider(e),
            other => Rejection::Card(other),
        }
    }
}

/// Checks a card's signatures against a policy of required verifiers.
///
/// The owner's self-signature is always required. Every verifier added with
/// [`CardValidator::add_verifier`] is required too. The default verifiers
/// (the hosted service unless overridden) are required only after
/// [`CardValidator::add_default_verifiers`]; without that call the validator
/// is lenient about service signatures.
///
/// Registration takes `&mut self` and validation `&self`, so a validator
/// shared across threads is frozen for as long as it is shared.
#[derive(Debug, Clone)]
pub struct CardValidator<C> {
    crypto: C,
    verifiers: BTreeMap<String, PublicKey>,
    default_verifiers: Vec<Verifier>,
    require_default_verifiers: bool,
}

impl<C: CryptoProvider> CardValidator<C> {
    /// A lenient validator whose default verifier is the hosted service.
    pub fn new(crypto: C) -> Self {
        Self::with_default_verifiers(crypto, vec![Verifier::service()])
    }

    /// A lenient validator with its own set of default verifiers, for
    /// deployments that run their own card service.
    pub fn with_default_verifiers(crypto: C, default_verifiers: Vec<Verifier>) -> Self {
        Self {
            crypto,
            verifiers: BTreeMap::new(),
            default_verifiers,
            require_default_verifiers: false,
        }
    }

    /// Require a valid signature from `id` on every card.
    ///
    /// Registering an id again replaces its key.
    pub fn add_verifier(
        &mut self,
        id: impl Into<String>,
        public_key: PublicKey,
    ) -> Result<(), CardError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CardError::InvalidArgument("verifier id is empty"));
        }
        if public_key.is_empty() {
            return Err(CardError::InvalidArgument("verifier public key is empty"));
        }
        self.verifiers.insert(id, public_key);
        Ok(())
    }

    /// Switch to strict mode: the default verifiers become mandatory.
    pub fn add_default_verifiers(&mut self) {
        for verifier in &self.default_verifiers {
            self.verifiers
                .insert(verifier.id.clone(), verifier.public_key.clone());
        }
        self.require_default_verifiers = true;
    }

    pub fn requires_default_verifiers(&self) -> bool {
        self.require_default_verifiers
    }

    /// Currently mandatory verifiers, besides the card owner.
    pub fn verifiers(&self) -> impl Iterator<Item = (&str, &PublicKey)> {
        self.verifiers.iter().map(|(id, pk)| (id.as_str(), pk))
    }

    /// `true` only if every mandatory check passes. Never panics or errors on
    /// untrusted input.
    pub fn validate(&self, card: &Card) -> bool {
        match self.check(card) {
            Ok(()) => true,
            Err(Rejection::Provider(e)) => {
                warn!(card_id = %card.id(), error = %e, "crypto provider failed during validation");
                false
            }
            Err(reason) => {
                debug!(card_id = %card.id(), %reason, "card rejected");
                false
            }
        }
    }

    fn check(&self, card: &Card) -> Result<(), Rejection> {
        let snapshot = card.snapshot();

        let expected = CardId::derive(snapshot, &self.crypto)?;
        if &expected != card.id() {
            return Err(Rejection::IdMismatch {
                claimed: card.id().clone(),
                expected,
            });
        }

        let self_signature = card
            .signature(expected.as_str())
            .ok_or(Rejection::MissingSelfSignature)?;
        if !self
            .crypto
            .verify(snapshot.as_bytes(), self_signature, card.public_key())?
        {
            return Err(Rejection::InvalidSelfSignature);
        }

        let payload = snapshot.endorsement_payload(&expected);
        for (id, public_key) in &self.verifiers {
            let signature = card
                .signature(id)
                .ok_or_else(|| Rejection::MissingSignature(id.clone()))?;
            if !self.crypto.verify(&payload, signature, public_key)? {
                return Err(Rejection::InvalidSignature(id.clone()));
            }
        }

        Ok(())
    }
}
