#![allow(dead_code)]

use anyhow::Result;
use chrono::Utc;
use vouch_card::{Card, CardContent, CardRequest, KeyPair, RequestSigner};
use vouch_crypto::Ed25519Crypto;

pub const APP_ID: &str = "a1b2c3-test-application";

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vouch_card=debug")
        .with_test_writer()
        .try_init();
}

/// Keys for the card owner and the vouching application.
pub struct Parties {
    pub owner: KeyPair,
    pub app: KeyPair,
}

pub fn generate_parties() -> Parties {
    let crypto = Ed25519Crypto::new();
    Parties {
        owner: crypto.generate_keys(),
        app: crypto.generate_keys(),
    }
}

/// A request for `identity`, self-signed by the owner and signed by the app.
pub fn signed_request(identity: &str, parties: &Parties) -> Result<CardRequest> {
    let signer = RequestSigner::new(Ed25519Crypto::new());
    let content = CardContent::new(identity, "member", parties.owner.public_key.clone())?;
    let mut request = CardRequest::new(content)?;
    signer.self_sign(&mut request, &parties.owner.private_key)?;
    signer.authority_sign(&mut request, APP_ID, &parties.app.private_key)?;
    Ok(request)
}

/// Publish `request` as a card, the way the card service would.
pub fn publish(request: CardRequest) -> Result<Card> {
    Ok(request.into_card(Utc::now(), &Ed25519Crypto::new())?)
}
