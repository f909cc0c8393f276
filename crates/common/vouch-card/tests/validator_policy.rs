mod helpers;

use chrono::Utc;
use helpers::{generate_parties, init_tracing, publish, signed_request, APP_ID};
use vouch_card::{
    Card, CardContent, CardId, CardRequest, CardSignature, CardValidator, RequestSigner, Snapshot,
    Verifier, SERVICE_CARD_ID,
};
use vouch_crypto::Ed25519Crypto;

#[test]
fn test_flipping_any_snapshot_byte_is_detected() {
    init_tracing();
    let parties = generate_parties();
    let card = publish(signed_request("alice", &parties).unwrap()).unwrap();

    let mut validator = CardValidator::new(Ed25519Crypto::new());
    validator
        .add_verifier(APP_ID, parties.app.public_key.clone())
        .unwrap();
    assert!(validator.validate(&card));

    let original = card.snapshot().as_bytes().to_vec();
    for i in 0..original.len() {
        let mut bytes = original.clone();
        bytes[i] ^= 0x01;

        // Some flips no longer decode at all, which is a rejection too.
        if let Ok(tampered) = Card::new(
            card.id().clone(),
            Snapshot::from_bytes(bytes),
            card.signatures().to_vec(),
            card.created_at(),
        ) {
            assert!(!validator.validate(&tampered), "flip at byte {} accepted", i);
        }
    }
}

#[test]
fn test_tampered_identity_with_original_id_fails() {
    let parties = generate_parties();
    let card = publish(signed_request("alice", &parties).unwrap()).unwrap();

    let text = std::str::from_utf8(card.snapshot().as_bytes()).unwrap();
    let forged = text.replace("\"alice\"", "\"mallory\"");
    let tampered = Card::new(
        card.id().clone(),
        Snapshot::from_bytes(forged.into_bytes()),
        card.signatures().to_vec(),
        card.created_at(),
    )
    .unwrap();

    assert_eq!(tampered.identity(), "mallory");
    assert!(!CardValidator::new(Ed25519Crypto::new()).validate(&tampered));
}

#[test]
fn test_claimed_id_substitution_fails() {
    let parties = generate_parties();
    let alice = publish(signed_request("alice", &parties).unwrap()).unwrap();
    let bob = publish(signed_request("bob", &parties).unwrap()).unwrap();

    let substituted = Card::new(
        bob.id().clone(),
        alice.snapshot().clone(),
        alice.signatures().to_vec(),
        alice.created_at(),
    )
    .unwrap();
    assert!(!CardValidator::new(Ed25519Crypto::new()).validate(&substituted));
}

#[test]
fn test_authority_signature_without_self_signature_fails() {
    let crypto = Ed25519Crypto::new();
    let parties = generate_parties();
    let signer = RequestSigner::new(crypto);

    let content = CardContent::new("alice", "member", parties.owner.public_key.clone()).unwrap();
    let mut request = CardRequest::new(content).unwrap();
    signer
        .authority_sign(&mut request, APP_ID, &parties.app.private_key)
        .unwrap();
    let card = publish(request).unwrap();

    let mut validator = CardValidator::new(crypto);
    validator.add_verifier(APP_ID, parties.app.public_key).unwrap();
    assert!(!validator.validate(&card));
}

#[test]
fn test_self_signature_by_wrong_key_fails() {
    let crypto = Ed25519Crypto::new();
    let parties = generate_parties();
    let intruder = crypto.generate_keys();
    let signer = RequestSigner::new(crypto);

    // Content names the owner's key, but someone else signs it.
    let content = CardContent::new("alice", "member", parties.owner.public_key.clone()).unwrap();
    let mut request = CardRequest::new(content).unwrap();
    signer.self_sign(&mut request, &intruder.private_key).unwrap();
    signer
        .authority_sign(&mut request, APP_ID, &parties.app.private_key)
        .unwrap();
    let card = publish(request).unwrap();

    let mut validator = CardValidator::new(crypto);
    validator.add_verifier(APP_ID, parties.app.public_key).unwrap();
    assert!(!validator.validate(&card));
}

#[test]
fn test_lenient_and_strict_modes() {
    let parties = generate_parties();
    let card = publish(signed_request("alice", &parties).unwrap()).unwrap();
    assert!(card.signature(SERVICE_CARD_ID).is_none());

    let mut validator = CardValidator::new(Ed25519Crypto::new());
    validator
        .add_verifier(APP_ID, parties.app.public_key.clone())
        .unwrap();
    assert!(validator.validate(&card));

    validator.add_default_verifiers();
    assert!(!validator.validate(&card));
}

#[test]
fn test_strict_mode_accepts_service_signed_card() {
    let crypto = Ed25519Crypto::new();
    let parties = generate_parties();
    let service = crypto.generate_keys();
    let signer = RequestSigner::new(crypto);

    let mut request = signed_request("alice", &parties).unwrap();
    signer
        .authority_sign(&mut request, "private-service", &service.private_key)
        .unwrap();
    let card = publish(request).unwrap();

    let mut validator = CardValidator::with_default_verifiers(
        crypto,
        vec![Verifier::new("private-service", service.public_key.clone())],
    );
    validator.add_default_verifiers();
    assert!(validator.validate(&card));

    validator
        .add_verifier(APP_ID, parties.app.public_key.clone())
        .unwrap();
    assert!(validator.validate(&card));
}

#[test]
fn test_owner_signature_copied_to_service_slot_fails() {
    let crypto = Ed25519Crypto::new();
    let parties = generate_parties();
    let service = crypto.generate_keys();

    let mut card = publish(signed_request("alice", &parties).unwrap()).unwrap();
    let owner_sig = card.signature(card.id().as_str()).unwrap().to_vec();
    card.add_signature(CardSignature::new("private-service", owner_sig));

    let mut validator = CardValidator::with_default_verifiers(
        crypto,
        vec![Verifier::new("private-service", service.public_key)],
    );
    validator.add_default_verifiers();
    assert!(!validator.validate(&card));
}

#[test]
fn test_unregistered_signatures_are_ignored() {
    let parties = generate_parties();
    let mut card = publish(signed_request("alice", &parties).unwrap()).unwrap();
    card.add_signature(CardSignature::new("someone-else", vec![0u8; 64]));

    // APP_ID is not registered; neither it nor the stray signature matter.
    assert!(CardValidator::new(Ed25519Crypto::new()).validate(&card));
}

#[test]
fn test_validator_shared_across_threads() {
    let parties = generate_parties();
    let card = publish(signed_request("alice", &parties).unwrap()).unwrap();

    let mut validator = CardValidator::new(Ed25519Crypto::new());
    validator
        .add_verifier(APP_ID, parties.app.public_key.clone())
        .unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| validator.validate(&card)))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

#[test]
fn test_card_id_is_recomputed_not_trusted() {
    let parties = generate_parties();
    let request = signed_request("alice", &parties).unwrap();
    let expected = request.card_id(&Ed25519Crypto::new()).unwrap();
    let card = request.into_card(Utc::now(), &Ed25519Crypto::new()).unwrap();
    assert_eq!(card.id(), &expected);

    let bogus: CardId = "00ff".parse().unwrap();
    let relabeled = Card::new(
        bogus,
        card.snapshot().clone(),
        card.signatures().to_vec(),
        card.created_at(),
    )
    .unwrap();
    assert!(!CardValidator::new(Ed25519Crypto::new()).validate(&relabeled));
}
