use criterion::{criterion_group, criterion_main, Criterion};
use vouch_card::{CardContent, CardRequest, CardValidator, Ed25519Crypto, RequestSigner};

fn bench_validate(c: &mut Criterion) {
    let crypto = Ed25519Crypto::new();
    let owner = crypto.generate_keys();
    let app = crypto.generate_keys();
    let signer = RequestSigner::new(crypto);

    let content = CardContent::new("bench-user", "member", owner.public_key.clone())
        .unwrap()
        .with_data([("team", "bench")]);
    let mut request = CardRequest::new(content).unwrap();
    signer.self_sign(&mut request, &owner.private_key).unwrap();
    signer
        .authority_sign(&mut request, "bench-app", &app.private_key)
        .unwrap();
    let exported = request.export().unwrap();
    let card = request.into_card(chrono::Utc::now(), &crypto).unwrap();

    let mut validator = CardValidator::new(crypto);
    validator.add_verifier("bench-app", app.public_key).unwrap();

    c.bench_function("card_validate", |b| {
        b.iter(|| assert!(validator.validate(&card)));
    });
    c.bench_function("card_request_import", |b| {
        b.iter(|| CardRequest::import(&exported).unwrap());
    });
}
criterion_group!(benches, bench_validate);
criterion_main!(benches);
