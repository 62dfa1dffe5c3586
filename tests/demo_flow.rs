//! Integration tests for the demo core
//!
//! These tests exercise the full flow the CLI drives:
//! 1. RSA key generation and modulus export
//! 2. Signed, hash-linked ledger appends
//! 3. Verification against right and wrong keys, and after tampering
//! 4. The scripted quantum attack and the forged transaction
//!
//! 1024-bit keys throughout: smallest supported size, fastest to generate.

use qvb_demo::{
    attack, classical_factorization_years, quantum_factorization_estimate, verify_record, KeyPair,
    Ledger, Session, StatevectorBackend, GENESIS_PREVIOUS_HASH,
};

/* ===== TEST 1: KEYS AND MODULUS ===== */

#[test]
fn test_modulus_bit_length_matches_request() {
    let keys = KeyPair::generate(1024).expect("keygen should succeed");
    let bits = keys.modulus_bits();
    assert!(
        (1023..=1024).contains(&bits),
        "modulus of a 1024-bit key should be 1023 or 1024 bits, got {bits}"
    );
}

/* ===== TEST 2: CHAIN LINKAGE AND SIGNATURES ===== */

#[test]
fn test_two_transaction_scenario() {
    let keys = KeyPair::generate(1024).expect("keygen should succeed");
    let unrelated = KeyPair::generate(1024).expect("keygen should succeed");

    let mut ledger = Ledger::new();
    assert!(ledger.tail().is_none());

    ledger
        .append("Alice", "Bob", 10.0, &keys)
        .expect("first append should succeed");
    ledger
        .append("Bob", "Attacker", 1_000_000.0, &keys)
        .expect("second append should succeed");

    let records = ledger.records();
    assert_eq!(ledger.len(), 2);
    assert_eq!(records[0].previous_hash, GENESIS_PREVIOUS_HASH);
    assert_eq!(records[1].previous_hash, records[0].hash);
    assert_eq!(records[0].index, 0);
    assert_eq!(records[1].index, 1);
    assert_eq!(ledger.tail().expect("non-empty ledger").index, 1);

    // Right key verifies, unrelated key does not
    assert!(verify_record(&records[0], keys.verifying_key()));
    assert!(verify_record(&records[1], keys.verifying_key()));
    assert!(!verify_record(&records[0], unrelated.verifying_key()));
}

#[test]
fn test_tampered_payload_fails_verification() {
    let keys = KeyPair::generate(1024).expect("keygen should succeed");
    let mut ledger = Ledger::new();
    let record = ledger
        .append("Alice", "Bob", 10.0, &keys)
        .expect("append should succeed")
        .clone();
    assert!(verify_record(&record, keys.verifying_key()));

    // Flip a single character of the payload: the amount digit
    let mut tampered = record.clone();
    tampered.payload = tampered.payload.replacen("10", "99", 1);
    assert_ne!(tampered.payload, record.payload);
    assert!(!verify_record(&tampered, keys.verifying_key()));

    // Truncated signature bytes are a false, not a panic
    let mut broken = record;
    broken.signature.truncate(4);
    assert!(!verify_record(&broken, keys.verifying_key()));
}

#[test]
fn test_salted_signatures_differ_but_both_verify() {
    let keys = KeyPair::generate(1024).expect("keygen should succeed");
    let mut ledger = Ledger::new();
    let first = ledger
        .append("Alice", "Bob", 10.0, &keys)
        .expect("append should succeed")
        .clone();
    let second = ledger
        .append("Alice", "Bob", 10.0, &keys)
        .expect("append should succeed")
        .clone();

    // PSS salting: same payload shape, different signature bits
    assert_ne!(first.signature, second.signature);
    assert!(verify_record(&first, keys.verifying_key()));
    assert!(verify_record(&second, keys.verifying_key()));
}

/* ===== TEST 3: SCRIPTED ATTACK AND FORGERY ===== */

#[test]
fn test_attack_then_forge_flow() {
    let mut session = Session::new(1024);
    let backend = StatevectorBackend::new();

    session
        .create_transaction("Alice", "Bob", 10.0)
        .expect("transaction should append");
    assert!(session.keys().is_some(), "keys are generated on demand");

    let report = attack::run(&mut session, &backend, 256).expect("attack should run");
    assert!(report.key_extracted, "the extraction is scripted");
    assert_eq!(report.counts.values().sum::<u32>(), 256);
    assert!(session.attack_completed());

    let forged = attack::forge(&mut session).expect("forge should append");
    assert_eq!(session.ledger().len(), 2);
    assert!(forged.payload.starts_with("Bob->Attacker:1000000:"));
    assert_eq!(
        forged.previous_hash,
        session.ledger().records()[0].hash,
        "forged record links into the chain"
    );
    // The forgery is signed with the real key, so it verifies
    assert!(session.verify(&forged));
    assert!(session.forged());

    session.reset_attack();
    assert!(!session.attack_completed());
    assert!(!session.forged());
    assert_eq!(session.ledger().len(), 2, "reset keeps the ledger");
}

/* ===== TEST 4: COST ESTIMATORS ===== */

#[test]
fn test_session_analysis_uses_shor_formulas() {
    let mut session = Session::new(1024);
    session.generate_keys().expect("keygen should succeed");
    let report = session.security_analysis().expect("analysis should run");

    assert_eq!(report.key_bits, 1024);
    assert_eq!(report.qubits_needed, 2 * 1024 + 1);
    assert!(report.classical_years > 1.0);
    assert!(report.quantum_seconds < report.classical_years);
    assert!(report.speedup > 1.0);
}

#[test]
fn test_estimators_agree_with_reference_values() {
    let estimate = quantum_factorization_estimate(2048).expect("valid bits");
    assert_eq!(estimate.qubits_needed, 4097);

    let keys = KeyPair::generate(1024).expect("keygen should succeed");
    let years = classical_factorization_years(keys.modulus()).expect("valid modulus");
    // A real 1024-bit modulus is far beyond brute force on 1 Top/s
    assert!(years > 1e3);
}
