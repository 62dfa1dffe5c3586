#![forbid(unsafe_code)]

//! Append-only ledger of RSA-signed, hash-linked records
//!
//! Each record commits to the previous record's hash, forming a toy
//! blockchain. The record hash covers index, timestamp, payload and the
//! previous hash; the RSA-PSS signature covers the payload only, so the
//! signature is the security boundary, not the hash.

use chrono::Utc;
use rsa::pss::{BlindedSigningKey, Signature, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::keys::KeyPair;

/// `previous_hash` value of the first record in a chain.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be a positive finite number, got {0}")]
    InvalidAmount(f64),

    #[error("{0} name must not be empty")]
    EmptyParty(&'static str),

    #[error("failed to sign payload: {0}")]
    Signing(#[from] rsa::signature::Error),
}

/// One signed, hash-linked ledger entry. Immutable once appended.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    /// 0-based position in the chain.
    pub index: u64,
    /// RFC 3339 creation time; also embedded in the payload.
    pub timestamp: String,
    /// `"{sender}->{receiver}:{amount}:{timestamp}"` - the signed bytes.
    pub payload: String,
    /// RSA-PSS signature over `payload` (salted, so not repeatable).
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
    /// Hash of the previous record, or `"0"` for the first one.
    pub previous_hash: String,
    /// Hex SHA256 over index || timestamp || payload || previous_hash.
    pub hash: String,
}

/// In-memory append-only record chain. The only mutation is [`Ledger::append`].
#[derive(Default)]
pub struct Ledger {
    records: Vec<Record>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record, if any. The next append links to its hash.
    pub fn tail(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sign a transaction and append it to the chain.
    ///
    /// The payload is rendered exactly once, so hash and signature always
    /// commit to the same bytes. Existing records are never touched.
    pub fn append(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: f64,
        keys: &KeyPair,
    ) -> Result<&Record, LedgerError> {
        validate_transaction(sender, receiver, amount)?;

        let timestamp = Utc::now().to_rfc3339();
        let payload = format!("{sender}->{receiver}:{amount}:{timestamp}");

        let signing_key = BlindedSigningKey::<Sha256>::new(keys.signing_key().clone());
        let signature = signing_key
            .try_sign_with_rng(&mut rand::thread_rng(), payload.as_bytes())?
            .to_vec();

        let previous_hash = match self.records.last() {
            Some(prev) => prev.hash.clone(),
            None => GENESIS_PREVIOUS_HASH.to_string(),
        };
        let index = self.records.len() as u64;
        let hash = record_hash(index, &timestamp, &payload, &previous_hash);

        self.records.push(Record {
            index,
            timestamp,
            payload,
            signature,
            previous_hash,
            hash,
        });
        Ok(&self.records[index as usize])
    }
}

/// Content digest over the record fields, signature excluded.
pub fn record_hash(index: u64, timestamp: &str, payload: &str, previous_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(index.to_string().as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(payload.as_bytes());
    hasher.update(previous_hash.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a record's signature against a verification key.
///
/// Wrong key, tampered payload and malformed signature bytes are all
/// ordinary `false` outcomes, never errors.
pub fn verify_record(record: &Record, verifying_key: &RsaPublicKey) -> bool {
    let key = VerifyingKey::<Sha256>::new(verifying_key.clone());
    let Ok(signature) = Signature::try_from(record.signature.as_slice()) else {
        return false;
    };
    key.verify(record.payload.as_bytes(), &signature).is_ok()
}

fn validate_transaction(sender: &str, receiver: &str, amount: f64) -> Result<(), LedgerError> {
    if sender.trim().is_empty() {
        return Err(LedgerError::EmptyParty("sender"));
    }
    if receiver.trim().is_empty() {
        return Err(LedgerError::EmptyParty("receiver"));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_hash_deterministic() {
        let a = record_hash(0, "2026-01-01T00:00:00+00:00", "Alice->Bob:10:ts", "0");
        let b = record_hash(0, "2026-01-01T00:00:00+00:00", "Alice->Bob:10:ts", "0");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // hex SHA256
    }

    #[test]
    fn test_record_hash_sensitive_to_every_field() {
        let base = record_hash(0, "ts", "payload", "0");
        assert_ne!(base, record_hash(1, "ts", "payload", "0"));
        assert_ne!(base, record_hash(0, "ts2", "payload", "0"));
        assert_ne!(base, record_hash(0, "ts", "payload!", "0"));
        assert_ne!(base, record_hash(0, "ts", "payload", "1"));
    }

    #[test]
    fn test_validate_rejects_bad_amounts() {
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                validate_transaction("Alice", "Bob", amount),
                Err(LedgerError::InvalidAmount(_))
            ));
        }
        assert!(validate_transaction("Alice", "Bob", 0.01).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_parties() {
        assert!(matches!(
            validate_transaction("", "Bob", 1.0),
            Err(LedgerError::EmptyParty("sender"))
        ));
        assert!(matches!(
            validate_transaction("Alice", "  ", 1.0),
            Err(LedgerError::EmptyParty("receiver"))
        ));
    }
}
