#![forbid(unsafe_code)]

//! Per-session demo state
//!
//! All mutable state (keys, ledger, attack flags) lives in one [`Session`]
//! passed by reference into handlers. Created at session start, dropped at
//! session end; nothing is persisted.

use serde::Serialize;
use thiserror::Error;

use crate::estimate::{
    classical_factorization_years, quantum_factorization_estimate, DomainError, SECONDS_PER_YEAR,
};
use crate::keys::{KeyGenerationError, KeyPair};
use crate::ledger::{verify_record, Ledger, LedgerError, Record};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    KeyGeneration(#[from] KeyGenerationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("generate keys before running the analysis")]
    NoKeys,
}

/// Classical vs quantum comparison for the session's current key.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AnalysisReport {
    pub key_bits: usize,
    pub modulus_bits: usize,
    pub classical_years: f64,
    pub quantum_seconds: f64,
    pub qubits_needed: u64,
    /// classical time over quantum time, both in seconds.
    pub speedup: f64,
}

/// One interactive demo session: selected key size, optional keypair,
/// the ledger, and the scripted-attack flags.
pub struct Session {
    bits: usize,
    keys: Option<KeyPair>,
    ledger: Ledger,
    attack_completed: bool,
    forged: bool,
}

impl Session {
    pub fn new(bits: usize) -> Self {
        Self {
            bits,
            keys: None,
            ledger: Ledger::new(),
            attack_completed: false,
            forged: false,
        }
    }

    pub fn key_bits(&self) -> usize {
        self.bits
    }

    pub fn keys(&self) -> Option<&KeyPair> {
        self.keys.as_ref()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn attack_completed(&self) -> bool {
        self.attack_completed
    }

    pub fn forged(&self) -> bool {
        self.forged
    }

    /// Generate a fresh keypair at the session's key size, replacing any
    /// previous one. Records signed with the old key stay in the ledger
    /// and will no longer verify against the new key.
    pub fn generate_keys(&mut self) -> Result<&KeyPair, SessionError> {
        let keys = KeyPair::generate(self.bits)?;
        Ok(self.keys.insert(keys))
    }

    /// Sign and append one transaction, generating keys first if the
    /// session has none yet.
    pub fn create_transaction(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: f64,
    ) -> Result<&Record, SessionError> {
        if self.keys.is_none() {
            self.keys = Some(KeyPair::generate(self.bits)?);
        }
        let keys = self.keys.as_ref().ok_or(SessionError::NoKeys)?;
        Ok(self.ledger.append(sender, receiver, amount, keys)?)
    }

    /// Check a record against the session's current verification key.
    pub fn verify(&self, record: &Record) -> bool {
        match self.keys {
            Some(ref keys) => verify_record(record, keys.verifying_key()),
            None => false,
        }
    }

    /// Classical vs quantum cost comparison for the session key's modulus.
    pub fn security_analysis(&self) -> Result<AnalysisReport, SessionError> {
        let keys = self.keys.as_ref().ok_or(SessionError::NoKeys)?;
        let classical_years = classical_factorization_years(keys.modulus())?;
        let quantum = quantum_factorization_estimate(keys.bits() as u32)?;
        Ok(AnalysisReport {
            key_bits: keys.bits(),
            modulus_bits: keys.modulus_bits(),
            classical_years,
            quantum_seconds: quantum.seconds,
            qubits_needed: quantum.qubits_needed,
            speedup: classical_years * SECONDS_PER_YEAR / quantum.seconds,
        })
    }

    /// Clear the attack flags so the scripted demo can run again.
    /// Keys and ledger are untouched.
    pub fn reset_attack(&mut self) {
        self.attack_completed = false;
        self.forged = false;
    }

    pub(crate) fn mark_attack_completed(&mut self) {
        self.attack_completed = true;
    }

    pub(crate) fn mark_forged(&mut self) {
        self.forged = true;
    }
}
