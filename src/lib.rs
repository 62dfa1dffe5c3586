//! Quantum vs Blockchain security demo
//!
//! Educational core contrasting classical and quantum attacks against
//! RSA-based blockchain signatures:
//! - keys: RSA keypair generation and modulus export
//! - ledger: append-only chain of RSA-PSS signed, hash-linked records
//! - estimate: GNFS vs Shor closed-form factorization cost estimators
//! - circuit: toy Shor-style circuit template + statevector backend
//! - attack: scripted quantum-attack narrative and forged transaction
//! - pqc: catalog of post-quantum signature alternatives
//! - session: per-session state object the handlers mutate
//!
//! Everything is in-memory and session-scoped; nothing persists.

#![forbid(unsafe_code)]

pub mod attack;
pub mod circuit;
pub mod estimate;
pub mod keys;
pub mod ledger;
pub mod pqc;
pub mod session;

// Re-export the main types for convenience
pub use attack::{AttackError, AttackReport, ATTACK_STEPS, FORGED_AMOUNT};
pub use circuit::{
    shor_demo_circuit, CircuitSpec, Counts, Gate, QuantumBackend, SimulationError,
    StatevectorBackend, DEFAULT_SHOTS, DEMO_CIRCUIT_QUBITS,
};
pub use estimate::{
    classical_factorization_years, quantum_factorization_estimate, DomainError, QuantumEstimate,
};
pub use keys::{KeyGenerationError, KeyPair, SUPPORTED_KEY_BITS};
pub use ledger::{verify_record, Ledger, LedgerError, Record, GENESIS_PREVIOUS_HASH};
pub use pqc::{PqcFamily, FAMILIES, MIGRATION_STEPS};
pub use session::{AnalysisReport, Session, SessionError};
