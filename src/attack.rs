#![forbid(unsafe_code)]

//! Scripted quantum attack demo
//!
//! Runs the Shor-style circuit template, summarizes the measurement
//! distribution, and reports the private key as extracted. The extraction
//! is a narrative effect: no factoring happens, and the outcome does not
//! depend on the measurement results. The forged transaction afterwards is
//! real, though - it is signed with the session key and verifies, which is
//! the point of the demonstration.

use serde::Serialize;
use thiserror::Error;

use crate::circuit::{
    shor_demo_circuit, Counts, QuantumBackend, SimulationError, DEMO_CIRCUIT_QUBITS,
};
use crate::ledger::Record;
use crate::session::{Session, SessionError};

/// Narration displayed while the "factorization" runs.
pub const ATTACK_STEPS: [&str; 6] = [
    "Initializing quantum registers",
    "Creating superposition states",
    "Applying quantum Fourier transform",
    "Measuring quantum periodicity",
    "Processing quantum results",
    "Extracting classical factors",
];

/// Amount of the forged Bob -> Attacker transaction.
pub const FORGED_AMOUNT: f64 = 1_000_000.0;

#[derive(Debug, Error)]
pub enum AttackError {
    #[error("create at least one transaction before launching the attack")]
    EmptyLedger,

    #[error("run the quantum attack before forging a transaction")]
    AttackNotRun,

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Most frequent measured basis state.
#[derive(Clone, Debug, Serialize)]
pub struct DominantState {
    pub state: String,
    pub count: u32,
    pub probability: f64,
}

/// Everything the UI needs to narrate one attack run.
#[derive(Debug, Serialize)]
pub struct AttackReport {
    pub steps: Vec<&'static str>,
    pub qubits: usize,
    pub total_shots: u32,
    pub counts: Counts,
    pub dominant_state: Option<DominantState>,
    /// Always true: the extraction is scripted, not computed.
    pub key_extracted: bool,
}

/// Run the scripted attack against a session with at least one record.
pub fn run(
    session: &mut Session,
    backend: &dyn QuantumBackend,
    shots: u32,
) -> Result<AttackReport, AttackError> {
    if session.ledger().is_empty() {
        return Err(AttackError::EmptyLedger);
    }

    let circuit = shor_demo_circuit(DEMO_CIRCUIT_QUBITS);
    let counts = backend.simulate(&circuit, shots)?;
    let dominant_state = dominant(&counts, shots);

    session.mark_attack_completed();
    Ok(AttackReport {
        steps: ATTACK_STEPS.to_vec(),
        qubits: DEMO_CIRCUIT_QUBITS,
        total_shots: shots,
        counts,
        dominant_state,
        key_extracted: true,
    })
}

/// Append the forged Bob -> Attacker transaction with the "stolen" key.
///
/// Only allowed after a completed attack run; the forgery verifies because
/// it is signed with the genuine session key.
pub fn forge(session: &mut Session) -> Result<Record, AttackError> {
    if !session.attack_completed() {
        return Err(AttackError::AttackNotRun);
    }
    let record = session
        .create_transaction("Bob", "Attacker", FORGED_AMOUNT)?
        .clone();
    session.mark_forged();
    Ok(record)
}

fn dominant(counts: &Counts, shots: u32) -> Option<DominantState> {
    counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(state, count)| DominantState {
            state: state.clone(),
            count: *count,
            probability: f64::from(*count) / f64::from(shots.max(1)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitSpec;

    struct FixedBackend;

    impl QuantumBackend for FixedBackend {
        fn simulate(&self, _circuit: &CircuitSpec, shots: u32) -> Result<Counts, SimulationError> {
            let mut counts = Counts::new();
            counts.insert("000000".to_string(), shots - 1);
            counts.insert("000111".to_string(), 1);
            Ok(counts)
        }
    }

    #[test]
    fn test_attack_requires_a_transaction() {
        let mut session = Session::new(1024);
        assert!(matches!(
            run(&mut session, &FixedBackend, 8),
            Err(AttackError::EmptyLedger)
        ));
        assert!(!session.attack_completed());
    }

    #[test]
    fn test_forge_requires_completed_attack() {
        let mut session = Session::new(1024);
        assert!(matches!(forge(&mut session), Err(AttackError::AttackNotRun)));
    }

    #[test]
    fn test_dominant_state_picks_the_peak() {
        let mut counts = Counts::new();
        counts.insert("01".to_string(), 3);
        counts.insert("10".to_string(), 13);
        let top = dominant(&counts, 16).expect("non-empty counts");
        assert_eq!(top.state, "10");
        assert_eq!(top.count, 13);
        assert!((top.probability - 13.0 / 16.0).abs() < 1e-12);
    }
}
