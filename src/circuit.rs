#![forbid(unsafe_code)]

//! Toy quantum circuit template and simulation backend
//!
//! The demo circuit is a fixed superposition + phase-rotation template in
//! the shape of Shor's period finding. It does not factor anything; it
//! exists to produce a measurement histogram for the attack narrative.
//!
//! The core only depends on the [`QuantumBackend`] capability, so the
//! dense [`StatevectorBackend`] here can be swapped for anything that
//! returns a bitstring-count distribution.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use rand::Rng;
use thiserror::Error;

/// Qubit count of the attack-demo template.
pub const DEMO_CIRCUIT_QUBITS: usize = 6;

/// Default measurement shots, matching the demo narrative.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Measurement histogram: bitstring (qubit 0 rightmost) to count.
pub type Counts = BTreeMap<String, u32>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gate {
    /// Hadamard on one qubit.
    Hadamard { target: usize },
    /// Phase rotation by `theta` on `target`, conditioned on `control`.
    ControlledPhase {
        control: usize,
        target: usize,
        theta: f64,
    },
}

/// Gate list over a fixed-size register; all qubits are measured at the end.
#[derive(Clone, Debug)]
pub struct CircuitSpec {
    qubits: usize,
    gates: Vec<Gate>,
}

impl CircuitSpec {
    pub fn new(qubits: usize) -> Self {
        Self {
            qubits,
            gates: Vec::new(),
        }
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn hadamard(mut self, target: usize) -> Self {
        self.gates.push(Gate::Hadamard { target });
        self
    }

    pub fn controlled_phase(mut self, control: usize, target: usize, theta: f64) -> Self {
        self.gates.push(Gate::ControlledPhase {
            control,
            target,
            theta,
        });
        self
    }
}

impl std::fmt::Display for CircuitSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "register: {} qubits, measured at the end", self.qubits)?;
        for gate in &self.gates {
            match *gate {
                Gate::Hadamard { target } => writeln!(f, "  H    q{target}")?,
                Gate::ControlledPhase {
                    control,
                    target,
                    theta,
                } => writeln!(f, "  CP({theta:.4}) q{control} -> q{target}")?,
            }
        }
        Ok(())
    }
}

/// The fixed Shor-style demo template.
///
/// Superposition over the first half of the register, then an abbreviated
/// quantum Fourier transform block (H plus pi/2^(j-i) controlled phases).
pub fn shor_demo_circuit(qubits: usize) -> CircuitSpec {
    let mut circuit = CircuitSpec::new(qubits);
    let half = qubits / 2;

    for i in 0..half {
        circuit = circuit.hadamard(i);
    }
    for i in 0..half {
        circuit = circuit.hadamard(i);
        for j in (i + 1)..half {
            circuit = circuit.controlled_phase(j, i, PI / f64::powi(2.0, (j - i) as i32));
        }
    }
    circuit
}

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("circuit uses {qubits} qubits, backend supports at most {max}")]
    TooManyQubits { qubits: usize, max: usize },

    #[error("circuit must have at least one qubit")]
    EmptyRegister,

    #[error("shot count must be positive")]
    ZeroShots,

    #[error("gate references qubit {index}, register has {qubits}")]
    QubitOutOfRange { index: usize, qubits: usize },
}

/// Anything that can run a circuit template and return measurement counts.
pub trait QuantumBackend {
    fn simulate(&self, circuit: &CircuitSpec, shots: u32) -> Result<Counts, SimulationError>;
}

/// Dense statevector simulator.
///
/// Holds 2^n complex amplitudes, so the register size is capped; the demo
/// template needs 6 qubits and the cap leaves generous headroom.
pub struct StatevectorBackend {
    max_qubits: usize,
}

impl StatevectorBackend {
    pub const MAX_QUBITS: usize = 16;

    pub fn new() -> Self {
        Self {
            max_qubits: Self::MAX_QUBITS,
        }
    }
}

impl Default for StatevectorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumBackend for StatevectorBackend {
    fn simulate(&self, circuit: &CircuitSpec, shots: u32) -> Result<Counts, SimulationError> {
        let qubits = circuit.qubits();
        if qubits == 0 {
            return Err(SimulationError::EmptyRegister);
        }
        if qubits > self.max_qubits {
            return Err(SimulationError::TooManyQubits {
                qubits,
                max: self.max_qubits,
            });
        }
        if shots == 0 {
            return Err(SimulationError::ZeroShots);
        }

        let dim = 1usize << qubits;
        let mut state = vec![Complex64::new(0.0, 0.0); dim];
        state[0] = Complex64::new(1.0, 0.0);

        for gate in circuit.gates() {
            apply_gate(&mut state, qubits, gate)?;
        }

        Ok(sample_counts(&state, qubits, shots))
    }
}

fn apply_gate(state: &mut [Complex64], qubits: usize, gate: &Gate) -> Result<(), SimulationError> {
    match *gate {
        Gate::Hadamard { target } => {
            check_qubit(target, qubits)?;
            let mask = 1usize << target;
            for i in 0..state.len() {
                if i & mask == 0 {
                    let j = i | mask;
                    let a = state[i];
                    let b = state[j];
                    state[i] = (a + b) * FRAC_1_SQRT_2;
                    state[j] = (a - b) * FRAC_1_SQRT_2;
                }
            }
        }
        Gate::ControlledPhase {
            control,
            target,
            theta,
        } => {
            check_qubit(control, qubits)?;
            check_qubit(target, qubits)?;
            let mask = (1usize << control) | (1usize << target);
            let phase = Complex64::from_polar(1.0, theta);
            for (i, amp) in state.iter_mut().enumerate() {
                if i & mask == mask {
                    *amp *= phase;
                }
            }
        }
    }
    Ok(())
}

fn check_qubit(index: usize, qubits: usize) -> Result<(), SimulationError> {
    if index >= qubits {
        return Err(SimulationError::QubitOutOfRange { index, qubits });
    }
    Ok(())
}

/// Draw `shots` basis states from the amplitude distribution.
fn sample_counts(state: &[Complex64], qubits: usize, shots: u32) -> Counts {
    let probabilities: Vec<f64> = state.iter().map(|amp| amp.norm_sqr()).collect();
    let total: f64 = probabilities.iter().sum();
    // Round-off can leave r past the last bucket; land on a reachable state.
    let fallback = probabilities.iter().rposition(|p| *p > 0.0).unwrap_or(0);

    let mut rng = rand::thread_rng();
    let mut counts = Counts::new();
    for _ in 0..shots {
        let mut r = rng.gen::<f64>() * total;
        let mut outcome = fallback;
        for (i, p) in probabilities.iter().enumerate() {
            if r < *p {
                outcome = i;
                break;
            }
            r -= p;
        }
        *counts
            .entry(format!("{:0width$b}", outcome, width = qubits))
            .or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shor_template_gate_count() {
        // half = 3: 3 superposition H + 3 QFT H + 3 controlled phases
        let circuit = shor_demo_circuit(DEMO_CIRCUIT_QUBITS);
        assert_eq!(circuit.qubits(), 6);
        let hadamards = circuit
            .gates()
            .iter()
            .filter(|g| matches!(g, Gate::Hadamard { .. }))
            .count();
        let phases = circuit
            .gates()
            .iter()
            .filter(|g| matches!(g, Gate::ControlledPhase { .. }))
            .count();
        assert_eq!(hadamards, 6);
        assert_eq!(phases, 3);
    }

    #[test]
    fn test_counts_sum_to_shots() {
        let backend = StatevectorBackend::new();
        let counts = backend
            .simulate(&shor_demo_circuit(6), 512)
            .expect("simulation should run");
        assert_eq!(counts.values().sum::<u32>(), 512);
        for state in counts.keys() {
            assert_eq!(state.len(), 6);
        }
    }

    #[test]
    fn test_double_hadamard_is_identity() {
        let backend = StatevectorBackend::new();
        let circuit = CircuitSpec::new(2).hadamard(0).hadamard(0);
        let counts = backend.simulate(&circuit, 256).expect("simulation should run");
        assert_eq!(counts.get("00"), Some(&256));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_single_hadamard_hits_both_outcomes() {
        let backend = StatevectorBackend::new();
        let circuit = CircuitSpec::new(1).hadamard(0);
        let counts = backend.simulate(&circuit, 1024).expect("simulation should run");
        // P(missing a side) = 2^-1024
        assert!(counts.contains_key("0"));
        assert!(counts.contains_key("1"));
    }

    #[test]
    fn test_rejects_oversized_and_degenerate_requests() {
        let backend = StatevectorBackend::new();
        assert_eq!(
            backend.simulate(&CircuitSpec::new(17), 1),
            Err(SimulationError::TooManyQubits {
                qubits: 17,
                max: StatevectorBackend::MAX_QUBITS
            })
        );
        assert_eq!(
            backend.simulate(&CircuitSpec::new(0), 1),
            Err(SimulationError::EmptyRegister)
        );
        assert_eq!(
            backend.simulate(&CircuitSpec::new(1), 0),
            Err(SimulationError::ZeroShots)
        );
        assert_eq!(
            backend.simulate(&CircuitSpec::new(2).hadamard(5), 16),
            Err(SimulationError::QubitOutOfRange { index: 5, qubits: 2 })
        );
    }
}
