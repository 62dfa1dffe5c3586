#![forbid(unsafe_code)]

//! Closed-form factorization cost estimators
//!
//! Classical cost follows the general number field sieve asymptotic,
//! quantum cost follows the textbook Shor resource counts. Both are
//! pure functions of the input and the fixed reference constants below;
//! neither executes any factoring.

use rsa::BigUint;
use serde::Serialize;
use thiserror::Error;

/// GNFS exponent coefficient: exp(1.923 * (ln n)^(1/3) * (ln ln n)^(2/3)).
pub const GNFS_COEFFICIENT: f64 = 1.923;

/// Reference classical throughput, 1 Top/s.
pub const CLASSICAL_OPS_PER_SECOND: f64 = 1e12;

/// Reference quantum gate time, 100 ns.
pub const GATE_TIME_SECONDS: f64 = 100e-9;

pub const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("modulus too small for a GNFS estimate (ln n = {ln_n}, need ln n > 1)")]
    DegenerateModulus { ln_n: f64 },

    #[error("key size {bits} bits is below the minimum of 2")]
    BitLengthTooSmall { bits: u32 },
}

/// Shor's-algorithm resource estimate for one factorization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuantumEstimate {
    pub seconds: f64,
    pub qubits_needed: u64,
    pub gate_count: f64,
}

/// Estimated years to factor `n` on a classical machine running GNFS.
///
/// `n` exceeds the f64 range for every real modulus, so `ln n` is taken
/// from the bit length plus the top mantissa bits instead of a lossy
/// conversion. Monotone increasing in `n` for `n > e`.
pub fn classical_factorization_years(n: &BigUint) -> Result<f64, DomainError> {
    let ln_n = ln_biguint(n);
    if ln_n <= 1.0 {
        return Err(DomainError::DegenerateModulus { ln_n });
    }
    let exponent = GNFS_COEFFICIENT * ln_n.powf(1.0 / 3.0) * ln_n.ln().powf(2.0 / 3.0);
    let operations = exponent.exp();
    let seconds = operations / CLASSICAL_OPS_PER_SECOND;
    Ok(seconds / SECONDS_PER_YEAR)
}

/// Shor's-algorithm estimate for a `bits`-bit modulus.
///
/// Qubit count is the standard 2n+1 for the period-finding register;
/// gate count is the O(n^3 log n) modular-exponentiation bound.
pub fn quantum_factorization_estimate(bits: u32) -> Result<QuantumEstimate, DomainError> {
    if bits < 2 {
        return Err(DomainError::BitLengthTooSmall { bits });
    }
    let n = f64::from(bits);
    let gate_count = n.powi(3) * n.ln();
    Ok(QuantumEstimate {
        seconds: gate_count * GATE_TIME_SECONDS,
        qubits_needed: 2 * u64::from(bits) + 1,
        gate_count,
    })
}

/// Natural log of an arbitrary-size integer.
///
/// Uses the top 53 bits as mantissa: ln(n) = ln(top) + shift * ln 2.
fn ln_biguint(n: &BigUint) -> f64 {
    let bits = n.bits();
    if bits == 0 {
        return f64::NEG_INFINITY;
    }
    if bits <= 53 {
        return (low_u64(n) as f64).ln();
    }
    let shift = bits - 53;
    (low_u64(&(n >> shift)) as f64).ln() + shift as f64 * std::f64::consts::LN_2
}

// Value of a BigUint already known to fit in 64 bits.
fn low_u64(n: &BigUint) -> u64 {
    n.to_bytes_be()
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
