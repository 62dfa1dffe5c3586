#![forbid(unsafe_code)]

//! Post-quantum signature alternatives
//!
//! Static catalog of the scheme families that replace RSA once large
//! quantum computers exist, plus the usual migration playbook. Pure data
//! for the UI layer.

use serde::Serialize;

/// One family of quantum-resistant schemes.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PqcFamily {
    pub name: &'static str,
    pub security: &'static str,
    pub speed: &'static str,
    pub key_size: &'static str,
    pub description: &'static str,
    pub examples: &'static str,
}

pub const FAMILIES: [PqcFamily; 4] = [
    PqcFamily {
        name: "Lattice-Based Cryptography",
        security: "Very High",
        speed: "Fast",
        key_size: "Large",
        description: "Based on hard problems in high-dimensional lattices",
        examples: "CRYSTALS-Kyber, CRYSTALS-Dilithium",
    },
    PqcFamily {
        name: "Hash-Based Signatures",
        security: "Proven",
        speed: "Slow",
        key_size: "Very Large",
        description: "Security based on cryptographic hash functions",
        examples: "SPHINCS+, XMSS",
    },
    PqcFamily {
        name: "Code-Based Cryptography",
        security: "High",
        speed: "Medium",
        key_size: "Large",
        description: "Based on error-correcting codes",
        examples: "Classic McEliece, BIKE",
    },
    PqcFamily {
        name: "Multivariate Cryptography",
        security: "Medium",
        speed: "Fast",
        key_size: "Medium",
        description: "Based on solving multivariate polynomial equations",
        examples: "Rainbow, GeMSS",
    },
];

/// Recommended path from RSA/ECDSA to the families above.
pub const MIGRATION_STEPS: [&str; 5] = [
    "Hybrid period: run dual signatures (classical + quantum-resistant)",
    "Algorithm agility: design systems that can switch schemes quickly",
    "Gradual migration: phase out RSA/ECDSA over 5-10 years",
    "Standards adoption: follow the NIST post-quantum standards",
    "Testing and validation: exercise the new implementations extensively",
];
