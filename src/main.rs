//! Quantum vs Blockchain demo CLI
//!
//! Interactive front-end over the qvb_demo core: key generation, cost
//! analysis, the scripted quantum attack, the circuit simulator, and the
//! post-quantum catalog.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::{Parser, Subcommand};

use qvb_demo::{
    attack, pqc, shor_demo_circuit, AnalysisReport, AttackReport, QuantumBackend, Session,
    StatevectorBackend, DEFAULT_SHOTS, DEMO_CIRCUIT_QUBITS,
};

#[derive(Parser)]
#[command(name = "qvb", version)]
#[command(about = "Quantum vs Blockchain security demo - RSA-signed toy ledger under a simulated Shor attack")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Generate RSA keys and compare classical vs quantum factorization cost
    Analyze {
        /// RSA key size in bits (1024, 2048, 3072 or 4096)
        #[arg(long, default_value_t = 2048)]
        bits: usize,
    },

    /// Full scripted demo: sign a transaction, attack, forge
    Demo {
        /// RSA key size in bits (1024, 2048, 3072 or 4096)
        #[arg(long, default_value_t = 2048)]
        bits: usize,

        /// Measurement shots for the attack circuit
        #[arg(long, default_value_t = DEFAULT_SHOTS)]
        shots: u32,
    },

    /// Build and simulate the Shor demo circuit
    Circuit {
        /// Register size
        #[arg(long, default_value_t = DEMO_CIRCUIT_QUBITS)]
        qubits: usize,

        /// Measurement shots
        #[arg(long, default_value_t = DEFAULT_SHOTS)]
        shots: u32,

        /// Emit the histogram as JSON
        #[arg(long)]
        json: bool,
    },

    /// List post-quantum signature families and the migration strategy
    Pqc {
        /// Emit the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Analyze { bits } => run_analyze(bits),
        Cmd::Demo { bits, shots } => run_demo(bits, shots),
        Cmd::Circuit {
            qubits,
            shots,
            json,
        } => run_circuit(qubits, shots, json),
        Cmd::Pqc { json } => run_pqc(json),
    }
}

fn run_analyze(bits: usize) -> Result<()> {
    let mut session = Session::new(bits);
    println!("🔐 Generating {bits}-bit RSA keypair...");
    let keys = session.generate_keys()?;
    println!("   modulus N = {}... ({} bits)", modulus_prefix(keys.modulus()), keys.modulus_bits());

    let report = session.security_analysis()?;
    print_analysis(&report);
    Ok(())
}

fn run_demo(bits: usize, shots: u32) -> Result<()> {
    let mut session = Session::new(bits);
    let backend = StatevectorBackend::new();

    println!("🔐 Generating {bits}-bit RSA keypair...");
    session.generate_keys()?;

    println!("\n📊 Security analysis");
    let report = session.security_analysis()?;
    print_analysis(&report);

    println!("\n📝 Creating a signed transaction...");
    session.create_transaction("Alice", "Bob", 10.0)?;
    print_chain(&session);

    println!("\n🚨 Launching quantum attack ({shots} shots)...");
    let attack_report = attack::run(&mut session, &backend, shots)?;
    print_attack(&attack_report);

    println!("\n💀 Forging a transaction with the stolen key...");
    let forged = attack::forge(&mut session)?;
    println!("   Block #{} {}", forged.index, forged.payload);
    println!(
        "   signature check: {} - the forgery is indistinguishable from a real record",
        verdict(session.verify(&forged))
    );

    println!("\n⛓️  Final chain state");
    print_chain(&session);
    println!("\n🛡️  This is why blockchains need post-quantum signatures (see `qvb pqc`).");
    Ok(())
}

fn run_circuit(qubits: usize, shots: u32, json: bool) -> Result<()> {
    let backend = StatevectorBackend::new();
    let circuit = shor_demo_circuit(qubits);
    let counts = backend.simulate(&circuit, shots)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("⚛️  Shor demo circuit");
    print!("{circuit}");
    println!("\n📈 Measurement histogram ({shots} shots)");
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (state, count) in sorted.iter().take(10) {
        println!("   |{state}>  {count}");
    }
    Ok(())
}

fn run_pqc(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&pqc::FAMILIES)?);
        return Ok(());
    }

    println!("🛡️  Post-quantum signature families\n");
    for family in pqc::FAMILIES {
        println!("🔒 {}", family.name);
        println!("   {}", family.description);
        println!("   examples: {}", family.examples);
        println!(
            "   security: {} | speed: {} | key size: {}\n",
            family.security, family.speed, family.key_size
        );
    }
    println!("🔄 Migration strategy");
    for (i, step) in pqc::MIGRATION_STEPS.iter().enumerate() {
        println!("   {}. {step}", i + 1);
    }
    Ok(())
}

fn print_analysis(report: &AnalysisReport) {
    println!(
        "   classical (GNFS):   {:.2e} years",
        report.classical_years
    );
    println!(
        "   quantum (Shor):     {:.2} seconds using {} qubits",
        report.quantum_seconds, report.qubits_needed
    );
    println!("   quantum speedup:    {:.2e}x", report.speedup);
}

fn print_attack(report: &AttackReport) {
    for (i, step) in report.steps.iter().enumerate() {
        println!("   step {}: {step}", i + 1);
    }
    if let Some(top) = &report.dominant_state {
        println!(
            "   dominant state |{}> measured {} / {} times ({:.1}%)",
            top.state,
            top.count,
            report.total_shots,
            top.probability * 100.0
        );
    }
    println!("   🔓 RSA private key extracted!");
}

fn print_chain(session: &Session) {
    for record in session.ledger().records() {
        println!(
            "   Block #{} {} | {} | hash {}...",
            record.index,
            verdict(session.verify(record)),
            record.payload,
            &record.hash[..16]
        );
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "✅ verified"
    } else {
        "❌ INVALID"
    }
}

fn modulus_prefix(n: &rsa::BigUint) -> String {
    let hex = hex::encode(n.to_bytes_be());
    hex.chars().take(32).collect()
}
