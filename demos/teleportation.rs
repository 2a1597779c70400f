//! Succinct walkthrough of teleportation on the simulator core.
//!
//! Run with `RUST_LOG=qtele=debug` to see every allocation, measurement and
//! correction as it happens.

use qtele::protocols::{measure_in_basis, prepare};
use qtele::{
    Basis, CircuitBuilder, Gate, SimError, Simulator, teleport, teleport_classical_message,
    teleport_random_message,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("\n--- Simulation Failed ---");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(2024);

    // --- The circuit Alice and Bob run, drawn for reference ---
    let msg = sim.allocate_qubit()?;
    let helper = sim.allocate_qubit()?;
    let target = sim.allocate_qubit()?;
    let diagram = CircuitBuilder::new()
        .gate(Gate::Hadamard { target: helper })
        .gate(Gate::Cnot { control: helper, target })
        .gate(Gate::Cnot { control: msg, target: helper })
        .gate(Gate::Hadamard { target: msg })
        .measure_and_reset(msg)
        .measure_and_reset(helper)
        .build();
    println!("Teleportation circuit (msg={}, helper={}, target={}):\n{}", msg, helper, target, diagram);
    for q in [target, helper, msg] {
        sim.release(q)?;
    }

    // --- Classical bits ---
    println!("Teleporting classical bits:");
    for bit in [false, true] {
        let received = teleport_classical_message(&mut sim, bit)?;
        println!("  sent {:>5} -> received {:>5}", bit, received);
    }

    // --- The four single-qubit basis states ---
    println!("\nTeleporting basis states:");
    for (basis, bit, label) in [
        (Basis::Z, false, "|0>"),
        (Basis::Z, true, "|1>"),
        (Basis::X, false, "|+>"),
        (Basis::X, true, "|->"),
    ] {
        let msg = sim.allocate_qubit()?;
        let target = sim.allocate_qubit()?;
        prepare(&mut sim, msg, basis, bit)?;
        teleport(&mut sim, msg, target)?;
        let (p0, p1) = sim.inspect_probabilities(target)?;
        let received = measure_in_basis(&mut sim, target, basis)?;
        println!(
            "  {} : target Z-marginals ({:.3}, {:.3}), read back in {} basis -> {}",
            label, p0, p1, basis, received
        );
        sim.release(target)?;
        sim.release(msg)?;
    }

    // --- Random messages ---
    const ROUNDS: usize = 100;
    let mut recovered = 0;
    for _ in 0..ROUNDS {
        if teleport_random_message(&mut sim)?.is_recovered() {
            recovered += 1;
        }
    }
    println!("\nRandom messages recovered: {}/{}", recovered, ROUNDS);
    Ok(())
}
