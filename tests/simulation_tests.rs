// tests/simulation_tests.rs

use qtele::{
    CircuitBuilder, Gate, GateKind, Outcome, QubitId, SimError, Simulator, SimulatorConfig,
};
use qtele::core::MAX_QUBITS_CEILING;
use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, SeedableRng};

const NORM_TOLERANCE: f64 = 1e-9;

/// χ² critical value for 1 degree of freedom at the 99.9 % level.
const CHI_SQUARED_1DOF_999: f64 = 10.828;

fn assert_normalized<R: Rng>(sim: &Simulator<R>, context: &str) {
    let norm_sqr = sim.state().norm_sqr();
    assert!(
        (norm_sqr - 1.0).abs() < NORM_TOLERANCE,
        "{context}: sum(|a|^2) = {norm_sqr}"
    );
}

#[test]
fn test_fresh_qubit_reads_zero() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(1);
    let q = sim.allocate_qubit()?;
    assert_eq!(sim.inspect_probabilities(q)?, (1.0, 0.0));
    assert_eq!(sim.measure_z(q)?, Outcome::Zero);
    sim.release(q)?;
    assert_eq!(sim.num_qubits(), 0);
    assert_eq!(sim.state().dim(), 1);
    Ok(())
}

#[test]
fn test_x_then_measure_and_reset() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(1);
    let q = sim.allocate_qubit()?;
    sim.apply_kind(GateKind::PauliX, &[q])?;
    assert_eq!(sim.measure_and_reset(q)?, Outcome::One);
    assert_eq!(sim.inspect_probabilities(q)?, (1.0, 0.0));
    Ok(())
}

#[test]
fn test_measure_z_leaves_qubit_in_outcome_state() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(5);
    for _ in 0..20 {
        let q = sim.allocate_qubit()?;
        sim.h(q)?;
        let outcome = sim.measure_z(q)?;
        // Measuring again must repeat the first answer.
        assert_eq!(sim.measure_z(q)?, outcome);
        let (_, p1) = sim.inspect_probabilities(q)?;
        assert_eq!(p1 > 0.5, outcome.is_one());
        // Post-measurement the qubit is in a basis state and can be released.
        sim.release(q)?;
    }
    Ok(())
}

#[test]
fn test_bell_pair_outcomes_agree() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(99);
    for _ in 0..50 {
        let a = sim.allocate_qubit()?;
        let b = sim.allocate_qubit()?;
        sim.h(a)?;
        sim.cnot(a, b)?;
        let ma = sim.measure_and_reset(a)?;
        let mb = sim.measure_and_reset(b)?;
        assert_eq!(ma, mb);
        sim.release(b)?;
        sim.release(a)?;
    }
    Ok(())
}

#[test]
fn test_hadamard_measurement_is_unbiased() -> Result<(), SimError> {
    const TRIALS: usize = 10_000;
    let mut sim = Simulator::with_seed(0x5eed);
    let mut ones = 0usize;
    for _ in 0..TRIALS {
        let q = sim.allocate_qubit()?;
        sim.h(q)?;
        if sim.measure_and_reset(q)?.is_one() {
            ones += 1;
        }
        sim.release(q)?;
    }
    let expected = TRIALS as f64 / 2.0;
    let zeros = TRIALS - ones;
    let chi_squared = ((ones as f64 - expected).powi(2) + (zeros as f64 - expected).powi(2)) / expected;
    assert!(
        chi_squared < CHI_SQUARED_1DOF_999,
        "chi^2 = {chi_squared:.3} for {ones} ones / {zeros} zeros"
    );
    Ok(())
}

#[test]
fn test_norm_preserved_over_random_gate_sequences() -> Result<(), SimError> {
    let mut sim = Simulator::with_config(SimulatorConfig::default().with_seed(17).with_validation(false));
    let mut picker = StdRng::seed_from_u64(2);
    let qubits: Vec<QubitId> = (0..4).map(|_| sim.allocate_qubit()).collect::<Result<_, _>>()?;

    for step in 0..500 {
        let a = qubits[picker.random_range(0..qubits.len())];
        let b = qubits[picker.random_range(0..qubits.len())];
        match picker.random_range(0..5) {
            0 => sim.h(a)?,
            1 => sim.x(a)?,
            2 => sim.z(a)?,
            3 if a != b => sim.cnot(a, b)?,
            3 => sim.h(b)?,
            _ => {
                sim.measure_z(a)?;
            }
        }
        assert_normalized(&sim, &format!("step {step}"));
    }
    Ok(())
}

#[test]
fn test_inspect_probabilities_does_not_mutate() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(3);
    let a = sim.allocate_qubit()?;
    let b = sim.allocate_qubit()?;
    sim.h(a)?;
    sim.cnot(a, b)?;
    let before = sim.state().clone();
    for _ in 0..10 {
        let (p0, p1) = sim.inspect_probabilities(b)?;
        assert!((p0 - 0.5).abs() < NORM_TOLERANCE && (p1 - 0.5).abs() < NORM_TOLERANCE);
    }
    assert_eq!(sim.state(), &before);

    // The RNG was not consumed either: a twin session measures identically.
    let mut twin = Simulator::with_seed(3);
    let ta = twin.allocate_qubit()?;
    let tb = twin.allocate_qubit()?;
    twin.h(ta)?;
    twin.cnot(ta, tb)?;
    assert_eq!(sim.measure_z(a)?, twin.measure_z(ta)?);
    Ok(())
}

#[test]
fn test_same_seed_same_outcomes() -> Result<(), SimError> {
    fn run(seed: u64) -> Result<Vec<Outcome>, SimError> {
        let mut sim = Simulator::with_seed(seed);
        let q = sim.allocate_qubit()?;
        (0..64)
            .map(|_| {
                sim.h(q)?;
                sim.measure_and_reset(q)
            })
            .collect()
    }
    assert_eq!(run(42)?, run(42)?);
    Ok(())
}

#[test]
fn test_injected_rng() -> Result<(), SimError> {
    let rng = SmallRng::seed_from_u64(8);
    let mut sim = Simulator::with_rng(rng, SimulatorConfig::default());
    let q = sim.allocate_qubit()?;
    sim.h(q)?;
    let outcome = sim.measure_and_reset(q)?;
    assert!(matches!(outcome, Outcome::Zero | Outcome::One));
    sim.release(q)?;
    Ok(())
}

#[test]
fn test_release_unmeasured_superposition_is_invalid_state() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(1);
    let q = sim.allocate_qubit()?;
    sim.h(q)?;
    match sim.release(q) {
        Err(SimError::InvalidState { qubit, .. }) => assert_eq!(qubit, q),
        other => panic!("expected InvalidState, got {other:?}"),
    }
    // After measuring, the same release succeeds.
    sim.measure_z(q)?;
    sim.release(q)?;
    Ok(())
}

#[test]
fn test_release_unmeasured_basis_state() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(1);
    let keep = sim.allocate_qubit()?;
    let q = sim.allocate_qubit()?;
    sim.x(q)?;
    // |1⟩ is a definite basis state even though it was never measured.
    sim.release(q)?;
    assert_eq!(sim.state().dim(), 2);
    assert_eq!(sim.live_qubits(), vec![keep]);
    assert_eq!(sim.inspect_probabilities(keep)?, (1.0, 0.0));
    assert_normalized(&sim, "after releasing X|0>");
    Ok(())
}

#[test]
fn test_max_qubits_is_clamped_to_ceiling() {
    let config = SimulatorConfig {
        max_qubits: 100,
        ..SimulatorConfig::default()
    };
    let sim = Simulator::with_config(config);
    assert_eq!(sim.config().max_qubits, MAX_QUBITS_CEILING);

    let sim = Simulator::with_rng(SmallRng::seed_from_u64(3), SimulatorConfig {
        max_qubits: usize::MAX,
        ..SimulatorConfig::default()
    });
    assert_eq!(sim.config().max_qubits, MAX_QUBITS_CEILING);
}

#[test]
fn test_released_handle_is_unknown_everywhere() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(1);
    let q = sim.allocate_qubit()?;
    let other = sim.allocate_qubit()?;
    sim.release(q)?;

    let unknown = Err(SimError::UnknownHandle { qubit: q });
    assert_eq!(sim.h(q), unknown);
    assert_eq!(sim.x(q), unknown);
    assert_eq!(sim.z(q), unknown);
    assert_eq!(sim.cnot(q, other), unknown);
    assert_eq!(sim.cnot(other, q), unknown);
    assert_eq!(sim.measure_z(q), Err(SimError::UnknownHandle { qubit: q }));
    assert_eq!(sim.measure_and_reset(q), Err(SimError::UnknownHandle { qubit: q }));
    assert_eq!(sim.inspect_probabilities(q), Err(SimError::UnknownHandle { qubit: q }));
    assert_eq!(sim.release(q), unknown);

    // A new allocation reuses the axis but not the handle.
    let fresh = sim.allocate_qubit()?;
    assert_ne!(fresh, q);
    assert_eq!(sim.axis_of(fresh)?, 1);
    Ok(())
}

#[test]
fn test_never_allocated_handle_is_unknown() {
    let mut sim = Simulator::with_seed(1);
    assert_eq!(
        sim.h(QubitId(12)),
        Err(SimError::UnknownHandle { qubit: QubitId(12) })
    );
}

#[test]
fn test_apply_kind_arity_is_checked() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(1);
    let q = sim.allocate_qubit()?;
    assert!(matches!(
        sim.apply_kind(GateKind::Cnot, &[q]),
        Err(SimError::InvalidOperation { .. })
    ));
    Ok(())
}

#[test]
fn test_circuit_run_ghz_outcomes_agree() -> Result<(), SimError> {
    let mut sim = Simulator::with_seed(21);
    let qs: Vec<QubitId> = (0..3).map(|_| sim.allocate_qubit()).collect::<Result<_, _>>()?;
    let circuit = CircuitBuilder::new()
        .gate(Gate::Hadamard { target: qs[0] })
        .gate(Gate::Cnot { control: qs[0], target: qs[1] })
        .gate(Gate::Cnot { control: qs[1], target: qs[2] })
        .measure(qs[0])
        .measure(qs[1])
        .measure(qs[2])
        .build();
    let result = sim.run(&circuit)?;
    let first = result.last_outcome(&qs[0]);
    assert!(first.is_some());
    assert!(qs.iter().all(|q| result.last_outcome(q) == first));
    Ok(())
}
