//! Sampling properties of configured and unconfigured checkpoints.

use moonpool_check::check::{catch, panics};
use moonpool_check::{
    Fault, FaultRegistry, FaultStats, InjectedFault, Probability, SeededSource, is_fault, prob,
    seed,
};
use std::sync::Arc;

fn registry(seed: u64) -> FaultRegistry {
    FaultRegistry::with_source(Arc::new(SeededSource::new(seed)))
}

#[test]
fn test_unconfigured_names_never_fault() {
    let faults = FaultRegistry::new();
    for name in ["alpha", "beta", "", "db-write"] {
        for _ in 0..1_000 {
            assert!(faults.check(name).is_ok());
        }
    }
    assert!(faults.snapshot().is_empty());
}

#[test]
fn test_default_config_always_faults() {
    let faults = FaultRegistry::new();
    faults.configure("always", []);

    for _ in 0..1_000 {
        let err = faults
            .check("always")
            .expect_err("default configuration should trigger");
        assert!(is_fault(&*err));
        moonpool_check::check::err_is::<Fault>(&*err);
    }
}

#[test]
fn test_half_probability_splits_samples() {
    for s in [1, 7, 42, 1234] {
        let faults = registry(s);
        faults.configure("coin", [prob(0.5)]);

        for _ in 0..1_000 {
            let _ = faults.check("coin");
        }

        let stats = faults.stats("coin").expect("coin is configured");
        assert_eq!(stats.checks, 1_000);
        assert!(stats.triggered >= 450, "seed {}: {:?}", s, stats);
        assert!(stats.skipped >= 450, "seed {}: {:?}", s, stats);
    }
}

#[test]
fn test_low_probability_is_rare() {
    let faults = registry(5);
    faults.configure("rare", [prob(0.01)]);
    for _ in 0..10_000 {
        let _ = faults.check("rare");
    }
    let stats = faults.stats("rare").expect("rare is configured");
    assert!(stats.trigger_rate() < 0.03, "{:?}", stats);
    assert!(stats.triggered > 0, "{:?}", stats);
}

#[test]
fn test_prob_bounds() {
    for p in [-0.000_1, -1.0, 1.000_1, 10.0, f64::NAN] {
        panics(|| {
            prob(p);
        });
    }
    prob(0.0);
    prob(1.0);
    prob(0.0f32);
    prob(1.0f32);
}

#[test]
fn test_prob_panic_names_value() {
    let err = catch(|| {
        prob(1.25);
    })
    .expect_err("out of range probability should panic");
    assert_eq!(err.message, "probability 1.25 is outside [0.0, 1.0]");
}

#[test]
fn test_non_panicking_probability() {
    assert!(Probability::new(2.0).is_err());
    let faults = registry(3);
    let p = Probability::new(0.0).expect("0.0 is in range");
    faults.configure("validated", [moonpool_check::probability(p)]);
    assert!(faults.check("validated").is_ok());
}

#[test]
fn test_reregistration_applies_new_config() {
    let faults = registry(11);
    faults.configure("flip", [prob(1.0)]);
    for _ in 0..50 {
        assert!(faults.check("flip").is_err());
    }

    faults.configure("flip", [prob(0.0)]);
    assert!(faults.check("flip").is_ok());
    assert_eq!(
        faults.stats("flip"),
        Some(FaultStats {
            checks: 1,
            triggered: 0,
            skipped: 1,
        })
    );
}

#[test]
fn test_injected_fault_carries_name() {
    let faults = registry(2);
    faults.configure("named-point", []);
    let err = faults.check("named-point").expect_err("always triggers");
    let injected = err
        .downcast_ref::<InjectedFault>()
        .expect("default factory builds InjectedFault");
    assert_eq!(injected.point, "named-point");
    assert_eq!(err.to_string(), "fault: named-point");
}

#[test]
fn test_seeded_points_replay() {
    let sample = || {
        let faults = FaultRegistry::new();
        faults.configure("replay", [prob(0.3), seed(2024)]);
        (0..200)
            .map(|_| faults.check("replay").is_err())
            .collect::<Vec<_>>()
    };
    assert_eq!(sample(), sample());
}

#[test]
fn test_stats_serialize() {
    let faults = registry(9);
    faults.configure("json", []);
    let _ = faults.check("json");

    let value = serde_json::to_value(faults.snapshot()).expect("stats serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "json": { "checks": 1, "triggered": 1, "skipped": 0 }
        })
    );
}
