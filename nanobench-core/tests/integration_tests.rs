// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end tests for the measurement engine.
//!
//! Most tests drive the harness with a `ManualClock` so the sampler's decisions
//! are deterministic; one Linux-only test runs against the real thread clock.

use std::cell::Cell;
use std::rc::Rc;

use nanobench_core::{BenchError, Benchmark, ManualClock, Scenario, Score, TimingEngine};

/// Scenario whose cost drops from `before` to `after` nanoseconds once it has
/// been invoked `switch_at` times.
fn cheapening(clock: &ManualClock, switch_at: u64, before: u64, after: u64) -> Scenario {
    let clock = clock.clone();
    let mut calls = 0u64;
    Scenario::from_fn("cheapening", move || {
        calls += 1;
        clock.advance(if calls <= switch_at { before } else { after });
    })
}

#[test]
fn test_diff_of_doubled_score_never_negative() {
    let samples = [
        Score::default(),
        Score::new(1, 2, 3, 4, 5),
        Score::new(u64::MAX / 4, 7, 0, 7, 1),
        Score::new(1_000_000_000, 999, 998, 1, 10),
    ];
    for a in samples {
        let doubled = a.add(&a);
        let d = a.diff(&doubled);
        assert_eq!((d.real, d.cpu, d.user, d.system), (0, 0, 0, 0));
        assert_eq!(d.iters, a.iters);
    }
}

#[test]
fn test_accumulates_several_passes_when_projection_undershoots() {
    let clock = ManualClock::new();
    let mut engine = TimingEngine::with_clock(clock.clone());
    let mut scenario = cheapening(&clock, 300_000, 1_000, 100);

    let score = engine.countit(1.0, &mut scenario).unwrap();

    assert!(score.cpu >= 1_000_000_000, "cpu = {}", score.cpu);
    // The first projection (~1.05M) was sized for the expensive phase.
    assert!(score.iters > 5_000_000, "iters = {}", score.iters);
}

#[test]
fn test_run_by_time_reports_each_scenario() {
    let clock = ManualClock::new();
    let (fast_clock, slow_clock) = (clock.clone(), clock.clone());
    let mut bench = Benchmark::with_clock(clock)
        .add("fast", move || {
            fast_clock.advance(500);
            Ok(())
        })
        .add("slow", move || {
            slow_clock.advance(1_000);
            Ok(())
        });

    let report = bench.run_by_time(0.5).unwrap();
    assert_eq!(report.len(), 2);
    for result in report.results() {
        assert!(result.score.cpu >= 500_000_000, "{}: {}", result.name, result.score.cpu);
        assert!(result.score.iters > 0);
    }

    let table = report.comparison_table();
    assert_eq!(table[1][0], "fast");
    assert_eq!(table[1][2], "--");
    assert_eq!(table[1][3], "100%");
    assert_eq!(table[2][2], "-50%");
    assert_eq!(table[2][3], "--");
}

#[test]
fn test_failure_stops_remaining_scenarios() {
    let clock = ManualClock::new();
    let later_calls = Rc::new(Cell::new(0u64));
    let counter = later_calls.clone();

    let mut bench = Benchmark::with_clock(clock)
        .add("ok", || Ok(()))
        .add("broken", || Err("connection refused".into()))
        .add("never", move || {
            counter.set(counter.get() + 1);
            Ok(())
        });

    let err = bench.run(10).unwrap_err();
    match err {
        BenchError::ScenarioFailure {
            scenario, iteration, ..
        } => {
            assert_eq!(scenario, "broken");
            assert_eq!(iteration, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(later_calls.get(), 0);
}

#[test]
fn test_failure_during_sampling_propagates() {
    let clock = ManualClock::new();
    let handle = clock.clone();
    let mut calls = 0u64;
    let mut bench = Benchmark::with_clock(clock).add("dies", move || {
        calls += 1;
        handle.advance(1_000);
        if calls > 10_000 {
            return Err("resource exhausted".into());
        }
        Ok(())
    });

    let err = bench.run_by_time(1.0).unwrap_err();
    assert!(matches!(err, BenchError::ScenarioFailure { .. }));
}

#[test]
fn test_calibration_shared_across_scenarios() {
    let clock = ManualClock::new();
    let mut bench = Benchmark::with_clock(clock)
        .add("a", || Ok(()))
        .add("b", || Ok(()));

    bench.run(1000).unwrap();
    let calibration = bench.engine().calibration();
    assert_eq!(calibration.len(), 1);
    assert_eq!(calibration.misses(), 1);
    assert_eq!(calibration.hits(), 1);
}

#[cfg(target_os = "linux")]
#[test]
fn test_real_clock_cheap_workload_reaches_budget() {
    let mut engine = TimingEngine::new();
    let data: Vec<u64> = (0..64).collect();
    let mut scenario = Scenario::from_fn("sum", move || {
        std::hint::black_box(&data).iter().sum::<u64>()
    });

    let score = engine.countit(0.2, &mut scenario).unwrap();
    assert!(score.iters > 0);
    assert!(score.cpu >= 200_000_000, "cpu = {}", score.cpu);
    assert!(score.rate() > 0.0);
}
