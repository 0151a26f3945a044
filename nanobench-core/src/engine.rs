// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Timing engine: runs a scenario N times and subtracts empty-loop overhead.
//!
//! Every timed loop is bracketed by clock samples taken immediately before the
//! first invocation and immediately after the last. The empty-loop baseline for
//! the same N is measured once and served from the [`CalibrationCache`]
//! afterwards.

use std::hint::black_box;

use crate::calibration::CalibrationCache;
use crate::clock::{ClockSource, ThreadClock};
use crate::error::{BenchError, BenchResult, ScenarioError};
use crate::sampler::SamplerConfig;
use crate::scenario::{Outcome, Scenario};
use crate::score::Score;

/// Name reported if the calibration loop itself ever fails.
const EMPTY_LOOP_NAME: &str = "<empty loop>";

/// A failed iteration inside a timed loop.
struct LoopFailure {
    iteration: u64,
    source: ScenarioError,
}

impl LoopFailure {
    fn into_error(self, scenario: &str) -> BenchError {
        BenchError::ScenarioFailure {
            scenario: scenario.to_string(),
            iteration: self.iteration,
            source: self.source,
        }
    }
}

/// Measures scenarios against a clock source with cached calibration.
///
/// Owns process-local mutable state (the calibration cache) and must stay on
/// the thread that created it; cached baselines are only valid for that thread.
#[derive(Debug)]
pub struct TimingEngine<C: ClockSource = ThreadClock> {
    clock: C,
    calibration: CalibrationCache,
    sampler: SamplerConfig,
}

impl TimingEngine<ThreadClock> {
    /// Create an engine backed by the current thread's CPU clocks.
    pub fn new() -> Self {
        Self::with_clock(ThreadClock::new())
    }
}

impl Default for TimingEngine<ThreadClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockSource> TimingEngine<C> {
    /// Create an engine backed by a custom clock source.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            calibration: CalibrationCache::new(),
            sampler: SamplerConfig::default(),
        }
    }

    /// Replace the adaptive sampler tuning.
    pub fn with_sampler_config(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sampler_config(&self) -> &SamplerConfig {
        &self.sampler
    }

    pub fn calibration(&self) -> &CalibrationCache {
        &self.calibration
    }

    /// Clear all cached empty-loop timings.
    pub fn clear_cache(&mut self) {
        self.calibration.clear();
    }

    /// Clear the cached empty-loop timing for `n` rounds only.
    pub fn clear_cache_entry(&mut self, n: u64) -> bool {
        self.calibration.remove(n).is_some()
    }

    /// Run `scenario` exactly `n` times and return the net score.
    ///
    /// Returns an all-zero score for `n == 0` without touching the cache. A
    /// failing invocation aborts the loop and is propagated as
    /// [`BenchError::ScenarioFailure`].
    pub fn timeit(&mut self, n: u64, scenario: &mut Scenario) -> BenchResult<Score> {
        if n == 0 {
            return Ok(Score::default());
        }

        let empty = self.empty_loop(n)?;
        let raw = self
            .runloop(n, scenario.code_mut())
            .map_err(|failure| failure.into_error(scenario.name()))?;
        let net = raw.diff(&empty);

        tracing::debug!(
            scenario = scenario.name(),
            n,
            raw_cpu_ns = raw.cpu,
            empty_cpu_ns = empty.cpu,
            net_cpu_ns = net.cpu,
            "Timed loop"
        );

        Ok(net)
    }

    /// Baseline for `n` rounds of a no-op callback, measured on first use.
    fn empty_loop(&mut self, n: u64) -> BenchResult<Score> {
        if let Some(score) = self.calibration.lookup(n) {
            return Ok(score);
        }

        let mut noop = || -> Outcome { Ok(()) };
        let empty = self
            .runloop(n, &mut noop)
            .map_err(|failure| failure.into_error(EMPTY_LOOP_NAME))?;
        self.calibration.insert(n, empty);

        tracing::debug!(n, cpu_ns = empty.cpu, "Measured empty loop");
        Ok(empty)
    }

    fn runloop(&self, n: u64, code: &mut dyn FnMut() -> Outcome) -> Result<Score, LoopFailure> {
        settle();
        // Keep the call indirect so the empty loop pays the same dispatch cost.
        let code = black_box(code);

        let real1 = self.clock.wall_nanos();
        let times1 = self.clock.thread_times();
        for iteration in 0..n {
            if let Err(source) = code() {
                return Err(LoopFailure { iteration, source });
            }
        }
        let real2 = self.clock.wall_nanos();
        let times2 = self.clock.thread_times();

        settle();

        Ok(Score::new(
            real2.saturating_sub(real1),
            times2.cpu.saturating_sub(times1.cpu),
            times2.user.saturating_sub(times1.user),
            times2.system.saturating_sub(times1.system),
            n,
        ))
    }
}

/// Advisory pause outside the measured window so pending scheduler work is
/// less likely to land inside it.
fn settle() {
    std::thread::yield_now();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn costly(clock: &ManualClock, name: &str, cost_ns: u64) -> Scenario {
        let clock = clock.clone();
        Scenario::from_fn(name, move || clock.advance(cost_ns))
    }

    #[test]
    fn test_timeit_measures_net_cost() {
        let clock = ManualClock::new();
        let mut engine = TimingEngine::with_clock(clock.clone());
        let mut scenario = costly(&clock, "work", 250);

        let score = engine.timeit(1000, &mut scenario).unwrap();
        assert_eq!(score.iters, 1000);
        assert_eq!(score.cpu, 250_000);
        assert_eq!(score.user, 250_000);
        assert_eq!(score.real, 250_000);
        // The empty loop adds nothing on a manual clock.
        assert_eq!(engine.clock().now(), 250_000);
        assert_eq!(engine.calibration().get(1000).map(|s| s.cpu), Some(0));
    }

    #[test]
    fn test_timeit_reuses_calibration() {
        let clock = ManualClock::new();
        let mut engine = TimingEngine::with_clock(clock.clone());
        let mut scenario = costly(&clock, "work", 10);

        engine.timeit(1000, &mut scenario).unwrap();
        engine.timeit(1000, &mut scenario).unwrap();

        assert_eq!(engine.calibration().len(), 1);
        assert_eq!(engine.calibration().misses(), 1);
        assert_eq!(engine.calibration().hits(), 1);
    }

    #[test]
    fn test_timeit_zero_iterations() {
        let clock = ManualClock::new();
        let mut engine = TimingEngine::with_clock(clock.clone());
        let mut scenario = costly(&clock, "work", 10);

        let score = engine.timeit(0, &mut scenario).unwrap();
        assert_eq!(score, Score::default());
        assert_eq!(score.rate(), 0.0);
        assert!(engine.calibration().is_empty());
    }

    #[test]
    fn test_timeit_aborts_on_failure() {
        let clock = ManualClock::new();
        let mut engine = TimingEngine::with_clock(clock);
        let mut calls = 0u64;
        let mut scenario = Scenario::new("flaky", move || {
            calls += 1;
            if calls == 5 {
                return Err("fifth call failed".into());
            }
            Ok(())
        });

        let err = engine.timeit(100, &mut scenario).unwrap_err();
        match err {
            BenchError::ScenarioFailure {
                scenario,
                iteration,
                ..
            } => {
                assert_eq!(scenario, "flaky");
                assert_eq!(iteration, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_clear_cache_entry() {
        let clock = ManualClock::new();
        let mut engine = TimingEngine::with_clock(clock.clone());
        let mut scenario = costly(&clock, "work", 1);

        engine.timeit(1000, &mut scenario).unwrap();
        engine.timeit(2000, &mut scenario).unwrap();
        assert!(engine.clear_cache_entry(1000));
        assert!(!engine.clear_cache_entry(1000));

        engine.timeit(2000, &mut scenario).unwrap();
        assert_eq!(engine.calibration().hits(), 1);
        assert!(engine.calibration().contains(2000));
        assert!(!engine.calibration().contains(1000));

        engine.clear_cache();
        assert!(engine.calibration().is_empty());
    }
}
