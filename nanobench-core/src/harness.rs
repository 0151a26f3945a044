// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness: an ordered list of scenarios and the engine that times
//! them.
//!
//! Scenarios run one at a time, in registration order, on the calling thread.
//! The first failure stops the whole run.

use crate::clock::{ClockSource, ThreadClock};
use crate::engine::TimingEngine;
use crate::error::{BenchError, BenchResult};
use crate::report::Report;
use crate::sampler::{self, SamplerConfig};
use crate::scenario::{Outcome, Scenario, ScenarioResult};
use crate::score::Score;

/// A set of named scenarios measured against each other.
#[derive(Debug)]
pub struct Benchmark<C: ClockSource = ThreadClock> {
    scenarios: Vec<Scenario>,
    engine: TimingEngine<C>,
}

impl Benchmark<ThreadClock> {
    /// Create an empty benchmark using the current thread's CPU clocks.
    pub fn new() -> Self {
        Self::with_clock(ThreadClock::new())
    }
}

impl Default for Benchmark<ThreadClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockSource> Benchmark<C> {
    /// Create an empty benchmark with a custom clock source.
    pub fn with_clock(clock: C) -> Self {
        Self {
            scenarios: Vec::new(),
            engine: TimingEngine::with_clock(clock),
        }
    }

    /// Set the adaptive sampler tuning used by [`Benchmark::run_by_time`].
    pub fn with_sampler_config(mut self, sampler: SamplerConfig) -> Self {
        self.engine = self.engine.with_sampler_config(sampler);
        self
    }

    /// Add a new scenario.
    pub fn add<F>(mut self, name: impl Into<String>, code: F) -> Self
    where
        F: FnMut() -> Outcome + 'static,
    {
        self.scenarios.push(Scenario::new(name, code));
        self
    }

    /// Add an already constructed scenario.
    pub fn add_scenario(&mut self, scenario: Scenario) -> &mut Self {
        self.scenarios.push(scenario);
        self
    }

    /// Names of the registered scenarios, in registration order.
    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(Scenario::name).collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn engine(&self) -> &TimingEngine<C> {
        &self.engine
    }

    /// Run every scenario `ntimes` without measuring.
    pub fn warmup(&mut self, ntimes: u64) -> BenchResult<&mut Self> {
        tracing::info!(ntimes, scenarios = self.scenarios.len(), "Warm up");

        for scenario in &mut self.scenarios {
            for iteration in 0..ntimes {
                scenario
                    .invoke()
                    .map_err(|source| BenchError::ScenarioFailure {
                        scenario: scenario.name().to_string(),
                        iteration,
                        source,
                    })?;
            }
        }

        tracing::debug!("Warm up done");
        Ok(self)
    }

    /// Time every scenario for exactly `ntimes` iterations.
    pub fn run(&mut self, ntimes: u64) -> BenchResult<Report> {
        let mut results = Vec::with_capacity(self.scenarios.len());
        for scenario in &mut self.scenarios {
            tracing::debug!(scenario = scenario.name(), ntimes, "Running");
            let score = self.engine.timeit(ntimes, scenario)?;
            results.push(ScenarioResult::new(scenario.name(), score));
        }
        Ok(Report::new(results))
    }

    /// Time every scenario until it has used `budget_secs` of CPU time.
    pub fn run_by_time(&mut self, budget_secs: f64) -> BenchResult<Report> {
        sampler::validate_budget(budget_secs)?;

        let mut results = Vec::with_capacity(self.scenarios.len());
        for scenario in &mut self.scenarios {
            tracing::debug!(scenario = scenario.name(), budget_secs, "Running");
            let score = self.engine.countit(budget_secs, scenario)?;
            results.push(ScenarioResult::new(scenario.name(), score));
        }
        Ok(Report::new(results))
    }

    /// Time a scenario that is not part of this benchmark.
    pub fn timeit(&mut self, n: u64, scenario: &mut Scenario) -> BenchResult<Score> {
        self.engine.timeit(n, scenario)
    }

    /// Sample a scenario that is not part of this benchmark.
    pub fn countit(&mut self, budget_secs: f64, scenario: &mut Scenario) -> BenchResult<Score> {
        self.engine.countit(budget_secs, scenario)
    }

    /// Clear all cached empty-loop timings.
    pub fn clear_all_cache(&mut self) {
        self.engine.clear_cache();
    }

    /// Clear the cached empty-loop timing for `ntimes` rounds.
    pub fn clear_cache(&mut self, ntimes: u64) -> bool {
        self.engine.clear_cache_entry(ntimes)
    }
}
