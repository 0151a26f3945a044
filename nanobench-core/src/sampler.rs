// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Adaptive sampler: finds an iteration count that fills a CPU time budget.
//!
//! `countit` works in three phases:
//!
//! 1. **Geometric search**: double `n` from 1 until one pass costs more than
//!    0.1s of CPU. The `n` found becomes the floor for the rest of the run.
//! 2. **Ramp-up**: extrapolate linearly until one pass reaches 10% of the
//!    budget. Each step raises the working estimate by at least the progress
//!    floor, whatever was measured.
//! 3. **Accumulation**: project `n` for the full budget and keep adding passes
//!    until the accumulated CPU time reaches it.
//!
//! Only the phase 3 passes are returned; their summed `iters` is the real
//! number of executions used for rate computation.

use serde::{Deserialize, Serialize};

use crate::clock::ClockSource;
use crate::engine::TimingEngine;
use crate::error::{BenchError, BenchResult, ConfigValidationError};
use crate::scenario::Scenario;
use crate::score::Score;

/// Smallest accepted time budget, in seconds.
pub const MIN_BUDGET_SECS: f64 = 0.1;

/// CPU time a single pass must exceed to end the geometric search.
const DETECTABLE_SECS: f64 = 0.1;

/// Measurements at or below this count as zero.
const NEAR_ZERO_SECS: f64 = 0.01;

/// Zero measurements are only counted once `n` has grown past this.
const ZERO_SEARCH_FLOOR: u64 = 1024;

/// Fraction of the budget the ramp-up phase aims for.
const RAMP_FRACTION: f64 = 0.1;

/// Lower clamp on accumulated CPU time when projecting the next pass.
const MIN_PROJECTION_NANOS: u64 = 10_000_000;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Tuning knobs for the adaptive sampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Inflation applied to every linear projection of `n`
    pub overshoot: f64,
    /// Minimum growth factor of the working estimate per ramp-up step
    pub progress_floor: f64,
    /// Consecutive near-zero measurements tolerated before giving up
    pub zero_streak_limit: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            overshoot: 1.05,
            progress_floor: 1.2,
            zero_streak_limit: 16,
        }
    }
}

impl SamplerConfig {
    pub const MAX_OVERSHOOT: f64 = 2.0;
    pub const MAX_PROGRESS_FLOOR: f64 = 4.0;
    pub const MAX_ZERO_STREAK: u32 = 1024;

    /// Check the tuning bounds. An overshoot below 1.0 or a progress floor of
    /// 1.0 or less can stall the ramp-up phase.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(1.0..=Self::MAX_OVERSHOOT).contains(&self.overshoot) {
            return Err(ConfigValidationError::OutOfBounds {
                field: "overshoot",
                value: self.overshoot.to_string(),
                min: "1.0".to_string(),
                max: Self::MAX_OVERSHOOT.to_string(),
            });
        }

        if !(self.progress_floor > 1.0 && self.progress_floor <= Self::MAX_PROGRESS_FLOOR) {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "progress_floor",
                value: self.progress_floor.to_string(),
                reason: format!(
                    "Must be greater than 1.0 and at most {}",
                    Self::MAX_PROGRESS_FLOOR
                ),
            });
        }

        if self.zero_streak_limit == 0 || self.zero_streak_limit > Self::MAX_ZERO_STREAK {
            return Err(ConfigValidationError::OutOfBounds {
                field: "zero_streak_limit",
                value: self.zero_streak_limit.to_string(),
                min: "1".to_string(),
                max: Self::MAX_ZERO_STREAK.to_string(),
            });
        }

        Ok(())
    }
}

/// Reject budgets the sampler cannot honor.
pub fn validate_budget(budget_secs: f64) -> BenchResult<()> {
    if !budget_secs.is_finite() || budget_secs < MIN_BUDGET_SECS {
        return Err(BenchError::InvalidArgument {
            name: "time_budget_secs",
            value: budget_secs.to_string(),
            reason: format!("timelimit cannot be less than {}", MIN_BUDGET_SECS),
        });
    }
    Ok(())
}

/// Convert a projected iteration count to `u64`, truncating the fraction.
pub fn projected_iterations(value: f64, stage: &'static str) -> BenchResult<u64> {
    if !value.is_finite() || value >= u64::MAX as f64 {
        return Err(BenchError::Overflow { stage });
    }
    Ok(value.max(0.0) as u64)
}

/// Counts consecutive near-zero measurements.
struct ZeroStreak {
    count: u32,
    limit: u32,
}

impl ZeroStreak {
    fn new(limit: u32) -> Self {
        Self { count: 0, limit }
    }

    fn observe(&mut self, near_zero: bool, n: u64) -> BenchResult<()> {
        if !near_zero {
            self.count = 0;
            return Ok(());
        }
        self.count += 1;
        if self.count > self.limit {
            return Err(BenchError::NonMeasurable { n });
        }
        Ok(())
    }
}

impl<C: ClockSource> TimingEngine<C> {
    /// Run `scenario` repeatedly until at least `budget_secs` of CPU time has
    /// been accumulated, and return the accumulated score.
    pub fn countit(&mut self, budget_secs: f64, scenario: &mut Scenario) -> BenchResult<Score> {
        validate_budget(budget_secs)?;
        let config = *self.sampler_config();
        config.validate()?;

        // Phase 1: find the smallest power of two with a detectable cost.
        let mut zeros = ZeroStreak::new(config.zero_streak_limit);
        let mut n: u64 = 1;
        let mut tc;
        loop {
            tracing::debug!(scenario = scenario.name(), n, "Finding minimum n");
            tc = self.timeit(n, scenario)?.cpu_secs();

            zeros.observe(tc <= NEAR_ZERO_SECS && n > ZERO_SEARCH_FLOOR, n)?;
            if tc > DETECTABLE_SECS {
                break;
            }
            n = n.checked_mul(2).ok_or(BenchError::Overflow {
                stage: "geometric search",
            })?;
        }
        let n_min = n;

        // Phase 2: get close enough to guess the final n with some accuracy.
        let target = RAMP_FRACTION * budget_secs;
        while tc < target {
            n = projected_iterations(target * config.overshoot * n as f64 / tc, "ramp-up")?;
            let measured = self.timeit(n, scenario)?.cpu_secs();
            tc = measured.max(config.progress_floor * tc);
            tracing::debug!(scenario = scenario.name(), n, measured, tc, "Ramp-up step");
        }

        // Phase 3: the timings that count, repeated until the budget is spent.
        n = projected_iterations(n as f64 * (config.overshoot * budget_secs / tc), "accumulation")?
            .max(n_min);
        let mut total = Score::default();
        let mut zeros = ZeroStreak::new(config.zero_streak_limit);
        loop {
            let pass = self.timeit(n, scenario)?;
            total = total.add(&pass);
            tracing::debug!(
                scenario = scenario.name(),
                n,
                total_cpu_ns = total.cpu,
                total_iters = total.iters,
                "Accumulated pass"
            );
            if total.cpu_secs() >= budget_secs {
                break;
            }
            zeros.observe(total.cpu_secs() <= NEAR_ZERO_SECS, n)?;

            let cpu_secs = total.cpu.max(MIN_PROJECTION_NANOS) as f64 / NANOS_PER_SEC;
            let remaining = budget_secs / cpu_secs - 1.0;
            n = projected_iterations(remaining * total.iters as f64, "accumulation")?.max(n_min);
        }

        Ok(total)
    }
}
