// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `nanobench run` command - Measure a suite and print both reports.

use std::io::{self, Write};
use std::path::Path;

use nanobench_core::Benchmark;

use crate::suites;

/// Options for a single `run` invocation.
pub struct RunOptions {
    pub suite: String,
    pub time: Option<f64>,
    pub iterations: Option<u64>,
    pub warmup: Option<u64>,
    pub json: bool,
}

pub fn execute(config_path: Option<&Path>, options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    let suite = suites::find(&options.suite).ok_or_else(|| {
        format!(
            "Unknown suite '{}' (available: {})",
            options.suite,
            suites::names().join(", ")
        )
    })?;

    let mut bench = Benchmark::new().with_sampler_config(config.sampler);
    for scenario in suite.scenarios() {
        bench.add_scenario(scenario);
    }

    let warmup = options.warmup.unwrap_or(config.run.warmup_iterations);
    if warmup > 0 {
        bench.warmup(warmup)?;
    }

    let report = match options.iterations {
        Some(iterations) => {
            tracing::info!(suite = suite.name, iterations, "Running suite");
            bench.run(iterations)?
        }
        None => {
            let budget = options.time.unwrap_or(config.run.time_budget_secs);
            tracing::info!(suite = suite.name, budget_secs = budget, "Running suite");
            bench.run_by_time(budget)?
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if options.json {
        writeln!(out, "{}", report.to_json_pretty()?)?;
    } else {
        report.timethese(&mut out)?;
        report.cmpthese(&mut out)?;
    }
    out.flush()?;

    Ok(())
}
