// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! nanobench Core Library
//!
//! Measurement engine for the nanobench micro-benchmarking harness. Provides
//! per-thread clock sources, empty-loop calibration, fixed-count timing
//! (`timeit`), time-budgeted adaptive sampling (`countit`) and the rate
//! comparison report.
//!
//! ```no_run
//! use nanobench_core::Benchmark;
//!
//! let mut bench = Benchmark::new()
//!     .add("sum", || {
//!         std::hint::black_box((0..100u64).sum::<u64>());
//!         Ok(())
//!     })
//!     .add("fold", || {
//!         std::hint::black_box((0..100u64).fold(0, |a, b| a + b));
//!         Ok(())
//!     });
//!
//! let report = bench.run_by_time(1.0)?;
//! report.timethese(&mut std::io::stdout())?;
//! report.cmpthese(&mut std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod calibration;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod harness;
pub mod report;
pub mod sampler;
pub mod scenario;
pub mod score;

// Re-export commonly used types
pub use calibration::CalibrationCache;
pub use clock::{ClockSource, CpuTimes, ManualClock, ThreadClock};
pub use config::{Config, ConfigLoader, RunConfig};
pub use engine::TimingEngine;
pub use error::{BenchError, BenchResult, ConfigValidationError, ScenarioError};
pub use harness::Benchmark;
pub use report::{render_table, Report};
pub use sampler::{SamplerConfig, MIN_BUDGET_SECS};
pub use scenario::{Outcome, Scenario, ScenarioResult};
pub use score::{format_rate, Score};
