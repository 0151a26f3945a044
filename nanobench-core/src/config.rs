// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict validation.
//!
//! Both sections are optional and fall back to defaults. Any out-of-range
//! value results in a [`ConfigValidationError`] before anything is measured.

use std::path::Path;

use serde::Deserialize;

use crate::error::{BenchError, BenchResult, ConfigValidationError};
use crate::sampler::{SamplerConfig, MIN_BUDGET_SECS};

/// Raw run settings as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRunConfig {
    #[serde(default = "default_time_budget")]
    time_budget_secs: f64,
    #[serde(default)]
    warmup_iterations: u64,
}

fn default_time_budget() -> f64 {
    1.0
}

impl Default for RawRunConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: default_time_budget(),
            warmup_iterations: 0,
        }
    }
}

/// Raw sampler tuning.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSamplerConfig {
    #[serde(default = "default_overshoot")]
    overshoot: f64,
    #[serde(default = "default_progress_floor")]
    progress_floor: f64,
    #[serde(default = "default_zero_streak_limit")]
    zero_streak_limit: u32,
}

fn default_overshoot() -> f64 {
    SamplerConfig::default().overshoot
}

fn default_progress_floor() -> f64 {
    SamplerConfig::default().progress_floor
}

fn default_zero_streak_limit() -> u32 {
    SamplerConfig::default().zero_streak_limit
}

impl Default for RawSamplerConfig {
    fn default() -> Self {
        Self {
            overshoot: default_overshoot(),
            progress_floor: default_progress_floor(),
            zero_streak_limit: default_zero_streak_limit(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    run: RawRunConfig,
    #[serde(default)]
    sampler: RawSamplerConfig,
}

/// Validated run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub time_budget_secs: f64,
    pub warmup_iterations: u64,
}

/// Complete validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub run: RunConfig,
    pub sampler: SamplerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run: RunConfig {
                time_budget_secs: default_time_budget(),
                warmup_iterations: 0,
            },
            sampler: SamplerConfig::default(),
        }
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    const MAX_WARMUP: u64 = 1_000_000;

    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> BenchResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn load_string(content: &str) -> BenchResult<Config> {
        if content.trim().is_empty() {
            return Self::validate(RawConfig::default());
        }

        let raw: RawConfig = serde_yaml::from_str(content).map_err(|e| BenchError::ConfigParse {
            message: format!("YAML parse error: {}", e),
        })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> BenchResult<Config> {
        let run = Self::validate_run(raw.run)?;
        let sampler = Self::validate_sampler(raw.sampler)?;
        Ok(Config { run, sampler })
    }

    fn validate_run(raw: RawRunConfig) -> BenchResult<RunConfig> {
        if !raw.time_budget_secs.is_finite() || raw.time_budget_secs < MIN_BUDGET_SECS {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "time_budget_secs",
                value: raw.time_budget_secs.to_string(),
                reason: format!("Must be a finite number of at least {} seconds", MIN_BUDGET_SECS),
            }
            .into());
        }

        if raw.warmup_iterations > Self::MAX_WARMUP {
            return Err(ConfigValidationError::OutOfBounds {
                field: "warmup_iterations",
                value: raw.warmup_iterations.to_string(),
                min: "0".to_string(),
                max: Self::MAX_WARMUP.to_string(),
            }
            .into());
        }

        Ok(RunConfig {
            time_budget_secs: raw.time_budget_secs,
            warmup_iterations: raw.warmup_iterations,
        })
    }

    fn validate_sampler(raw: RawSamplerConfig) -> BenchResult<SamplerConfig> {
        let sampler = SamplerConfig {
            overshoot: raw.overshoot,
            progress_floor: raw.progress_floor,
            zero_streak_limit: raw.zero_streak_limit,
        };
        sampler.validate()?;
        Ok(sampler)
    }
}
