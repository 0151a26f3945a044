// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `nanobench validate` command - Validate configuration file.

use std::path::Path;

use nanobench_core::ConfigLoader;

pub fn execute(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(file = %file.display(), "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Run Settings:");
            println!("  Time Budget:        {}s", config.run.time_budget_secs);
            println!("  Warm-up Iterations: {}", config.run.warmup_iterations);
            println!();
            println!("Sampler Settings:");
            println!("  Overshoot:          {}", config.sampler.overshoot);
            println!("  Progress Floor:     {}", config.sampler.progress_floor);
            println!("  Zero Streak Limit:  {}", config.sampler.zero_streak_limit);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
