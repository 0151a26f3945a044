// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `nanobench list` command - List compiled-in suites.

use crate::suites::SUITES;

pub fn execute() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                      AVAILABLE SUITES                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    for suite in SUITES {
        println!("▶ {:<12} {}", suite.name, suite.description);
        for scenario in suite.scenarios() {
            println!("    - {}", scenario.name());
        }
        println!();
    }

    println!("Total: {} suite(s)", SUITES.len());
    Ok(())
}
