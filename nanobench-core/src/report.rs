// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Result aggregation and comparison rendering.
//!
//! A [`Report`] holds one [`ScenarioResult`] per scenario in registration order
//! and renders two textual forms:
//!
//! - `timethese`: one `timestr` summary line per scenario
//! - `cmpthese`: a rate matrix with the relative speed of every pair
//!
//! ```text
//!                 Rate  buffer  builder
//!    buffer  2885232/s      --     -59%
//!   builder  7099126/s    146%       --
//! ```

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::BenchResult;
use crate::scenario::ScenarioResult;

/// Marker for a scenario compared with itself.
const DIAGONAL: &str = "--";

/// Marker for a comparison against a scenario with no measurable rate.
const UNDEFINED: &str = "n/a";

/// Ordered results of one benchmark run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    results: Vec<ScenarioResult>,
}

impl Report {
    pub fn new(results: Vec<ScenarioResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Write one summary line per scenario.
    pub fn timethese<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nScore:\n")?;
        for result in &self.results {
            writeln!(out, "{}: {}", result.name, result.score.timestr())?;
        }
        Ok(())
    }

    /// Write the comparison chart.
    pub fn cmpthese<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nComparison chart:\n")?;
        out.write_all(render_table(&self.comparison_table()).as_bytes())
    }

    /// Build the comparison matrix, header row first.
    ///
    /// Cell `(row, col)` is how much faster (positive) or slower (negative)
    /// the row scenario is than the column scenario, in whole percent.
    pub fn comparison_table(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.results.len() + 1);

        let mut header = vec![String::new(), "Rate".to_string()];
        header.extend(self.results.iter().map(|r| r.name.clone()));
        rows.push(header);

        for (y, result) in self.results.iter().enumerate() {
            let mut row = vec![result.name.clone(), result.score.format_rate()];
            let rate = result.score.rate();
            for (x, col) in self.results.iter().enumerate() {
                if x == y {
                    row.push(DIAGONAL.to_string());
                } else {
                    row.push(relative_percent(rate, col.score.rate()));
                }
            }
            rows.push(row);
        }
        rows
    }

    pub fn to_json_pretty(&self) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `100 * row / col - 100`, rounded half away from zero.
fn relative_percent(row_rate: f64, col_rate: f64) -> String {
    if col_rate <= 0.0 || !col_rate.is_finite() {
        return UNDEFINED.to_string();
    }
    let percent = (100.0 * row_rate / col_rate - 100.0).round() as i64;
    format!("{}%", percent)
}

/// Render rows as right-justified columns separated by two spaces.
///
/// Each column is as wide as its longest cell, header included.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (x, cell) in row.iter().enumerate() {
            widths[x] = widths[x].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        for (x, cell) in row.iter().enumerate() {
            out.push_str(&format!("  {:>width$}", cell, width = widths[x]));
        }
        out.push('\n');
    }
    out
}
