// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Measurement records and rate formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// One measurement: elapsed times in nanoseconds plus the iteration count
/// they cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// Wall-clock nanoseconds
    pub real: u64,
    /// Thread CPU nanoseconds
    pub cpu: u64,
    /// User-mode nanoseconds
    pub user: u64,
    /// Kernel-mode nanoseconds
    pub system: u64,
    /// Loop executions represented by this score
    pub iters: u64,
}

impl Score {
    pub fn new(real: u64, cpu: u64, user: u64, system: u64, iters: u64) -> Self {
        Self {
            real,
            cpu,
            user,
            system,
            iters,
        }
    }

    /// Field-wise sum, used to accumulate several passes.
    pub fn add(&self, other: &Score) -> Score {
        Score {
            real: self.real.saturating_add(other.real),
            cpu: self.cpu.saturating_add(other.cpu),
            user: self.user.saturating_add(other.user),
            system: self.system.saturating_add(other.system),
            iters: self.iters.saturating_add(other.iters),
        }
    }

    /// Field-wise difference clamped at zero. Keeps `self.iters`.
    pub fn diff(&self, baseline: &Score) -> Score {
        Score {
            real: self.real.saturating_sub(baseline.real),
            cpu: self.cpu.saturating_sub(baseline.cpu),
            user: self.user.saturating_sub(baseline.user),
            system: self.system.saturating_sub(baseline.system),
            iters: self.iters,
        }
    }

    pub fn cpu_secs(&self) -> f64 {
        self.cpu as f64 / NANOS_PER_SEC
    }

    /// User plus system time, in nanoseconds.
    pub fn elapsed(&self) -> u64 {
        self.user.saturating_add(self.system)
    }

    /// Iterations per second of user+system time; 0 when nothing was recorded.
    pub fn rate(&self) -> f64 {
        let elapsed = self.elapsed();
        if elapsed == 0 {
            return 0.0;
        }
        self.iters as f64 / (elapsed as f64 / NANOS_PER_SEC)
    }

    pub fn format_rate(&self) -> String {
        format_rate(self.rate())
    }

    /// Summary line in the classic `timestr` layout.
    pub fn timestr(&self) -> String {
        let mut out = format!(
            "{:2} wallclock secs ({:5.2} usr + {:5.2} sys = {:5.2} CPU)",
            self.real / 1_000_000_000,
            self.user as f64 / NANOS_PER_SEC,
            self.system as f64 / NANOS_PER_SEC,
            self.cpu as f64 / NANOS_PER_SEC,
        );
        if self.elapsed() > 0 {
            out.push_str(&format!(" @ {:5.2}/s (n={})", self.rate(), self.iters));
        }
        out
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.timestr())
    }
}

/// Format a rate with precision chosen by magnitude.
///
/// Ties round half away from zero, matching the percentages in the
/// comparison chart.
pub fn format_rate(rate: f64) -> String {
    let precision = if rate >= 100.0 {
        0
    } else if rate >= 10.0 {
        1
    } else if rate >= 1.0 {
        2
    } else if rate >= 0.1 {
        3
    } else {
        2
    };
    format!("{:.*}/s", precision, round_half_up(rate, precision))
}

fn round_half_up(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sums_every_field() {
        let a = Score::new(10, 20, 15, 5, 3);
        let b = Score::new(1, 2, 1, 1, 4);
        assert_eq!(a.add(&b), Score::new(11, 22, 16, 6, 7));
    }

    #[test]
    fn test_diff_clamps_at_zero() {
        let a = Score::new(100, 50, 40, 10, 8);
        let doubled = a.add(&a);

        let d = a.diff(&doubled);
        assert_eq!(d, Score::new(0, 0, 0, 0, 8));

        let d = doubled.diff(&a);
        assert_eq!(d, Score::new(100, 50, 40, 10, 16));
    }

    #[test]
    fn test_diff_keeps_measured_iters() {
        let measured = Score::new(500, 500, 500, 0, 1000);
        let empty = Score::new(100, 100, 100, 0, 1000);
        assert_eq!(measured.diff(&empty).iters, 1000);
    }

    #[test]
    fn test_rate() {
        // 100 iterations in one second of user time
        let score = Score::new(1_000_000_000, 1_000_000_000, 1_000_000_000, 0, 100);
        assert!((score.rate() - 100.0).abs() < 1e-9);

        // split between user and system
        let score = Score::new(0, 0, 250_000_000, 250_000_000, 50);
        assert!((score.rate() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_of_empty_score_is_zero() {
        let score = Score::default();
        assert_eq!(score.rate(), 0.0);
        assert_eq!(score.format_rate(), "0.00/s");
    }

    #[test]
    fn test_format_rate_precision() {
        assert_eq!(format_rate(5.0), "5.00/s");
        assert_eq!(format_rate(150.0), "150/s");
        assert_eq!(format_rate(0.05), "0.05/s");
        assert_eq!(format_rate(12.34), "12.3/s");
        assert_eq!(format_rate(0.25), "0.250/s");
        assert_eq!(format_rate(2885232.4), "2885232/s");
    }

    #[test]
    fn test_format_rate_rounds_ties_up() {
        assert_eq!(format_rate(150.5), "151/s");
        assert_eq!(format_rate(2885232.5), "2885233/s");
        assert_eq!(format_rate(1.125), "1.13/s");
        assert_eq!(format_rate(12.25), "12.3/s");
    }

    #[test]
    fn test_timestr() {
        let score = Score::new(2_100_000_000, 1_500_000_000, 1_250_000_000, 250_000_000, 300);
        assert_eq!(
            score.timestr(),
            " 2 wallclock secs ( 1.25 usr +  0.25 sys =  1.50 CPU) @ 200.00/s (n=300)"
        );
    }

    #[test]
    fn test_timestr_without_cpu_time_omits_rate() {
        let score = Score::default();
        assert_eq!(
            score.to_string(),
            " 0 wallclock secs ( 0.00 usr +  0.00 sys =  0.00 CPU)"
        );
    }
}
