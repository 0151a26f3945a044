// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Clock sources for wall-clock and per-thread CPU accounting.
//!
//! [`ThreadClock`] reads the calling thread's CPU clock directly through libc.
//! Values it produces are only meaningful on the thread that reads them, which
//! is why a harness instance must never be shared between measuring threads.
//! When the platform cannot report per-thread accounting the CPU, user and
//! system readings degrade to zero rather than failing.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// CPU time consumed by the current thread, in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub cpu: u64,
    pub user: u64,
    pub system: u64,
}

/// Time capability the measurement engine depends on.
pub trait ClockSource {
    /// Monotonic wall-clock reading in nanoseconds.
    fn wall_nanos(&self) -> u64;

    /// CPU, user and system time of the current thread.
    fn thread_times(&self) -> CpuTimes;
}

/// Default clock: `Instant` for wall time, thread CPU clocks for the rest.
#[derive(Debug, Clone, Copy)]
pub struct ThreadClock {
    origin: Instant,
}

impl ThreadClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Whether this platform reports per-thread CPU time at all.
    pub fn supports_thread_cpu_time() -> bool {
        cfg!(any(
            target_os = "linux",
            target_os = "android",
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd"
        ))
    }
}

impl Default for ThreadClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for ThreadClock {
    fn wall_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    fn thread_times(&self) -> CpuTimes {
        sys::thread_times()
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
mod sys {
    use super::CpuTimes;

    pub(super) fn thread_times() -> CpuTimes {
        let cpu = thread_cpu_nanos();

        let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
        // SAFETY: usage points to writable memory sized for a rusage struct
        let rc = unsafe { libc::getrusage(libc::RUSAGE_THREAD, usage.as_mut_ptr()) };
        if rc != 0 {
            // Fall back to attributing everything to user time.
            return CpuTimes {
                cpu,
                user: cpu,
                system: 0,
            };
        }
        // SAFETY: getrusage succeeded and initialized the struct
        let usage = unsafe { usage.assume_init() };

        CpuTimes {
            cpu,
            user: timeval_nanos(&usage.ru_utime),
            system: timeval_nanos(&usage.ru_stime),
        }
    }

    fn thread_cpu_nanos() -> u64 {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // SAFETY: ts is a valid, writable timespec
        let rc = unsafe { libc::clock_gettime(libc::CLOCK_THREAD_CPUTIME_ID, &mut ts) };
        if rc != 0 {
            return 0;
        }
        (ts.tv_sec.max(0) as u64) * 1_000_000_000 + ts.tv_nsec.max(0) as u64
    }

    fn timeval_nanos(tv: &libc::timeval) -> u64 {
        (tv.tv_sec.max(0) as u64) * 1_000_000_000 + (tv.tv_usec.max(0) as u64) * 1_000
    }
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
mod sys {
    use super::CpuTimes;

    pub(super) fn thread_times() -> CpuTimes {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // SAFETY: ts is a valid, writable timespec
        let rc = unsafe { libc::clock_gettime(libc::CLOCK_THREAD_CPUTIME_ID, &mut ts) };
        if rc != 0 {
            return CpuTimes::default();
        }
        let cpu = (ts.tv_sec.max(0) as u64) * 1_000_000_000 + ts.tv_nsec.max(0) as u64;

        // No per-thread user/system split here; system is derived as cpu - user.
        let user = cpu;
        CpuTimes {
            cpu,
            user,
            system: cpu - user,
        }
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
)))]
mod sys {
    use super::CpuTimes;

    pub(super) fn thread_times() -> CpuTimes {
        CpuTimes::default()
    }
}

/// Manually advanced clock for deterministic measurements.
///
/// Clones share the same reading. Wall time and CPU time move together and all
/// CPU time is attributed to user time. A workload simulates its cost by
/// calling [`ManualClock::advance`].
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `nanos`.
    pub fn advance(&self, nanos: u64) {
        self.now.set(self.now.get().saturating_add(nanos));
    }

    /// Current reading in nanoseconds.
    pub fn now(&self) -> u64 {
        self.now.get()
    }
}

impl ClockSource for ManualClock {
    fn wall_nanos(&self) -> u64 {
        self.now.get()
    }

    fn thread_times(&self) -> CpuTimes {
        let now = self.now.get();
        CpuTimes {
            cpu: now,
            user: now,
            system: 0,
        }
    }
}
