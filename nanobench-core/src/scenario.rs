// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Named units of work and their measured results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::score::Score;

/// Result of a single scenario invocation.
pub type Outcome = Result<(), ScenarioError>;

/// A name bound to a zero-argument, possibly failing callback.
pub struct Scenario {
    name: String,
    code: Box<dyn FnMut() -> Outcome>,
}

impl Scenario {
    /// Create a scenario from a fallible callback.
    pub fn new<F>(name: impl Into<String>, code: F) -> Self
    where
        F: FnMut() -> Outcome + 'static,
    {
        Self {
            name: name.into(),
            code: Box::new(code),
        }
    }

    /// Create a scenario from an infallible callback.
    ///
    /// The return value is passed through `black_box` so the work producing it
    /// is not optimized away.
    pub fn from_fn<F, R>(name: impl Into<String>, mut f: F) -> Self
    where
        F: FnMut() -> R + 'static,
    {
        Self::new(name, move || {
            std::hint::black_box(f());
            Ok(())
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the callback once.
    pub fn invoke(&mut self) -> Outcome {
        (self.code)()
    }

    pub(crate) fn code_mut(&mut self) -> &mut (dyn FnMut() -> Outcome + 'static) {
        &mut *self.code
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A scenario's name paired with its final net score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub score: Score,
}

impl ScenarioResult {
    pub fn new(name: impl Into<String>, score: Score) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}
