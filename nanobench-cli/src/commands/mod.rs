// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

use std::path::Path;

use nanobench_core::{BenchResult, Config, ConfigLoader};

pub mod list;
pub mod run;
pub mod validate;

/// Load the configuration file if one was given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> BenchResult<Config> {
    match path {
        Some(path) => ConfigLoader::load_file(path),
        None => Ok(Config::default()),
    }
}
