// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure inside a single heuristic.
///
/// Never escapes a public query: the query boundary logs it and treats the
/// heuristic as not fired.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` has no stdin handle")]
    StdinUnavailable { program: String },

    #[error("failed to write to `{program}` stdin: {source}")]
    Stdin {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` did not exit within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
}

/// Failure loading a [`ProbeConfig`](crate::ProbeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
