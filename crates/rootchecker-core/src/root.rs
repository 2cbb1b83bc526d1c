// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! Root detection.
//!
//! Each heuristic covers a different way of rooting a device: an init-script
//! installer, binaries dropped into system directories, a hijacked `PATH`,
//! and a working privilege shell. A heuristic that errors is treated as not
//! fired; the others still run.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::indicators::{
    DANGEROUS_PROPERTIES, ROOT_BINARY_NAMES, ROOT_INDICATOR_PATHS, ROOT_INSTALL_DIR,
};
use crate::process;
use crate::properties::SystemProperties;

/// Root detection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootDetectionResult {
    pub is_rooted: bool,
    pub detection_methods: Vec<String>,
}

/// Individual root heuristics, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootCheck {
    InstallDirectory,
    BinaryPresence,
    SearchPath,
    PrivilegeEscalation,
    SystemProperty,
}

impl RootCheck {
    pub const ALL: [RootCheck; 5] = [
        RootCheck::InstallDirectory,
        RootCheck::BinaryPresence,
        RootCheck::SearchPath,
        RootCheck::PrivilegeEscalation,
        RootCheck::SystemProperty,
    ];
}

/// Runs the root heuristics against one environment snapshot.
pub struct RootDetector<'a, P: ?Sized> {
    config: &'a ProbeConfig,
    properties: &'a P,
    search_path: Option<OsString>,
}

impl<'a, P: SystemProperties + ?Sized> RootDetector<'a, P> {
    /// Captures the process `PATH` at construction.
    pub fn new(config: &'a ProbeConfig, properties: &'a P) -> Self {
        Self {
            config,
            properties,
            search_path: env::var_os("PATH"),
        }
    }

    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    /// Short-circuits on the first heuristic that fires.
    pub fn is_rooted(&self) -> bool {
        self.checks().any(|check| self.outcome(check).is_some())
    }

    /// Runs every enabled heuristic and names the ones that fired.
    pub fn detect(&self) -> RootDetectionResult {
        let detection_methods: Vec<String> = self
            .checks()
            .filter_map(|check| self.outcome(check))
            .collect();

        RootDetectionResult {
            is_rooted: !detection_methods.is_empty(),
            detection_methods,
        }
    }

    /// Runs a single heuristic, surfacing its internal failure.
    pub fn run(&self, check: RootCheck) -> Result<Option<String>, ProbeError> {
        match check {
            RootCheck::InstallDirectory => Ok(self.check_install_dir()),
            RootCheck::BinaryPresence => Ok(self.check_indicator_paths()),
            RootCheck::SearchPath => Ok(self.check_search_path()),
            RootCheck::PrivilegeEscalation => self.check_privilege_shell(),
            RootCheck::SystemProperty => Ok(self.check_system_properties()),
        }
    }

    fn checks(&self) -> impl Iterator<Item = RootCheck> + '_ {
        RootCheck::ALL.into_iter().filter(move |check| {
            *check != RootCheck::SystemProperty || self.config.check_system_properties
        })
    }

    fn outcome(&self, check: RootCheck) -> Option<String> {
        match self.run(check) {
            Ok(Some(method)) => {
                log::info!("Root indicator: {}", method);
                Some(method)
            }
            Ok(None) => None,
            Err(err) => {
                log::debug!("{:?} check skipped: {}", check, err);
                None
            }
        }
    }

    fn check_install_dir(&self) -> Option<String> {
        let path = self.config.resolve(ROOT_INSTALL_DIR);
        is_dir(&path).then(|| format!("Root installer directory found: {}", ROOT_INSTALL_DIR))
    }

    fn check_indicator_paths(&self) -> Option<String> {
        for prefix in ROOT_INDICATOR_PATHS {
            for name in ROOT_BINARY_NAMES {
                let candidate = format!("{}{}", prefix, name);
                if is_file(&self.config.resolve(&candidate)) {
                    return Some(format!("Root binary found: {}", candidate));
                }
            }
        }
        None
    }

    fn check_search_path(&self) -> Option<String> {
        let search_path = self.search_path.as_ref()?.to_string_lossy().into_owned();

        for dir in search_path.split(':').filter(|dir| !dir.is_empty()) {
            for name in ROOT_BINARY_NAMES {
                let candidate = Path::new(dir).join(name);
                if is_file(&self.config.resolve(&candidate)) {
                    return Some(format!("Root binary on PATH: {}", candidate.display()));
                }
            }
        }
        None
    }

    fn check_privilege_shell(&self) -> Result<Option<String>, ProbeError> {
        let program = &self.config.su_command;
        let fired = process::run_privilege_probe(program, self.config.su_timeout())?;
        Ok(fired.then(|| format!("Privilege shell accepted: {}", program)))
    }

    fn check_system_properties(&self) -> Option<String> {
        DANGEROUS_PROPERTIES.iter().find_map(|(name, dangerous)| {
            let value = self.properties.get(name)?;
            (value == *dangerous).then(|| format!("Dangerous property: {}={}", name, dangerous))
        })
    }
}

/// Stat errors, including permission denied, read as absent
fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
}

fn is_file(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
