// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! Probe configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::indicators::PRIVILEGE_SHELL;

/// Tunables for [`DeviceIntegrityProbe`](crate::DeviceIntegrityProbe).
///
/// Every field has a default matching the behaviour of a stock Android
/// deployment, so `ProbeConfig::default()` is what most callers want.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Directory treated as `/` by the filesystem checks
    pub sysroot: PathBuf,
    /// Program spawned by the privilege-escalation probe
    pub su_command: String,
    /// Upper bound on the privilege probe's wait, in milliseconds.
    /// `None` waits until the child exits.
    pub su_timeout_ms: Option<u64>,
    /// Program used to read system properties
    pub getprop_command: String,
    /// Enables the `ro.debuggable` / `ro.secure` root indicator
    pub check_system_properties: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            sysroot: PathBuf::from("/"),
            su_command: PRIVILEGE_SHELL.to_string(),
            su_timeout_ms: None,
            getprop_command: "getprop".to_string(),
            check_system_properties: false,
        }
    }
}

impl ProbeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn su_timeout(&self) -> Option<Duration> {
        self.su_timeout_ms.map(Duration::from_millis)
    }

    /// Maps an absolute device path into the configured system root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if self.sysroot == Path::new("/") {
            return path.to_path_buf();
        }
        match path.strip_prefix("/") {
            Ok(relative) => self.sysroot.join(relative),
            Err(_) => self.sysroot.join(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults_match_stock_device() {
        let config = ProbeConfig::default();
        assert_eq!(config.sysroot, PathBuf::from("/"));
        assert_eq!(config.su_command, "su");
        assert_eq!(config.su_timeout(), None);
        assert!(!config.check_system_properties);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ProbeConfig::from_toml_str(
            r#"
            su_timeout_ms = 1500
            check_system_properties = true
            "#,
        )
        .unwrap();
        assert_eq!(config.su_timeout(), Some(Duration::from_millis(1500)));
        assert!(config.check_system_properties);
        assert_eq!(config.su_command, "su");
        assert_eq!(config.getprop_command, "getprop");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ProbeConfig::from_toml_str("su_timeout = 3").unwrap_err();
        assert_matches!(err, ConfigError::Parse(_));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProbeConfig::load("/nonexistent/rootchecker.toml").unwrap_err();
        assert_matches!(err, ConfigError::Io { .. });
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rootchecker.toml");
        fs::write(&path, "su_command = \"/system/xbin/su\"\n").unwrap();

        let config = ProbeConfig::load(&path).unwrap();
        assert_eq!(config.su_command, "/system/xbin/su");
    }

    #[test]
    fn test_resolve_under_sysroot() {
        let config = ProbeConfig {
            sysroot: PathBuf::from("/tmp/fixture"),
            ..ProbeConfig::default()
        };
        assert_eq!(
            config.resolve("/system/xbin/su"),
            PathBuf::from("/tmp/fixture/system/xbin/su")
        );
        assert_eq!(
            config.resolve("bin/su"),
            PathBuf::from("/tmp/fixture/bin/su")
        );
        assert_eq!(
            ProbeConfig::default().resolve("/sbin/su"),
            PathBuf::from("/sbin/su")
        );
    }
}
