// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! RootChecker - device integrity probe
//!
//! Heuristic checks for rooted devices, emulators, proxied networking and
//! debuggable builds. Every query is total: a heuristic that cannot be
//! evaluated counts as not fired, so a `false` answer means "no evidence",
//! never "verified clean".
//!
//! Queries block on filesystem and process I/O; call them off the UI thread.
//!
//! ```no_run
//! use rootchecker_core::{ApplicationFlags, DeviceIntegrityProbe, ProbeConfig};
//!
//! let probe = DeviceIntegrityProbe::new(ProbeConfig::default());
//! let report = probe.report(&ApplicationFlags(0));
//! println!("rooted={} emulator={}", report.is_rooted, report.is_emulator);
//! ```

pub mod config;
pub mod debuggable;
pub mod emulator;
pub mod error;
pub mod indicators;
pub mod process;
pub mod properties;
pub mod proxy;
pub mod report;
pub mod root;

pub use config::ProbeConfig;
pub use debuggable::{is_debuggable, ApplicationDescriptor, ApplicationFlags, FLAG_DEBUGGABLE};
pub use emulator::BuildInfo;
pub use error::{ConfigError, ProbeError};
pub use properties::{GetpropCommand, SystemProperties};
pub use proxy::ProxySettings;
pub use report::IntegrityReport;
pub use root::{RootCheck, RootDetectionResult, RootDetector};

/// Entry point bundling the four integrity checks.
///
/// Holds no state between calls; every query re-reads the live system.
#[derive(Debug, Clone)]
pub struct DeviceIntegrityProbe<P = GetpropCommand> {
    config: ProbeConfig,
    properties: P,
}

impl DeviceIntegrityProbe {
    pub fn new(config: ProbeConfig) -> Self {
        let properties = GetpropCommand::new(config.getprop_command.clone());
        Self { config, properties }
    }
}

impl<P: SystemProperties> DeviceIntegrityProbe<P> {
    pub fn with_properties(config: ProbeConfig, properties: P) -> Self {
        Self { config, properties }
    }

    /// Root heuristics bound to the current `PATH`
    pub fn root_detector(&self) -> RootDetector<'_, P> {
        RootDetector::new(&self.config, &self.properties)
    }

    pub fn is_rooted(&self) -> bool {
        self.root_detector().is_rooted()
    }

    pub fn detect_root(&self) -> RootDetectionResult {
        self.root_detector().detect()
    }

    pub fn build_info(&self) -> BuildInfo {
        BuildInfo::from_properties(&self.properties)
    }

    pub fn is_emulator(&self) -> bool {
        self.build_info().is_emulator()
    }

    pub fn is_using_proxy(&self) -> bool {
        ProxySettings::from_process_env().is_using_proxy()
    }

    pub fn is_debuggable<A: ApplicationDescriptor + ?Sized>(&self, app: &A) -> bool {
        is_debuggable(app)
    }

    /// Runs every check, collecting all root indicators.
    pub fn report<A: ApplicationDescriptor + ?Sized>(&self, app: &A) -> IntegrityReport {
        let root = self.detect_root();
        IntegrityReport {
            is_rooted: root.is_rooted,
            is_emulator: self.is_emulator(),
            is_using_proxy: self.is_using_proxy(),
            is_debuggable: self.is_debuggable(app),
            root_detection_methods: root.detection_methods,
        }
    }
}

/// [`DeviceIntegrityProbe::is_rooted`] with the default configuration
pub fn is_rooted() -> bool {
    DeviceIntegrityProbe::new(ProbeConfig::default()).is_rooted()
}

/// [`DeviceIntegrityProbe::is_emulator`] with the default configuration
pub fn is_emulator() -> bool {
    DeviceIntegrityProbe::new(ProbeConfig::default()).is_emulator()
}

/// [`DeviceIntegrityProbe::is_using_proxy`] for the current process environment
pub fn is_using_proxy() -> bool {
    ProxySettings::from_process_env().is_using_proxy()
}
