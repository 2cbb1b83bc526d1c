// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! Emulator detection from build identification strings.

use serde::{Deserialize, Serialize};

use crate::indicators::{EMULATOR_HARDWARE, EMULATOR_INDICATORS, GENERIC_PREFIX, SDK_PRODUCT};
use crate::properties::SystemProperties;

/// Value the platform reports for a missing build field
pub const UNKNOWN: &str = "unknown";

/// Build identification strings of the running device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub fingerprint: String,
    pub model: String,
    pub manufacturer: String,
    pub brand: String,
    pub device: String,
    pub hardware: String,
    pub product: String,
}

impl BuildInfo {
    /// Reads the build fields from system properties.
    /// Missing or empty properties become `"unknown"`.
    pub fn from_properties<P: SystemProperties + ?Sized>(properties: &P) -> Self {
        let read = |name: &str| {
            properties
                .get(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        Self {
            fingerprint: read("ro.build.fingerprint"),
            model: read("ro.product.model"),
            manufacturer: read("ro.product.manufacturer"),
            brand: read("ro.product.brand"),
            device: read("ro.product.device"),
            hardware: read("ro.hardware"),
            product: read("ro.product.name"),
        }
    }

    pub fn is_emulator(&self) -> bool {
        let indicator_match = [&self.fingerprint, &self.model, &self.manufacturer]
            .into_iter()
            .any(|field| contains_any_ignore_case(field, EMULATOR_INDICATORS));

        indicator_match
            || (self.brand.starts_with(GENERIC_PREFIX) && self.device.starts_with(GENERIC_PREFIX))
            || self.product == SDK_PRODUCT
            || contains_any_ignore_case(&self.hardware, EMULATOR_HARDWARE)
    }
}

fn contains_any_ignore_case(haystack: &str, needles: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}
