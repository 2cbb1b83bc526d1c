// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! Fixed indicator sets used by the heuristics.

/// Directory used by init-script based root installers
pub const ROOT_INSTALL_DIR: &str = "/system/etc/init.d";

/// Directory prefixes known to host privilege binaries.
/// Each entry ends with `/` and is concatenated with a binary name as-is.
pub const ROOT_INDICATOR_PATHS: &[&str] = &[
    "/sbin/",
    "/system/bin/",
    "/system/xbin/",
    "/data/local/xbin/",
    "/data/local/bin/",
    "/system/sd/xbin/",
    "/system/bin/failsafe/",
    "/data/local/",
];

/// Binaries shipped by root tooling
pub const ROOT_BINARY_NAMES: &[&str] = &["su", "busybox"];

/// Conventional privilege-escalation shell
pub const PRIVILEGE_SHELL: &str = "su";

/// Command written to the privilege shell's stdin
pub const PRIVILEGE_PROBE_INPUT: &[u8] = b"exit\n";

/// System properties whose value indicates an insecure build
pub const DANGEROUS_PROPERTIES: &[(&str, &str)] = &[
    ("ro.debuggable", "1"),
    ("ro.secure", "0"),
];

/// Substrings found in emulator build metadata (matched case-insensitively)
pub const EMULATOR_INDICATORS: &[&str] = &[
    "generic",
    "unknown",
    "google_sdk",
    "Emulator",
    "Android SDK built for x86",
    "Genymotion",
    "sdk_gphone",
    "ranchu",
    "vbox86",
    "sdk",
    "Andy",
    "Droid4X",
    "ttVM_Hdragon",
    "vbox86p",
];

/// Hardware names of the stock emulator kernels
pub const EMULATOR_HARDWARE: &[&str] = &["goldfish", "ranchu"];

/// Prefix shared by brand and device on generic emulator images
pub const GENERIC_PREFIX: &str = "generic";

/// Product name of the legacy SDK emulator image
pub const SDK_PRODUCT: &str = "google_sdk";
