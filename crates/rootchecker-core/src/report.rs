// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

use serde::{Deserialize, Serialize};

/// Combined result of all four checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub is_rooted: bool,
    pub is_emulator: bool,
    pub is_using_proxy: bool,
    pub is_debuggable: bool,
    pub root_detection_methods: Vec<String>,
}
