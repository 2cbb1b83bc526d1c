// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! System property access.

use crate::process;

/// Read-only view of the device's system properties.
#[cfg_attr(test, mockall::automock)]
pub trait SystemProperties {
    /// Returns the property value, or `None` when unset or unreadable.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads properties by spawning `getprop`.
#[derive(Debug, Clone)]
pub struct GetpropCommand {
    program: String,
}

impl GetpropCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SystemProperties for GetpropCommand {
    fn get(&self, name: &str) -> Option<String> {
        match process::read_property(&self.program, name) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("Property {} unavailable: {}", name, err);
                None
            }
        }
    }
}
