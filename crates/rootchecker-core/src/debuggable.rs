// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 RootChecker

//! Debuggable-build detection.

/// `ApplicationInfo.FLAG_DEBUGGABLE`
pub const FLAG_DEBUGGABLE: i32 = 1 << 1;

/// Host-supplied view of the application's build flags.
pub trait ApplicationDescriptor {
    fn flags(&self) -> i32;
}

/// Raw flags bitmask, as read from the host runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationFlags(pub i32);

impl ApplicationDescriptor for ApplicationFlags {
    fn flags(&self) -> i32 {
        self.0
    }
}

pub fn is_debuggable<A: ApplicationDescriptor + ?Sized>(app: &A) -> bool {
    app.flags() & FLAG_DEBUGGABLE != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debuggable_bit() {
        assert!(is_debuggable(&ApplicationFlags(FLAG_DEBUGGABLE)));
        // FLAG_SYSTEM | FLAG_DEBUGGABLE | FLAG_HAS_CODE
        assert!(is_debuggable(&ApplicationFlags(0x1 | 0x2 | 0x4)));
    }

    #[test]
    fn test_release_build() {
        assert!(!is_debuggable(&ApplicationFlags(0)));
        assert!(!is_debuggable(&ApplicationFlags(!FLAG_DEBUGGABLE)));
    }
}
