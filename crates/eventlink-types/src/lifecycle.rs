//! Forward-only connector lifecycle.

use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, Result};

/// Lifecycle of a connector binding.
///
/// States only move forward: `Initialized -> Running -> Shutdown`. A binding
/// that never started may go straight to `Shutdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Initialized,
    Running,
    Shutdown,
}

impl LifecycleState {
    /// Wire-format string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Shutdown => "shutdown",
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Initialized => 0,
            Self::Running => 1,
            Self::Shutdown => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Initialized,
            1 => Self::Running,
            _ => Self::Shutdown,
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle flag shared between the controller and concurrent readers.
///
/// Writes use release ordering and reads use acquire ordering, so a reader
/// that observes `Running` also observes everything the controller did
/// before calling `start`.
#[derive(Debug)]
pub(crate) struct AtomicLifecycle(AtomicU8);

impl AtomicLifecycle {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(LifecycleState::Initialized.as_u8()))
    }

    pub(crate) fn load(&self) -> LifecycleState {
        LifecycleState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move to `to` if the current state is one of `allowed_from`.
    ///
    /// Returns the state that was replaced.
    pub(crate) fn advance(
        &self,
        allowed_from: &[LifecycleState],
        to: LifecycleState,
    ) -> Result<LifecycleState> {
        let mut current = self.load();
        loop {
            if !allowed_from.contains(&current) {
                return Err(DescriptorError::InvalidTransition { from: current, to });
            }
            match self.0.compare_exchange_weak(
                current.as_u8(),
                to.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(current),
                Err(actual) => current = LifecycleState::from_u8(actual),
            }
        }
    }
}
