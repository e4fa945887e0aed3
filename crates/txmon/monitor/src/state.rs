use std::sync::atomic::{AtomicBool, Ordering};

use txmon_types::MonitorState;

/// Sticky disablement flag shared by every report in one scope.
///
/// One-way: once disabled, stays disabled for the lifetime of the cell.
#[derive(Debug, Default)]
pub struct SharedMonitorState {
    disabled: AtomicBool,
}

impl SharedMonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> MonitorState {
        if self.is_disabled() {
            MonitorState::Disabled
        } else {
            MonitorState::Enabled
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Disable the monitor. Returns `true` if this call made the transition.
    pub fn disable(&self) -> bool {
        !self.disabled.swap(true, Ordering::SeqCst)
    }
}
